pub mod fonts;
pub mod keys;

pub use fonts::{execute, run_loop, Command, Flow};
pub use keys::{command_for_key, run_keys};
