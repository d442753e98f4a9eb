pub mod config;
pub mod display_font;
pub mod error;
pub mod font_browser;
pub mod font_source;
pub mod list_view;
pub mod prompt;
pub mod rows;
pub mod scripts;
pub mod table_view;
pub mod terminal;

pub use config::BrowserConfig;
pub use display_font::{DisplayFontSetter, FontScope, SessionDisplayFont};
pub use error::BrowserError;
pub use font_browser::{FontBrowser, PanelState};
pub use font_source::{FontDescriptor, FontSource, SystemFontSource};
pub use list_view::{Column, ListView, SortKey};
pub use prompt::{Prompter, StdioPrompter};
pub use rows::{derive_rows, FontRow, StyledText};
pub use scripts::{Script, ScriptFilter, ScriptRegistry};
pub use table_view::TableView;
pub use terminal::{RawGuard, TerminalPrompter};
