fn main() {
    if let Err(e) = font_browser_lib::run() {
        log::error!("font-browser failed: {}", e);
        eprintln!("font-browser: {}", e);
        std::process::exit(1);
    }
}
