pub mod commands;
pub mod core;

use std::io;

use crossterm::tty::IsTty;

use crate::core::{
    BrowserConfig, BrowserError, FontBrowser, SessionDisplayFont, StdioPrompter, SystemFontSource,
    TableView, TerminalPrompter,
};

/// Entry point for the font browser.
///
/// Initializes logging, loads the optional config (a broken config file is
/// logged and replaced by defaults), opens the panel over the system font
/// database, and drives it from single keys on a terminal or from
/// line commands on piped stdin until `quit` or end of input.
pub fn run() -> Result<(), BrowserError> {
    // Initialize logger for RUST_LOG environment variable support
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Font browser starting up...");

    let config = BrowserConfig::load().unwrap_or_else(|e| {
        log::error!("{}; using defaults", e);
        BrowserConfig::default()
    });

    let interactive = io::stdin().is_tty() && io::stdout().is_tty();
    let view = if interactive {
        TableView::new(io::stdout(), config.page_size).styled()
    } else {
        TableView::new(io::stdout(), config.page_size)
    };
    let mut browser = FontBrowser::new(
        view,
        Box::new(SystemFontSource::new()),
        Box::new(SessionDisplayFont::default()),
        &config,
    );
    browser.activate();

    let mut out = io::stdout();
    if interactive {
        log::debug!("stdin is a terminal, using key bindings");
        return commands::run_keys(&mut browser, &mut TerminalPrompter::new(), &mut out);
    }

    let stdin = io::stdin();
    let mut prompter = StdioPrompter::new(stdin.lock(), io::stdout());
    commands::run_loop(&mut browser, &mut prompter, &mut out)
}
