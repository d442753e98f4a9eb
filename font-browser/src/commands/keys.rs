//! Single-key bindings for the panel when it runs on a terminal.
//!
//! Keys map onto the same `Command`s the line interface parses, so both
//! front ends share `execute`.

use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::fonts::{execute, Command, Flow};
use crate::core::error::BrowserError;
use crate::core::font_browser::FontBrowser;
use crate::core::list_view::ListView;
use crate::core::prompt::Prompter;
use crate::core::table_view::TableView;
use crate::core::terminal::{next_key, RawGuard};

const KEY_HELP: &str = "\
Keys:
  RET           apply the font on the current row
  n, j, Down    next row          p, k, Up      previous row
  SPC, PgDn, >  next page         PgUp, <       previous page
  Home / End    first / last row
  t             set the sample text
  s             filter by script
  F / T         sort by font / text (again to reverse)
  g             refresh           f             show the applied font
  ?             this help         q, Esc        quit";

/// Command bound to a key press, if any.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('n') => Some(Command::NextLine),
            KeyCode::Char('p') => Some(Command::PreviousLine),
            KeyCode::Char('v') => Some(Command::NextPage),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Enter => Command::Apply,
        KeyCode::Down | KeyCode::Char('n') | KeyCode::Char('j') => Command::NextLine,
        KeyCode::Up | KeyCode::Char('p') | KeyCode::Char('k') => Command::PreviousLine,
        KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('>') => Command::NextPage,
        KeyCode::PageUp | KeyCode::Char('<') => Command::PreviousPage,
        KeyCode::Home => Command::Goto(0),
        KeyCode::End => Command::Goto(usize::MAX),
        KeyCode::Char('t') => Command::SampleText(None),
        KeyCode::Char('s') => Command::Script(None),
        KeyCode::Char('g') => Command::Refresh,
        KeyCode::Char('F') => Command::Sort("font".to_string()),
        KeyCode::Char('T') => Command::Sort("text".to_string()),
        KeyCode::Char('f') => Command::ShowFont,
        KeyCode::Char('?') | KeyCode::Char('h') => Command::Help,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Drives the panel from key presses until quit.
///
/// Messages a command produces are shown under the table after it redraws.
pub fn run_keys<W: Write>(
    browser: &mut FontBrowser<TableView<W>>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<(), BrowserError> {
    let _guard = RawGuard::enter()?;
    browser.revert();

    loop {
        let Some(command) = command_for_key(next_key()?) else {
            continue;
        };
        let mut messages = Vec::new();
        let flow = match command {
            Command::Help => {
                writeln!(messages, "{}", KEY_HELP)?;
                Flow::Continue
            }
            command => execute(browser, prompter, &mut messages, command)?,
        };
        if flow == Flow::Quit {
            break;
        }
        if browser.is_active() {
            browser.view_mut().redraw()?;
        }
        for line in String::from_utf8_lossy(&messages).lines() {
            write!(out, "{}\r\n", line)?;
        }
        out.flush()?;
    }
    log::debug!("Key loop finished");
    Ok(())
}
