//! Terminal commands for the font browser panel.
//!
//! One command per input line. An empty line acts like RET on the current
//! row and applies its font.

use std::io::{BufRead, Write};

use crate::core::error::BrowserError;
use crate::core::font_browser::FontBrowser;
use crate::core::list_view::ListView;
use crate::core::prompt::{Prompter, StdioPrompter};
use crate::core::scripts::ScriptFilter;
use crate::core::table_view::TableView;

const HELP: &str = "\
Commands:
  t [TEXT]      set the sample text (empty resets it)
  s [SCRIPT]    filter by script, `none` shows all fonts
  RET, a        apply the font on the current row
  n / p         next / previous row
  goto N        jump to row N (1-based)
  > / <         next / previous page
  sort COLUMN   sort by `font` or `text` (again to reverse)
  g             refresh
  font          show the applied display font
  json          print the rows as JSON
  open / close  open or close the panel
  q             quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Refresh,
    SampleText(Option<String>),
    Script(Option<String>),
    Apply,
    NextLine,
    PreviousLine,
    Goto(usize),
    NextPage,
    PreviousPage,
    Sort(String),
    ShowFont,
    Json,
    Help,
    Quit,
    Unknown(String),
}

/// Whether the command loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_start();
        // Only the single separator after the command word is dropped, so
        // sample text keeps its own leading and trailing spaces.
        let (word, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let verbatim = (!raw.is_empty()).then(|| raw.to_string());
        let rest = raw.trim();
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match word {
            "" | "a" | "apply" => Command::Apply,
            "open" => Command::Open,
            "close" => Command::Close,
            "g" | "refresh" => Command::Refresh,
            "t" | "text" => Command::SampleText(verbatim),
            "s" | "script" => Command::Script(arg),
            "n" | "next" => Command::NextLine,
            "p" | "prev" => Command::PreviousLine,
            ">" => Command::NextPage,
            "<" => Command::PreviousPage,
            "goto" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::Goto(n - 1),
                _ => Command::Unknown(line.trim_end().to_string()),
            },
            "sort" => Command::Sort(arg.unwrap_or_else(|| "font".to_string())),
            "font" => Command::ShowFont,
            "json" => Command::Json,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.trim_end().to_string()),
        }
    }
}

/// Runs one command against the panel.
///
/// Row, page, and sort commands are ignored while the panel is closed, the
/// same way the panel's own operations are.
pub fn execute<W: Write>(
    browser: &mut FontBrowser<TableView<W>>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    command: Command,
) -> Result<Flow, BrowserError> {
    match command {
        Command::Open => browser.activate(),
        Command::Close => browser.close(),
        Command::Refresh => browser.revert(),
        Command::SampleText(Some(text)) => {
            browser.set_sample_text(&text);
        }
        Command::SampleText(None) => {
            browser.read_sample_text(prompter);
        }
        Command::Script(Some(name)) => match ScriptFilter::from_name(&name) {
            Ok(filter) => {
                browser.set_script_filter(filter);
            }
            Err(e) => writeln!(out, "{}", e)?,
        },
        Command::Script(None) => {
            browser.read_script_filter(prompter);
        }
        Command::Apply => {
            if browser.apply_font_from_current_row(prompter) {
                if let Some(family) = browser.display_font() {
                    writeln!(out, "Display font set to {}", family)?;
                }
            }
        }
        Command::NextLine => navigate(browser, |view| view.next_line())?,
        Command::PreviousLine => navigate(browser, |view| view.previous_line())?,
        Command::NextPage => navigate(browser, |view| {
            view.next_page();
        })?,
        Command::PreviousPage => navigate(browser, |view| {
            view.previous_page();
        })?,
        Command::Goto(index) => {
            if browser.is_active() && !browser.view().rows().is_empty() {
                let last = browser.view().rows().len() - 1;
                navigate(browser, |view| {
                    view.goto(index.min(last));
                })?;
            }
        }
        Command::Sort(name) => {
            if browser.is_active() {
                match browser.view().column_index(&name) {
                    Some(column) => navigate(browser, |view| {
                        view.sort_by(column);
                    })?,
                    None => writeln!(out, "Unknown column: {} (try `font` or `text`)", name)?,
                }
            }
        }
        Command::ShowFont => match browser.display_font() {
            Some(family) => writeln!(out, "Display font: {}", family)?,
            None => writeln!(out, "Display font: (unchanged)")?,
        },
        Command::Json => {
            if browser.is_active() {
                let json = serde_json::to_string_pretty(browser.view().rows())?;
                writeln!(out, "{}", json)?;
            }
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
        Command::Unknown(line) => writeln!(out, "Unknown command: {} (try `help`)", line)?,
    }
    out.flush()?;
    Ok(Flow::Continue)
}

/// Applies a cursor/page/sort change and redraws, if the panel is open.
fn navigate<W: Write>(
    browser: &mut FontBrowser<TableView<W>>,
    change: impl FnOnce(&mut TableView<W>),
) -> Result<(), BrowserError> {
    if !browser.is_active() {
        return Ok(());
    }
    let view = browser.view_mut();
    change(view);
    view.redraw()
}

/// Reads commands until `quit` or end of input.
pub fn run_loop<W, R, P>(
    browser: &mut FontBrowser<TableView<W>>,
    prompter: &mut StdioPrompter<R, P>,
    out: &mut dyn Write,
) -> Result<(), BrowserError>
where
    W: Write,
    R: BufRead,
    P: Write,
{
    loop {
        write!(out, "font-browser> ")?;
        out.flush()?;
        let Some(line) = prompter.next_line()? else {
            break;
        };
        if execute(browser, prompter, out, Command::parse(&line))? == Flow::Quit {
            break;
        }
    }
    log::debug!("Command loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BrowserConfig;
    use crate::core::display_font::SessionDisplayFont;
    use crate::core::font_source::StaticFontSource;

    type TestBrowser = FontBrowser<TableView<Vec<u8>>>;

    fn browser() -> TestBrowser {
        let source = StaticFontSource::new(&[
            ("Hack", "AZaz"),
            ("DejaVu Sans", "AZaz\u{03A9}\u{03B1}"),
            ("Noto Sans Tamil", "AZaz\u{0B95}"),
        ]);
        let mut browser = FontBrowser::new(
            TableView::new(Vec::new(), 2),
            Box::new(source),
            Box::new(SessionDisplayFont::default()),
            &BrowserConfig::default(),
        );
        browser.activate();
        browser
    }

    fn run(browser: &mut TestBrowser, input: &str) -> String {
        let mut prompter = StdioPrompter::new(input.as_bytes(), Vec::new());
        let mut out = Vec::new();
        run_loop(browser, &mut prompter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse(""), Command::Apply);
        assert_eq!(Command::parse("t"), Command::SampleText(None));
        assert_eq!(
            Command::parse("t Sphinx of black quartz"),
            Command::SampleText(Some("Sphinx of black quartz".to_string()))
        );
        assert_eq!(Command::parse("s tamil"), Command::Script(Some("tamil".to_string())));
        assert_eq!(Command::parse("goto 3"), Command::Goto(2));
        assert_eq!(Command::parse("goto 0"), Command::Unknown("goto 0".to_string()));
        assert_eq!(Command::parse("sort"), Command::Sort("font".to_string()));
        assert_eq!(Command::parse(" q "), Command::Quit);
        assert_eq!(Command::parse("frobnicate"), Command::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn test_inline_sample_text_is_verbatim() {
        assert_eq!(
            Command::parse("t   two  spaces  "),
            Command::SampleText(Some("  two  spaces  ".to_string()))
        );
        assert_eq!(Command::parse("t  "), Command::SampleText(Some(" ".to_string())));

        let mut b = browser();
        run(&mut b, "t   two  spaces  \n");
        assert_eq!(b.sample_text(), "  two  spaces  ");
        assert!(b.view().rows().iter().all(|r| r.sample.text == "  two  spaces  "));
    }

    #[test]
    fn test_sample_text_and_script_commands() {
        let mut b = browser();
        run(&mut b, "t hello\ns tamil\n");
        assert_eq!(b.sample_text(), "hello");
        assert_eq!(b.script_filter().name(), "tamil");
        assert_eq!(b.view().rows().len(), 1);
    }

    #[test]
    fn test_prompted_commands() {
        let mut b = browser();
        // `t` prompts for the text, `s` prompts for the script
        run(&mut b, "t\nquick fox\ns\ngree\n");
        assert_eq!(b.sample_text(), "quick fox");
        assert_eq!(b.script_filter().name(), "greek");
    }

    #[test]
    fn test_unknown_script_argument_is_reported() {
        let mut b = browser();
        let out = run(&mut b, "s elvish\n");
        assert!(out.contains("unknown script: elvish"));
        assert_eq!(b.script_filter(), ScriptFilter::None);
    }

    #[test]
    fn test_apply_with_confirmation() {
        let mut b = browser();
        // rows sorted: DejaVu Sans, Hack, Noto Sans Tamil
        let out = run(&mut b, "n\n\nyes\nfont\n");
        assert_eq!(b.display_font(), Some("Hack"));
        assert!(out.contains("Display font set to Hack"));
        assert!(out.contains("Display font: Hack"));
    }

    #[test]
    fn test_apply_declined() {
        let mut b = browser();
        run(&mut b, "apply\nno\n");
        assert_eq!(b.display_font(), None);
    }

    #[test]
    fn test_paging_and_goto() {
        let mut b = browser();
        run(&mut b, ">\n");
        assert_eq!(b.view().page(), 1);
        assert_eq!(b.view().selected_id(), Some("Noto Sans Tamil"));
        run(&mut b, "<\ngoto 99\n");
        assert_eq!(b.view().selected_id(), Some("Noto Sans Tamil"));
        run(&mut b, "goto 1\n");
        assert_eq!(b.view().selected_id(), Some("DejaVu Sans"));
    }

    #[test]
    fn test_sort_command() {
        let mut b = browser();
        run(&mut b, "sort font\n");
        let ids: Vec<&str> = b.view().rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["Noto Sans Tamil", "Hack", "DejaVu Sans"]);
    }

    #[test]
    fn test_unknown_sort_column_is_reported() {
        let mut b = browser();
        let out = run(&mut b, "sort size\n");
        assert!(out.contains("Unknown column: size"));
        assert!(!b.view().sort_key().descending);
        let ids: Vec<&str> = b.view().rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["DejaVu Sans", "Hack", "Noto Sans Tamil"]);
    }

    #[test]
    fn test_json_ignored_when_closed() {
        let mut b = browser();
        let out = run(&mut b, "close\njson\n");
        assert!(!out.contains("\"family\""));
        let out = run(&mut b, "open\njson\n");
        assert!(out.contains("\"family\": \"Hack\""));
    }

    #[test]
    fn test_close_ignores_commands_until_open() {
        let mut b = browser();
        run(&mut b, "close\nt ignored\nn\n");
        assert!(!b.is_active());
        assert_ne!(b.sample_text(), "ignored");
        run(&mut b, "open\nt kept\n");
        assert_eq!(b.sample_text(), "kept");
    }

    #[test]
    fn test_json_export() {
        let mut b = browser();
        let out = run(&mut b, "t abc\njson\nq\nt never\n");
        assert!(out.contains("\"family\": \"DejaVu Sans\""));
        assert!(out.contains("\"text\": \"abc\""));
        // nothing after quit runs
        assert_eq!(b.sample_text(), "abc");
    }

    #[test]
    fn test_help_and_unknown() {
        let mut b = browser();
        let out = run(&mut b, "help\nfrobnicate\n");
        assert!(out.contains("Commands:"));
        assert!(out.contains("Unknown command: frobnicate"));
    }
}
