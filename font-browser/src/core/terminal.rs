//! Raw-mode terminal prompts using crossterm.
//!
//! Key handling lives in small state types (`LineInput`, `Selection`,
//! `confirm_key`) so it can be exercised without a terminal; the
//! `TerminalPrompter` only reads keys and draws.

use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Stylize};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, QueueableCommand};

use super::prompt::{match_choices, Prompter};

/// Candidates shown at once by the select prompt.
const VISIBLE_CANDIDATES: usize = 6;

/// Enables raw mode and restores the previous mode when dropped. Nested
/// guards leave raw mode to the outermost one.
pub struct RawGuard {
    enabled_here: bool,
}

impl RawGuard {
    pub fn enter() -> io::Result<Self> {
        if terminal::is_raw_mode_enabled()? {
            return Ok(Self {
                enabled_here: false,
            });
        }
        terminal::enable_raw_mode()?;
        Ok(Self { enabled_here: true })
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        if self.enabled_here {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Esc, Ctrl-C and Ctrl-G abandon a prompt.
pub(crate) fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('g')))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    Continue,
    Submit,
    Cancel,
}

/// Single-line text being typed.
#[derive(Debug, Default)]
pub(crate) struct LineInput {
    text: String,
}

impl LineInput {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn handle(&mut self, key: KeyEvent) -> Edit {
        if is_cancel(&key) {
            return Edit::Cancel;
        }
        match key.code {
            KeyCode::Enter => Edit::Submit,
            KeyCode::Backspace => {
                self.text.pop();
                Edit::Continue
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
                Edit::Continue
            }
            _ => Edit::Continue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pick {
    Pending,
    Chosen(String),
    Cancelled,
}

/// Incremental search over a fixed list of choices. Only a listed choice can
/// be submitted.
pub(crate) struct Selection<'a> {
    choices: &'a [String],
    input: LineInput,
    highlight: usize,
}

impl<'a> Selection<'a> {
    pub(crate) fn new(choices: &'a [String]) -> Self {
        Self {
            choices,
            input: LineInput::default(),
            highlight: 0,
        }
    }

    /// Everything while the query is empty, otherwise the filtered matches.
    pub(crate) fn candidates(&self) -> Vec<&'a String> {
        let query = self.input.text().trim();
        if query.is_empty() {
            self.choices.iter().collect()
        } else {
            match_choices(self.choices, query)
        }
    }

    pub(crate) fn highlighted(&self) -> Option<&'a String> {
        self.candidates().get(self.highlight).copied()
    }

    pub(crate) fn handle(&mut self, key: KeyEvent) -> Pick {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.highlight = self.highlight.saturating_sub(1);
                return Pick::Pending;
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.highlight + 1 < self.candidates().len() {
                    self.highlight += 1;
                }
                return Pick::Pending;
            }
            _ => {}
        }
        match self.input.handle(key) {
            Edit::Cancel => Pick::Cancelled,
            Edit::Submit => match self.highlighted() {
                Some(choice) => Pick::Chosen(choice.to_string()),
                None => Pick::Pending,
            },
            Edit::Continue => {
                self.highlight = 0;
                Pick::Pending
            }
        }
    }
}

/// `y` answers yes; `n` or a cancel key answers no; other keys are ignored.
pub(crate) fn confirm_key(key: &KeyEvent) -> Option<bool> {
    if is_cancel(key) {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(false),
        _ => None,
    }
}

/// Blocks until the next key press.
pub fn next_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

/// `Prompter` reading keys from the terminal in raw mode.
pub struct TerminalPrompter {
    out: Stdout,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn draw_prompt(&mut self, prompt: &str, text: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveToColumn(0))?;
        self.out.queue(terminal::Clear(ClearType::CurrentLine))?;
        self.out.queue(style::PrintStyledContent("? ".green()))?;
        self.out.queue(style::Print(prompt))?;
        self.out.queue(style::Print(text))?;
        Ok(())
    }

    fn finish(&mut self, answer: &str) -> io::Result<()> {
        self.out.queue(style::PrintStyledContent(answer.dark_grey()))?;
        self.out.queue(style::Print("\r\n"))?;
        self.out.flush()
    }

    fn read_string_inner(&mut self, prompt: &str) -> io::Result<String> {
        let _guard = RawGuard::enter()?;
        let mut input = LineInput::default();
        loop {
            self.draw_prompt(prompt, input.text())?;
            self.out.flush()?;
            match input.handle(next_key()?) {
                Edit::Continue => {}
                Edit::Submit => {
                    self.finish("")?;
                    return Ok(input.text().to_string());
                }
                Edit::Cancel => {
                    self.finish("  (cancelled)")?;
                    return Ok(String::new());
                }
            }
        }
    }

    fn draw_selection(&mut self, prompt: &str, selection: &Selection) -> io::Result<()> {
        self.draw_prompt(prompt, selection.input.text())?;
        let candidates = selection.candidates();
        if candidates.is_empty() {
            self.out.queue(style::PrintStyledContent("  [No match]".red()))?;
            return self.out.flush();
        }
        let start = selection.highlight - selection.highlight % VISIBLE_CANDIDATES;
        self.out.queue(style::Print("  "))?;
        for (i, candidate) in candidates
            .iter()
            .enumerate()
            .skip(start)
            .take(VISIBLE_CANDIDATES)
        {
            if i == selection.highlight {
                self.out
                    .queue(style::PrintStyledContent(candidate.as_str().reverse()))?;
            } else {
                self.out
                    .queue(style::PrintStyledContent(candidate.as_str().dark_grey()))?;
            }
            self.out.queue(style::Print(" "))?;
        }
        if start + VISIBLE_CANDIDATES < candidates.len() {
            self.out.queue(style::PrintStyledContent("…".dark_grey()))?;
        }
        self.out.flush()
    }

    fn choose_inner(&mut self, prompt: &str, choices: &[String]) -> io::Result<Option<String>> {
        let _guard = RawGuard::enter()?;
        let mut selection = Selection::new(choices);
        loop {
            self.draw_selection(prompt, &selection)?;
            match selection.handle(next_key()?) {
                Pick::Pending => {}
                Pick::Chosen(choice) => {
                    self.draw_prompt(prompt, "")?;
                    self.finish(&choice)?;
                    return Ok(Some(choice));
                }
                Pick::Cancelled => {
                    self.draw_prompt(prompt, "")?;
                    self.finish("(cancelled)")?;
                    return Ok(None);
                }
            }
        }
    }

    fn yes_or_no_inner(&mut self, prompt: &str) -> io::Result<bool> {
        let _guard = RawGuard::enter()?;
        self.draw_prompt(prompt, "")?;
        self.out.queue(style::PrintStyledContent("(y or n) ".dark_grey()))?;
        self.out.flush()?;
        loop {
            if let Some(answer) = confirm_key(&next_key()?) {
                self.finish(if answer { "Yes" } else { "No" })?;
                return Ok(answer);
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn read_string(&mut self, prompt: &str) -> String {
        self.read_string_inner(prompt).unwrap_or_else(|e| {
            log::warn!("Prompt failed: {}", e);
            String::new()
        })
    }

    fn choose(&mut self, prompt: &str, choices: &[String]) -> Option<String> {
        self.choose_inner(prompt, choices).unwrap_or_else(|e| {
            log::warn!("Prompt failed: {}", e);
            None
        })
    }

    fn yes_or_no(&mut self, prompt: &str) -> bool {
        self.yes_or_no_inner(prompt).unwrap_or_else(|e| {
            log::warn!("Prompt failed: {}", e);
            false
        })
    }
}
