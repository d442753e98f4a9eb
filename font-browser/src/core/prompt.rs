//! Minibuffer-style prompting. `StdioPrompter` works over any line-oriented
//! reader and writer (pipes, tests); the raw-mode terminal prompter lives in
//! `terminal`.
//!
//! Prompt failures (closed input, broken output) are logged and read as a
//! cancellation, never as an error in the panel.

use std::io::{BufRead, Write};

/// Host capability for asking the user something.
pub trait Prompter {
    /// Reads one line of free text. Returns an empty string when cancelled.
    fn read_string(&mut self, prompt: &str) -> String;

    /// Asks for one of `choices`. Input outside the list is rejected and
    /// asked again. `None` means the user gave up.
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Option<String>;

    /// Asks a yes/no question. Anything but an explicit yes is a no.
    fn yes_or_no(&mut self, prompt: &str) -> bool;
}

pub struct StdioPrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line without its line terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Writes `prompt` and reads the answer; logs and returns `None` on failure.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let result = write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .and_then(|_| self.next_line());
        match result {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Prompt failed: {}", e);
                None
            }
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            log::warn!("Failed to write prompt message: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
    fn read_string(&mut self, prompt: &str) -> String {
        self.ask(prompt).unwrap_or_default()
    }

    fn choose(&mut self, prompt: &str, choices: &[String]) -> Option<String> {
        loop {
            let answer = self.ask(prompt)?;
            let answer = answer.trim();
            if answer.is_empty() {
                return None;
            }
            let matches = match_choices(choices, answer);
            match matches.as_slice() {
                [only] => return Some(only.to_string()),
                [] => self.say("[No match]"),
                many => {
                    let listed: Vec<&str> = many.iter().map(|s| s.as_str()).collect();
                    self.say(&format!("Candidates: {}", listed.join(", ")));
                }
            }
        }
    }

    fn yes_or_no(&mut self, prompt: &str) -> bool {
        let prompt = format!("{}(yes or no) ", prompt);
        loop {
            let Some(answer) = self.ask(&prompt) else {
                return false;
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.say("Please answer yes or no."),
            }
        }
    }
}

/// Exact (case-insensitive) match wins; otherwise prefix matches, then
/// substring matches.
pub(crate) fn match_choices<'a>(choices: &'a [String], query: &str) -> Vec<&'a String> {
    let q = query.to_lowercase();
    if let Some(exact) = choices.iter().find(|c| c.to_lowercase() == q) {
        return vec![exact];
    }
    let starts: Vec<&String> = choices
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&q))
        .collect();
    if !starts.is_empty() {
        return starts;
    }
    choices
        .iter()
        .filter(|c| c.to_lowercase().contains(&q))
        .collect()
}
