//! The font browser panel.
//!
//! `FontBrowser` owns the two pieces of session state (sample text and
//! script filter) and rebuilds the view's rows from them on every refresh.
//! Commands issued while the panel is inactive are silently ignored.

use super::config::{BrowserConfig, DEFAULT_SAMPLE_TEXT};
use super::display_font::{DisplayFontSetter, FontScope};
use super::font_source::FontSource;
use super::list_view::{Column, ListView, SortKey};
use super::prompt::Prompter;
use super::rows::derive_rows;
use super::scripts::{ScriptFilter, ScriptRegistry};

pub const FONT_COLUMN: usize = 0;
pub const TEXT_COLUMN: usize = 1;

fn columns() -> Vec<Column> {
    vec![
        Column {
            name: "Font",
            width: 32,
            sortable: true,
        },
        Column {
            name: "Text",
            width: 48,
            sortable: true,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Inactive,
    Active,
}

pub struct FontBrowser<V: ListView> {
    state: PanelState,
    view: V,
    source: Box<dyn FontSource>,
    display: Box<dyn DisplayFontSetter>,
    placeholder: String,
    sample_text: String,
    script_filter: ScriptFilter,
    apply_scope: FontScope,
}

impl<V: ListView> FontBrowser<V> {
    /// Creates an inactive panel. Call `activate` to show it.
    pub fn new(
        view: V,
        source: Box<dyn FontSource>,
        display: Box<dyn DisplayFontSetter>,
        config: &BrowserConfig,
    ) -> Self {
        let placeholder = if config.sample_text.is_empty() {
            DEFAULT_SAMPLE_TEXT.to_string()
        } else {
            config.sample_text.clone()
        };
        Self {
            state: PanelState::Inactive,
            view,
            source,
            display,
            sample_text: placeholder.clone(),
            placeholder,
            script_filter: config.initial_filter(),
            apply_scope: config.apply_scope,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PanelState::Active
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn sample_text(&self) -> &str {
        &self.sample_text
    }

    pub fn script_filter(&self) -> ScriptFilter {
        self.script_filter
    }

    /// Family most recently applied as display font, if any.
    pub fn display_font(&self) -> Option<&str> {
        self.display.current_font()
    }

    /// Opens the panel, or refreshes it if already open.
    ///
    /// The first activation sets up the "Font" and "Text" columns sorted by
    /// font name; later activations reuse the view as is.
    pub fn activate(&mut self) {
        if self.state == PanelState::Inactive {
            self.view
                .configure(columns(), SortKey::ascending(FONT_COLUMN));
            self.state = PanelState::Active;
            log::debug!("Font browser activated");
        }
        self.revert();
    }

    /// Returns the panel to inactive. The view keeps its last contents.
    pub fn close(&mut self) {
        if self.state == PanelState::Active {
            self.state = PanelState::Inactive;
            log::debug!("Font browser closed");
        }
    }

    /// Redraw hook: rebuild rows from the current state and draw them.
    pub fn revert(&mut self) {
        if !self.is_active() {
            return;
        }
        self.refresh();
        if let Err(e) = self.view.redraw() {
            log::warn!("Failed to redraw font browser: {}", e);
        }
    }

    fn refresh(&mut self) {
        let rows = derive_rows(&self.sample_text, &self.script_filter, self.source.as_ref());
        log::debug!(
            "Refreshed font browser: {} families (script: {})",
            rows.len(),
            self.script_filter
        );
        self.view.set_rows(rows);
    }

    /// Adopts `input` as the sample text; empty input restores the
    /// placeholder. Returns `false` when the panel is inactive.
    pub fn set_sample_text(&mut self, input: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        self.sample_text = if input.is_empty() {
            self.placeholder.clone()
        } else {
            input.to_string()
        };
        self.revert();
        true
    }

    /// Restricts the panel to fonts supporting a script, or lifts the
    /// restriction. Returns `false` when the panel is inactive.
    pub fn set_script_filter(&mut self, filter: ScriptFilter) -> bool {
        if !self.is_active() {
            return false;
        }
        self.script_filter = filter;
        self.revert();
        true
    }

    /// Prompts for a sample text, then sets it.
    pub fn read_sample_text(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !self.is_active() {
            return false;
        }
        let input = prompter.read_string("Sample text: ");
        self.set_sample_text(&input)
    }

    /// Prompts for `none` or a known script, then sets the filter.
    /// Returns `false` if inactive or the prompt was abandoned.
    pub fn read_script_filter(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !self.is_active() {
            return false;
        }
        let choices = ScriptRegistry::prompt_choices();
        let Some(choice) = prompter.choose("Script: ", &choices) else {
            return false;
        };
        match ScriptFilter::from_name(&choice) {
            Ok(filter) => self.set_script_filter(filter),
            Err(e) => {
                log::warn!("Prompt returned a script outside the registry: {}", e);
                false
            }
        }
    }

    /// Asks to confirm, then applies the highlighted row's family as the
    /// display font. Returns `true` only if the font was applied.
    pub fn apply_font_from_current_row(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(family) = self.view.selected_id().map(str::to_string) else {
            return false;
        };
        if !prompter.yes_or_no(&format!("Set display font to {}? ", family)) {
            log::debug!("Declined to apply '{}'", family);
            return false;
        }
        self.display.set_display_font(&family, self.apply_scope);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::display_font::SessionDisplayFont;
    use crate::core::font_source::StaticFontSource;
    use crate::core::table_view::TableView;

    /// Scripted answers for prompts.
    struct Answers {
        strings: Vec<String>,
        confirm: bool,
        asked: Vec<String>,
    }

    impl Answers {
        fn new(strings: &[&str], confirm: bool) -> Self {
            Self {
                strings: strings.iter().rev().map(|s| s.to_string()).collect(),
                confirm,
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for Answers {
        fn read_string(&mut self, prompt: &str) -> String {
            self.asked.push(prompt.to_string());
            self.strings.pop().unwrap_or_default()
        }

        fn choose(&mut self, prompt: &str, choices: &[String]) -> Option<String> {
            self.asked.push(prompt.to_string());
            self.strings.pop().filter(|s| choices.contains(s))
        }

        fn yes_or_no(&mut self, prompt: &str) -> bool {
            self.asked.push(prompt.to_string());
            self.confirm
        }
    }

    fn browser() -> FontBrowser<TableView<Vec<u8>>> {
        browser_with(&BrowserConfig::default())
    }

    fn browser_with(config: &BrowserConfig) -> FontBrowser<TableView<Vec<u8>>> {
        let source = StaticFontSource::new(&[
            ("Noto Sans Tamil", "AZaz\u{0B95}"),
            ("DejaVu Sans", "AZaz\u{03A9}\u{03B1}\u{042F}"),
            ("Hack", "AZaz"),
            ("DejaVu Sans", "AZaz\u{03A9}\u{03B1}\u{042F}"),
            ("Latha", "\u{0B95}"),
        ]);
        FontBrowser::new(
            TableView::new(Vec::new(), 10),
            Box::new(source),
            Box::new(SessionDisplayFont::default()),
            config,
        )
    }

    fn families(b: &FontBrowser<TableView<Vec<u8>>>) -> Vec<&str> {
        b.view().rows().iter().map(|r| r.family.as_str()).collect()
    }

    #[test]
    fn test_activate_builds_sorted_rows() {
        let mut b = browser();
        assert_eq!(b.state(), PanelState::Inactive);
        assert!(b.view().rows().is_empty());

        b.activate();
        assert!(b.is_active());
        assert_eq!(families(&b), vec!["DejaVu Sans", "Hack", "Latha", "Noto Sans Tamil"]);
        assert!(b
            .view()
            .rows()
            .iter()
            .all(|r| r.sample.text == DEFAULT_SAMPLE_TEXT));

        let out = String::from_utf8(b.view().output().clone()).unwrap();
        assert!(out.contains("Font ^"));
        assert!(out.contains("4 fonts"));
    }

    #[test]
    fn test_activate_twice_reuses_view() {
        let mut b = browser();
        b.activate();
        b.view_mut().goto(2);
        b.view_mut().sort_by(FONT_COLUMN);
        b.activate();
        assert!(b.is_active());
        // sort direction and cursor survive reactivation
        assert!(b.view().sort_key().descending);
        assert_eq!(b.view().selected_id(), Some("Latha"));
    }

    #[test]
    fn test_set_sample_text() {
        let mut b = browser();
        b.activate();
        assert!(b.set_sample_text("Sphinx of black quartz"));
        assert_eq!(b.sample_text(), "Sphinx of black quartz");
        assert!(b
            .view()
            .rows()
            .iter()
            .all(|r| r.sample.text == "Sphinx of black quartz"));
    }

    #[test]
    fn test_empty_sample_text_restores_placeholder() {
        let mut b = browser();
        b.activate();
        b.set_sample_text("abc");
        assert!(b.set_sample_text(""));
        assert_eq!(b.sample_text(), DEFAULT_SAMPLE_TEXT);
        assert!(b
            .view()
            .rows()
            .iter()
            .all(|r| r.sample.text == DEFAULT_SAMPLE_TEXT));
    }

    #[test]
    fn test_configured_placeholder() {
        let config = BrowserConfig {
            sample_text: "Hamburgefonstiv".to_string(),
            ..BrowserConfig::default()
        };
        let mut b = browser_with(&config);
        b.activate();
        b.set_sample_text("x");
        b.set_sample_text("");
        assert_eq!(b.sample_text(), "Hamburgefonstiv");
    }

    #[test]
    fn test_commands_ignored_when_inactive() {
        let mut b = browser();
        let mut answers = Answers::new(&["new text", "greek"], true);
        assert!(!b.set_sample_text("x"));
        assert!(!b.set_script_filter(ScriptFilter::from_name("greek").unwrap()));
        assert!(!b.read_sample_text(&mut answers));
        assert!(!b.read_script_filter(&mut answers));
        assert!(!b.apply_font_from_current_row(&mut answers));
        assert!(answers.asked.is_empty());
        assert_eq!(b.sample_text(), DEFAULT_SAMPLE_TEXT);
        assert_eq!(b.script_filter(), ScriptFilter::None);
        assert!(b.view().rows().is_empty());
    }

    #[test]
    fn test_script_filter_narrows_and_widens() {
        let mut b = browser();
        b.activate();
        assert!(b.set_script_filter(ScriptFilter::from_name("tamil").unwrap()));
        assert_eq!(families(&b), vec!["Latha", "Noto Sans Tamil"]);
        let filtered = b.view().rows().len();

        assert!(b.set_script_filter(ScriptFilter::None));
        assert!(b.view().rows().len() >= filtered);
        assert_eq!(b.view().rows().len(), 4);
    }

    #[test]
    fn test_filter_with_no_fonts_gives_empty_panel() {
        let mut b = browser();
        b.activate();
        assert!(b.set_script_filter(ScriptFilter::from_name("han").unwrap()));
        assert!(b.view().rows().is_empty());
        assert_eq!(b.view().selected_id(), None);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut b = browser();
        b.activate();
        let before = b.view().rows().to_vec();
        b.revert();
        assert_eq!(b.view().rows(), before.as_slice());
    }

    #[test]
    fn test_read_prompts() {
        let mut b = browser();
        b.activate();
        let mut answers = Answers::new(&["hello", "greek"], true);
        assert!(b.read_sample_text(&mut answers));
        assert!(b.read_script_filter(&mut answers));
        assert_eq!(b.sample_text(), "hello");
        assert_eq!(b.script_filter().name(), "greek");
        assert_eq!(families(&b), vec!["DejaVu Sans"]);
        assert_eq!(answers.asked, vec!["Sample text: ", "Script: "]);

        // an abandoned script prompt leaves the filter alone
        let mut answers = Answers::new(&["klingon"], true);
        assert!(!b.read_script_filter(&mut answers));
        assert_eq!(b.script_filter().name(), "greek");
    }

    #[test]
    fn test_apply_font_confirmed() {
        let mut b = browser();
        b.activate();
        b.view_mut().goto(1);
        let mut answers = Answers::new(&[], true);
        assert!(b.apply_font_from_current_row(&mut answers));
        assert_eq!(b.display_font(), Some("Hack"));
        assert_eq!(answers.asked, vec!["Set display font to Hack? "]);
    }

    #[test]
    fn test_apply_font_declined() {
        let mut b = browser();
        b.activate();
        let mut answers = Answers::new(&[], false);
        assert!(!b.apply_font_from_current_row(&mut answers));
        assert_eq!(b.display_font(), None);
        assert_eq!(answers.asked.len(), 1);
    }

    #[test]
    fn test_apply_font_without_selection() {
        let mut b = browser();
        b.activate();
        b.set_script_filter(ScriptFilter::from_name("han").unwrap());
        let mut answers = Answers::new(&[], true);
        assert!(!b.apply_font_from_current_row(&mut answers));
        assert_eq!(b.display_font(), None);
        assert!(answers.asked.is_empty());
    }

    #[test]
    fn test_close_then_reopen() {
        let mut b = browser();
        b.activate();
        b.close();
        assert_eq!(b.state(), PanelState::Inactive);
        assert!(!b.set_sample_text("ignored"));
        b.activate();
        assert!(b.set_sample_text("kept"));
        assert_eq!(b.sample_text(), "kept");
    }
}
