//! Script registry and the panel's script filter.
//!
//! Each script is identified by a lowercase symbolic name and carries a few
//! representative characters. A face counts as supporting a script when it
//! has a glyph for every one of them.

use std::fmt;

use super::error::BrowserError;

/// Name accepted by the script prompt to clear the filter.
pub const NO_SCRIPT: &str = "none";

/// A writing system known to the registry.
#[derive(Debug, PartialEq, Eq)]
pub struct Script {
    pub name: &'static str,
    pub representative_chars: &'static [char],
}

static SCRIPTS: &[Script] = &[
    Script { name: "latin", representative_chars: &['A', 'Z', 'a', 'z'] },
    Script { name: "greek", representative_chars: &['\u{03A9}', '\u{03B1}'] },
    Script { name: "cyrillic", representative_chars: &['\u{042F}'] },
    Script { name: "armenian", representative_chars: &['\u{0531}'] },
    Script { name: "hebrew", representative_chars: &['\u{05D0}'] },
    Script { name: "arabic", representative_chars: &['\u{0639}'] },
    Script { name: "syriac", representative_chars: &['\u{0710}'] },
    Script { name: "thaana", representative_chars: &['\u{078C}'] },
    Script { name: "devanagari", representative_chars: &['\u{0915}'] },
    Script { name: "bengali", representative_chars: &['\u{0995}'] },
    Script { name: "gurmukhi", representative_chars: &['\u{0A15}'] },
    Script { name: "gujarati", representative_chars: &['\u{0A95}'] },
    Script { name: "oriya", representative_chars: &['\u{0B15}'] },
    Script { name: "tamil", representative_chars: &['\u{0B95}'] },
    Script { name: "telugu", representative_chars: &['\u{0C15}'] },
    Script { name: "kannada", representative_chars: &['\u{0C95}'] },
    Script { name: "malayalam", representative_chars: &['\u{0D15}'] },
    Script { name: "sinhala", representative_chars: &['\u{0D9A}'] },
    Script { name: "thai", representative_chars: &['\u{0E01}'] },
    Script { name: "lao", representative_chars: &['\u{0E81}'] },
    Script { name: "tibetan", representative_chars: &['\u{0F40}'] },
    Script { name: "burmese", representative_chars: &['\u{1000}'] },
    Script { name: "georgian", representative_chars: &['\u{10D3}'] },
    Script { name: "hangul", representative_chars: &['\u{D55C}', '\u{AE00}'] },
    Script { name: "ethiopic", representative_chars: &['\u{1200}'] },
    Script { name: "cherokee", representative_chars: &['\u{13A0}'] },
    Script { name: "canadian-aboriginal", representative_chars: &['\u{1401}'] },
    Script { name: "ogham", representative_chars: &['\u{1681}'] },
    Script { name: "runic", representative_chars: &['\u{16A0}'] },
    Script { name: "khmer", representative_chars: &['\u{1780}'] },
    Script { name: "mongolian", representative_chars: &['\u{1820}'] },
    Script { name: "kana", representative_chars: &['\u{3042}', '\u{30A2}'] },
    Script { name: "han", representative_chars: &['\u{4E2D}', '\u{6587}'] },
];

/// Read-only access to the static script table.
pub struct ScriptRegistry;

impl ScriptRegistry {
    /// Every known script, in registry order.
    pub fn all() -> &'static [Script] {
        SCRIPTS
    }

    /// Case-insensitive lookup by symbolic name.
    pub fn lookup(name: &str) -> Option<&'static Script> {
        let name = name.trim();
        SCRIPTS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Choices offered by the script prompt: `none` first, then every script.
    pub fn prompt_choices() -> Vec<String> {
        std::iter::once(NO_SCRIPT)
            .chain(SCRIPTS.iter().map(|s| s.name))
            .map(str::to_string)
            .collect()
    }
}

/// Optional restriction of the panel to fonts supporting one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptFilter {
    #[default]
    None,
    Script(&'static Script),
}

impl ScriptFilter {
    /// Resolves `none` or a registry name. Anything else is rejected.
    pub fn from_name(name: &str) -> Result<Self, BrowserError> {
        if name.trim().eq_ignore_ascii_case(NO_SCRIPT) {
            return Ok(ScriptFilter::None);
        }
        ScriptRegistry::lookup(name)
            .map(ScriptFilter::Script)
            .ok_or_else(|| BrowserError::UnknownScript(name.trim().to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptFilter::None => NO_SCRIPT,
            ScriptFilter::Script(script) => script.name,
        }
    }
}

impl fmt::Display for ScriptFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
