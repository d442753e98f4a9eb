//! Row derivation: (sample text, script filter, font source) -> rows.
//!
//! Rows are always rebuilt from scratch; nothing here holds state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::font_source::FontSource;
use super::scripts::ScriptFilter;

/// Text tagged with the font family it should be drawn in.
///
/// The tag is a request: a host may fall back to another family for glyphs
/// the requested one lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    pub family: String,
}

/// One line of the panel. The family name is both the display key and the
/// target when applying a font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRow {
    pub family: String,
    pub sample: StyledText,
}

impl FontRow {
    pub fn new(family: String, sample_text: &str) -> Self {
        let sample = StyledText {
            text: sample_text.to_string(),
            family: family.clone(),
        };
        Self { family, sample }
    }

    pub fn id(&self) -> &str {
        &self.family
    }
}

/// Removes repeated family names, keeping the first occurrence of each.
/// Empty names are dropped.
pub fn dedup_families<I>(families: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for family in families {
        if family.is_empty() || seen.contains(&family) {
            continue;
        }
        seen.insert(family.clone());
        unique.push(family);
    }
    unique
}

/// Builds the panel's rows for the given state.
pub fn derive_rows(sample_text: &str, filter: &ScriptFilter, source: &dyn FontSource) -> Vec<FontRow> {
    let families = match filter {
        ScriptFilter::None => source.all_families(),
        ScriptFilter::Script(script) => source
            .fonts_for_script(script)
            .into_iter()
            .map(|font| font.family)
            .collect(),
    };

    dedup_families(families)
        .into_iter()
        .map(|family| FontRow::new(family, sample_text))
        .collect()
}
