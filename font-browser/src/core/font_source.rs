//! Font enumeration backed by the system font database.
//!
//! `FontSource` is the seam the panel depends on; `SystemFontSource` answers
//! it with font-kit. Lookup failures are logged and treated as "no fonts",
//! so a broken font never turns into an error in the panel.

use std::cell::RefCell;
use std::collections::HashMap;

use font_kit::source::SystemSource;
use serde::{Deserialize, Serialize};

use super::scripts::Script;

/// A single font face as reported by a script query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// The family the face belongs to (e.g., "Noto Sans Tamil")
    pub family: String,
}

/// Host capability for listing installed fonts.
///
/// Both queries may return duplicates; callers de-duplicate.
pub trait FontSource {
    /// Every installed family name, in enumeration order.
    fn all_families(&self) -> Vec<String>;

    /// Faces that can render the script's representative characters.
    fn fonts_for_script(&self, script: &Script) -> Vec<FontDescriptor>;
}

/// `FontSource` over the platform font database (fontconfig, Core Text,
/// DirectWrite) via font-kit.
pub struct SystemFontSource {
    source: SystemSource,
    /// Per-script coverage, keyed by script name. Loading every face is slow,
    /// so each script is scanned once per session.
    coverage: RefCell<HashMap<&'static str, Vec<FontDescriptor>>>,
}

impl Default for SystemFontSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFontSource {
    pub fn new() -> Self {
        Self {
            source: SystemSource::new(),
            coverage: RefCell::new(HashMap::new()),
        }
    }

    /// Whether any face of `family` has a glyph for every one of `chars`.
    fn family_covers(&self, family: &str, chars: &[char]) -> bool {
        let handle = match self.source.select_family_by_name(family) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Failed to select font family '{}': {}", family, e);
                return false;
            }
        };

        handle.fonts().iter().any(|font_handle| match font_handle.load() {
            Ok(font) => chars.iter().all(|&c| font.glyph_for_char(c).is_some()),
            Err(e) => {
                log::warn!("Failed to load a face of '{}': {}", family, e);
                false
            }
        })
    }
}

impl FontSource for SystemFontSource {
    fn all_families(&self) -> Vec<String> {
        match self.source.all_families() {
            Ok(families) => families,
            Err(e) => {
                log::warn!("Failed to enumerate font families: {}", e);
                Vec::new()
            }
        }
    }

    /// Descriptors carry the enumerated family name, not the face's own
    /// name table entry, so every result is also in `all_families`.
    fn fonts_for_script(&self, script: &Script) -> Vec<FontDescriptor> {
        if let Some(cached) = self.coverage.borrow().get(script.name) {
            return cached.clone();
        }

        let faces: Vec<FontDescriptor> = self
            .all_families()
            .into_iter()
            .filter(|family| self.family_covers(family, script.representative_chars))
            .map(|family| FontDescriptor { family })
            .collect();
        log::debug!("{} families support script '{}'", faces.len(), script.name);
        self.coverage
            .borrow_mut()
            .insert(script.name, faces.clone());
        faces
    }
}

/// Fixed in-memory font table for tests.
#[cfg(test)]
pub struct StaticFontSource {
    /// (family, characters the family covers)
    pub families: Vec<(String, Vec<char>)>,
}

#[cfg(test)]
impl StaticFontSource {
    pub fn new(families: &[(&str, &str)]) -> Self {
        Self {
            families: families
                .iter()
                .map(|(family, chars)| (family.to_string(), chars.chars().collect()))
                .collect(),
        }
    }
}

#[cfg(test)]
impl FontSource for StaticFontSource {
    fn all_families(&self) -> Vec<String> {
        self.families.iter().map(|(family, _)| family.clone()).collect()
    }

    fn fonts_for_script(&self, script: &Script) -> Vec<FontDescriptor> {
        self.families
            .iter()
            .filter(|(_, covered)| script.representative_chars.iter().all(|c| covered.contains(c)))
            .map(|(family, _)| FontDescriptor {
                family: family.clone(),
            })
            .collect()
    }
}
