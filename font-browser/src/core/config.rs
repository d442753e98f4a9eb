//! Optional user configuration, read from `<config dir>/config.json`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Nothing here is ever written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::display_font::FontScope;
use super::error::BrowserError;
use super::scripts::ScriptFilter;
use super::table_view::DEFAULT_PAGE_SIZE;

/// Placeholder shown in every row until the user sets a sample text.
pub const DEFAULT_SAMPLE_TEXT: &str = "Press t to change this text";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Replaces the built-in placeholder sample text.
    pub sample_text: String,
    /// Rows per page in the table.
    pub page_size: usize,
    /// Script filter active when the panel opens (`None` or "none" = all fonts).
    pub script: Option<String>,
    /// Where an applied font takes effect.
    pub apply_scope: FontScope,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            script: None,
            apply_scope: FontScope::default(),
        }
    }
}

/// `config.json` under the platform config directory, if one can be resolved.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "font-browser", "font-browser")
        .map(|p| p.config_dir().join(CONFIG_FILE))
}

impl BrowserConfig {
    /// Loads from the platform config directory. No directory or no file
    /// yields defaults.
    pub fn load() -> Result<Self, BrowserError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, BrowserError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(BrowserError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let mut config: BrowserConfig =
            serde_json::from_str(&content).map_err(|e| BrowserError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.page_size = config.page_size.max(1);
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// The script filter to open with. Unknown names are logged and ignored.
    pub fn initial_filter(&self) -> ScriptFilter {
        let Some(name) = self.script.as_deref() else {
            return ScriptFilter::None;
        };
        match ScriptFilter::from_name(name) {
            Ok(filter) => filter,
            Err(e) => {
                log::warn!("Ignoring configured script: {}", e);
                ScriptFilter::None
            }
        }
    }
}
