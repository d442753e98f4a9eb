use std::path::PathBuf;

/// Errors from the fallible edges of the font browser: terminal I/O,
/// configuration loading, and script names typed as command arguments.
///
/// Panel operations themselves never fail; they absorb invalid context as
/// no-ops. These variants only surface from the host side.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// Reading commands or writing the table failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file exists but could not be read or parsed.
    #[error("invalid config at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The name is not in the script registry (and is not `none`).
    #[error("unknown script: {0}")]
    UnknownScript(String),

    /// Rows could not be serialized for export.
    #[error("failed to serialize rows: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes the error as its `Display` string so a front end receives a
/// single human-readable message rather than a tagged enum structure.
impl serde::Serialize for BrowserError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
