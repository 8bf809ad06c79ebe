use std::path::PathBuf;

/// Errors that can occur across the cograph workspace.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use cograph_core::CographError;
///
/// let err = CographError::Git("bad object".into());
/// assert!(err.to_string().contains("bad object"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CographError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Git operation failure. History traversal errors surface here and
    /// propagate unchanged to the caller.
    #[error("git error: {0}")]
    Git(String),

    /// Source code parsing failure.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CographError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = CographError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn git_error_displays_message() {
        let err = CographError::Git("failed to open repository".into());
        assert_eq!(err.to_string(), "git error: failed to open repository");
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = CographError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert!(err.to_string().contains("/tmp/missing.toml"));
    }
}
