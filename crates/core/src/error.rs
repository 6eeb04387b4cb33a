use std::io;
use std::path::PathBuf;

/// Errors that can occur while driving the wasm build pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid invocation context: {0}")]
    InvalidInvocation(String),

    #[error("{stage} failed{}", .status.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    StageFailed {
        stage: &'static str,
        status: Option<i32>,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Rewrite '{rule}' matched {count} lines, expected exactly 1")]
    AnchorMismatch { rule: &'static str, count: usize },
}

impl Error {
    /// Wrap an `io::Error` with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for wasmbuild operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_message() {
        let err = Error::StageFailed {
            stage: "compile",
            status: Some(101),
        };
        assert_eq!(err.to_string(), "compile failed with exit code 101");

        let err = Error::StageFailed {
            stage: "bindgen",
            status: None,
        };
        assert_eq!(err.to_string(), "bindgen failed");
    }

    #[test]
    fn test_anchor_mismatch_message() {
        let err = Error::AnchorMismatch {
            rule: "read-path",
            count: 0,
        };
        assert!(err.to_string().contains("matched 0 lines"));
    }
}
