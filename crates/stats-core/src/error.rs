use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the letter statistics pipeline.
#[derive(Error, Debug)]
pub enum StatsError {
    /// An input file could not be opened.
    #[error("Failed to open file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read was attempted after the character stream was exhausted.
    #[error("End of stream reached")]
    EndOfStream,

    /// A read was attempted on a source whose file never opened.
    #[error("Attempted to read from a source that was never opened")]
    SourceNotOpened,

    /// A report could not be serialized to JSON.
    #[error("Failed to serialize report: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// `true` for the ordinary "no more characters" condition.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, StatsError::EndOfStream)
    }
}

/// Convenience alias used throughout the stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_open() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StatsError::FileOpen {
            path: PathBuf::from("/some/input.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to open file"));
        assert!(msg.contains("/some/input.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_end_of_stream() {
        assert_eq!(StatsError::EndOfStream.to_string(), "End of stream reached");
    }

    #[test]
    fn test_not_opened_is_distinct_from_end_of_stream() {
        assert!(StatsError::EndOfStream.is_end_of_stream());
        assert!(!StatsError::SourceNotOpened.is_end_of_stream());
        assert_ne!(
            StatsError::SourceNotOpened.to_string(),
            StatsError::EndOfStream.to_string()
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = StatsError::Config("unknown decoding".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown decoding");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StatsError = io_err.into();
        assert!(err.to_string().contains("denied"));
        assert!(!err.is_end_of_stream());
    }
}
