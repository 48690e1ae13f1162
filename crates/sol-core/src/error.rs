//! Error types for the Solyntra retrieval service

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types shared by every Solyntra crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failure: {0}")]
    Extraction(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// True for failures the caller caused (bad upload, empty query).
    ///
    /// Everything else is an internal failure as far as a client is concerned.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::UnsupportedFormat(_) | Error::EmptyInput(_)
        )
    }

    /// True when an external embedding or completion call failed.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Error::Provider(_) | Error::Timeout(_) | Error::Serialization(_)
        )
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::EmptyInput("query".into()).is_client_error());
        assert!(Error::UnsupportedFormat("a.exe".into()).is_client_error());
        assert!(Error::InvalidInput("too many files".into()).is_client_error());
        assert!(!Error::Provider("boom".into()).is_client_error());
        assert!(!Error::Configuration("no key".into()).is_client_error());
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(Error::Provider("502".into()).is_provider_failure());
        assert!(Error::Timeout("60s".into()).is_provider_failure());
        assert!(!Error::Configuration("no key".into()).is_provider_failure());
        assert!(!Error::VectorIndex("dim".into()).is_provider_failure());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::Configuration("OPENAI_API_KEY is not set".into());
        assert_eq!(err.to_string(), "Configuration error: OPENAI_API_KEY is not set");

        let err: Error = anyhow::anyhow!("wrapped").into();
        assert_eq!(err.to_string(), "Other error: wrapped");
    }
}
