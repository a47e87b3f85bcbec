//! Error types for the gig search library.

use thiserror::Error;

/// Result type alias for gig search operations.
pub type Result<T> = std::result::Result<T, GigError>;

/// Errors that can occur during gig search operations.
#[derive(Error, Debug)]
pub enum GigError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a provider response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Scraper requires an API token that was not configured.
    #[error("Scraper '{0}' is missing an API token")]
    MissingToken(String),

    /// Scraper call exceeded its deadline.
    #[error("Scraper timeout exceeded")]
    Timeout,

    /// No scrapers configured.
    #[error("No scrapers configured")]
    NoScrapers,

    /// The storage collaborator could not be reached.
    ///
    /// Distinct from an empty result: callers must be able to tell
    /// "no matches" apart from "the store is down, retry later".
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let err = GigError::Parse("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Failed to parse response: invalid JSON");
    }

    #[test]
    fn test_error_display_missing_token() {
        let err = GigError::MissingToken("Upwork".to_string());
        assert_eq!(err.to_string(), "Scraper 'Upwork' is missing an API token");
    }

    #[test]
    fn test_error_display_timeout() {
        let err = GigError::Timeout;
        assert_eq!(err.to_string(), "Scraper timeout exceeded");
    }

    #[test]
    fn test_error_display_no_scrapers() {
        let err = GigError::NoScrapers;
        assert_eq!(err.to_string(), "No scrapers configured");
    }

    #[test]
    fn test_error_display_storage_unavailable() {
        let err = GigError::StorageUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: connection refused");
    }

    #[test]
    fn test_error_display_other() {
        let err = GigError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_debug() {
        let err = GigError::Timeout;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Timeout"));
    }
}
