//! Error types for the OpenEdX extraction library
//!
//! Provides a single error enum with human-readable messages covering
//! network failures, malformed pages and subtitle decoding.

use thiserror::Error;

/// Error type for all extraction operations
///
/// Network errors propagate to the immediate caller and are never retried
/// here. Malformed-page errors are fatal for the page that produced them
/// only. Subtitle decode errors are recoverable (the scraper degrades to
/// "no subtitles").
#[derive(Error, Debug)]
pub enum EdxError {
    /// HTTP request failed (connectivity, timeout, or error status)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An expected structural element was missing from a scraped page
    #[error("Malformed page: {0}")]
    MalformedPage(String),

    /// Subtitle JSON could not be decoded into timed text
    #[error("Failed to decode subtitle data: {0}")]
    SubtitleDecode(#[from] serde_json::Error),

    /// The platform rejected the login credentials
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// The course has no courseware URL (it has not started yet)
    #[error("Course has no URL: {0}")]
    MissingCourseUrl(String),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, EdxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_page() {
        let error = EdxError::MalformedPage("chapter without a link".to_string());
        assert_eq!(error.to_string(), "Malformed page: chapter without a link");
    }

    #[test]
    fn test_error_display_login_failed() {
        let error = EdxError::LoginFailed("Wrong email or password.".to_string());
        assert_eq!(error.to_string(), "Login failed: Wrong email or password.");
    }

    #[test]
    fn test_error_display_missing_course_url() {
        let error = EdxError::MissingCourseUrl("CS191x".to_string());
        assert_eq!(error.to_string(), "Course has no URL: CS191x");
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = EdxError::from(json_err);
        assert!(matches!(error, EdxError::SubtitleDecode(_)));
        assert!(error.to_string().starts_with("Failed to decode subtitle data"));
    }
}
