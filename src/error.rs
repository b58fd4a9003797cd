//! Error types for the moodle-fetch application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Portal errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Course discovery failed: {0}")]
    Discovery(String),

    #[error("Unexpected page markup: {0}")]
    Parse(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error must abort the whole run.
    ///
    /// Everything raised before the crawl starts is fatal; per-course and per-link
    /// failures are absorbed by the worker pool instead.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
                | Error::Authentication(_)
                | Error::Discovery(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_are_fatal() {
        assert!(Error::Authentication("marker missing".into()).is_fatal());
        assert!(Error::Discovery("no courses section".into()).is_fatal());
        assert!(Error::MissingConfig("auth.username".into()).is_fatal());
    }

    #[test]
    fn test_item_errors_are_not_fatal() {
        assert!(!Error::Parse("no .course-content".into()).is_fatal());
        assert!(!Error::Download("HTTP 404".into()).is_fatal());
        assert!(!Error::InvalidFilename("..".into()).is_fatal());
    }
}
