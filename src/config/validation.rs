//! Configuration validation logic.

use url::Url;

use crate::config::loader::{AuthConfig, Config, OptionsConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_auth(&config.auth)?;
    validate_options(&config.options)?;

    Ok(())
}

/// Validate the credentials block.
pub fn validate_auth(auth: &AuthConfig) -> Result<()> {
    if auth.username.trim().is_empty() {
        return Err(Error::MissingConfig("auth.username".to_string()));
    }

    if auth.password.is_empty() {
        return Err(Error::MissingConfig("auth.password".to_string()));
    }

    // Check for placeholder values
    let lower = auth.username.to_lowercase();
    if lower == "replaceme" || lower == "your_username" {
        return Err(Error::ConfigValidation {
            field: "auth.username".to_string(),
            message: "Username appears to be a placeholder. Please provide your Moodle login."
                .to_string(),
        });
    }

    validate_login_url(&auth.url)?;

    Ok(())
}

/// Validate the login endpoint.
pub fn validate_login_url(url: &str) -> Result<Url> {
    if url.is_empty() {
        return Err(Error::MissingConfig("auth.url".to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| Error::ConfigValidation {
        field: "auth.url".to_string(),
        message: format!("'{}' is not a valid URL: {}", url, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "auth.url".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", parsed.scheme()),
        });
    }

    Ok(parsed)
}

/// Validate crawl options.
pub fn validate_options(options: &OptionsConfig) -> Result<()> {
    if options.course_concurrency == 0 {
        return Err(Error::ConfigValidation {
            field: "options.course_concurrency".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if options.download_concurrency == 0 {
        return Err(Error::ConfigValidation {
            field: "options.download_concurrency".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if options.download_timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "options.download_timeout_seconds".to_string(),
            message: "Must be at least 1 second".to_string(),
        });
    }

    if options.resource_marker.is_empty() {
        return Err(Error::MissingConfig("options.resource_marker".to_string()));
    }

    if options.login_marker.is_empty() {
        return Err(Error::MissingConfig("options.login_marker".to_string()));
    }

    if options.courses_marker.is_empty() {
        return Err(Error::MissingConfig("options.courses_marker".to_string()));
    }

    if let Some(landing) = &options.landing_url {
        Url::parse(landing).map_err(|e| Error::ConfigValidation {
            field: "options.landing_url".to_string(),
            message: format!("'{}' is not a valid URL: {}", landing, e),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_auth() -> AuthConfig {
        AuthConfig {
            username: "student".to_string(),
            password: "hunter22".to_string(),
            url: "https://moodle.example.edu/login/index.php".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            auth: valid_auth(),
            options: OptionsConfig::default(),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_username() {
        let mut auth = valid_auth();
        auth.username = "  ".to_string();
        assert!(matches!(validate_auth(&auth), Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_placeholder_username() {
        let mut auth = valid_auth();
        auth.username = "REPLACEME".to_string();
        assert!(matches!(
            validate_auth(&auth),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_login_url_scheme() {
        assert!(validate_login_url("ftp://moodle.example.edu/login").is_err());
        assert!(validate_login_url("not a url").is_err());
        assert!(validate_login_url("http://localhost:8080/login/index.php").is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let options = OptionsConfig {
            download_concurrency: 0,
            ..OptionsConfig::default()
        };
        assert!(validate_options(&options).is_err());
    }
}
