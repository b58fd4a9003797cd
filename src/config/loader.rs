//! Configuration structures and loading logic.

use crate::config::modes::{PoolModeSetting, PoolScopeSetting};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Portal credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Moodle username.
    #[serde(default)]
    pub username: String,

    /// Moodle password.
    #[serde(default)]
    pub password: String,

    /// Login form endpoint, e.g. `https://moodle.example.edu/login/index.php`.
    #[serde(default)]
    pub url: String,
}

/// Crawl and download options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory holding one subdirectory per course.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Maximum number of courses crawled at once.
    #[serde(default = "default_concurrency")]
    pub course_concurrency: usize,

    /// Maximum number of resource downloads in flight per link pool.
    #[serde(default = "default_concurrency")]
    pub download_concurrency: usize,

    /// Seconds a resource download may go without receiving data.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_seconds: u64,

    /// Substring a link path must contain to be downloaded.
    #[serde(default = "default_resource_marker")]
    pub resource_marker: String,

    /// Substring only present on an authenticated page.
    #[serde(default = "default_login_marker")]
    pub login_marker: String,

    /// Text heading the enrolled-courses list on the landing page.
    #[serde(default = "default_courses_marker")]
    pub courses_marker: String,

    /// Page listing the enrolled courses. Defaults to where the login redirects.
    #[serde(default)]
    pub landing_url: Option<String>,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub pool_mode: PoolModeSetting,

    #[serde(default)]
    pub pool_scope: PoolScopeSetting,

    /// Whether to show a course progress bar.
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            course_concurrency: default_concurrency(),
            download_concurrency: default_concurrency(),
            download_timeout_seconds: default_download_timeout(),
            resource_marker: default_resource_marker(),
            login_marker: default_login_marker(),
            courses_marker: default_courses_marker(),
            landing_url: None,
            user_agent: default_user_agent(),
            pool_mode: PoolModeSetting::default(),
            pool_scope: PoolScopeSetting::default(),
            show_progress: false,
        }
    }
}

/// Directory name used when none is configured.
pub const DEFAULT_DOWNLOAD_DIRECTORY: &str = "courses";

fn default_concurrency() -> usize {
    10
}

fn default_download_timeout() -> u64 {
    20
}

fn default_resource_marker() -> String {
    "resource".to_string()
}

fn default_login_marker() -> String {
    "My courses".to_string()
}

fn default_courses_marker() -> String {
    "My courses".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.auth.url = unquote(&config.auth.url).to_string();
        Ok(config)
    }

    /// Get the effective root download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIRECTORY))
    }

    /// Inactivity bound applied to each resource download.
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.options.download_timeout_seconds)
    }
}

/// Strip surrounding quote characters left over from hand-edited config values.
pub fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"')
}
