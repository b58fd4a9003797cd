//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, PoolModeSetting, PoolScopeSetting};

/// Moodle course material downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "moodle-fetch",
    version,
    about = "Mirror course materials from a Moodle portal",
    long_about = "Logs in to Moodle, finds your enrolled courses and downloads every resource file \
                  into one directory per course.\n\n\
                  Files already on disk are skipped, so re-running only fetches what is new."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Root directory for course folders.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Moodle username.
    #[arg(short, long, env = "MOODLE_USERNAME")]
    pub username: Option<String>,

    /// Moodle password.
    #[arg(short, long, env = "MOODLE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Moodle login URL (e.g. https://moodle.example.edu/login/index.php).
    #[arg(long, env = "MOODLE_URL")]
    pub url: Option<String>,

    /// Number of courses crawled concurrently.
    #[arg(long)]
    pub course_concurrency: Option<usize>,

    /// Number of concurrent downloads per course.
    #[arg(long)]
    pub download_concurrency: Option<usize>,

    /// Seconds without progress before a download is abandoned.
    #[arg(long = "timeout")]
    pub download_timeout: Option<u64>,

    /// How workers are executed.
    #[arg(long, value_enum)]
    pub pool_mode: Option<PoolModeArg>,

    /// Reuse one download pool for every course.
    #[arg(long)]
    pub shared_pool: bool,

    /// Show a course progress bar.
    #[arg(long)]
    pub progress: bool,

    /// Only log warnings and errors.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI pool mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PoolModeArg {
    /// Drive all workers on the calling task.
    Inline,
    /// Spawn every worker as its own task.
    Spawned,
}

impl From<PoolModeArg> for PoolModeSetting {
    fn from(arg: PoolModeArg) -> Self {
        match arg {
            PoolModeArg::Inline => PoolModeSetting::Inline,
            PoolModeArg::Spawned => PoolModeSetting::Spawned,
        }
    }
}

impl Args {
    /// Log level implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Override credentials if provided
        if let Some(username) = self.username {
            config.auth.username = username;
        }

        if let Some(password) = self.password {
            config.auth.password = password;
        }

        if let Some(url) = self.url {
            config.auth.url = crate::config::loader::unquote(&url).to_string();
        }

        // Override options if provided
        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(n) = self.course_concurrency {
            config.options.course_concurrency = n;
        }

        if let Some(n) = self.download_concurrency {
            config.options.download_concurrency = n;
        }

        if let Some(secs) = self.download_timeout {
            config.options.download_timeout_seconds = secs;
        }

        if let Some(mode) = self.pool_mode {
            config.options.pool_mode = mode.into();
        }

        // Boolean flags (only override if set to non-default)
        if self.shared_pool {
            config.options.pool_scope = PoolScopeSetting::Shared;
        }

        if self.progress {
            config.options.show_progress = true;
        }
    }
}
