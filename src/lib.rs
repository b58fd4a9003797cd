//! moodle-fetch - mirror course materials from a Moodle portal
//!
//! This library logs in to a Moodle site, discovers the enrolled courses and
//! downloads every linked resource file into one directory per course.
//!
//! # Features
//!
//! - Form login with a persistent cookie session
//! - Course discovery from the dashboard navigation
//! - Bounded, concurrent course crawling and file downloads
//! - Idempotent writes: files already on disk are never fetched twice
//! - Per-course and per-file failure isolation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use indicatif::ProgressBar;
//! use moodle_fetch::{download, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let stats = download::run(&config, ProgressBar::hidden()).await?;
//!     println!("{} files created", stats.files_created);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod moodle;
pub mod output;
pub mod pool;
pub mod session;

// Re-exports for convenience
pub use config::Config;
pub use download::{CourseReport, DownloadedFile, Pipeline, RunStats};
pub use error::{Error, Result};
pub use moodle::{Course, ResourceLink};
pub use pool::{Outcome, SkipReason, WorkerPool};
pub use session::MoodleSession;
