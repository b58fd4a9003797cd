//! Download module for course material mirroring.
//!
//! This module provides:
//! - Per-link resource downloading
//! - The course/link fan-out pipeline
//! - Run statistics

pub mod pipeline;
pub mod resource;
pub mod state;

pub use pipeline::{run, Pipeline};
pub use resource::{download_resource, DownloadOptions, DownloadedFile, CHUNK_SIZE};
pub use state::{CourseReport, RunStats};
