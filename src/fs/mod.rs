//! Filesystem module.
//!
//! Provides:
//! - Course directory management
//! - Filename derivation and sanitizing
//! - Claims guarding concurrent writes to the same file

pub mod claims;
pub mod naming;
pub mod paths;

pub use claims::{Claim, ClaimRegistry};
pub use naming::{filename_from_url, sanitize_filename, sanitize_name};
pub use paths::{course_directory, ensure_dir, partial_path, PARTIAL_SUFFIX};
