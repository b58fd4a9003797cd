//! Moodle page extraction module.
//!
//! Provides:
//! - Course discovery from the landing page
//! - Section link extraction from course content pages

pub mod crawler;
pub mod discovery;
pub mod types;

pub use crawler::{crawl_course, extract_section_links, CrawledCourse};
pub use discovery::{discover_courses, parse_courses};
pub use types::{Course, ResourceLink};
