//! Moodle session module.
//!
//! This module provides:
//! - Login with credential form posting and authenticated-state checks
//! - A shared, cookie-carrying HTTP client for pages and resources

pub mod auth;
pub mod client;

pub use client::{MoodleSession, Page, SessionOptions};
