//! Worker pool module.
//!
//! Provides:
//! - Bounded concurrent execution of a batch of operations
//! - Per-item outcomes that keep one failure from cancelling its siblings
//! - Ad-hoc and shared pool scopes

pub mod outcome;
pub mod worker;

pub use outcome::{Outcome, SkipReason};
pub use worker::{PoolFactory, PoolMode, PoolOptions, PoolScope, WorkerPool, DEFAULT_POOL_LIMIT};
