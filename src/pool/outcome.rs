//! Per-item results reported back to a worker pool.

use std::fmt;

/// Why an item produced no result without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The link does not point at a downloadable resource.
    NotAResource,
    /// A file with the derived name is already on disk.
    AlreadyExists,
    /// Another in-flight download is writing the same file.
    AlreadyClaimed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAResource => write!(f, "not a resource"),
            SkipReason::AlreadyExists => write!(f, "already downloaded"),
            SkipReason::AlreadyClaimed => write!(f, "already being downloaded"),
        }
    }
}

/// Result of running one pool operation.
///
/// Operations never propagate errors into the pool: a failure is reported as
/// `Failed` so sibling items keep running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Skipped(SkipReason),
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The successful value, if any.
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }
}

impl<T, E: fmt::Display> From<std::result::Result<T, E>> for Outcome<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Done(value),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_result() {
        let ok: Outcome<u32> = Ok::<_, Error>(3).into();
        assert_eq!(ok, Outcome::Done(3));

        let failed: Outcome<u32> = Err(Error::Download("HTTP 500".into())).into();
        assert_eq!(failed, Outcome::Failed("Download failed: HTTP 500".to_string()));
    }

    #[test]
    fn test_done_filters_skips_and_failures() {
        assert_eq!(Outcome::Done(1).done(), Some(1));
        assert_eq!(Outcome::<u32>::Skipped(SkipReason::AlreadyExists).done(), None);
        assert_eq!(Outcome::<u32>::Failed("boom".into()).done(), None);
    }
}
