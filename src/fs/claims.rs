//! In-flight download claims.
//!
//! Two links in the same course may resolve to the same filename. The
//! existence check alone cannot stop both from writing it, so each download
//! claims its target path first and only the claim holder writes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Registry of target paths currently being written.
#[derive(Debug, Clone, Default)]
pub struct ClaimRegistry {
    claimed: Arc<Mutex<HashSet<PathBuf>>>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `path`, or return `None` if another download holds it.
    pub fn try_claim(&self, path: &Path) -> Option<Claim> {
        let mut claimed = self.lock();
        if !claimed.insert(path.to_path_buf()) {
            return None;
        }

        Some(Claim {
            registry: self.clone(),
            path: path.to_path_buf(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        // The set stays consistent even if a holder panicked
        self.claimed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exclusive right to write one target path. Released on drop.
#[derive(Debug)]
pub struct Claim {
    registry: ClaimRegistry,
    path: PathBuf,
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.path);
    }
}
