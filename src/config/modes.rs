//! Worker pool mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pool::{PoolMode, PoolScope};

/// How pool workers are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolModeSetting {
    /// Drive all workers on the calling task.
    Inline,
    /// Spawn every worker as its own runtime task (default).
    #[default]
    Spawned,
}

impl fmt::Display for PoolModeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolModeSetting::Inline => write!(f, "inline"),
            PoolModeSetting::Spawned => write!(f, "spawned"),
        }
    }
}

impl FromStr for PoolModeSetting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(PoolModeSetting::Inline),
            "spawned" => Ok(PoolModeSetting::Spawned),
            _ => Err(format!("Unknown pool mode: {}", s)),
        }
    }
}

impl From<PoolModeSetting> for PoolMode {
    fn from(setting: PoolModeSetting) -> Self {
        match setting {
            PoolModeSetting::Inline => PoolMode::Inline,
            PoolModeSetting::Spawned => PoolMode::Spawned,
        }
    }
}

/// Lifetime of the link-level pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolScopeSetting {
    /// A fresh pool per course, released once its downloads finish (default).
    #[default]
    AdHoc,
    /// One pool reused by every course for the whole run.
    Shared,
}

impl fmt::Display for PoolScopeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolScopeSetting::AdHoc => write!(f, "ad_hoc"),
            PoolScopeSetting::Shared => write!(f, "shared"),
        }
    }
}

impl FromStr for PoolScopeSetting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "ad_hoc" | "adhoc" => Ok(PoolScopeSetting::AdHoc),
            "shared" => Ok(PoolScopeSetting::Shared),
            _ => Err(format!("Unknown pool scope: {}", s)),
        }
    }
}

impl From<PoolScopeSetting> for PoolScope {
    fn from(setting: PoolScopeSetting) -> Self {
        match setting {
            PoolScopeSetting::AdHoc => PoolScope::AdHoc,
            PoolScopeSetting::Shared => PoolScope::Shared,
        }
    }
}
