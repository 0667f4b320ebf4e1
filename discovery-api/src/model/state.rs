//! Lifecycle state of a discovered service instance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state reported by the discovery backend for a service instance.
///
/// The selector only compares states for equality; it never acts on them.
/// States the backend reports that this crate does not know about are
/// deserialized as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceState {
    Running,
    Stopped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}
