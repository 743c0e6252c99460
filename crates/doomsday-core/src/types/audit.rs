use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound on a single download probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of probing one firmware download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditResult {
    /// The endpoint answered with real content
    Alive,
    /// Error status, transport failure, or a disguised access-denied body
    Dead,
}

impl AuditResult {
    /// Returns true for [`AuditResult::Dead`]
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

impl std::fmt::Display for AuditResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
        }
    }
}
