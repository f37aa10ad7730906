//! Scope selection for lane operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects whether an operation targets the current test or the whole
/// session.
///
/// The set is closed: every scope-dispatching operation matches on it
/// exhaustively, so an unsupported scope cannot reach the lane at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The currently executing test.
    Test,
    /// The test session as a whole.
    Session,
}

impl Scope {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Test => "test",
            Scope::Session => "session",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
