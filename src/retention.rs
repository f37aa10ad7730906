//! Artifact retention policy.
//!
//! Policies are ordered by how much they keep: `None` < `Fail` < `All`.
//! The numeric encoding matches that ordering, so runners that take the
//! policy as an integer flag can parse `0`/`1`/`2` directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Governs whether reserved artifacts are deleted at scope teardown.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Retention {
    /// Delete artifacts unconditionally.
    #[default]
    None = 0,
    /// Keep artifacts only when the owning result failed.
    Fail = 1,
    /// Keep everything.
    All = 2,
}

impl Retention {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Retention::None => "none",
            Retention::Fail => "fail",
            Retention::All => "all",
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a retention policy.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown retention policy: {0}")]
pub struct ParseRetentionError(pub String);

impl FromStr for Retention {
    type Err = ParseRetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(Retention::None),
            "fail" | "1" => Ok(Retention::Fail),
            "all" | "2" => Ok(Retention::All),
            _ => Err(ParseRetentionError(s.to_string())),
        }
    }
}
