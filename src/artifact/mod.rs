//! Artifact lifecycle management.
//!
//! Reserves artifact file paths against runner results and purges them at
//! scope teardown according to the configured retention policy.

mod manager;
mod orphans;

pub use manager::{ArtifactError, ArtifactStats, Artifacts, Reservation};
pub use orphans::orphans;
