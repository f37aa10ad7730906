//! Medialane - test-session artifact retention and decode caching
//!
//! This crate implements the support layer a media validation lane leans
//! on while running codec tests: [`Artifacts`] reserves artifact file
//! paths against runner results and purges them at scope teardown under a
//! [`Retention`] policy, and [`DecodeCache`] memoizes decoded media per
//! (source, format) key so inputs shared across tests decode once per
//! session.
//!
//! Both managers are passive: the surrounding runner drives them through
//! the [`RunnerContext`] and [`DecodeBackend`] collaborator interfaces
//! and owns test discovery, scheduling, and teardown ordering.

pub mod artifact;
pub mod cache;
pub mod config;
pub mod context;
pub mod decode;
pub mod mock;
pub mod retention;
pub mod scope;

pub use artifact::{orphans, ArtifactError, ArtifactStats, Artifacts, Reservation};
pub use cache::{Asset, CacheError, CaseMedia, CaseParams, DecodeCache};
pub use config::{ConfigError, LaneConfig, RETENTION_ENV};
pub use context::{ContextError, RunnerContext, ScopeResult};
pub use decode::{
    digest_file, DecodeBackend, DecodeError, DecodeJob, DecodeOptions, DecodedMedia,
};
pub use retention::{ParseRetentionError, Retention};
pub use scope::Scope;

pub use medialane_codecs::{sniff_source, CodecClass, ParseCodecError};
