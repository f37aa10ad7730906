//! Keyed decode memoization store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::decode::{DecodeBackend, DecodeError, DecodeJob, DecodeOptions, DecodedMedia};
use crate::scope::Scope;

use super::params::{CaseMedia, CaseParams};

/// Errors from decode-cache operations.
// NOTE: `Display`/`Error`/`From` are written by hand rather than derived via
// `thiserror`: the `Unregistered` variant has a field literally named `source`
// (a media file path, not an error), and `thiserror` unconditionally treats a
// field named `source` as the error source — requiring it to implement
// `std::error::Error`, which `PathBuf` does not. The impls below reproduce what
// the derive produced: the same messages, `source()` forwarding for the
// transparent `Decode` variant, and the `From<DecodeError>` conversion.
#[derive(Debug)]
pub enum CacheError {
    /// A registration was missing a required field.
    MissingField(&'static str),

    /// `get` ran for a key never passed to `register`; the registration
    /// pass must complete before execution starts.
    Unregistered { source: PathBuf, format: String },

    /// The backend failed. The entry stays undecoded, so a later call
    /// for the same key decodes again.
    Decode(DecodeError),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::MissingField(name) => write!(f, "missing required field: {name}"),
            CacheError::Unregistered { source, format } => {
                write!(f, "no registered entry for {} as {format}", source.display())
            }
            CacheError::Decode(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // `#[error(transparent)]` forwards `source()` to the inner error.
            CacheError::Decode(err) => err.source(),
            _ => None,
        }
    }
}

impl From<DecodeError> for CacheError {
    fn from(err: DecodeError) -> Self {
        CacheError::Decode(err)
    }
}

/// Payload handed back to a test case.
#[derive(Debug, Clone)]
pub enum Asset {
    /// Raw media, read straight from its source file.
    Raw(PathBuf),

    /// Decoded media shared by every case with the same (source, format).
    Decoded(Arc<DecodedMedia>),
}

impl Asset {
    /// File the case should read from.
    pub fn path(&self) -> &Path {
        match self {
            Asset::Raw(path) => path,
            Asset::Decoded(media) => &media.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AssetKey {
    source: PathBuf,
    format: String,
}

#[derive(Debug)]
struct CacheEntry {
    /// Maximum frame count seen across registrations for the key.
    frames: u32,
    /// Populated by the first successful decode, then never replaced.
    decoded: Option<Arc<DecodedMedia>>,
}

/// Session-lifetime decode memoization store.
///
/// Keyed by (source, format). Cases register their frame requirements
/// during collection; the first `get` for a key decodes with the maximal
/// requirement, every later one reuses the payload.
#[derive(Debug, Default)]
pub struct DecodeCache {
    entries: HashMap<AssetKey, CacheEntry>,
}

impl DecodeCache {
    /// New, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any key has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one case's requirements ahead of execution.
    ///
    /// Raw or unclassified sources bypass the cache entirely. Repeat
    /// registrations for the same (source, format) merge by keeping the
    /// largest frame count, so the call order does not matter. The base
    /// `frames` field is required even when `bitrate_frames` overrides it.
    pub fn register(&mut self, params: &CaseParams) -> Result<(), CacheError> {
        if params.codec.map_or(true, |c| c.is_raw()) {
            return Ok(());
        }

        let source = params
            .source
            .clone()
            .ok_or(CacheError::MissingField("source"))?;
        let format = params
            .format
            .clone()
            .ok_or(CacheError::MissingField("format"))?;
        let base = params.frames.ok_or(CacheError::MissingField("frames"))?;
        let frames = params.bitrate_frames.unwrap_or(base);

        let entry = self
            .entries
            .entry(AssetKey { source, format })
            .or_insert(CacheEntry {
                frames,
                decoded: None,
            });
        if frames > entry.frames {
            entry.frames = frames;
        }

        tracing::debug!(frames = entry.frames, "registered decode requirement");
        Ok(())
    }

    /// Decoded payload for one executing case.
    ///
    /// Raw cases get their source back untouched, with no caching and no
    /// backend involvement. Encoded cases must have been registered
    /// first; their decode runs at most once per key per session, and
    /// every caller shares the one payload.
    pub fn get(
        &mut self,
        case: &CaseMedia,
        backend: &dyn DecodeBackend,
        options: &DecodeOptions,
    ) -> Result<Asset, CacheError> {
        if case.is_raw() {
            return Ok(Asset::Raw(case.source.clone()));
        }

        let key = AssetKey {
            source: case.source.clone(),
            format: case.format.clone(),
        };
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or_else(|| CacheError::Unregistered {
                source: case.source.clone(),
                format: case.format.clone(),
            })?;

        let media = match &entry.decoded {
            Some(media) => Arc::clone(media),
            None => {
                let job = DecodeJob {
                    scope: Scope::Session,
                    frames: entry.frames,
                    format: case.format.clone(),
                    source: case.source.clone(),
                    options: options.clone(),
                };
                tracing::debug!(
                    source = %job.source.display(),
                    format = %job.format,
                    frames = job.frames,
                    "decoding"
                );
                let media = Arc::new(backend.decode(&job)?);
                entry.decoded = Some(Arc::clone(&media));
                media
            }
        };
        Ok(Asset::Decoded(media))
    }
}
