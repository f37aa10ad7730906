//! Decoder collaborator protocol.
//!
//! The lane never decodes media itself. The surrounding runner supplies a
//! [`DecodeBackend`] and the cache drives it through [`DecodeJob`]s, one
//! per (source, format) key per session.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::scope::Scope;

/// Open key/value options passed through to the backend untouched.
pub type DecodeOptions = Map<String, Value>;

/// One decode request handed to a backend.
#[derive(Debug, Clone)]
pub struct DecodeJob {
    /// Scope the decode is attributed to. The cache always uses
    /// `Scope::Session` so anything the decoder reserves as an artifact
    /// outlives single tests.
    pub scope: Scope,

    /// Number of frames to decode: the maximum registered for the key.
    pub frames: u32,

    /// Pixel format of the decoded output.
    pub format: String,

    /// Encoded source file.
    pub source: PathBuf,

    /// Backend-specific options supplied by the caller.
    pub options: DecodeOptions,
}

/// Decoded media handle produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    /// Where the decoded output lives.
    pub path: PathBuf,

    /// Frames actually decoded.
    pub frames: u32,

    /// Pixel format of the output.
    pub format: String,

    /// Hex SHA-256 of the decoded output, when the backend computed one.
    pub sha256: Option<String>,
}

/// Errors from a decode backend.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Reading the source or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend rejected or failed the job.
    #[error("decode failed: {0}")]
    Failed(String),

    /// The bitstream ended before the requested frame count.
    #[error("decoded {got} of {expected} requested frames")]
    ShortStream { expected: u32, got: u32 },
}

/// Externally supplied decoder capability.
pub trait DecodeBackend {
    /// Decode `job.source` into `job.format`, producing at least
    /// `job.frames` frames.
    fn decode(&self, job: &DecodeJob) -> Result<DecodedMedia, DecodeError>;
}

/// Hex SHA-256 of a file's contents.
///
/// Backends use this to stamp [`DecodedMedia::sha256`] on their output.
pub fn digest_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
