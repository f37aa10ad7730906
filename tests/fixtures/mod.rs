//! Shared fixtures for the lane integration tests.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use medialane::{digest_file, DecodeBackend, DecodeError, DecodeJob, DecodedMedia};

/// Backend that counts invocations and fabricates decoded output files.
///
/// Each decode writes `job.frames` bytes into `out_dir` and stamps the
/// payload with the output's SHA-256, so tests can observe both the call
/// count and the frame count the cache asked for.
pub struct RecordingBackend {
    out_dir: PathBuf,
    pub calls: Cell<usize>,
    pub fail_next: Cell<bool>,
}

impl RecordingBackend {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            calls: Cell::new(0),
            fail_next: Cell::new(false),
        }
    }
}

impl DecodeBackend for RecordingBackend {
    fn decode(&self, job: &DecodeJob) -> Result<DecodedMedia, DecodeError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_next.replace(false) {
            return Err(DecodeError::Failed("injected failure".to_string()));
        }

        let stem = job
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        let path = self
            .out_dir
            .join(format!("{stem}_{}_{}.yuv", job.format, job.frames));
        fs::write(&path, vec![0u8; job.frames as usize])?;
        let sha256 = digest_file(&path)?;

        Ok(DecodedMedia {
            path,
            frames: job.frames,
            format: job.format.clone(),
            sha256: Some(sha256),
        })
    }
}
