//! Registration parameters and per-case media identity.

use std::path::PathBuf;

use medialane_codecs::CodecClass;
use serde::Deserialize;

/// Parameter set one test case registers ahead of execution.
///
/// Mirrors a row of a case parameter table; unknown keys in the source
/// document are ignored. Fields are optional here so that a sparse row
/// deserializes cleanly; `register` enforces which ones are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseParams {
    /// Codec classification of the source; absent means raw.
    #[serde(default)]
    pub codec: Option<CodecClass>,

    /// Encoded source file.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Pixel format the case decodes to.
    #[serde(default)]
    pub format: Option<String>,

    /// Base frame count the case consumes.
    #[serde(default)]
    pub frames: Option<u32>,

    /// Override used by bitrate-style cases that read extra frames.
    #[serde(default)]
    pub bitrate_frames: Option<u32>,
}

/// Media identity of one executing test case.
#[derive(Debug, Clone)]
pub struct CaseMedia {
    /// Codec classification; absent means raw.
    pub codec: Option<CodecClass>,

    /// Source file the case reads.
    pub source: PathBuf,

    /// Pixel format to decode to.
    pub format: String,
}

impl CaseMedia {
    /// New case identity.
    pub fn new(
        codec: Option<CodecClass>,
        source: impl Into<PathBuf>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            source: source.into(),
            format: format.into(),
        }
    }

    /// Whether the case bypasses the decode cache.
    pub fn is_raw(&self) -> bool {
        self.codec.map_or(true, |c| c.is_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_case_is_raw() {
        let case = CaseMedia::new(None, "clip.yuv", "NV12");
        assert!(case.is_raw());
    }

    #[test]
    fn test_encoded_case_is_not_raw() {
        let case = CaseMedia::new(Some(CodecClass::Hevc), "clip.hevc", "NV12");
        assert!(!case.is_raw());
    }

    #[test]
    fn test_params_deserialize_sparse_row() {
        let params: CaseParams = serde_json::from_str(
            r#"{"codec": "avc", "source": "clips/a.h264", "format": "NV12", "frames": 30}"#,
        )
        .unwrap();
        assert_eq!(params.codec, Some(CodecClass::Avc));
        assert_eq!(params.frames, Some(30));
        assert_eq!(params.bitrate_frames, None);
    }

    #[test]
    fn test_params_ignore_unknown_keys() {
        let params: CaseParams =
            serde_json::from_str(r#"{"frames": 10, "bitrate": 4000}"#).unwrap();
        assert_eq!(params.frames, Some(10));
        assert!(params.source.is_none());
    }
}
