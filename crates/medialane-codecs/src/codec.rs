//! Closed codec classification set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Codec classification for a media source.
///
/// `Raw` media needs no decode step and is read straight from its source
/// file; every other class identifies an encoded bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecClass {
    /// Uncompressed frames, no decoding needed.
    Raw,
    /// H.264 / AVC.
    Avc,
    /// H.265 / HEVC.
    Hevc,
    /// VP8.
    Vp8,
    /// VP9.
    Vp9,
    /// AV1.
    Av1,
    /// MPEG-2 video.
    Mpeg2,
    /// JPEG / Motion JPEG.
    Jpeg,
}

impl CodecClass {
    /// Whether this class requires no decode step.
    pub fn is_raw(&self) -> bool {
        matches!(self, CodecClass::Raw)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodecClass::Raw => "raw",
            CodecClass::Avc => "avc",
            CodecClass::Hevc => "hevc",
            CodecClass::Vp8 => "vp8",
            CodecClass::Vp9 => "vp9",
            CodecClass::Av1 => "av1",
            CodecClass::Mpeg2 => "mpeg2",
            CodecClass::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for CodecClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a codec class name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown codec class: {0}")]
pub struct ParseCodecError(pub String);

impl FromStr for CodecClass {
    type Err = ParseCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "yuv" => Ok(CodecClass::Raw),
            "avc" | "h264" | "264" => Ok(CodecClass::Avc),
            "hevc" | "h265" | "265" => Ok(CodecClass::Hevc),
            "vp8" => Ok(CodecClass::Vp8),
            "vp9" => Ok(CodecClass::Vp9),
            "av1" => Ok(CodecClass::Av1),
            "mpeg2" | "m2v" => Ok(CodecClass::Mpeg2),
            "jpeg" | "jpg" | "mjpeg" => Ok(CodecClass::Jpeg),
            _ => Err(ParseCodecError(s.to_string())),
        }
    }
}
