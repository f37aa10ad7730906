//! Source-filename codec sniffing.
//!
//! Parameter tables usually carry an explicit codec class; when they do
//! not, the file extension is often enough to classify the source.

use std::path::Path;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::CodecClass;

static PATTERNS: OnceLock<Vec<(Regex, CodecClass)>> = OnceLock::new();

fn patterns() -> &'static [(Regex, CodecClass)] {
    PATTERNS.get_or_init(|| {
        let table: &[(&str, CodecClass)] = &[
            (r"(?i)\.(yuv|nv12|i420|p010)$", CodecClass::Raw),
            (r"(?i)\.(h264|264|avc)$", CodecClass::Avc),
            (r"(?i)\.(h265|265|hevc)$", CodecClass::Hevc),
            (r"(?i)\.vp8$", CodecClass::Vp8),
            (r"(?i)\.vp9$", CodecClass::Vp9),
            (r"(?i)\.(av1|obu)$", CodecClass::Av1),
            (r"(?i)\.(m2v|mpg|mpeg)$", CodecClass::Mpeg2),
            (r"(?i)\.(jpg|jpeg|mjpeg)$", CodecClass::Jpeg),
        ];
        table
            .iter()
            .map(|(pattern, codec)| (Regex::new(pattern).expect("static pattern"), *codec))
            .collect()
    })
}

/// Classify a source by its file name.
///
/// Returns `None` when the name matches no known extension. Container
/// extensions that carry several codecs (e.g. `.ivf`) are deliberately
/// unmatched; callers must classify those explicitly.
pub fn sniff_source(path: &Path) -> Option<CodecClass> {
    let name = path.file_name()?.to_str()?;
    patterns()
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map(|(_, codec)| *codec)
}
