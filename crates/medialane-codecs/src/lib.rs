//! Codec classification for the medialane test-support library.
//!
//! Provides the closed set of codec classes the lane understands, with a
//! raw/no-decode variant, plus source-filename sniffing for parameter
//! tables that omit an explicit class.

mod codec;
mod sniff;

pub use codec::{CodecClass, ParseCodecError};
pub use sniff::sniff_source;
