//! Session-lifetime decode memoization.
//!
//! Tests register their media requirements during collection; at
//! execution time the cache decodes each (source, format) key at most
//! once and hands every caller the same payload.

mod params;
mod store;

pub use params::{CaseMedia, CaseParams};
pub use store::{Asset, CacheError, DecodeCache};
