//! TAF segmenter and decoder
//!
//! A forecast is decoded in two steps:
//! - [`segmenter`] reads the header and splits the body into change segments
//!   (`Main`, `FM`, `BECMG`, `TEMPO`, `PROBnn`) in source order
//! - [`decoder`] decodes each segment's groups with the shared primitive
//!   parsers plus the forecast-only groups (`TX`/`TN`, `WS`, `NSW`)
//!
//! Segments only report what they state. Nothing is carried over from an
//! earlier segment.

pub mod decoder;
pub mod segmenter;

#[cfg(test)]
pub mod tests;

pub use decoder::TafDecoder;
pub use segmenter::{RawSegment, SegmentedTaf, segment};
