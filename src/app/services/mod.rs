//! Decoding services
//!
//! - [`normalizer`] - canonical spacing/case and shorthand expansion
//! - [`primitives`] - wind, visibility, cloud, temperature, altimeter and
//!   weather parsers shared by every decoder
//! - [`remark_decoder`] - coded `RMK` groups
//! - [`metar_decoder`], [`taf_decoder`], [`datis_decoder`] - one per report kind
//! - [`report_decoder`] - configured facade over the three decoders
//! - [`formatter`] - human-readable rendering

pub mod datis_decoder;
pub mod formatter;
pub mod metar_decoder;
pub mod normalizer;
pub mod primitives;
pub mod remark_decoder;
pub mod report_decoder;
pub mod taf_decoder;

pub use datis_decoder::DatisDecoder;
pub use formatter::Formatter;
pub use metar_decoder::MetarDecoder;
pub use remark_decoder::RemarkDecoder;
pub use report_decoder::Decoder;
pub use taf_decoder::TafDecoder;
