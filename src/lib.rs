//! Aviation Weather Report Decoder
//!
//! A Rust library that turns raw aviation weather text into structured,
//! human-readable records.
//!
//! This library provides tools for:
//! - Decoding METAR/SPECI observations, including the coded `RMK` section
//! - Splitting TAF forecasts into change segments and decoding each one
//! - Extracting approaches, departures, closures, notices and advisories
//!   from free-text DATIS broadcasts
//! - Rendering any decoded record as multi-section text
//!
//! Decoding never fails. Anything that is not understood is kept verbatim in
//! the record (`unparsed`, `passthrough`, `unrecognized`) instead of being
//! dropped or reported as an error.
//!
//! ```
//! let record = wx_decoder::decode_metar("KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996 RMK AO2");
//! assert_eq!(record.station.as_deref(), Some("KSFO"));
//! assert_eq!(record.remarks.sensor_type(), Some("AO2"));
//! ```

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DatisRecord, DecodedReport, MetarRecord, RawReport, RemarkSet, ReportKind, TafRecord,
};
pub use app::services::{Decoder, Formatter};
pub use config::{Config, DecoderConfig};
pub use error::{Error, Result};

/// Decode a METAR or SPECI observation with default settings
pub fn decode_metar(raw: &str) -> MetarRecord {
    Decoder::default().decode_metar(raw)
}

/// Decode a terminal aerodrome forecast with default settings
pub fn decode_taf(raw: &str) -> TafRecord {
    Decoder::default().decode_taf(raw)
}

/// Decode a DATIS broadcast with default settings
///
/// `station_hint` is used when the text does not open with a station identifier.
pub fn decode_datis(raw: &str, station_hint: Option<&str>) -> DatisRecord {
    Decoder::default().decode_datis(raw, station_hint)
}

/// Decode a report of any kind with default settings
pub fn decode(report: &RawReport) -> DecodedReport {
    Decoder::default().decode(report)
}

/// Render a decoded report as plain multi-section text
pub fn format(report: &DecodedReport) -> String {
    app::services::formatter::format(report)
}
