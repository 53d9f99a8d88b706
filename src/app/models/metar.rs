//! Decoded METAR/SPECI observation

use super::{
    AltimeterInfo, CloudLayer, DayTime, RemarkSet, TemperatureInfo, VisibilityInfo,
    WeatherPhenomenon, WindInfo,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decoded routine or special surface observation
///
/// Every field is optional. Tokens in the body that no rule recognized are kept
/// in `unparsed`; remark tokens no rule recognized are in `remarks.passthrough`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetarRecord {
    /// ICAO station identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    /// Report was a SPECI rather than a routine METAR
    pub is_special: bool,

    /// Observation day and time (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<DayTime>,

    pub auto: bool,
    pub corrected: bool,

    /// Missing report (`NIL`)
    pub nil: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityInfo>,

    pub weather: Vec<WeatherPhenomenon>,
    pub clouds: Vec<CloudLayer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<TemperatureInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub altimeter: Option<AltimeterInfo>,

    /// Trend group `NOSIG`
    pub no_significant_change: bool,

    pub remarks: RemarkSet,

    /// Body tokens no rule recognized
    pub unparsed: Vec<String>,

    pub raw_text: String,
}

impl MetarRecord {
    /// Observation time resolved against a reference instant
    pub fn observed_at(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.observed.and_then(|t| t.resolve(reference))
    }

    /// Lowest broken, overcast or obscured layer height in feet
    pub fn ceiling_feet(&self) -> Option<u32> {
        use super::CloudCoverage::*;
        self.clouds
            .iter()
            .filter(|l| matches!(l.coverage, Broken | Overcast | Obscured))
            .filter_map(|l| l.height_feet)
            .min()
    }
}
