//! Data models for decoded aviation reports
//!
//! This module contains the report-independent building blocks shared by the
//! METAR, TAF and DATIS records: the raw input envelope, the five weather
//! primitives (wind, visibility, clouds, temperature, altimeter), present
//! weather phenomena and day/time stamps. The per-report records live in the
//! submodules and are re-exported here.

use crate::constants::{self, CodeFamily};
use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod datis;
pub mod metar;
pub mod remarks;
pub mod taf;

pub use datis::{
    Advisory, Approach, ApproachType, AtisService, ClosureRestriction, DatisRecord, Departure,
    Equipment, Notam, RunwayClosure, TaxiwayClosure,
};
pub use metar::MetarRecord;
pub use remarks::{
    PrecipitationPeriod, Remark, RemarkFamily, RemarkSet, TendencyDirection, TendencyPeriod,
};
pub use taf::{ExtremeKind, ForecastSegment, SegmentKind, TafPeriod, TafRecord, TemperatureExtreme, WindShear};

// =============================================================================
// Raw Input
// =============================================================================

/// Kind of coded report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Metar,
    Taf,
    Datis,
}

impl ReportKind {
    /// Guess the report kind from its text
    ///
    /// A leading `TAF` marks a forecast; an `INFO <letter>` header or the word
    /// `ATIS` marks a broadcast; everything else is treated as an observation.
    pub fn detect(text: &str) -> Self {
        let upper = text.to_ascii_uppercase();
        let words: Vec<&str> = upper.split_whitespace().collect();

        if words.first() == Some(&"TAF") {
            return ReportKind::Taf;
        }

        let has_info_header = words.windows(2).any(|pair| {
            (pair[0] == "INFO" || pair[0] == "INFORMATION")
                && pair[1].len() == 1
                && pair[1].chars().all(|c| c.is_ascii_alphabetic())
        });

        if has_info_header || words.iter().any(|w| *w == "ATIS" || *w == "D-ATIS") {
            ReportKind::Datis
        } else {
            ReportKind::Metar
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Metar => "METAR",
            ReportKind::Taf => "TAF",
            ReportKind::Datis => "DATIS",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metar" | "speci" => Ok(ReportKind::Metar),
            "taf" => Ok(ReportKind::Taf),
            "datis" | "atis" => Ok(ReportKind::Datis),
            other => Err(Error::unknown_report_kind(other)),
        }
    }
}

/// Raw report text as received from a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReport {
    /// Which grammar the text follows
    pub kind: ReportKind,

    /// Report text exactly as received
    pub text: String,

    /// Station identifier known to the caller, used when the text has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_hint: Option<String>,
}

impl RawReport {
    pub fn new(kind: ReportKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            station_hint: None,
        }
    }

    /// Create a report whose kind is detected from the text
    pub fn detect(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(ReportKind::detect(&text), text)
    }

    pub fn metar(text: impl Into<String>) -> Self {
        Self::new(ReportKind::Metar, text)
    }

    pub fn taf(text: impl Into<String>) -> Self {
        Self::new(ReportKind::Taf, text)
    }

    pub fn datis(text: impl Into<String>) -> Self {
        Self::new(ReportKind::Datis, text)
    }

    /// Attach a station hint
    pub fn with_station_hint(mut self, station: impl Into<String>) -> Self {
        self.station_hint = Some(station.into());
        self
    }
}

/// A decoded report of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DecodedReport {
    Metar(MetarRecord),
    Taf(TafRecord),
    Datis(DatisRecord),
}

impl DecodedReport {
    pub fn kind(&self) -> ReportKind {
        match self {
            DecodedReport::Metar(_) => ReportKind::Metar,
            DecodedReport::Taf(_) => ReportKind::Taf,
            DecodedReport::Datis(_) => ReportKind::Datis,
        }
    }

    /// Report text as it was received
    pub fn raw_text(&self) -> &str {
        match self {
            DecodedReport::Metar(r) => &r.raw_text,
            DecodedReport::Taf(r) => &r.raw_text,
            DecodedReport::Datis(r) => &r.raw_text,
        }
    }

    /// Number of items that were kept verbatim because nothing decoded them
    pub fn passthrough_count(&self) -> usize {
        match self {
            DecodedReport::Metar(r) => r.unparsed.len() + r.remarks.passthrough.len(),
            DecodedReport::Taf(r) => {
                r.segments.iter().map(|s| s.unparsed.len()).sum::<usize>()
                    + r.remarks.passthrough.len()
            }
            DecodedReport::Datis(r) => r.unrecognized.len(),
        }
    }
}

// =============================================================================
// Day/Time Stamps
// =============================================================================

/// Day-of-month and UTC time as carried by coded reports (no month or year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DayTime {
    /// Create a stamp, rejecting out-of-range fields
    ///
    /// Hour 24 is accepted because forecast periods end at `dd24`.
    pub fn new(day: u8, hour: u8, minute: u8) -> Option<Self> {
        if (1..=31).contains(&day) && hour <= 24 && minute <= 59 && !(hour == 24 && minute > 0) {
            Some(Self { day, hour, minute })
        } else {
            None
        }
    }

    /// Parse `ddhhmm` digits
    pub fn parse_ddhhmm(digits: &str) -> Option<Self> {
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(
            digits[0..2].parse().ok()?,
            digits[2..4].parse().ok()?,
            digits[4..6].parse().ok()?,
        )
    }

    /// Parse `ddhh` digits (minute zero)
    pub fn parse_ddhh(digits: &str) -> Option<Self> {
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(digits[0..2].parse().ok()?, digits[2..4].parse().ok()?, 0)
    }

    /// Resolve into a full UTC timestamp using the month nearest to `reference`
    ///
    /// The previous, current and following month are tried and the candidate
    /// closest to the reference wins, so both recent observations and
    /// upcoming forecast periods land in the right month.
    pub fn resolve(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (year, month) = (reference.year(), reference.month());
        let months = [
            if month == 1 { (year - 1, 12) } else { (year, month - 1) },
            (year, month),
            if month == 12 { (year + 1, 1) } else { (year, month + 1) },
        ];

        months
            .iter()
            .filter_map(|&(y, m)| {
                let date = NaiveDate::from_ymd_opt(y, m, u32::from(self.day))?;
                let (date, hour) = if self.hour == 24 {
                    (date.succ_opt()?, 0)
                } else {
                    (date, u32::from(self.hour))
                };
                let naive = date.and_hms_opt(hour, u32::from(self.minute), 0)?;
                Some(Utc.from_utc_datetime(&naive))
            })
            .min_by_key(|candidate| (*candidate - reference).num_seconds().abs())
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}{:02}Z", self.day, self.hour, self.minute)
    }
}

// =============================================================================
// Wind
// =============================================================================

/// Wind direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    Degrees(u16),
    Variable,
}

/// Decoded surface wind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindInfo {
    pub direction: WindDirection,

    /// Sustained speed in knots (converted when reported in MPS or KMH)
    pub speed_knots: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust_knots: Option<u16>,

    /// Extremes of a variable direction group (`180V240`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_range: Option<(u16, u16)>,
}

impl WindInfo {
    /// Zero-speed wind reported as `CALM` or `00000KT`
    pub fn calm() -> Self {
        Self {
            direction: WindDirection::Degrees(0),
            speed_knots: 0,
            gust_knots: None,
            variable_range: None,
        }
    }

    pub fn is_calm(&self) -> bool {
        self.speed_knots == 0 && self.gust_knots.is_none()
    }
}

impl fmt::Display for WindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calm() {
            return f.write_str("Calm");
        }
        match self.direction {
            WindDirection::Degrees(deg) => write!(f, "{:03}° at {} kt", deg, self.speed_knots)?,
            WindDirection::Variable => write!(f, "Variable at {} kt", self.speed_knots)?,
        }
        if let Some(gust) = self.gust_knots {
            write!(f, ", gusting {} kt", gust)?;
        }
        if let Some((low, high)) = self.variable_range {
            write!(f, " (varying {:03}°–{:03}°)", low, high)?;
        }
        Ok(())
    }
}

// =============================================================================
// Visibility
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    StatuteMiles,
    Meters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityQualifier {
    GreaterThan,
    LessThan,
}

/// Decoded prevailing visibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityInfo {
    /// Distance in `unit`; absent for CAVOK
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    pub unit: DistanceUnit,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<VisibilityQualifier>,

    pub is_cavok: bool,
}

impl VisibilityInfo {
    pub fn cavok() -> Self {
        Self {
            distance: None,
            unit: DistanceUnit::Meters,
            qualifier: None,
            is_cavok: true,
        }
    }
}

impl fmt::Display for VisibilityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cavok {
            return f.write_str("CAVOK (10 km or more, no significant cloud or weather)");
        }
        match self.qualifier {
            Some(VisibilityQualifier::GreaterThan) => f.write_str("Greater than ")?,
            Some(VisibilityQualifier::LessThan) => f.write_str("Less than ")?,
            None => {}
        }
        let distance = self.distance.unwrap_or_default();
        match self.unit {
            DistanceUnit::StatuteMiles => write!(f, "{} SM", format_miles(distance)),
            DistanceUnit::Meters => write!(f, "{} m", distance),
        }
    }
}

/// Render statute miles as a whole number with a common fraction
fn format_miles(value: f64) -> String {
    let whole = value.trunc();
    let fraction = value - whole;
    if fraction.abs() < 1e-9 {
        return format!("{}", whole);
    }
    for denominator in [2u32, 4, 8, 16] {
        let numerator = fraction * f64::from(denominator);
        if (numerator - numerator.round()).abs() < 1e-9 {
            let fraction_text = format!("{}/{}", numerator.round(), denominator);
            return if whole == 0.0 {
                fraction_text
            } else {
                format!("{} {}", whole, fraction_text)
            };
        }
    }
    format!("{:.2}", value)
}

// =============================================================================
// Clouds
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudCoverage {
    Few,
    Scattered,
    Broken,
    Overcast,
    Clear,
    Obscured,
    /// NSC, NCD or implied by CAVOK
    NoSignificant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificantCloud {
    Cumulonimbus,
    ToweringCumulus,
}

/// One reported cloud layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub coverage: CloudCoverage,

    /// Base height in feet; vertical visibility for obscured layers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_feet: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant: Option<SignificantCloud>,
}

impl CloudLayer {
    pub fn new(coverage: CloudCoverage, height_feet: Option<u32>) -> Self {
        Self {
            coverage,
            height_feet,
            significant: None,
        }
    }
}

impl fmt::Display for CloudLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.coverage {
            CloudCoverage::Few => "Few",
            CloudCoverage::Scattered => "Scattered",
            CloudCoverage::Broken => "Broken",
            CloudCoverage::Overcast => "Overcast",
            CloudCoverage::Clear => return f.write_str("Sky clear"),
            CloudCoverage::NoSignificant => return f.write_str("No significant clouds"),
            CloudCoverage::Obscured => {
                return match self.height_feet {
                    Some(h) => write!(f, "Vertical visibility {} ft", thousands(h)),
                    None => f.write_str("Sky obscured"),
                };
            }
        };
        match self.height_feet {
            Some(h) => write!(f, "{} at {} ft", label, thousands(h))?,
            None => write!(f, "{} at unknown height", label)?,
        }
        match self.significant {
            Some(SignificantCloud::Cumulonimbus) => f.write_str(" (Cumulonimbus)"),
            Some(SignificantCloud::ToweringCumulus) => f.write_str(" (Towering cumulus)"),
            None => Ok(()),
        }
    }
}

/// Format an integer with thousands separators
pub fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Temperature and Pressure
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureInfo {
    pub celsius: f64,
}

impl TemperatureInfo {
    pub fn new(celsius: f64) -> Self {
        // M00 would otherwise render as "-0"
        let celsius = if celsius == 0.0 { 0.0 } else { celsius };
        Self { celsius }
    }
}

impl fmt::Display for TemperatureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.celsius)
    }
}

/// Altimeter setting in whichever units the report carried
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AltimeterInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inches_of_mercury: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hectopascals: Option<f64>,
}

impl AltimeterInfo {
    pub fn is_empty(&self) -> bool {
        self.inches_of_mercury.is_none() && self.hectopascals.is_none()
    }

    /// Fill whichever units `other` carries and this value lacks
    pub fn merge(&mut self, other: AltimeterInfo) {
        self.inches_of_mercury = self.inches_of_mercury.or(other.inches_of_mercury);
        self.hectopascals = self.hectopascals.or(other.hectopascals);
    }
}

impl fmt::Display for AltimeterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.inches_of_mercury, self.hectopascals) {
            (Some(inhg), Some(hpa)) => write!(f, "{:.2} inHg / {} hPa", inhg, hpa),
            (Some(inhg), None) => write!(f, "{:.2} inHg", inhg),
            (None, Some(hpa)) => write!(f, "{} hPa", hpa),
            (None, None) => f.write_str("Not reported"),
        }
    }
}

// =============================================================================
// Present Weather
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Light,
    Moderate,
    Heavy,
    /// In the vicinity (`VC`)
    Vicinity,
}

/// A two-letter present-weather code and its family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCode {
    pub code: String,
    pub family: CodeFamily,
}

impl WeatherCode {
    pub fn description(&self) -> &'static str {
        constants::lookup(self.family, &self.code).unwrap_or("Unknown")
    }
}

/// One present-weather group such as `+TSRA` or `VCSH`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    pub intensity: Intensity,

    /// Recent weather (`RE` prefix)
    pub recent: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<WeatherCode>,

    pub phenomena: Vec<WeatherCode>,

    /// Group as it appeared in the report
    pub raw: String,
}

impl fmt::Display for WeatherPhenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<&str> = Vec::new();
        if self.recent {
            words.push("Recent");
        }
        match self.intensity {
            Intensity::Light => words.push("Light"),
            Intensity::Heavy => words.push("Heavy"),
            Intensity::Vicinity => words.push("Vicinity"),
            Intensity::Moderate => {}
        }
        if let Some(descriptor) = &self.descriptor {
            words.push(descriptor.description());
        }
        for phenomenon in &self.phenomena {
            words.push(phenomenon.description());
        }
        f.write_str(&words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_detection() {
        assert_eq!(
            ReportKind::detect("TAF KLAX 151130Z 1512/1618 28015KT P6SM FEW250"),
            ReportKind::Taf
        );
        assert_eq!(
            ReportKind::detect("KLAX ARR INFO L 1953Z. 25012KT 10SM"),
            ReportKind::Datis
        );
        assert_eq!(
            ReportKind::detect("KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996"),
            ReportKind::Metar
        );
        assert_eq!(ReportKind::detect(""), ReportKind::Metar);
    }

    #[test]
    fn test_report_kind_from_str() {
        assert_eq!("METAR".parse::<ReportKind>().unwrap(), ReportKind::Metar);
        assert_eq!("atis".parse::<ReportKind>().unwrap(), ReportKind::Datis);
        assert!("pirep".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_day_time_parsing() {
        assert_eq!(
            DayTime::parse_ddhhmm("151753"),
            Some(DayTime {
                day: 15,
                hour: 17,
                minute: 53
            })
        );
        assert_eq!(DayTime::parse_ddhh("1524").map(|t| t.hour), Some(24));
        assert_eq!(DayTime::parse_ddhh("3225"), None);
        assert_eq!(DayTime::parse_ddhhmm("15175"), None);
        assert_eq!(DayTime::parse_ddhhmm("15AB53"), None);
    }

    #[test]
    fn test_day_time_resolution() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let late_feb = DayTime::new(29, 23, 50).unwrap();
        assert_eq!(
            late_feb.resolve(reference),
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 23, 50, 0).unwrap())
        );

        let end_of_period = DayTime::new(1, 24, 0).unwrap();
        assert_eq!(
            end_of_period.resolve(reference),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_primitive_display() {
        let wind = WindInfo {
            direction: WindDirection::Degrees(240),
            speed_knots: 15,
            gust_knots: Some(25),
            variable_range: Some((200, 270)),
        };
        assert_eq!(wind.to_string(), "240° at 15 kt, gusting 25 kt (varying 200°–270°)");
        assert_eq!(WindInfo::calm().to_string(), "Calm");

        let vis = VisibilityInfo {
            distance: Some(1.5),
            unit: DistanceUnit::StatuteMiles,
            qualifier: None,
            is_cavok: false,
        };
        assert_eq!(vis.to_string(), "1 1/2 SM");

        let cloud = CloudLayer {
            coverage: CloudCoverage::Broken,
            height_feet: Some(25_000),
            significant: Some(SignificantCloud::Cumulonimbus),
        };
        assert_eq!(cloud.to_string(), "Broken at 25,000 ft (Cumulonimbus)");

        assert_eq!(TemperatureInfo::new(-0.0).to_string(), "0°C");
        assert_eq!(TemperatureInfo::new(17.8).to_string(), "17.8°C");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(800), "800");
        assert_eq!(thousands(2000), "2,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
