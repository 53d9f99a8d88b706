//! Decoded terminal aerodrome forecast

use super::{
    AltimeterInfo, CloudLayer, DayTime, RemarkSet, TemperatureInfo, VisibilityInfo,
    WeatherPhenomenon, WindInfo,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validity window of a change group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TafPeriod {
    pub from: DayTime,

    /// End of the window; absent when only a single time was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DayTime>,
}

impl fmt::Display for TafPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{} to {}", self.from, to),
            None => write!(f, "{}", self.from),
        }
    }
}

/// Kind of forecast segment with its validity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SegmentKind {
    /// Initial forecast conditions for the header period
    Main,
    /// `FMddhhmm` rapid change
    From { at: DayTime },
    /// `BECMG` gradual change
    Becoming { period: Option<TafPeriod> },
    /// `TEMPO` temporary fluctuation
    Temporary { period: Option<TafPeriod> },
    /// `PROBnn`, optionally qualified by `TEMPO`
    Probability {
        percent: u8,
        period: Option<TafPeriod>,
        temporary: bool,
    },
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_period = |f: &mut fmt::Formatter<'_>, label: &str, period: &Option<TafPeriod>| {
            match period {
                Some(p) => write!(f, "{} {}", label, p),
                None => f.write_str(label),
            }
        };
        match self {
            SegmentKind::Main => f.write_str("Initial"),
            SegmentKind::From { at } => write!(f, "From {}", at),
            SegmentKind::Becoming { period } => with_period(f, "Becoming", period),
            SegmentKind::Temporary { period } => with_period(f, "Temporarily", period),
            SegmentKind::Probability {
                percent,
                period,
                temporary,
            } => {
                let label = if *temporary {
                    format!("{}% probability, temporarily", percent)
                } else {
                    format!("{}% probability", percent)
                };
                with_period(f, &label, period)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremeKind {
    Maximum,
    Minimum,
}

/// `TXdd/ddhhZ` or `TNdd/ddhhZ` group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureExtreme {
    pub kind: ExtremeKind,
    pub celsius: f64,
    pub at: DayTime,
}

/// `WShhh/dddffKT` non-convective wind shear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindShear {
    pub height_feet: u32,
    pub wind: WindInfo,
}

/// One change segment with only the fields it explicitly states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSegment {
    pub kind: SegmentKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityInfo>,

    pub weather: Vec<WeatherPhenomenon>,

    /// `NSW` no significant weather
    pub no_significant_weather: bool,

    pub clouds: Vec<CloudLayer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<TemperatureInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub altimeter: Option<AltimeterInfo>,

    pub temperature_extremes: Vec<TemperatureExtreme>,
    pub wind_shear: Vec<WindShear>,

    /// Tokens no rule recognized
    pub unparsed: Vec<String>,
}

impl ForecastSegment {
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            wind: None,
            visibility: None,
            weather: Vec::new(),
            no_significant_weather: false,
            clouds: Vec::new(),
            temperature: None,
            dewpoint: None,
            altimeter: None,
            temperature_extremes: Vec::new(),
            wind_shear: Vec::new(),
            unparsed: Vec::new(),
        }
    }

    /// Whether the segment states no conditions at all
    pub fn is_empty(&self) -> bool {
        self.wind.is_none()
            && self.visibility.is_none()
            && self.weather.is_empty()
            && !self.no_significant_weather
            && self.clouds.is_empty()
            && self.temperature.is_none()
            && self.altimeter.is_none()
            && self.temperature_extremes.is_empty()
            && self.wind_shear.is_empty()
            && self.unparsed.is_empty()
    }
}

/// A decoded forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TafRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<DayTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DayTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DayTime>,

    pub amended: bool,
    pub corrected: bool,

    /// Missing forecast (`NIL`)
    pub nil: bool,

    /// Segments in source order; `Main` first when present
    pub segments: Vec<ForecastSegment>,

    pub remarks: RemarkSet,

    pub raw_text: String,
}

impl TafRecord {
    pub fn main_segment(&self) -> Option<&ForecastSegment> {
        self.segments
            .first()
            .filter(|s| matches!(s.kind, SegmentKind::Main))
    }
}
