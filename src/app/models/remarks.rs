//! Remark section records
//!
//! Decoded remark groups are closed tagged variants, one per code family.
//! Tokens no rule recognized are kept verbatim in [`RemarkSet::passthrough`].

use super::{TemperatureInfo, WindInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Code family a remark was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemarkFamily {
    SensorStatus,
    PreciseTemperature,
    SeaLevelPressure,
    PressureTendency,
    PrecipitationAmount,
    CloudType,
    PeakWind,
}

/// Averaging window of a pressure tendency group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TendencyPeriod {
    /// `1dddd`-`4dddd` groups
    Hourly,
    /// `5appp` group
    ThreeHourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TendencyDirection {
    Rising,
    Steady,
    Falling,
}

/// Accumulation window of a precipitation group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecipitationPeriod {
    /// `Pdddd` group
    Hourly,
    /// `6dddd` group
    ThreeOrSixHour,
    /// `7dddd` group
    TwentyFourHour,
}

/// One decoded remark group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Remark {
    /// `AO1`/`AO2` station type
    SensorType { code: String, with_precipitation_discriminator: bool },

    /// `Tsnnnsnnn` tenths-of-a-degree temperature and dewpoint
    PreciseTemperature {
        temperature: TemperatureInfo,
        dewpoint: Option<TemperatureInfo>,
    },

    /// `SLPnnn`; absent when the station reported `SLPNO`
    SeaLevelPressure { hectopascals: Option<f64> },

    PressureTendency {
        period: TendencyPeriod,
        direction: TendencyDirection,
        change_hpa: f64,
        code: String,
    },

    Precipitation {
        period: PrecipitationPeriod,
        inches: f64,
        millimeters: f64,
    },

    /// `8/CLCMCH` cloud type digits
    CloudTypes {
        low: Option<String>,
        middle: Option<String>,
        high: Option<String>,
    },

    /// Sensor outage such as `PWINO` or `VISNO RWY06`
    SensorFault {
        code: String,
        description: String,
        location: Option<String>,
    },

    /// `PK WND dddff(f)/(hh)mm`
    PeakWind { wind: WindInfo, hour: Option<u8>, minute: u8 },
}

impl Remark {
    pub fn family(&self) -> RemarkFamily {
        match self {
            Remark::SensorType { .. } | Remark::SensorFault { .. } => RemarkFamily::SensorStatus,
            Remark::PreciseTemperature { .. } => RemarkFamily::PreciseTemperature,
            Remark::SeaLevelPressure { .. } => RemarkFamily::SeaLevelPressure,
            Remark::PressureTendency { .. } => RemarkFamily::PressureTendency,
            Remark::Precipitation { .. } => RemarkFamily::PrecipitationAmount,
            Remark::CloudTypes { .. } => RemarkFamily::CloudType,
            Remark::PeakWind { .. } => RemarkFamily::PeakWind,
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remark::SensorType {
                code,
                with_precipitation_discriminator,
            } => {
                let kind = if *with_precipitation_discriminator {
                    "with precipitation discriminator"
                } else {
                    "without precipitation discriminator"
                };
                write!(f, "Automated station {} ({})", kind, code)
            }
            Remark::PreciseTemperature {
                temperature,
                dewpoint,
            } => match dewpoint {
                Some(dew) => write!(f, "Temperature {}, dewpoint {}", temperature, dew),
                None => write!(f, "Temperature {}", temperature),
            },
            Remark::SeaLevelPressure { hectopascals } => match hectopascals {
                Some(hpa) => write!(f, "Sea level pressure {:.1} hPa", hpa),
                None => f.write_str("Sea level pressure not available"),
            },
            Remark::PressureTendency {
                period,
                direction,
                change_hpa,
                ..
            } => {
                let window = match period {
                    TendencyPeriod::Hourly => "1-hour",
                    TendencyPeriod::ThreeHourly => "3-hour",
                };
                let trend = match direction {
                    TendencyDirection::Rising => "rising",
                    TendencyDirection::Steady => "steady",
                    TendencyDirection::Falling => "falling",
                };
                write!(f, "{} pressure tendency {}, {:.1} hPa", window, trend, change_hpa)
            }
            Remark::Precipitation {
                period,
                inches,
                millimeters,
            } => {
                let window = match period {
                    PrecipitationPeriod::Hourly => "1-hour",
                    PrecipitationPeriod::ThreeOrSixHour => "3/6-hour",
                    PrecipitationPeriod::TwentyFourHour => "24-hour",
                };
                write!(
                    f,
                    "{} precipitation {:.2} in ({:.1} mm)",
                    window, inches, millimeters
                )
            }
            Remark::CloudTypes { low, middle, high } => {
                let parts: Vec<String> = [("Low", low), ("middle", middle), ("high", high)]
                    .iter()
                    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
                    .collect();
                write!(f, "Cloud types {}", parts.join("; "))
            }
            Remark::SensorFault {
                description,
                location,
                ..
            } => match location {
                Some(location) => write!(f, "{} at {}", description, location),
                None => f.write_str(description),
            },
            Remark::PeakWind { wind, hour, minute } => match hour {
                Some(h) => write!(f, "Peak wind {} at {:02}{:02}Z", wind, h, minute),
                None => write!(f, "Peak wind {} at minute {:02}", wind, minute),
            },
        }
    }
}

/// Decoded remarks plus the tokens no rule understood
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemarkSet {
    /// Decoded remarks in source order
    pub remarks: Vec<Remark>,

    /// Unrecognized tokens, verbatim and in source order
    pub passthrough: Vec<String>,
}

impl RemarkSet {
    pub fn is_empty(&self) -> bool {
        self.remarks.is_empty() && self.passthrough.is_empty()
    }

    pub fn by_family(&self, family: RemarkFamily) -> impl Iterator<Item = &Remark> {
        self.remarks.iter().filter(move |r| r.family() == family)
    }

    /// Station type code (`AO1`/`AO2`)
    pub fn sensor_type(&self) -> Option<&str> {
        self.remarks.iter().find_map(|r| match r {
            Remark::SensorType { code, .. } => Some(code.as_str()),
            _ => None,
        })
    }

    pub fn sea_level_pressure(&self) -> Option<f64> {
        self.remarks.iter().find_map(|r| match r {
            Remark::SeaLevelPressure { hectopascals } => *hectopascals,
            _ => None,
        })
    }

    /// Tenths-precision temperature and dewpoint
    pub fn precise_temperature(&self) -> Option<(TemperatureInfo, Option<TemperatureInfo>)> {
        self.remarks.iter().find_map(|r| match r {
            Remark::PreciseTemperature {
                temperature,
                dewpoint,
            } => Some((*temperature, *dewpoint)),
            _ => None,
        })
    }
}
