//! Decoded digital ATIS broadcast
//!
//! Operational items render through `Display`; the DATIS decoder deduplicates
//! each list by that rendering.

use super::{AltimeterInfo, CloudLayer, TemperatureInfo, VisibilityInfo, WeatherPhenomenon, WindInfo};
use crate::constants::AdvisoryKind;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which traffic a broadcast serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtisService {
    Arrival,
    Departure,
    Combined,
}

// =============================================================================
// Approaches and Departures
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApproachType {
    Ils,
    Loc,
    RnavRnp,
    Rnav,
    Rnp,
    Gps,
    Visual,
}

impl fmt::Display for ApproachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApproachType::Ils => "ILS",
            ApproachType::Loc => "LOC",
            ApproachType::RnavRnp => "RNAV (RNP)",
            ApproachType::Rnav => "RNAV",
            ApproachType::Rnp => "RNP",
            ApproachType::Gps => "GPS",
            ApproachType::Visual => "Visual",
        };
        f.write_str(label)
    }
}

/// An approach in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Approach {
    /// Typed approaches to a runway list; no types means "Instrument"
    Runways {
        types: Vec<ApproachType>,
        runways: Vec<String>,
        simultaneous: bool,
    },
    /// Named or charted visual procedure such as `CHARTED VISUAL FMS BRIDGE`
    NamedVisual {
        name: String,
        charted: bool,
        runways: Vec<String>,
    },
    VectorsForVisual,
    /// Approach sentence that did not reduce to a runway list
    Other { text: String },
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::Runways {
                types,
                runways,
                simultaneous,
            } => {
                let kind = if types.is_empty() {
                    "Instrument".to_string()
                } else {
                    types
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("/")
                };
                let plural = runways.len() > 1;
                if *simultaneous {
                    write!(f, "Simultaneous {} Approaches", kind)?;
                } else {
                    write!(f, "{} Approach", kind)?;
                }
                write!(f, " to {} {}", runway_noun(plural), runways.join(", "))
            }
            Approach::NamedVisual {
                name,
                charted,
                runways,
            } => {
                if *charted {
                    write!(f, "Charted Visual {} Approach", name)?;
                } else {
                    write!(f, "{} Visual Approach", name)?;
                }
                if !runways.is_empty() {
                    write!(f, " to {} {}", runway_noun(runways.len() > 1), runways.join(", "))?;
                }
                Ok(())
            }
            Approach::VectorsForVisual => f.write_str("Vectors for Visual Approach"),
            Approach::Other { text } => f.write_str(text),
        }
    }
}

/// A departure configuration in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Departure {
    Runways {
        runways: Vec<String>,
        simultaneous: bool,
        instrument: bool,
    },
    Other { text: String },
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Departure::Runways {
                runways,
                simultaneous,
                instrument,
            } => {
                let mut label = String::new();
                if *simultaneous {
                    label.push_str("Simultaneous ");
                }
                if *instrument {
                    label.push_str("Instrument ");
                }
                label.push_str("Departures");
                write!(f, "{}: {} {}", label, runway_noun(runways.len() > 1), runways.join(", "))
            }
            Departure::Other { text } => f.write_str(text),
        }
    }
}

fn runway_noun(plural: bool) -> &'static str {
    if plural { "Runways" } else { "Runway" }
}

// =============================================================================
// Closures and Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClosureRestriction {
    Landing,
    Takeoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunwayClosure {
    pub runway: String,

    /// Partial closure; absent when the runway is fully closed
    pub restriction: Option<ClosureRestriction>,
}

impl fmt::Display for RunwayClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.restriction {
            Some(ClosureRestriction::Landing) => write!(f, "Runway {} Closed to Landing", self.runway),
            Some(ClosureRestriction::Takeoff) => write!(f, "Runway {} Closed to Takeoff", self.runway),
            None => write!(f, "Runway {} Closed", self.runway),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiwayClosure {
    pub taxiway: String,

    /// Closed segment bounds, verbatim from the broadcast
    pub between: Option<(String, String)>,
}

impl fmt::Display for TaxiwayClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.between {
            Some((from, to)) => write!(
                f,
                "Taxiway {} Closed Between {} and {}",
                self.taxiway,
                title_case(from),
                title_case(to)
            ),
            None => write!(f, "Taxiway {} Closed", self.taxiway),
        }
    }
}

/// Navaid or lighting system named in an out-of-service notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Equipment {
    Vor,
    Dme,
    Ils,
    Glideslope,
    Localizer,
    Papi,
    Vasi,
    ApproachLights,
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Equipment::Vor => "VOR",
            Equipment::Dme => "DME",
            Equipment::Ils => "ILS",
            Equipment::Glideslope => "ILS Glideslope",
            Equipment::Localizer => "ILS Localizer",
            Equipment::Papi => "PAPI",
            Equipment::Vasi => "VASI",
            Equipment::ApproachLights => "Approach Lights",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notam {
    EquipmentOutOfService {
        equipment: Equipment,
        runway: Option<String>,
    },
    /// Notice sentence kept as broadcast
    General { text: String },
}

impl fmt::Display for Notam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notam::EquipmentOutOfService { equipment, runway } => match runway {
                Some(rwy) => write!(f, "Runway {} {} Out of Service", rwy, equipment),
                None => write!(f, "{} Out of Service", equipment),
            },
            Notam::General { text } => f.write_str(text),
        }
    }
}

// =============================================================================
// Advisories
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,

    /// Sentence the advisory was found in
    pub text: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.fixed_message() {
            Some(message) => f.write_str(message),
            None => f.write_str(&self.text),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A decoded broadcast
///
/// Each item list is deduplicated by decoded string. Sentences that yielded
/// nothing are kept verbatim in `unrecognized`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatisRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<AtisService>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_letter: Option<char>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_time: Option<NaiveTime>,

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

    pub approaches: Vec<Approach>,
    pub departures: Vec<Departure>,
    pub closed_runways: Vec<RunwayClosure>,
    pub closed_taxiways: Vec<TaxiwayClosure>,
    pub notams: Vec<Notam>,
    pub advisories: Vec<Advisory>,

    /// Sentences no pass claimed
    pub unrecognized: Vec<String>,

    pub raw_text: String,
}

/// `TAXIWAY F` -> `Taxiway F`; location names stay as broadcast
fn title_case(location: &str) -> String {
    location
        .split_whitespace()
        .map(|word| match word {
            "TAXIWAY" => "Taxiway".to_string(),
            "RUNWAY" | "RWY" => "Runway".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
