//! Code tables and constants for the aviation text decoder
//!
//! All fixed vocabularies live here so the METAR, TAF and DATIS decoders share
//! one lookup: weather phenomenon codes, remark sensor-status codes, cloud-type
//! digits, shorthand expansions and advisory phrases. Lookups are keyed by
//! [`CodeFamily`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Code Families
// =============================================================================

/// Family a fixed code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeFamily {
    /// Weather descriptor (SH, TS, FZ, ...)
    Descriptor,
    /// Precipitation phenomenon (RA, SN, DZ, ...)
    Precipitation,
    /// Obscuration phenomenon (BR, FG, HZ, ...)
    Obscuration,
    /// Other weather phenomenon (SQ, FC, DS, ...)
    OtherPhenomenon,
    /// Remark sensor-status and fault codes (PWINO, TSNO, $, ...)
    SensorStatus,
    /// Low cloud type digit from the 8/CLCMCH remark group
    LowCloud,
    /// Middle cloud type digit from the 8/CLCMCH remark group
    MiddleCloud,
    /// High cloud type digit from the 8/CLCMCH remark group
    HighCloud,
}

/// One entry in the shared code table
#[derive(Debug, Clone, Copy)]
pub struct CodeEntry {
    pub family: CodeFamily,
    pub code: &'static str,
    pub description: &'static str,
}

const fn entry(family: CodeFamily, code: &'static str, description: &'static str) -> CodeEntry {
    CodeEntry {
        family,
        code,
        description,
    }
}

use self::CodeFamily::*;

/// Shared code table for weather phenomena, sensor status and cloud types
pub const CODE_TABLE: &[CodeEntry] = &[
    // Descriptors
    entry(Descriptor, "MI", "Shallow"),
    entry(Descriptor, "PR", "Partial"),
    entry(Descriptor, "BC", "Patches"),
    entry(Descriptor, "DR", "Low drifting"),
    entry(Descriptor, "BL", "Blowing"),
    entry(Descriptor, "SH", "Showers"),
    entry(Descriptor, "TS", "Thunderstorm"),
    entry(Descriptor, "FZ", "Freezing"),
    // Precipitation
    entry(Precipitation, "DZ", "Drizzle"),
    entry(Precipitation, "RA", "Rain"),
    entry(Precipitation, "SN", "Snow"),
    entry(Precipitation, "SG", "Snow grains"),
    entry(Precipitation, "IC", "Ice crystals"),
    entry(Precipitation, "PL", "Ice pellets"),
    entry(Precipitation, "GR", "Hail"),
    entry(Precipitation, "GS", "Small hail"),
    entry(Precipitation, "UP", "Unknown precipitation"),
    // Obscuration
    entry(Obscuration, "BR", "Mist"),
    entry(Obscuration, "FG", "Fog"),
    entry(Obscuration, "FU", "Smoke"),
    entry(Obscuration, "VA", "Volcanic ash"),
    entry(Obscuration, "DU", "Widespread dust"),
    entry(Obscuration, "SA", "Sand"),
    entry(Obscuration, "HZ", "Haze"),
    entry(Obscuration, "PY", "Spray"),
    // Other
    entry(OtherPhenomenon, "PO", "Dust/sand whirls"),
    entry(OtherPhenomenon, "SQ", "Squalls"),
    entry(OtherPhenomenon, "FC", "Funnel cloud"),
    entry(OtherPhenomenon, "SS", "Sandstorm"),
    entry(OtherPhenomenon, "DS", "Duststorm"),
    // Sensor status
    entry(SensorStatus, "AO1", "Automated station without precipitation discriminator"),
    entry(SensorStatus, "AO2", "Automated station with precipitation discriminator"),
    entry(SensorStatus, "PWINO", "Precipitation identifier sensor not available"),
    entry(SensorStatus, "PNO", "Precipitation amount not available"),
    entry(SensorStatus, "FZRANO", "Freezing rain sensor not available"),
    entry(SensorStatus, "TSNO", "Lightning detection sensor not available"),
    entry(SensorStatus, "VISNO", "Visibility at secondary location not available"),
    entry(SensorStatus, "CHINO", "Cloud height at secondary location not available"),
    entry(SensorStatus, "RVRNO", "Runway visual range not available"),
    entry(SensorStatus, "SLPNO", "Sea-level pressure not available"),
    entry(SensorStatus, "$", "Station requires maintenance"),
    // Low clouds (WMO code table 0513)
    entry(LowCloud, "0", "No low clouds"),
    entry(LowCloud, "1", "Cumulus of fair weather"),
    entry(LowCloud, "2", "Towering cumulus"),
    entry(LowCloud, "3", "Cumulonimbus without anvil"),
    entry(LowCloud, "4", "Stratocumulus from spreading cumulus"),
    entry(LowCloud, "5", "Stratocumulus"),
    entry(LowCloud, "6", "Stratus or fractostratus"),
    entry(LowCloud, "7", "Fractocumulus or fractostratus of bad weather"),
    entry(LowCloud, "8", "Cumulus and stratocumulus at different levels"),
    entry(LowCloud, "9", "Cumulonimbus with anvil"),
    entry(LowCloud, "/", "Low clouds not observable"),
    // Middle clouds (WMO code table 0515)
    entry(MiddleCloud, "0", "No middle clouds"),
    entry(MiddleCloud, "1", "Thin altostratus"),
    entry(MiddleCloud, "2", "Thick altostratus or nimbostratus"),
    entry(MiddleCloud, "3", "Thin altocumulus in a single level"),
    entry(MiddleCloud, "4", "Patches of thin altocumulus"),
    entry(MiddleCloud, "5", "Thickening bands of altocumulus"),
    entry(MiddleCloud, "6", "Altocumulus from spreading cumulus"),
    entry(MiddleCloud, "7", "Double-layered or thick altocumulus"),
    entry(MiddleCloud, "8", "Altocumulus castellanus"),
    entry(MiddleCloud, "9", "Altocumulus of a chaotic sky"),
    entry(MiddleCloud, "/", "Middle clouds not observable"),
    // High clouds (WMO code table 0509)
    entry(HighCloud, "0", "No high clouds"),
    entry(HighCloud, "1", "Cirrus filaments"),
    entry(HighCloud, "2", "Dense cirrus"),
    entry(HighCloud, "3", "Cirrus from cumulonimbus"),
    entry(HighCloud, "4", "Cirrus thickening"),
    entry(HighCloud, "5", "Cirrus and cirrostratus below 45 degrees"),
    entry(HighCloud, "6", "Cirrus and cirrostratus above 45 degrees"),
    entry(HighCloud, "7", "Cirrostratus covering the sky"),
    entry(HighCloud, "8", "Cirrostratus not covering the sky"),
    entry(HighCloud, "9", "Cirrocumulus"),
    entry(HighCloud, "/", "High clouds not observable"),
];

/// Look up a code's description within one family
pub fn lookup(family: CodeFamily, code: &str) -> Option<&'static str> {
    CODE_TABLE
        .iter()
        .find(|e| e.family == family && e.code == code)
        .map(|e| e.description)
}

/// Find the weather family of a two-letter weather code
///
/// Only descriptor and phenomenon families are searched; remark and cloud
/// families reuse digits and short codes that would collide.
pub fn weather_family(code: &str) -> Option<CodeFamily> {
    CODE_TABLE
        .iter()
        .find(|e| e.code == code && e.family.is_weather())
        .map(|e| e.family)
}

impl CodeFamily {
    /// Whether this family is part of the present-weather vocabulary
    pub fn is_weather(self) -> bool {
        matches!(
            self,
            Descriptor | Precipitation | Obscuration | OtherPhenomenon
        )
    }

    /// Whether this family names a phenomenon rather than a descriptor
    pub fn is_phenomenon(self) -> bool {
        matches!(self, Precipitation | Obscuration | OtherPhenomenon)
    }
}

/// Two-letter phenomenon codes that also read as ordinary words or
/// abbreviations in broadcast prose. In DATIS text they only count as weather
/// with an intensity or descriptor attached.
pub const AMBIGUOUS_BARE_CODES: &[&str] = &[
    "UP", "IC", "SA", "PO", "DU", "GS", "GR", "PL", "SG", "SS", "DS", "PY", "VA", "SQ", "FC",
];

// =============================================================================
// Normalizer Shorthand Table
// =============================================================================

/// Whole-word shorthand expansions applied by the normalizer
///
/// No expansion may contain any shorthand key as a whole word, otherwise
/// normalization stops being idempotent.
pub const SHORTHAND_EXPANSIONS: &[(&str, &str)] = &[
    ("RY", "RWY"),
    ("RWYS", "RWY"),
    ("APCHS", "APPROACHES"),
    ("APCH", "APPROACH"),
    ("APP", "APPROACH"),
    ("DEPG", "DEPARTURES"),
    ("DEP", "DEPARTURE"),
    ("LNDG", "LANDING"),
    ("TWY", "TAXIWAY"),
    ("TWYS", "TAXIWAY"),
    ("CLSD", "CLOSED"),
    ("BTN", "BETWEEN"),
    ("CTC", "CONTACT"),
    ("GC", "GROUND CONTROL"),
    ("NAV", "NAVIGATION"),
    ("INOP", "INOPERATIVE"),
    ("OTS", "OUT OF SERVICE"),
    ("U/S", "UNSERVICEABLE"),
    ("VCTR", "VECTORS"),
    ("VCTRS", "VECTORS"),
    ("SIMUL", "SIMULTANEOUS"),
    ("INSTR", "INSTRUMENT"),
    ("HAZD", "HAZARDOUS"),
    ("WX", "WEATHER"),
];

// =============================================================================
// DATIS Phrase Tables
// =============================================================================

/// Named visual approaches recognized by default
pub const DEFAULT_NAMED_VISUAL_APPROACHES: &[&str] = &["QUIET BRIDGE", "TIPP TOE", "FMS BRIDGE"];

/// Advisory categories recognized in DATIS text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryKind {
    BirdActivity,
    LandAndHoldShort,
    LowLevelWindShear,
    RunwayIncursion,
    HoldShort,
    Readback,
    HazardousWeather,
    Custom,
}

impl AdvisoryKind {
    /// Fixed decoded message for advisories that do not quote their sentence
    pub fn fixed_message(self) -> Option<&'static str> {
        match self {
            AdvisoryKind::LandAndHoldShort => Some("Land and Hold Short Operations in effect"),
            AdvisoryKind::LowLevelWindShear => Some("Low Level Wind Shear Advisories in effect"),
            _ => None,
        }
    }
}

/// Phrase membership table for the DATIS advisory pass
///
/// Checked in order; a sentence yields at most one advisory per kind.
pub const ADVISORY_PHRASES: &[(&str, AdvisoryKind)] = &[
    ("BIRD ACTIVITY", AdvisoryKind::BirdActivity),
    ("LAHSO", AdvisoryKind::LandAndHoldShort),
    ("LAND AND HOLD SHORT", AdvisoryKind::LandAndHoldShort),
    ("LOW LEVEL WIND SHEAR", AdvisoryKind::LowLevelWindShear),
    ("LLWS", AdvisoryKind::LowLevelWindShear),
    ("RUNWAY INCURSIONS", AdvisoryKind::RunwayIncursion),
    ("RUNWAY INCURSION", AdvisoryKind::RunwayIncursion),
    ("RWY INCURSIONS", AdvisoryKind::RunwayIncursion),
    ("RWY INCURSION", AdvisoryKind::RunwayIncursion),
    ("READBACK", AdvisoryKind::Readback),
    ("READ BACK", AdvisoryKind::Readback),
    ("HOLD SHORT", AdvisoryKind::HoldShort),
    ("HAZARDOUS WEATHER", AdvisoryKind::HazardousWeather),
];

/// Phrases that mark a general notice in DATIS text
pub const NOTICE_PHRASES: &[&str] = &[
    "OUT OF SERVICE",
    "UNSERVICEABLE",
    "INOPERATIVE",
    "WORK IN PROGRESS",
    "CONSTRUCTION",
    "CRANE",
    "NOTAM",
];

/// Phrases that mark equipment as unavailable
pub const OUT_OF_SERVICE_PHRASES: &[&str] = &["OUT OF SERVICE", "UNSERVICEABLE", "INOPERATIVE"];

// =============================================================================
// Numeric Conventions
// =============================================================================

/// Default cut-over for the sea-level-pressure heuristic: coded values below
/// this are read as 10xx.x hPa, the rest as 9xx.x hPa
pub const DEFAULT_SLP_SPLIT_THRESHOLD: u16 = 500;

/// Knots per metre per second
pub const KNOTS_PER_MPS: f64 = 1.943_844;

/// Knots per kilometre per hour
pub const KNOTS_PER_KMH: f64 = 0.539_957;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Metres reported for the 9999 "10 km or more" visibility group
pub const METRIC_VISIBILITY_MAX: f64 = 10_000.0;

#[cfg(test)]
mod tests {
    use super::CodeFamily::*;
    use super::*;

    #[test]
    fn test_lookup_by_family() {
        assert_eq!(lookup(Precipitation, "RA"), Some("Rain"));
        assert_eq!(lookup(Descriptor, "TS"), Some("Thunderstorm"));
        assert_eq!(lookup(SensorStatus, "PWINO"), Some("Precipitation identifier sensor not available"));
        assert_eq!(lookup(LowCloud, "9"), Some("Cumulonimbus with anvil"));
        assert_eq!(lookup(HighCloud, "/"), Some("High clouds not observable"));
        assert_eq!(lookup(Precipitation, "ZZ"), None);
    }

    #[test]
    fn test_weather_family_ignores_non_weather_codes() {
        assert_eq!(weather_family("FG"), Some(Obscuration));
        assert_eq!(weather_family("SH"), Some(Descriptor));
        assert_eq!(weather_family("SQ"), Some(OtherPhenomenon));
        assert_eq!(weather_family("5"), None);
        assert_eq!(weather_family("AO2"), None);
    }

    #[test]
    fn test_no_duplicate_codes_within_family() {
        for (i, a) in CODE_TABLE.iter().enumerate() {
            for b in &CODE_TABLE[i + 1..] {
                assert!(
                    !(a.family == b.family && a.code == b.code),
                    "duplicate {:?} {}",
                    a.family,
                    a.code
                );
            }
        }
    }

    #[test]
    fn test_expansions_contain_no_shorthand_words() {
        for (_, expansion) in SHORTHAND_EXPANSIONS {
            for word in expansion.split(' ') {
                assert!(
                    !SHORTHAND_EXPANSIONS.iter().any(|(key, _)| *key == word),
                    "expansion '{}' re-introduces shorthand '{}'",
                    expansion,
                    word
                );
            }
        }
    }

    #[test]
    fn test_fixed_advisory_messages() {
        assert_eq!(
            AdvisoryKind::LandAndHoldShort.fixed_message(),
            Some("Land and Hold Short Operations in effect")
        );
        assert_eq!(AdvisoryKind::BirdActivity.fixed_message(), None);
    }
}
