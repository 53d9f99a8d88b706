//! Remark group decoder for the `RMK` section of METAR-family reports
//!
//! Groups are matched by fixed-width code shape. Each rule is independent and a
//! token no rule accepts is kept verbatim in [`RemarkSet::passthrough`].
//!
//! Recognized groups:
//! - `AO1`/`AO2` station type
//! - `SLPnnn` sea-level pressure (see [`sea_level_pressure_hpa`])
//! - `Tsnnnsnnn` precise temperature and dewpoint
//! - `1dddd`..`4dddd` hourly and `5appp` 3-hourly pressure tendency
//! - `Pdddd`, `6dddd`, `7dddd` precipitation in hundredths of an inch
//! - `8/CLCMCH` cloud types
//! - `PK WND dddff/hhmm` peak wind
//! - sensor status codes from the shared code table (`PWINO`, `TSNO`, `$`, ...)

use crate::app::models::{
    PrecipitationPeriod, Remark, RemarkSet, TemperatureInfo, TendencyDirection, TendencyPeriod,
    WindDirection, WindInfo,
};
use crate::constants::{self, CodeFamily, DEFAULT_SLP_SPLIT_THRESHOLD, MM_PER_INCH};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static SLP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SLP(\d{3})$").expect("valid SLP regex"));

static PRECISE_TEMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T([01])(\d{3})(?:([01])(\d{3}))?$").expect("valid T-group regex"));

static TENDENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-5])(\d)(\d{3})$").expect("valid tendency regex"));

static PRECIPITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([P67])(\d{4})$").expect("valid precipitation regex"));

static CLOUD_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^8/([0-9/])([0-9/])([0-9/])$").expect("valid cloud type regex"));

static PEAK_WIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{3})(\d{2,3})/(\d{2})?(\d{2})$").expect("valid peak wind regex")
});

static SENSOR_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RWY\d{1,2}[LRC]?$").expect("valid sensor location regex"));

/// Decode a sea-level pressure group value into hectopascals
///
/// Coded values below `split_threshold` read as 10nn.n hPa, the rest as
/// 9nn.n hPa.
pub fn sea_level_pressure_hpa(coded: u16, split_threshold: u16) -> f64 {
    let base = if coded < split_threshold { 10_000 } else { 9_000 };
    f64::from(base + u32::from(coded)) / 10.0
}

/// Decoder for remark tokens
#[derive(Debug, Clone)]
pub struct RemarkDecoder {
    slp_split_threshold: u16,
}

impl Default for RemarkDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_SLP_SPLIT_THRESHOLD)
    }
}

impl RemarkDecoder {
    pub fn new(slp_split_threshold: u16) -> Self {
        Self {
            slp_split_threshold,
        }
    }

    /// Decode the tokens following `RMK`
    pub fn decode(&self, tokens: &[&str]) -> RemarkSet {
        let mut set = RemarkSet::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];

            if token == "PK" && tokens.get(i + 1) == Some(&"WND") {
                if let Some(remark) = tokens.get(i + 2).and_then(|t| peak_wind(t)) {
                    set.remarks.push(remark);
                    i += 3;
                    continue;
                }
            }

            if let Some(mut remark) = self.decode_token(token) {
                if let Remark::SensorFault { location, .. } = &mut remark {
                    if let Some(next) = tokens.get(i + 1).filter(|t| SENSOR_LOCATION_RE.is_match(t)) {
                        *location = Some(next.to_string());
                        i += 1;
                    }
                }
                set.remarks.push(remark);
            } else {
                trace!("Passing through remark token {:?}", token);
                set.passthrough.push(token.to_string());
            }
            i += 1;
        }

        set
    }

    /// Decode one self-contained remark group
    pub fn decode_token(&self, token: &str) -> Option<Remark> {
        if let Some(remark) = sensor_status(token) {
            return Some(remark);
        }
        if let Some(caps) = SLP_RE.captures(token) {
            let coded: u16 = caps[1].parse().ok()?;
            return Some(Remark::SeaLevelPressure {
                hectopascals: Some(sea_level_pressure_hpa(coded, self.slp_split_threshold)),
            });
        }
        if let Some(caps) = PRECISE_TEMP_RE.captures(token) {
            let temperature = signed_tenths(&caps[1], &caps[2])?;
            let dewpoint = match (caps.get(3), caps.get(4)) {
                (Some(sign), Some(value)) => Some(signed_tenths(sign.as_str(), value.as_str())?),
                _ => None,
            };
            return Some(Remark::PreciseTemperature {
                temperature,
                dewpoint,
            });
        }
        if let Some(caps) = TENDENCY_RE.captures(token) {
            return pressure_tendency(token, &caps[1], &caps[2], &caps[3]);
        }
        if let Some(caps) = PRECIPITATION_RE.captures(token) {
            let period = match &caps[1] {
                "P" => PrecipitationPeriod::Hourly,
                "6" => PrecipitationPeriod::ThreeOrSixHour,
                _ => PrecipitationPeriod::TwentyFourHour,
            };
            let hundredths: u32 = caps[2].parse().ok()?;
            let inches = f64::from(hundredths) / 100.0;
            return Some(Remark::Precipitation {
                period,
                inches,
                millimeters: (f64::from(hundredths) * MM_PER_INCH).round() / 100.0,
            });
        }
        if let Some(caps) = CLOUD_TYPE_RE.captures(token) {
            let describe = |family: CodeFamily, digit: &str| {
                constants::lookup(family, digit).map(str::to_string)
            };
            return Some(Remark::CloudTypes {
                low: describe(CodeFamily::LowCloud, &caps[1]),
                middle: describe(CodeFamily::MiddleCloud, &caps[2]),
                high: describe(CodeFamily::HighCloud, &caps[3]),
            });
        }
        None
    }
}

fn sensor_status(token: &str) -> Option<Remark> {
    let description = constants::lookup(CodeFamily::SensorStatus, token)?;
    match token {
        "AO1" | "AO2" => Some(Remark::SensorType {
            code: token.to_string(),
            with_precipitation_discriminator: token == "AO2",
        }),
        "SLPNO" => Some(Remark::SeaLevelPressure { hectopascals: None }),
        _ => Some(Remark::SensorFault {
            code: token.to_string(),
            description: description.to_string(),
            location: None,
        }),
    }
}

/// `T` group half: sign digit `0`/`1` and three digits of tenths
fn signed_tenths(sign: &str, tenths: &str) -> Option<TemperatureInfo> {
    let value = f64::from(tenths.parse::<u16>().ok()?) / 10.0;
    Some(TemperatureInfo::new(if sign == "1" { -value } else { value }))
}

/// Tendency group: period digit, tendency code, change in tenths of hPa
///
/// Codes 0-3 rise, 4 is steady, 5-8 fall. Code 9 is not a tendency and the
/// token passes through.
fn pressure_tendency(token: &str, period: &str, code: &str, change: &str) -> Option<Remark> {
    let direction = match code {
        "0" | "1" | "2" | "3" => TendencyDirection::Rising,
        "4" => TendencyDirection::Steady,
        "5" | "6" | "7" | "8" => TendencyDirection::Falling,
        _ => return None,
    };
    let period = if period == "5" {
        TendencyPeriod::ThreeHourly
    } else {
        TendencyPeriod::Hourly
    };
    Some(Remark::PressureTendency {
        period,
        direction,
        change_hpa: f64::from(change.parse::<u16>().ok()?) / 10.0,
        code: token.to_string(),
    })
}

/// `dddff(f)/(hh)mm` after `PK WND`
fn peak_wind(token: &str) -> Option<Remark> {
    let caps = PEAK_WIND_RE.captures(token)?;
    let degrees: u16 = caps[1].parse().ok()?;
    if degrees > 360 {
        return None;
    }
    let hour = match caps.get(3) {
        Some(h) => Some(h.as_str().parse::<u8>().ok()?).filter(|h| *h < 24),
        None => None,
    };
    let minute: u8 = caps[4].parse().ok()?;
    if minute > 59 {
        return None;
    }
    Some(Remark::PeakWind {
        wind: WindInfo {
            direction: WindDirection::Degrees(degrees),
            speed_knots: caps[2].parse().ok()?,
            gust_knots: None,
            variable_range: None,
        },
        hour,
        minute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::RemarkFamily;

    fn decode(text: &str) -> RemarkSet {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        RemarkDecoder::default().decode(&tokens)
    }

    #[test]
    fn test_standard_remark_extraction() {
        let set = decode("AO2 SLP236 T01780156");
        assert_eq!(set.sensor_type(), Some("AO2"));
        assert_eq!(set.sea_level_pressure(), Some(1023.6));
        let (temp, dew) = set.precise_temperature().unwrap();
        assert_eq!(temp.celsius, 17.8);
        assert_eq!(dew.unwrap().celsius, 15.6);
        assert!(set.passthrough.is_empty());
    }

    #[test]
    fn test_sea_level_pressure_split() {
        assert_eq!(sea_level_pressure_hpa(236, 500), 1023.6);
        assert_eq!(sea_level_pressure_hpa(982, 500), 998.2);
        assert_eq!(sea_level_pressure_hpa(499, 500), 1049.9);
        assert_eq!(sea_level_pressure_hpa(500, 500), 950.0);
        // A higher cut-over moves 550 into the 10xx range
        assert_eq!(sea_level_pressure_hpa(550, 600), 1055.0);
    }

    #[test]
    fn test_negative_precise_temperature() {
        let set = decode("T10221033");
        let (temp, dew) = set.precise_temperature().unwrap();
        assert_eq!(temp.celsius, -2.2);
        assert_eq!(dew.unwrap().celsius, -3.3);
    }

    #[test]
    fn test_pressure_tendency() {
        let set = decode("52012 10142 58033");
        let tendencies: Vec<_> = set.by_family(RemarkFamily::PressureTendency).collect();
        assert_eq!(tendencies.len(), 3);
        match tendencies[0] {
            Remark::PressureTendency {
                period,
                direction,
                change_hpa,
                ..
            } => {
                assert_eq!(*period, TendencyPeriod::ThreeHourly);
                assert_eq!(*direction, TendencyDirection::Rising);
                assert_eq!(*change_hpa, 1.2);
            }
            other => panic!("unexpected remark {:?}", other),
        }
        assert!(matches!(
            tendencies[1],
            Remark::PressureTendency {
                period: TendencyPeriod::Hourly,
                ..
            }
        ));
        assert!(matches!(
            tendencies[2],
            Remark::PressureTendency {
                direction: TendencyDirection::Falling,
                ..
            }
        ));
    }

    #[test]
    fn test_tendency_code_nine_passes_through() {
        let set = decode("59012");
        assert!(set.remarks.is_empty());
        assert_eq!(set.passthrough, vec!["59012"]);
    }

    #[test]
    fn test_precipitation_amounts() {
        let set = decode("P0015 60021 70125");
        let amounts: Vec<_> = set
            .by_family(RemarkFamily::PrecipitationAmount)
            .map(|r| match r {
                Remark::Precipitation {
                    period,
                    inches,
                    millimeters,
                } => (*period, *inches, *millimeters),
                other => panic!("unexpected remark {:?}", other),
            })
            .collect();
        assert_eq!(
            amounts,
            vec![
                (PrecipitationPeriod::Hourly, 0.15, 3.81),
                (PrecipitationPeriod::ThreeOrSixHour, 0.21, 5.33),
                (PrecipitationPeriod::TwentyFourHour, 1.25, 31.75),
            ]
        );
    }

    #[test]
    fn test_cloud_types() {
        let set = decode("8/578");
        match &set.remarks[0] {
            Remark::CloudTypes { low, middle, high } => {
                assert_eq!(low.as_deref(), Some("Stratocumulus"));
                assert_eq!(middle.as_deref(), Some("Double-layered or thick altocumulus"));
                assert_eq!(high.as_deref(), Some("Cirrostratus not covering the sky"));
            }
            other => panic!("unexpected remark {:?}", other),
        }
    }

    #[test]
    fn test_sensor_faults_with_location() {
        let set = decode("PWINO TSNO VISNO RWY06 $");
        let faults: Vec<String> = set.remarks.iter().map(ToString::to_string).collect();
        assert_eq!(
            faults,
            vec![
                "Precipitation identifier sensor not available",
                "Lightning detection sensor not available",
                "Visibility at secondary location not available at RWY06",
                "Station requires maintenance",
            ]
        );
        assert!(set.passthrough.is_empty());
    }

    #[test]
    fn test_peak_wind() {
        let set = decode("AO2 PK WND 28045/1955 SLP101");
        assert_eq!(set.remarks.len(), 3);
        match &set.remarks[1] {
            Remark::PeakWind { wind, hour, minute } => {
                assert_eq!(wind.speed_knots, 45);
                assert_eq!(*hour, Some(19));
                assert_eq!(*minute, 55);
            }
            other => panic!("unexpected remark {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tokens_pass_through_in_order() {
        let set = decode("AO2 ZZZ123 SLP236 RAB15 FROPA");
        assert_eq!(set.passthrough, vec!["ZZZ123", "RAB15", "FROPA"]);
        assert_eq!(set.remarks.len(), 2);
    }

    #[test]
    fn test_slpno() {
        let set = decode("SLPNO");
        assert_eq!(
            set.remarks,
            vec![Remark::SeaLevelPressure { hectopascals: None }]
        );
        assert_eq!(set.sea_level_pressure(), None);
    }
}
