//! Tests for temperature pairs and altimeter settings

use super::super::{altimeter, temperature};

#[test]
fn test_temperature_pair() {
    let (temp, dew) = temperature::parse_token("17/11").unwrap();
    assert_eq!(temp.celsius, 17.0);
    assert_eq!(dew.unwrap().celsius, 11.0);

    let (temp, dew) = temperature::parse_token("M02/M08").unwrap();
    assert_eq!(temp.celsius, -2.0);
    assert_eq!(dew.unwrap().celsius, -8.0);
}

#[test]
fn test_temperature_minus_zero() {
    let (temp, _) = temperature::parse_token("M00/M01").unwrap();
    assert_eq!(temp.to_string(), "0°C");
}

#[test]
fn test_temperature_missing_dewpoint() {
    let (temp, dew) = temperature::parse_token("05/").unwrap();
    assert_eq!(temp.celsius, 5.0);
    assert!(dew.is_none());
    assert!(temperature::parse_token("1/2").is_none());
    assert!(temperature::parse_token("1512/1618").is_none());
}

#[test]
fn test_temperature_scan_skips_runways_and_dates() {
    let text = "RWY 12/30 IN USE. 1512/1618. 23/14 A3001";
    let parsed = temperature::find(text, 0).unwrap();
    assert_eq!(&text[parsed.span()], "23/14");
}

#[test]
fn test_temperature_scan_skips_runway_pair_lists() {
    assert!(temperature::find("RWY 10/28 AND 12/30 CLOSED", 0).is_none());
    assert!(temperature::find("RUNWAY 6L/24R, 12/30 AND 15/33 IN USE", 0).is_none());
    assert!(temperature::find("12/30 CLOSED", 0).is_none());

    let text = "RWY 10/28 AND 12/30 CLOSED. TEMPERATURE 21/08";
    let parsed = temperature::find(text, 0).unwrap();
    assert_eq!(&text[parsed.span()], "21/08");
    assert_eq!(parsed.value.0.celsius, 21.0);
}

#[test]
fn test_altimeter_tokens() {
    let a = altimeter::parse_token("A2992").unwrap();
    assert_eq!(a.inches_of_mercury, Some(29.92));
    assert_eq!(a.hectopascals, None);

    let q = altimeter::parse_token("Q1013").unwrap();
    assert_eq!(q.hectopascals, Some(1013.0));
    assert_eq!(q.inches_of_mercury, None);

    assert!(altimeter::parse_token("A299").is_none());
}

#[test]
fn test_altimeter_scan_keeps_both_units() {
    let parsed = altimeter::find("TEMP 18. A2992 (Q1013)", 0).unwrap();
    assert_eq!(parsed.value.inches_of_mercury, Some(29.92));
    assert_eq!(parsed.value.hectopascals, Some(1013.0));

    let parsed = altimeter::find("ALTIMETER 3001.", 0).unwrap();
    assert_eq!(parsed.value.inches_of_mercury, Some(30.01));

    let parsed = altimeter::find("QNH 998", 0);
    assert!(parsed.is_none());
}
