//! Tests for present-weather groups

use super::super::weather::{find_all, is_ambiguous_bare, parse_token};
use crate::app::models::Intensity;
use crate::constants::CodeFamily;

#[test]
fn test_heavy_thunderstorm_rain() {
    let wx = parse_token("+TSRA").unwrap();
    assert_eq!(wx.intensity, Intensity::Heavy);
    assert_eq!(wx.descriptor.as_ref().unwrap().code, "TS");
    assert_eq!(wx.phenomena.len(), 1);
    assert_eq!(wx.phenomena[0].family, CodeFamily::Precipitation);
    assert_eq!(wx.to_string(), "Heavy Thunderstorm Rain");
}

#[test]
fn test_prefixes() {
    assert_eq!(parse_token("-DZ").unwrap().intensity, Intensity::Light);
    assert_eq!(parse_token("VCSH").unwrap().intensity, Intensity::Vicinity);
    let recent = parse_token("RERA").unwrap();
    assert!(recent.recent);
    assert_eq!(recent.phenomena[0].code, "RA");
}

#[test]
fn test_multiple_phenomena() {
    let wx = parse_token("-FZRASN").unwrap();
    assert_eq!(wx.descriptor.as_ref().unwrap().code, "FZ");
    let codes: Vec<_> = wx.phenomena.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, vec!["RA", "SN"]);
}

#[test]
fn test_rejects_non_weather() {
    assert!(parse_token("KT").is_none());
    assert!(parse_token("RMK").is_none());
    assert!(parse_token("RAIN").is_none());
    assert!(parse_token("FZ").is_none());
    assert!(parse_token("RAFZ").is_none());
    assert!(parse_token("+").is_none());
    assert!(parse_token("").is_none());
}

#[test]
fn test_standalone_thunderstorm() {
    let ts = parse_token("TS").unwrap();
    assert!(ts.phenomena.is_empty());
    assert_eq!(ts.descriptor.unwrap().code, "TS");
}

#[test]
fn test_ambiguous_bare_codes_need_a_prefix() {
    assert!(is_ambiguous_bare(&parse_token("UP").unwrap()));
    assert!(!is_ambiguous_bare(&parse_token("-UP").unwrap()));

    let found = find_all("LANDING RWY 25L UP. -RA BR.", 0);
    let raw: Vec<_> = found.iter().map(|p| p.value.raw.as_str()).collect();
    assert_eq!(raw, vec!["-RA", "BR"]);
}
