//! Property tests: decoders are total and normalization is stable

use proptest::prelude::*;
use wx_decoder::app::services::normalizer::normalize;
use wx_decoder::{RawReport, decode, decode_datis, decode_metar, decode_taf, format};

const VOCABULARY: &[&str] = &[
    "KLAX", "INFO", "Q", "2353Z", "RWY", "RY", "RWYS", "24R", "25L", "APCH", "APCHS", "ILS",
    "RNAV", "VISUAL", "CLSD", "TWY", "BTN", "OTS", "U/S", "SIMUL", "LNDG", "DEP", "AND", "IN",
    "USE", "TO", "-RA", "+TSRA", "BR", "VCSH", "25012G20KT", "10SM", "1", "1/2SM", "M1/4SM",
    "9999", "CAVOK", "FEW015", "BKN250CB", "VV002", "20/14", "M02/M05", "A2992", "Q1013",
    "RMK", "AO2", "SLP236", "T01780156", "TEMPO", "BECMG", "FM151800", "PROB30", "1515/1518",
    "TX25/1521Z", "WS020/24045KT", "NSW", "NOSIG", "LAHSO", "BIRD", "ACTIVITY", ".", ",",
];

fn report_words() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn decoders_never_panic_on_arbitrary_text(text in ".*") {
        let _ = decode_metar(&text);
        let _ = decode_taf(&text);
        let _ = decode_datis(&text, None);
        let _ = format(&decode(&RawReport::detect(text.clone())));
    }

    #[test]
    fn decoders_never_panic_on_repeated_input(
        unit in prop::sample::select(&["R", "9", "/", " ", "RWY ", "FEW020 ", "INFO A. ", "TEMPO ", "-"][..]),
        count in 0usize..2000,
    ) {
        let text = unit.repeat(count);
        let _ = decode_metar(&text);
        let _ = decode_taf(&text);
        let record = decode_datis(&text, None);
        prop_assert_eq!(record.raw_text, text);
    }

    #[test]
    fn decoders_never_panic_on_report_shaped_text(text in report_words()) {
        for report in [
            RawReport::metar(text.clone()),
            RawReport::taf(text.clone()),
            RawReport::datis(text.clone()).with_station_hint("KXYZ"),
        ] {
            let decoded = decode(&report);
            prop_assert_eq!(decoded.raw_text(), text.as_str());
            prop_assert!(!format(&decoded).is_empty());
        }
    }

    #[test]
    fn normalize_is_idempotent(text in "[A-Za-z0-9/ .,\t\n-]{0,120}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn normalize_is_idempotent_on_shorthand(text in report_words()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn decoding_is_deterministic(text in report_words()) {
        prop_assert_eq!(decode_datis(&text, None), decode_datis(&text, None));
        prop_assert_eq!(decode_metar(&text), decode_metar(&text));
    }
}
