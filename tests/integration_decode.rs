//! End-to-end decoding through the public API
//!
//! Covers the documented behaviour of each report kind on realistic text,
//! from raw input to rendered output.

use wx_decoder::app::models::{
    ApproachType, CloudCoverage, Intensity, SegmentKind, TafPeriod, VisibilityQualifier,
    WindDirection,
};
use wx_decoder::app::models::{Approach, DayTime};
use wx_decoder::{
    DecodedReport, Decoder, DecoderConfig, RawReport, ReportKind, decode, decode_datis,
    decode_metar, decode_taf, format,
};

#[test]
fn test_metar_remark_extraction() {
    let record = decode_metar(
        "METAR KJFK 151751Z 19015G25KT 5SM +TSRA BR FEW020 SCT100 BKN250CB 18/16 A2992 RMK AO2 SLP236 T01780156",
    );

    let wind = record.wind.as_ref().unwrap();
    assert_eq!(wind.direction, WindDirection::Degrees(190));
    assert_eq!(wind.speed_knots, 15);
    assert_eq!(wind.gust_knots, Some(25));

    assert_eq!(record.weather[0].intensity, Intensity::Heavy);
    assert_eq!(record.weather[0].to_string(), "Heavy Thunderstorm Rain");

    let heights: Vec<Option<u32>> = record.clouds.iter().map(|c| c.height_feet).collect();
    assert_eq!(heights, vec![Some(2000), Some(10000), Some(25000)]);
    assert_eq!(record.clouds[2].coverage, CloudCoverage::Broken);

    assert_eq!(record.remarks.sensor_type(), Some("AO2"));
    assert_eq!(record.remarks.sea_level_pressure(), Some(1023.6));
    let (temp, dew) = record.remarks.precise_temperature().unwrap();
    assert_eq!(temp.celsius, 17.8);
    assert_eq!(dew.unwrap().celsius, 15.6);
}

#[test]
fn test_unknown_remark_is_preserved() {
    let record = decode_metar("KSFO 151756Z 29012KT 10SM CLR 16/11 A2996 RMK AO2 ZZZ123");
    assert_eq!(record.remarks.passthrough, vec!["ZZZ123"]);
}

#[test]
fn test_visibility_qualifiers() {
    let record = decode_metar("KDEN 151753Z 27010KT P6SM SKC 20/M05 A3010");
    let vis = record.visibility.unwrap();
    assert_eq!(vis.qualifier, Some(VisibilityQualifier::GreaterThan));
    assert_eq!(vis.distance, Some(6.0));

    let record = decode_metar("KSEA 151753Z 00000KT M1/4SM FG VV001 10/10 A3001");
    let vis = record.visibility.unwrap();
    assert_eq!(vis.qualifier, Some(VisibilityQualifier::LessThan));
    assert_eq!(vis.distance, Some(0.25));

    let record = decode_metar("LFPG 151800Z 22005KT CAVOK 24/12 Q1016");
    let vis = record.visibility.unwrap();
    assert!(vis.is_cavok);
    assert_eq!(vis.distance, None);
}

#[test]
fn test_taf_segmentation_order() {
    let record = decode_taf(
        "TAF KLAX 151200Z 1512/1612 28015KT P6SM SCT020 TEMPO 1515/1518 BKN012 BECMG 1518/1520 25008KT",
    );
    assert_eq!(record.segments.len(), 3);

    let period = |from: (u8, u8), to: (u8, u8)| {
        Some(TafPeriod {
            from: DayTime::new(from.0, from.1, 0).unwrap(),
            to: DayTime::new(to.0, to.1, 0),
        })
    };
    assert_eq!(record.segments[0].kind, SegmentKind::Main);
    assert_eq!(
        record.segments[1].kind,
        SegmentKind::Temporary {
            period: period((15, 15), (15, 18))
        }
    );
    assert_eq!(
        record.segments[2].kind,
        SegmentKind::Becoming {
            period: period((15, 18), (15, 20))
        }
    );
}

#[test]
fn test_datis_deduplication() {
    let record = decode_datis(
        "KSFO ATIS INFO C 1656Z. ILS RWY 28R APCH IN USE. RWY 28R CLSD TO DEPARTURES. \
         RWY 28R CLSD TO DEPARTURES. BIRD ACTIVITY VICINITY OF ARPT. BIRD ACTIVITY VICINITY OF ARPT. \
         RWY 1L PAPI OTS. RWY 1L PAPI OTS.",
        None,
    );

    assert_eq!(record.info_letter, Some('C'));
    assert_eq!(
        record.approaches,
        vec![Approach::Runways {
            types: vec![ApproachType::Ils],
            runways: vec!["28R".to_string()],
            simultaneous: false,
        }]
    );
    assert_eq!(record.closed_runways.len(), 1);
    assert_eq!(record.closed_runways[0].to_string(), "Runway 28R Closed to Takeoff");
    assert_eq!(record.advisories.len(), 1);
    assert_eq!(record.notams.len(), 1);
    assert!(record.unrecognized.is_empty());
}

#[test]
fn test_detect_and_decode_each_kind() {
    let inputs = [
        ("SPECI KBOS 151802Z 09012KT 2SM -SN OVC008 M01/M03 A2990", ReportKind::Metar),
        ("TAF KBOS 151730Z 1518/1624 09012KT 2SM -SN OVC008", ReportKind::Taf),
        ("BOS ATIS INFO K 1754Z. RWY 4R CLSD.", ReportKind::Datis),
    ];
    for (text, kind) in inputs {
        let report = decode(&RawReport::detect(text));
        assert_eq!(report.kind(), kind, "{}", text);
        assert_eq!(report.raw_text(), text);
        assert!(!format(&report).is_empty());
    }
}

#[test]
fn test_configured_decoder() {
    let config = DecoderConfig::default().with_advisory_phrase("PILOTS USE CAUTION");
    let decoder = Decoder::new(&config);

    let report = decoder.decode(
        &RawReport::datis("INFO A. PILOTS USE CAUTION FOR CONSTRUCTION EQUIPMENT NEAR TAXIWAY B.")
            .with_station_hint("KOAK"),
    );
    let DecodedReport::Datis(record) = report else {
        panic!("expected a DATIS record");
    };
    assert_eq!(record.station.as_deref(), Some("KOAK"));
    assert_eq!(record.advisories.len(), 1);
    assert_eq!(record.notams.len(), 1);
}

#[test]
fn test_json_shape() {
    let report = decode(&RawReport::metar("KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996"));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["kind"], "metar");
    assert_eq!(value["station"], "KSFO");
    assert_eq!(value["wind"]["speed_knots"], 12);
}
