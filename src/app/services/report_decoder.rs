//! Configured entry point for all three report kinds

use super::datis_decoder::DatisDecoder;
use super::metar_decoder::MetarDecoder;
use super::remark_decoder::RemarkDecoder;
use super::taf_decoder::TafDecoder;
use crate::app::models::{DatisRecord, DecodedReport, MetarRecord, RawReport, ReportKind, TafRecord};
use crate::config::DecoderConfig;

/// Decoder for METAR, TAF and DATIS text built from one [`DecoderConfig`]
///
/// Holds no per-call state; one value can decode any number of reports,
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct Decoder {
    metar: MetarDecoder,
    taf: TafDecoder,
    datis: DatisDecoder,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl Decoder {
    pub fn new(config: &DecoderConfig) -> Self {
        let remarks = RemarkDecoder::new(config.slp_split_threshold);
        Self {
            metar: MetarDecoder::new(remarks.clone()),
            taf: TafDecoder::new(remarks),
            datis: DatisDecoder::from_config(config),
        }
    }

    pub fn decode_metar(&self, raw: &str) -> MetarRecord {
        self.metar.decode(raw)
    }

    pub fn decode_taf(&self, raw: &str) -> TafRecord {
        self.taf.decode(raw)
    }

    pub fn decode_datis(&self, raw: &str, station_hint: Option<&str>) -> DatisRecord {
        self.datis.decode(raw, station_hint)
    }

    /// Decode according to the report's kind
    pub fn decode(&self, report: &RawReport) -> DecodedReport {
        match report.kind {
            ReportKind::Metar => DecodedReport::Metar(self.decode_metar(&report.text)),
            ReportKind::Taf => DecodedReport::Taf(self.decode_taf(&report.text)),
            ReportKind::Datis => DecodedReport::Datis(
                self.decode_datis(&report.text, report.station_hint.as_deref()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_kind() {
        let decoder = Decoder::default();

        let report = decoder.decode(&RawReport::detect("TAF KLAX 151130Z 1512/1618 25012KT P6SM SKC"));
        assert_eq!(report.kind(), ReportKind::Taf);

        let report = decoder.decode(&RawReport::detect("KLAX 151753Z 25012KT 10SM CLR 20/10 A2992"));
        assert_eq!(report.kind(), ReportKind::Metar);

        let report = decoder.decode(
            &RawReport::datis("ARR INFO B 1753Z. RWY 24L CLSD.").with_station_hint("KLAX"),
        );
        match report {
            DecodedReport::Datis(record) => {
                assert_eq!(record.station.as_deref(), Some("KLAX"));
                assert_eq!(record.closed_runways.len(), 1);
            }
            other => panic!("expected DATIS, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_slp_threshold_reaches_remarks() {
        let config = DecoderConfig::default().with_slp_split_threshold(600);
        let record = Decoder::new(&config).decode_metar("KDEN 151753Z 00000KT RMK SLP550");
        assert_eq!(record.remarks.sea_level_pressure(), Some(1055.0));

        let record = Decoder::default().decode_metar("KDEN 151753Z 00000KT RMK SLP550");
        assert_eq!(record.remarks.sea_level_pressure(), Some(955.0));
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let decoder = Decoder::default();
        let text = "METAR KSFO 151756Z 29012KT 10SM FEW008 16/11 A2996 RMK AO2";
        assert_eq!(decoder.decode_metar(text), decoder.decode_metar(text));
    }
}
