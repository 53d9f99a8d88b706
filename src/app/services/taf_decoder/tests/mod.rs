//! Tests for TAF segmentation and segment decoding


/// Forecast with a main period and three kinds of change group
pub const KLAX_TAF: &str = "TAF KLAX 151130Z 1512/1618 26012KT P6SM FEW025 \
    TEMPO 1515/1518 BKN015 \
    BECMG 1518/1520 27015G22KT \
    FM160200 VRB03KT P6SM SKC \
    PROB30 TEMPO 1610/1614 3SM BR";

pub fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
