//! Tests for the DATIS decoder and its passes


use super::Sentence;

/// Arrival broadcast exercising every pass
pub const KLAX_BROADCAST: &str = "KLAX ARR INFO Q 2353Z. 25012KT 10SM FEW015 BKN250 20/14 A2992. \
SIMUL ILS APCHS IN USE RWY 24R AND 25L. RWY 24L CLSD. TWY C CLSD BTN TWY E AND TWY F. \
RWY 25R PAPI OTS. LAHSO IN EFFECT. BIRD ACTIVITY IN THE VICINITY OF THE ARPT. ADVS YOU HAVE INFO Q.";

/// A standalone sentence starting at offset 0
pub fn sentence(text: &str) -> Sentence<'_> {
    Sentence { text, start: 0 }
}
