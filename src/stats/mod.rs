//! Statistics engines over a weekly series.
//!
//! Every engine is a pure function of its input slice: no state survives a
//! call, so calls on different series can run on any number of threads.

pub mod correlation;
pub mod forecast;
pub mod grouping;
pub mod regression;

pub use correlation::correlation;
pub use forecast::{DenominatorMode, Forecast, forecast_next_week};
pub use grouping::{GroupAverage, GroupedAverages, grouped_average};

/// Formats `value` with exactly `digits` fractional digits.
///
/// Exact binary ties round away from zero; everything else rounds to the
/// nearest representable decimal.
pub fn to_fixed(value: f64, digits: usize) -> String {
    // normalise -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    let scale = 10_f64.powi(digits as i32);
    let scaled = value.abs() * scale;
    // a tie only when the product was not itself rounded onto .5
    let exact = value.abs().mul_add(scale, -scaled) == 0.0;
    if exact && scaled.fract() == 0.5 {
        let rounded = (scaled.floor() + 1.0).copysign(value) / scale;
        return format!("{rounded:.digits$}");
    }
    format!("{value:.digits$}")
}

/// Rounds to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
