//! Pearson correlation between two columns of a weekly series.

use tracing::debug;

use super::to_fixed;
use crate::record::{Field, WeeklyRecord};

/// Pearson correlation coefficient of `x` against `y`, rounded to three
/// decimals.
///
/// Returns exactly `0.0` when either column has zero variance, including the
/// empty and single-record cases.
pub fn correlation(records: &[WeeklyRecord], x: Field, y: Field) -> f64 {
    let n = records.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;

    for r in records {
        let xv = x.value(r);
        let yv = y.value(r);
        sum_x += xv;
        sum_y += yv;
        sum_xy += xv * yv;
        sum_x2 += xv * xv;
        sum_y2 += yv * yv;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    // cancellation can leave a constant column with a tiny or negative
    // variance term, so constancy is checked on the values themselves
    if is_constant(records, x)
        || is_constant(records, y)
        || denominator.is_nan()
        || denominator <= 0.0
    {
        debug!(%x, %y, n = records.len(), "zero variance, correlation undefined");
        return 0.0;
    }

    let r = (numerator / denominator).clamp(-1.0, 1.0);
    if !r.is_finite() {
        debug!(%x, %y, "non-finite correlation");
        return 0.0;
    }
    to_fixed(r, 3).parse().unwrap_or(r)
}

fn is_constant(records: &[WeeklyRecord], field: Field) -> bool {
    records
        .windows(2)
        .all(|w| field.value(&w[0]) == field.value(&w[1]))
}
