//! Least-squares building blocks shared by the forecaster.

use crate::error::{Result, StatsError};

/// Denominators within this fraction of their own magnitude are cancellation
/// noise, not variance.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Running sums for a simple least-squares fit of `y` on `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sums {
    /// Number of points pushed.
    pub n: f64,
    pub x: f64,
    pub y: f64,
    pub xy: f64,
    pub xx: f64,
    /// Smallest `x` pushed.
    pub min_x: f64,
    /// Largest `x` pushed.
    pub max_x: f64,
}

impl Default for Sums {
    fn default() -> Self {
        Self {
            n: 0.0,
            x: 0.0,
            y: 0.0,
            xy: 0.0,
            xx: 0.0,
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
        }
    }
}

impl Sums {
    /// Adds one `(x, y)` observation.
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.x += x;
        self.y += y;
        self.xy += x * y;
        self.xx += x * x;
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    /// True when every pushed `x` is identical (or nothing was pushed).
    pub fn is_constant(&self) -> bool {
        self.min_x >= self.max_x
    }

    /// Ordinary least-squares denominator `n·Σx² − (Σx)²`.
    pub fn denominator(&self) -> f64 {
        self.n * self.xx - self.x * self.x
    }

    /// Slope using this series' own denominator.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DegenerateRegression`] when `x` has no variance.
    pub fn slope(&self, predictor: &'static str) -> Result<f64> {
        if self.is_constant() {
            return Err(StatsError::DegenerateRegression { predictor });
        }
        self.slope_over(self.denominator(), predictor)
    }

    /// Slope `(n·Σxy − Σx·Σy) / denominator` for a caller-supplied
    /// denominator.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DegenerateRegression`] when `denominator` is zero
    /// relative to `n·Σx²` and `(Σx)²`, or the quotient is not finite.
    pub fn slope_over(&self, denominator: f64, predictor: &'static str) -> Result<f64> {
        let scale = (self.n * self.xx).abs().max(self.x * self.x);
        if !denominator.is_finite() || denominator.abs() <= RELATIVE_TOLERANCE * scale {
            return Err(StatsError::DegenerateRegression { predictor });
        }
        let slope = (self.n * self.xy - self.x * self.y) / denominator;
        finite(slope, predictor)
    }
}

/// Fits `values` against their positional index `0..n` and evaluates the line
/// one step past the end, at `x = n`.
///
/// The result is unrounded.
///
/// # Errors
///
/// Returns [`StatsError::DegenerateRegression`] for fewer than two values or a
/// non-finite fit.
pub fn predict_next_by_index(
    values: impl IntoIterator<Item = f64>,
    predictor: &'static str,
) -> Result<f64> {
    let mut sums = Sums::default();
    for (i, y) in values.into_iter().enumerate() {
        sums.push(i as f64, y);
    }

    let slope = sums.slope(predictor)?;
    let intercept = (sums.y - slope * sums.x) / sums.n;
    finite(intercept + slope * sums.n, predictor)
}

pub(crate) fn finite(value: f64, predictor: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::DegenerateRegression { predictor })
    }
}
