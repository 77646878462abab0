//! Next-week yield forecaster.
//!
//! Weather and reject series are each extrapolated one step with a
//! least-squares line over their positional index. Yield is then modelled as an
//! intercept plus six independently fitted slopes (week number, the three
//! weather series, and the two reject series), and evaluated at next week's
//! extrapolated inputs.
//!
//! This is a naive sum of simple regressions, not a multiple-regression solve.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::regression::{Sums, finite, predict_next_by_index};
use super::round_half_up;
use crate::error::{Result, StatsError};
use crate::record::{Field, WeeklyRecord};

/// Minimum number of weeks needed to fit a slope.
pub const MIN_WEEKS: usize = 2;

/// Predictors of the composite yield fit, in coefficient order.
const PREDICTORS: [Field; 6] = [
    Field::WeekNumber,
    Field::Humidity,
    Field::Rainfall,
    Field::Temperature,
    Field::RejectDueToPest,
    Field::RejectDueToDisease,
];

/// Denominator used for each composite yield coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorMode {
    /// Each predictor's own `n·Σxᵢ² − (Σxᵢ)²`.
    #[default]
    PerPredictor,
    /// `n·Σweek² − (Σxᵢ)²` for every predictor. Reproduces the figures of the
    /// legacy dashboard backend.
    SharedWeek,
}

impl DenominatorMode {
    /// Accepted names, as used in config files and on the command line.
    pub const NAMES: &[&str] = &["per_predictor", "shared_week"];

    pub const fn name(self) -> &'static str {
        match self {
            DenominatorMode::PerPredictor => "per_predictor",
            DenominatorMode::SharedWeek => "shared_week",
        }
    }
}

impl fmt::Display for DenominatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DenominatorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per_predictor" => Ok(DenominatorMode::PerPredictor),
            "shared_week" => Ok(DenominatorMode::SharedWeek),
            _ => Err(format!(
                "unknown denominator mode \"{s}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Extrapolated weather for next week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictedWeather {
    pub humidity: i64,
    pub rainfall: i64,
    pub temperature: i64,
}

/// Extrapolated reject counts for next week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictedReject {
    pub reject_due_to_pest: i64,
    pub reject_due_to_disease: i64,
}

/// Next-week forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Forecast {
    /// Week being forecast: last observed week + 1.
    pub next_week: u32,
    pub predicted_weather: PredictedWeather,
    pub predicted_reject: PredictedReject,
    /// Composite yield estimate, rounded to the nearest unit.
    pub predicted_yield: i64,
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = &self.predicted_weather;
        let r = &self.predicted_reject;
        writeln!(f, "--- Forecast: week {} ---", self.next_week)?;
        writeln!(f, "Humidity:              {}", w.humidity)?;
        writeln!(f, "Rainfall:              {}", w.rainfall)?;
        writeln!(f, "Temperature:           {}", w.temperature)?;
        writeln!(f, "Reject (pest):         {}", r.reject_due_to_pest)?;
        writeln!(f, "Reject (disease):      {}", r.reject_due_to_disease)?;
        write!(f, "Strawberry yield:      {}", self.predicted_yield)
    }
}

/// Forecasts next week's weather, rejects, and yield.
///
/// `records` must be ordered by ascending week with no duplicates.
///
/// Returns `Ok(None)` when fewer than [`MIN_WEEKS`] records are supplied.
///
/// # Errors
///
/// Returns [`StatsError::DegenerateRegression`] naming the first predictor
/// whose fit has a zero denominator or produces a non-finite value, and
/// [`StatsError::WeekOutOfRange`] when the last week is `u32::MAX`.
pub fn forecast_next_week(
    records: &[WeeklyRecord],
    mode: DenominatorMode,
) -> Result<Option<Forecast>> {
    let Some(last) = records.last() else {
        debug!("no weeks supplied, skipping forecast");
        return Ok(None);
    };
    if records.len() < MIN_WEEKS {
        debug!(weeks = records.len(), "insufficient data for forecast");
        return Ok(None);
    }
    let next_week = last
        .week_number
        .checked_add(1)
        .ok_or(StatsError::WeekOutOfRange {
            week_number: last.week_number,
        })?;

    let n = records.len() as f64;
    let mut sums = [Sums::default(); 6];
    for r in records {
        for (s, field) in sums.iter_mut().zip(PREDICTORS) {
            s.push(field.value(r), r.strawberry_yield);
        }
    }

    let week_xx = sums[0].xx;
    let mut coefficients = [0.0; 6];
    for ((m, s), field) in coefficients.iter_mut().zip(&sums).zip(PREDICTORS) {
        *m = match mode {
            DenominatorMode::PerPredictor => s.slope(field.name())?,
            DenominatorMode::SharedWeek => s.slope_over(n * week_xx - s.x * s.x, field.name())?,
        };
    }

    let sum_y = sums[0].y;
    let weighted: f64 = coefficients
        .iter()
        .zip(&sums)
        .fold(0.0, |acc, (m, s)| acc + m * s.x);
    let intercept = (sum_y - weighted) / n;
    debug!(?mode, intercept, ?coefficients, "fitted composite yield model");

    let predicted_weather = PredictedWeather {
        humidity: next_by_index(records, Field::Humidity)?,
        rainfall: next_by_index(records, Field::Rainfall)?,
        temperature: next_by_index(records, Field::Temperature)?,
    };
    let predicted_reject = PredictedReject {
        reject_due_to_pest: next_by_index(records, Field::RejectDueToPest)?,
        reject_due_to_disease: next_by_index(records, Field::RejectDueToDisease)?,
    };

    let inputs = [
        f64::from(next_week),
        predicted_weather.humidity as f64,
        predicted_weather.rainfall as f64,
        predicted_weather.temperature as f64,
        predicted_reject.reject_due_to_pest as f64,
        predicted_reject.reject_due_to_disease as f64,
    ];
    let raw_yield = coefficients
        .iter()
        .zip(inputs)
        .fold(intercept, |acc, (m, x)| acc + m * x);
    let raw_yield = finite(raw_yield, Field::StrawberryYield.name())?;

    Ok(Some(Forecast {
        next_week,
        predicted_weather,
        predicted_reject,
        predicted_yield: round_half_up(raw_yield) as i64,
    }))
}

fn next_by_index(records: &[WeeklyRecord], field: Field) -> Result<i64> {
    let raw = predict_next_by_index(records.iter().map(|r| field.value(r)), field.name())?;
    Ok(round_half_up(raw) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    fn week(w: u32, h: f64, r: f64, t: f64, y: f64, p: f64, d: f64) -> WeeklyRecord {
        WeeklyRecord {
            week_number: w,
            humidity: h,
            rainfall: r,
            temperature: t,
            strawberry_yield: y,
            reject_due_to_pest: p,
            reject_due_to_disease: d,
        }
    }

    fn linear_series() -> Vec<WeeklyRecord> {
        vec![
            week(1, 60.0, 10.0, 25.0, 100.0, 5.0, 2.0),
            week(2, 62.0, 12.0, 26.0, 110.0, 4.0, 3.0),
            week(3, 64.0, 14.0, 27.0, 120.0, 3.0, 4.0),
        ]
    }

    fn noisy_series() -> Vec<WeeklyRecord> {
        vec![
            week(10, 70.0, 5.0, 20.0, 150.0, 6.0, 1.0),
            week(11, 68.0, 9.0, 22.0, 140.0, 7.0, 3.0),
            week(12, 75.0, 4.0, 21.0, 160.0, 5.0, 2.0),
            week(13, 72.0, 8.0, 24.0, 155.0, 8.0, 4.0),
        ]
    }

    #[test]
    fn fewer_than_two_weeks_yields_none() {
        assert_eq!(forecast_next_week(&[], DenominatorMode::default()), Ok(None));
        let one = &linear_series()[..1];
        assert_eq!(forecast_next_week(one, DenominatorMode::default()), Ok(None));
    }

    #[test]
    fn linear_series_extrapolates_every_input() {
        let f = forecast_next_week(&linear_series(), DenominatorMode::PerPredictor)
            .expect("fit should succeed")
            .expect("three weeks is enough");

        assert_eq!(f.next_week, 4);
        assert_eq!(
            f.predicted_weather,
            PredictedWeather {
                humidity: 66,
                rainfall: 16,
                temperature: 28,
            }
        );
        assert_eq!(
            f.predicted_reject,
            PredictedReject {
                reject_due_to_pest: 2,
                reject_due_to_disease: 5,
            }
        );
        // mean 110 plus six slopes each contributing +20
        assert_eq!(f.predicted_yield, 230);
    }

    #[test]
    fn shared_week_denominator_reproduces_legacy_figures() {
        let f = forecast_next_week(&linear_series(), DenominatorMode::SharedWeek)
            .expect("fit should succeed")
            .expect("three weeks is enough");
        assert_eq!(f.next_week, 4);
        assert_eq!(f.predicted_weather.humidity, 66);
        assert_eq!(f.predicted_yield, 125);
    }

    #[test]
    fn noisy_series_in_both_modes() {
        let records = noisy_series();

        let per = forecast_next_week(&records, DenominatorMode::PerPredictor)
            .expect("fit should succeed")
            .expect("four weeks is enough");
        assert_eq!(per.next_week, 14);
        assert_eq!(per.predicted_weather.humidity, 75);
        assert_eq!(per.predicted_weather.rainfall, 8);
        assert_eq!(per.predicted_weather.temperature, 25);
        assert_eq!(per.predicted_reject.reject_due_to_pest, 8);
        assert_eq!(per.predicted_reject.reject_due_to_disease, 5);
        assert_eq!(per.predicted_yield, 162);

        let shared = forecast_next_week(&records, DenominatorMode::SharedWeek)
            .expect("fit should succeed")
            .expect("four weeks is enough");
        assert_eq!(shared.predicted_weather, per.predicted_weather);
        assert_eq!(shared.predicted_yield, 160);
    }

    #[test]
    fn constant_temperature_is_degenerate() {
        let records = vec![
            week(1, 60.0, 10.0, 25.0, 100.0, 5.0, 2.0),
            week(2, 62.0, 12.0, 25.0, 110.0, 4.0, 3.0),
            week(3, 65.0, 11.0, 25.0, 115.0, 6.0, 1.0),
        ];
        assert_eq!(
            forecast_next_week(&records, DenominatorMode::PerPredictor),
            Err(StatsError::DegenerateRegression {
                predictor: "temperature"
            })
        );

        // the shared denominator never vanishes here, so the legacy fit succeeds
        let legacy = forecast_next_week(&records, DenominatorMode::SharedWeek)
            .expect("legacy fit should succeed")
            .expect("three weeks is enough");
        assert_eq!(legacy.predicted_weather.temperature, 25);
        assert_eq!(legacy.predicted_yield, 126);
    }

    #[test]
    fn inexact_constant_temperature_is_degenerate() {
        // 25.3 has no exact binary form, so the variance term cancels to a
        // residue near 1e-12 rather than 0
        let records = vec![
            week(1, 60.0, 10.0, 25.3, 100.0, 5.0, 2.0),
            week(2, 62.0, 12.0, 25.3, 110.0, 4.0, 3.0),
            week(3, 65.0, 11.0, 25.3, 115.0, 6.0, 1.0),
        ];
        assert_eq!(
            forecast_next_week(&records, DenominatorMode::PerPredictor),
            Err(StatsError::DegenerateRegression {
                predictor: "temperature"
            })
        );
    }

    #[test]
    fn last_representable_week_cannot_be_followed() {
        let mut records = linear_series();
        for (r, w) in records.iter_mut().zip([u32::MAX - 2, u32::MAX - 1, u32::MAX]) {
            r.week_number = w;
        }
        assert_eq!(
            forecast_next_week(&records, DenominatorMode::PerPredictor),
            Err(StatsError::WeekOutOfRange {
                week_number: u32::MAX
            })
        );

        records[2].week_number = u32::MAX - 1;
        records[1].week_number = u32::MAX - 2;
        records[0].week_number = u32::MAX - 3;
        let f = forecast_next_week(&records, DenominatorMode::PerPredictor)
            .expect("fit should succeed")
            .expect("three weeks is enough");
        assert_eq!(f.next_week, u32::MAX);
    }

    #[test]
    fn next_week_follows_last_week_number_not_count() {
        let mut records = linear_series();
        for (r, w) in records.iter_mut().zip([20, 21, 22]) {
            r.week_number = w;
        }
        let f = forecast_next_week(&records, DenominatorMode::PerPredictor)
            .expect("fit should succeed")
            .expect("three weeks is enough");
        assert_eq!(f.next_week, 23);
    }

    #[test]
    fn denominator_mode_parses_config_names() {
        for name in DenominatorMode::NAMES {
            let mode: DenominatorMode = name.parse().expect("listed name should parse");
            assert_eq!(mode.name(), *name);
        }
        assert!("bogus".parse::<DenominatorMode>().is_err());
    }
}
