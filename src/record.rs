//! Weekly joined weather, yield, and reject record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// One week of joined measurements.
///
/// Produced by the data-access layer (see [`crate::io::import`]) and consumed
/// read-only by every engine in [`crate::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    /// Calendar week; strictly increasing along a series.
    pub week_number: u32,
    /// Mean relative humidity (%).
    pub humidity: f64,
    /// Total rainfall (mm).
    pub rainfall: f64,
    /// Mean temperature (°C).
    pub temperature: f64,
    /// Harvested quantity.
    pub strawberry_yield: f64,
    /// Rejected quantity attributed to pests.
    pub reject_due_to_pest: f64,
    /// Rejected quantity attributed to disease.
    pub reject_due_to_disease: f64,
}

/// Named numeric column of a [`WeeklyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WeekNumber,
    Humidity,
    Rainfall,
    Temperature,
    StrawberryYield,
    RejectDueToPest,
    RejectDueToDisease,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 7] = [
        Field::WeekNumber,
        Field::Humidity,
        Field::Rainfall,
        Field::Temperature,
        Field::StrawberryYield,
        Field::RejectDueToPest,
        Field::RejectDueToDisease,
    ];

    /// Column name as it appears in CSV headers, JSON, and query strings.
    pub const fn name(self) -> &'static str {
        match self {
            Field::WeekNumber => "week_number",
            Field::Humidity => "humidity",
            Field::Rainfall => "rainfall",
            Field::Temperature => "temperature",
            Field::StrawberryYield => "strawberry_yield",
            Field::RejectDueToPest => "reject_due_to_pest",
            Field::RejectDueToDisease => "reject_due_to_disease",
        }
    }

    /// Reads this field from a record.
    pub fn value(self, record: &WeeklyRecord) -> f64 {
        match self {
            Field::WeekNumber => f64::from(record.week_number),
            Field::Humidity => record.humidity,
            Field::Rainfall => record.rainfall,
            Field::Temperature => record.temperature,
            Field::StrawberryYield => record.strawberry_yield,
            Field::RejectDueToPest => record.reject_due_to_pest,
            Field::RejectDueToDisease => record.reject_due_to_disease,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| StatsError::FieldNotFound(s.to_string()))
    }
}

/// Checks that a series is ordered by strictly ascending week and holds only
/// finite values.
///
/// # Errors
///
/// Returns [`StatsError::UnorderedSeries`] on the first out-of-order or
/// duplicate week, or [`StatsError::NonFiniteValue`] on the first NaN or
/// infinite measurement.
pub fn validate_series(records: &[WeeklyRecord]) -> Result<()> {
    for record in records {
        for field in &Field::ALL[1..] {
            if !field.value(record).is_finite() {
                return Err(StatsError::NonFiniteValue {
                    week_number: record.week_number,
                    field: field.name(),
                });
            }
        }
    }

    for pair in records.windows(2) {
        if pair[1].week_number <= pair[0].week_number {
            return Err(StatsError::UnorderedSeries {
                previous: pair[0].week_number,
                next: pair[1].week_number,
            });
        }
    }

    Ok(())
}
