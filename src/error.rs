//! Error types for the statistics engines and the data boundary.

use thiserror::Error;

/// Failures raised by the statistics engines and record validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A column name does not match any weekly record field.
    #[error("field not found: \"{0}\"")]
    FieldNotFound(String),

    /// A regression denominator was zero or a fitted value was non-finite.
    #[error("degenerate regression for predictor `{predictor}`")]
    DegenerateRegression {
        /// Name of the series whose fit broke down.
        predictor: &'static str,
    },

    /// Week numbers are not strictly ascending.
    #[error("weekly series not ordered: week {next} follows week {previous}")]
    UnorderedSeries { previous: u32, next: u32 },

    /// The week after the last observed one cannot be numbered.
    #[error("no week follows week {week_number}")]
    WeekOutOfRange { week_number: u32 },

    /// A record carries NaN or an infinity.
    #[error("non-finite `{field}` in week {week_number}")]
    NonFiniteValue {
        week_number: u32,
        field: &'static str,
    },
}

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;
