//! Weekly farm statistics: correlations, grouped averages, and next-week
//! yield forecasting over joined weather, yield, and reject records.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod record;
pub mod report;
pub mod stats;

pub use error::{Result, StatsError};
pub use record::{Field, WeeklyRecord};
