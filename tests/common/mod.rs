//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use yield_stats::WeeklyRecord;
use yield_stats::io::import::{CsvFile, WeeklySource};

/// Path to the bundled twelve-week sample series.
pub fn sample_csv_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/weekly.csv")
}

/// Bundled sample series, loaded through the CSV importer.
pub fn sample_series() -> Vec<WeeklyRecord> {
    CsvFile::new(sample_csv_path())
        .fetch_weekly()
        .expect("sample series should load")
}

/// Record builder in column order.
#[allow(clippy::too_many_arguments)]
pub fn week(w: u32, h: f64, r: f64, t: f64, y: f64, pest: f64, disease: f64) -> WeeklyRecord {
    WeeklyRecord {
        week_number: w,
        humidity: h,
        rainfall: r,
        temperature: t,
        strawberry_yield: y,
        reject_due_to_pest: pest,
        reject_due_to_disease: disease,
    }
}

/// Three weeks where temperature never changes.
pub fn constant_temperature_series() -> Vec<WeeklyRecord> {
    vec![
        week(1, 60.0, 10.0, 25.0, 100.0, 5.0, 2.0),
        week(2, 62.0, 12.0, 25.0, 110.0, 4.0, 3.0),
        week(3, 65.0, 11.0, 25.0, 115.0, 6.0, 1.0),
    ]
}

/// Seven weeks of one-decimal readings where temperature holds at 0.7.
pub fn decimal_series() -> Vec<WeeklyRecord> {
    vec![
        week(1, 60.5, 10.2, 0.7, 100.4, 5.1, 2.3),
        week(2, 62.1, 12.7, 0.7, 110.9, 4.4, 3.2),
        week(3, 65.3, 11.1, 0.7, 115.2, 6.6, 1.8),
        week(4, 63.8, 9.4, 0.7, 108.7, 5.9, 2.1),
        week(5, 61.2, 13.3, 0.7, 104.1, 4.8, 2.9),
        week(6, 66.4, 10.8, 0.7, 118.6, 6.2, 1.5),
        week(7, 64.9, 12.2, 0.7, 112.3, 5.5, 2.6),
    ]
}
