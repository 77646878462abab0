//! Weekly series import from CSV.
//!
//! The CSV must carry a header row naming the seven record columns
//! (`week_number,humidity,rainfall,temperature,strawberry_yield,
//! reject_due_to_pest,reject_due_to_disease`) in any order. Rows must already
//! be sorted by ascending week; the importer validates but never reorders.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::error::StatsError;
use crate::record::{WeeklyRecord, validate_series};

/// Failure while loading a weekly series.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The source could not be opened or read.
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row could not be parsed into a record.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Rows parsed but break the series invariants.
    #[error("invalid weekly series: {0}")]
    Invalid(#[from] StatsError),
}

/// A supplier of the joined weekly series, ascending by week.
pub trait WeeklySource {
    /// Fetches the full series.
    ///
    /// # Errors
    ///
    /// Returns an `ImportError` if the series cannot be read or is invalid.
    fn fetch_weekly(&self) -> Result<Vec<WeeklyRecord>, ImportError>;
}

/// Weekly series stored in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvFile {
    pub path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WeeklySource for CsvFile {
    fn fetch_weekly(&self) -> Result<Vec<WeeklyRecord>, ImportError> {
        load_csv(&self.path)
    }
}

/// Loads and validates a weekly series from a CSV file.
///
/// # Errors
///
/// Returns an `ImportError` if the file cannot be opened, a row is malformed,
/// or the series is unordered or holds non-finite values.
pub fn load_csv(path: &Path) -> Result<Vec<WeeklyRecord>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv(BufReader::new(file))?;
    info!(path = %path.display(), weeks = records.len(), "loaded weekly series");
    Ok(records)
}

/// Reads and validates a weekly series from any CSV reader.
///
/// # Errors
///
/// Returns an `ImportError` if a row is malformed or the series is invalid.
pub fn read_csv(reader: impl Read) -> Result<Vec<WeeklyRecord>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<WeeklyRecord>, csv::Error>>()?;
    validate_series(&records)?;
    Ok(records)
}
