//! Fixed bundles of correlations and grouped averages served to the dashboard.

use std::fmt;

use serde::Serialize;

use crate::record::{Field, WeeklyRecord};
use crate::stats::{GroupedAverages, correlation, grouped_average};

/// Weather-to-outcome correlations reported alongside the weekly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    /// Humidity vs strawberry yield.
    pub humidity_yield: f64,
    /// Rainfall vs strawberry yield.
    pub rainfall_yield: f64,
    /// Temperature vs strawberry yield.
    pub temperature_yield: f64,
    /// Humidity vs pest rejects.
    pub humidity_reject: f64,
    /// Rainfall vs pest rejects.
    pub rainfall_reject: f64,
    /// Temperature vs disease rejects.
    pub temperature_reject: f64,
}

impl Analysis {
    pub fn from_records(records: &[WeeklyRecord]) -> Self {
        let c = |x, y| correlation(records, x, y);
        Self {
            humidity_yield: c(Field::Humidity, Field::StrawberryYield),
            rainfall_yield: c(Field::Rainfall, Field::StrawberryYield),
            temperature_yield: c(Field::Temperature, Field::StrawberryYield),
            humidity_reject: c(Field::Humidity, Field::RejectDueToPest),
            rainfall_reject: c(Field::Rainfall, Field::RejectDueToPest),
            temperature_reject: c(Field::Temperature, Field::RejectDueToDisease),
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Correlations ---")?;
        writeln!(f, "Humidity / yield:      {:.3}", self.humidity_yield)?;
        writeln!(f, "Rainfall / yield:      {:.3}", self.rainfall_yield)?;
        writeln!(f, "Temperature / yield:   {:.3}", self.temperature_yield)?;
        writeln!(f, "Humidity / pest:       {:.3}", self.humidity_reject)?;
        writeln!(f, "Rainfall / pest:       {:.3}", self.rainfall_reject)?;
        write!(f, "Temperature / disease: {:.3}", self.temperature_reject)
    }
}

/// Outcome averages grouped by each weather column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub avg_yield_by_humidity: GroupedAverages,
    pub avg_yield_by_rainfall: GroupedAverages,
    pub avg_yield_by_temperature: GroupedAverages,
    pub avg_reject_by_humidity: GroupedAverages,
    pub avg_reject_by_rainfall: GroupedAverages,
    pub avg_reject_by_temperature: GroupedAverages,
    pub avg_disease_by_humidity: GroupedAverages,
    pub avg_disease_by_rainfall: GroupedAverages,
    pub avg_disease_by_temperature: GroupedAverages,
}

impl Summary {
    pub fn from_records(records: &[WeeklyRecord]) -> Self {
        let avg = |group, target| grouped_average(records, group, target);
        Self {
            avg_yield_by_humidity: avg(Field::Humidity, Field::StrawberryYield),
            avg_yield_by_rainfall: avg(Field::Rainfall, Field::StrawberryYield),
            avg_yield_by_temperature: avg(Field::Temperature, Field::StrawberryYield),
            avg_reject_by_humidity: avg(Field::Humidity, Field::RejectDueToPest),
            avg_reject_by_rainfall: avg(Field::Rainfall, Field::RejectDueToPest),
            avg_reject_by_temperature: avg(Field::Temperature, Field::RejectDueToPest),
            avg_disease_by_humidity: avg(Field::Humidity, Field::RejectDueToDisease),
            avg_disease_by_rainfall: avg(Field::Rainfall, Field::RejectDueToDisease),
            avg_disease_by_temperature: avg(Field::Temperature, Field::RejectDueToDisease),
        }
    }

    /// All tables paired with their report name, in declaration order.
    pub fn tables(&self) -> [(&'static str, &GroupedAverages); 9] {
        [
            ("avg_yield_by_humidity", &self.avg_yield_by_humidity),
            ("avg_yield_by_rainfall", &self.avg_yield_by_rainfall),
            ("avg_yield_by_temperature", &self.avg_yield_by_temperature),
            ("avg_reject_by_humidity", &self.avg_reject_by_humidity),
            ("avg_reject_by_rainfall", &self.avg_reject_by_rainfall),
            ("avg_reject_by_temperature", &self.avg_reject_by_temperature),
            ("avg_disease_by_humidity", &self.avg_disease_by_humidity),
            ("avg_disease_by_rainfall", &self.avg_disease_by_rainfall),
            ("avg_disease_by_temperature", &self.avg_disease_by_temperature),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- Summary ---")?;
        for (name, table) in self.tables() {
            write!(f, "\n{name}:")?;
            for g in &table.groups {
                write!(
                    f,
                    "\n  {} = {:<8} {} (n={})",
                    table.group, g.key, g.average, g.count
                )?;
            }
        }
        Ok(())
    }
}
