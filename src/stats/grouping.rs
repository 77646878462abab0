//! Mean of one column grouped by the distinct values of another.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::debug;

use super::to_fixed;
use crate::record::{Field, WeeklyRecord};

/// Accumulated totals for one distinct group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAverage {
    /// Value of the grouping column shared by every member.
    pub key: f64,
    /// Sum of the target column over the group.
    pub sum: f64,
    /// Number of records in the group; always at least 1.
    pub count: usize,
    /// `sum / count` with exactly two fractional digits.
    pub average: String,
}

/// Grouped averages in first-seen key order.
///
/// Serializes as an array of `{ "<group>": key, "avg_<target>": "12.34" }`
/// objects.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedAverages {
    pub group: Field,
    pub target: Field,
    pub groups: Vec<GroupAverage>,
}

impl GroupedAverages {
    /// Number of records across all groups.
    pub fn total_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Output column holding the average, e.g. `avg_strawberry_yield`.
    pub fn average_column(&self) -> String {
        format!("avg_{}", self.target)
    }
}

/// Averages `target` over each distinct value of `group`.
///
/// Keys compare by numeric value; groups appear in the order their key is
/// first encountered.
pub fn grouped_average(records: &[WeeklyRecord], group: Field, target: Field) -> GroupedAverages {
    let mut groups: Vec<GroupAverage> = Vec::new();

    for r in records {
        let key = group.value(r);
        let value = target.value(r);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(g) => {
                g.sum += value;
                g.count += 1;
            }
            None => groups.push(GroupAverage {
                key,
                sum: value,
                count: 1,
                average: String::new(),
            }),
        }
    }

    for g in &mut groups {
        g.average = to_fixed(g.sum / g.count as f64, 2);
    }
    debug!(%group, %target, groups = groups.len(), "grouped averages");

    GroupedAverages {
        group,
        target,
        groups,
    }
}

/// Whole-number keys serialize as integers.
fn serialize_key<S: SerializeMap>(map: &mut S, name: &str, key: f64) -> Result<(), S::Error> {
    if key.fract() == 0.0 && key.abs() < 9.0e15 {
        map.serialize_entry(name, &(key as i64))
    } else {
        map.serialize_entry(name, &key)
    }
}

struct Row<'a> {
    group: Field,
    average_column: &'a str,
    entry: &'a GroupAverage,
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        serialize_key(&mut map, self.group.name(), self.entry.key)?;
        map.serialize_entry(self.average_column, &self.entry.average)?;
        map.end()
    }
}

impl Serialize for GroupedAverages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let average_column = self.average_column();
        let mut seq = serializer.serialize_seq(Some(self.groups.len()))?;
        for entry in &self.groups {
            seq.serialize_element(&Row {
                group: self.group,
                average_column: &average_column,
                entry,
            })?;
        }
        seq.end()
    }
}
