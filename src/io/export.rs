//! CSV export of grouped summary tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::Summary;

/// Column header for the flattened summary export.
const HEADER: &str = "table,group_field,group_value,target_field,count,average";

/// Exports every summary table to a CSV file at the given path.
///
/// One row per group, tables in report order, groups in first-seen order.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summary_csv(summary: &Summary, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_summary_csv(summary, buf)
}

/// Writes every summary table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(summary: &Summary, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (name, table) in summary.tables() {
        let group_field = table.group.name();
        let target_field = table.target.name();
        for g in &table.groups {
            wtr.write_record(&[
                name.to_string(),
                group_field.to_string(),
                g.key.to_string(),
                target_field.to_string(),
                g.count.to_string(),
                g.average.clone(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::WeeklyRecord;

    fn records() -> Vec<WeeklyRecord> {
        (0..3)
            .map(|i| WeeklyRecord {
                week_number: i + 1,
                humidity: if i == 1 { 62.0 } else { 60.0 },
                rainfall: 10.0,
                temperature: 25.5,
                strawberry_yield: 100.0 + 5.0 * f64::from(i),
                reject_due_to_pest: 5.0,
                reject_due_to_disease: 2.0,
            })
            .collect()
    }

    fn export(summary: &Summary) -> String {
        let mut buf = Vec::new();
        write_summary_csv(summary, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_comes_first() {
        let output = export(&Summary::from_records(&records()));
        assert_eq!(output.lines().next(), Some(HEADER));
    }

    #[test]
    fn one_row_per_group() {
        let summary = Summary::from_records(&records());
        let expected: usize = summary.tables().iter().map(|(_, t)| t.groups.len()).sum();
        let output = export(&summary);
        // humidity tables have 2 groups, rainfall and temperature tables 1
        assert_eq!(expected, 12);
        assert_eq!(output.lines().count(), 1 + expected);
    }

    #[test]
    fn rows_are_parseable() {
        let output = export(&Summary::from_records(&records()));
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());

        let first = rdr.records().next().and_then(Result::ok);
        let first = first.as_ref();
        assert_eq!(first.map(|r| &r[0]), Some("avg_yield_by_humidity"));
        assert_eq!(first.map(|r| &r[1]), Some("humidity"));
        assert_eq!(first.map(|r| &r[2]), Some("60"));
        assert_eq!(first.map(|r| &r[3]), Some("strawberry_yield"));
        assert_eq!(first.map(|r| &r[4]), Some("2"));
        assert_eq!(first.map(|r| &r[5]), Some("105.00"));
    }

    #[test]
    fn empty_summary_writes_header_only() {
        let output = export(&Summary::from_records(&[]));
        assert_eq!(output.lines().count(), 1);
    }
}
