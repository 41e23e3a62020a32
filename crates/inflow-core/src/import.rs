//! CSV ingestion for income records
//!
//! This is the validation boundary for the bundled record store: rows
//! are checked here so the engine downstream can assume well-formed,
//! positive-amount records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::IncomeRecord;

/// Parse income records from CSV data
///
/// Expected format (with header): `source,date,amount`, dates as
/// `YYYY-MM-DD`. Malformed rows fail the whole import with the row
/// number in the error.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<IncomeRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        // Header is line 1, first data row is line 2
        let line = i + 2;

        let source = row
            .get(0)
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing source", line)))?;
        let date_str = row
            .get(1)
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing date", line)))?;
        let amount_str = row
            .get(2)
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing amount", line)))?;

        let date = parse_date(date_str)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;

        let record = IncomeRecord::new(source, date, amount)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;
        records.push(record);
    }

    debug!("Parsed {} income records", records.len());
    Ok(records)
}

/// Read income records from a CSV file on disk
pub fn read_records_from_path(path: &Path) -> Result<Vec<IncomeRecord>> {
    let file = File::open(path)?;
    read_records(file)
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    // Tolerate currency symbols and thousands separators
    let cleaned = s.replace(['$', ','], "");
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| format!("invalid amount '{}'", s))?;
    if amount <= 0.0 {
        return Err(format!("amount must be positive, got {}", s));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_valid_records() {
        let data = "source,date,amount\n\
                    Acme Corp,2024-01-05,2500.00\n\
                    Freelance,2024-01-20,\"$1,200.50\"\n";
        let records = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Acme Corp");
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert!((records[1].amount - 1200.50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_read_rejects_bad_date() {
        let data = "source,date,amount\nAcme,01/05/2024,100.0\n";
        let err = read_records(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_rejects_non_positive_amount() {
        let data = "source,date,amount\nAcme,2024-01-05,0\n";
        assert!(read_records(data.as_bytes()).is_err());

        let data = "source,date,amount\nAcme,2024-01-05,-20.0\n";
        assert!(read_records(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_rejects_missing_columns() {
        let data = "source,date,amount\nAcme,2024-01-05\n";
        assert!(read_records(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_empty_file_is_ok() {
        let data = "source,date,amount\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
