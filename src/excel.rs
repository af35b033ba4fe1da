//! Excel file parsing for daily records.
//!
//! The first worksheet holds one row per day. Only the `date` column is
//! required; any of `weight`, `calories`, `protein`, `carbs`, `fat`, `exercise`
//! and `steps` may be present. Empty cells mean "not logged".

use calamine::{Data, DataType, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use log::warn;
use std::path::Path;
use std::str::FromStr;

use crate::domain::{DailyRecord, Metric};
use crate::error::ParseError;

/// Expected date column name (case-insensitive).
const COL_DATE: &str = "date";

/// Column positions found in the header row.
#[derive(Debug)]
struct ColumnIndices {
    date: usize,
    metrics: Vec<(Metric, usize)>,
}

impl ColumnIndices {
    fn from_header(header: &[Data]) -> Result<Self, ParseError> {
        let date = header
            .iter()
            .position(|cell| {
                cell.get_string()
                    .is_some_and(|s| s.trim().eq_ignore_ascii_case(COL_DATE))
            })
            .ok_or_else(|| ParseError::MissingColumn(COL_DATE.to_string()))?;

        let mut metrics: Vec<(Metric, usize)> = Vec::new();
        for (idx, cell) in header.iter().enumerate() {
            let Some(metric) = cell.get_string().and_then(|s| Metric::from_str(s).ok()) else {
                continue;
            };
            // First matching column wins
            if !metrics.iter().any(|(m, _)| *m == metric) {
                metrics.push((metric, idx));
            }
        }

        Ok(Self { date, metrics })
    }
}

/// Loads daily records from an Excel file.
///
/// # Arguments
/// * `path` - Path to the Excel file (.xlsx)
///
/// # Returns
/// All valid rows as records, in file order. Malformed rows are skipped with a warning.
///
/// # Errors
/// Returns ParseError if the file cannot be read or has no date column.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<DailyRecord>, ParseError> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.display().to_string()));
    }

    // Open workbook
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ParseError::CannotRead(format!("{}: {}", path.display(), e)))?;

    // Get the first worksheet
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ParseError::InvalidFormat("workbook has no sheets".to_string()))?;

    let range = workbook.worksheet_range(sheet_name).map_err(|e| {
        ParseError::CannotRead(format!("cannot read sheet '{}': {}", sheet_name, e))
    })?;

    let mut rows = range.rows();

    // Parse header row
    let header = rows
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("empty worksheet".to_string()))?;

    let indices = ColumnIndices::from_header(header)?;

    let mut records = Vec::new();
    for (row_idx, row) in rows.enumerate() {
        let row_num = row_idx + 2; // +1 for 0-index, +1 for header row

        match parse_row(row, row_num, &indices) {
            Ok(Some(record)) => records.push(record),
            // Skip empty rows silently (common at end of spreadsheets)
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }

    Ok(records)
}

/// Parses one data row. Returns `None` for rows without a date.
fn parse_row(
    row: &[Data],
    row_num: usize,
    indices: &ColumnIndices,
) -> Result<Option<DailyRecord>, ParseError> {
    let date_cell = row.get(indices.date).unwrap_or(&Data::Empty);
    if *date_cell == Data::Empty {
        return Ok(None);
    }

    let mut record = DailyRecord::new(parse_date(date_cell, row_num)?);

    for &(metric, idx) in &indices.metrics {
        let cell = row.get(idx).unwrap_or(&Data::Empty);
        let value = parse_value(cell, row_num, metric)?;
        match metric {
            Metric::Weight => record.weight_kg = value,
            Metric::Calories => record.calories = value,
            Metric::Protein => record.protein_g = value,
            Metric::Carbs => record.carbs_g = value,
            Metric::Fat => record.fat_g = value,
            Metric::Exercise => record.exercise_minutes = value,
            Metric::Steps => record.steps = value,
        }
    }

    Ok(Some(record))
}

/// Parses a date from a cell, dropping any time component.
fn parse_date(cell: &Data, row: usize) -> Result<NaiveDate, ParseError> {
    match cell {
        Data::DateTime(dt) => {
            // calamine DateTime to NaiveDate via chrono
            dt.as_datetime()
                .map(|ndt| ndt.date())
                .ok_or_else(|| ParseError::InvalidDate {
                    row,
                    value: format!("{:?}", dt),
                })
        }
        Data::DateTimeIso(s) => {
            let date_part = s.split('T').next().unwrap_or(s.as_str());
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
                ParseError::InvalidDate {
                    row,
                    value: s.clone(),
                }
            })
        }
        Data::String(s) => {
            // Try common date formats
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
                .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
                .map_err(|_| ParseError::InvalidDate {
                    row,
                    value: s.to_string(),
                })
        }
        other => Err(ParseError::InvalidDate {
            row,
            value: format!("{:?}", other),
        }),
    }
}

/// Parses an optional non-negative number from a cell.
fn parse_value(cell: &Data, row: usize, metric: Metric) -> Result<Option<f64>, ParseError> {
    let invalid = |value: String| ParseError::InvalidNumber {
        row,
        column: metric.display_name(),
        value,
    };

    let value = match cell {
        Data::Empty => return Ok(None),
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) if s.trim().is_empty() => return Ok(None),
        Data::String(s) => s.trim().parse::<f64>().map_err(|_| invalid(s.clone()))?,
        other => return Err(invalid(format!("{:?}", other))),
    };

    if value.is_finite() && value >= 0.0 {
        Ok(Some(value))
    } else {
        Err(invalid(value.to_string()))
    }
}
