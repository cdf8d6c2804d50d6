//! Date dimension import and generation.

use std::io::Read;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{ImportError, RowError};
use super::read_rows;

/// Columns a date dimension file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "FullDate",
    "Day",
    "WeekOfYear",
    "Month",
    "MonthName",
    "ShortMonthName",
    "Quarter",
    "QuarterName",
    "Year",
    "YearMonth",
    "YearQuarter",
];

/// One calendar day with its reporting attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDimensionRecord {
    /// The day itself. Unique.
    pub full_date: NaiveDate,
    /// Day of month.
    pub day: i32,
    /// ISO week number.
    pub week_of_year: i32,
    /// Calendar month (1-12).
    pub month: i32,
    /// e.g. `October`.
    pub month_name: String,
    /// e.g. `Oct`.
    pub short_month_name: String,
    /// Calendar quarter (1-4).
    pub quarter: i32,
    /// e.g. `Q4`.
    pub quarter_name: String,
    /// Calendar year.
    pub year: i32,
    /// e.g. `2024-10`.
    pub year_month: String,
    /// e.g. `2024-Q4`.
    pub year_quarter: String,
}

impl DateDimensionRecord {
    /// Derives every attribute from the date.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month() as i32;
        let quarter = (month - 1) / 3 + 1;
        Self {
            full_date: date,
            day: date.day() as i32,
            week_of_year: date.iso_week().week() as i32,
            month,
            month_name: date.format("%B").to_string(),
            short_month_name: date.format("%b").to_string(),
            quarter,
            quarter_name: format!("Q{quarter}"),
            year: date.year(),
            year_month: date.format("%Y-%m").to_string(),
            year_quarter: format!("{}-Q{quarter}", date.year()),
        }
    }

    /// One record per day from `start` through `end` inclusive.
    #[must_use]
    pub fn span(start: NaiveDate, end: NaiveDate) -> Vec<Self> {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(Self::from_date)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DateRow {
    full_date: String,
    day: i32,
    week_of_year: i32,
    month: i32,
    month_name: String,
    short_month_name: String,
    quarter: i32,
    quarter_name: String,
    year: i32,
    year_month: String,
    year_quarter: String,
}

/// Parses a date dimension file. Attributes are taken as given.
///
/// # Errors
///
/// Rejects the whole file if the header is incomplete or any row has a bad
/// date or non-numeric field.
pub fn parse_date_dimensions<R: Read>(reader: R) -> Result<Vec<DateDimensionRecord>, ImportError> {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (row, parsed) in read_rows::<_, DateRow>(reader, REQUIRED_COLUMNS)? {
        match parsed.map_err(|e| e.to_string()).and_then(|raw| {
            let full_date = NaiveDate::parse_from_str(&raw.full_date, "%Y-%m-%d")
                .map_err(|_| format!("Invalid FullDate '{}', expected YYYY-MM-DD", raw.full_date))?;
            Ok(DateDimensionRecord {
                full_date,
                day: raw.day,
                week_of_year: raw.week_of_year,
                month: raw.month,
                month_name: raw.month_name,
                short_month_name: raw.short_month_name,
                quarter: raw.quarter,
                quarter_name: raw.quarter_name,
                year: raw.year,
                year_month: raw.year_month,
                year_quarter: raw.year_quarter,
            })
        }) {
            Ok(record) => records.push(record),
            Err(message) => errors.push(RowError::new(row, message)),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(ImportError::InvalidRows(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_from_date_attributes() {
        let record = DateDimensionRecord::from_date(date(2024, 10, 5));

        assert_eq!(record.day, 5);
        assert_eq!(record.month, 10);
        assert_eq!(record.month_name, "October");
        assert_eq!(record.short_month_name, "Oct");
        assert_eq!(record.quarter, 4);
        assert_eq!(record.quarter_name, "Q4");
        assert_eq!(record.year_month, "2024-10");
        assert_eq!(record.year_quarter, "2024-Q4");
        assert_eq!(record.week_of_year, 40);
    }

    #[test]
    fn test_span_is_inclusive() {
        let days = DateDimensionRecord::span(date(2024, 2, 27), date(2024, 3, 1));

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.full_date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1)
            ]
        );
        assert!(DateDimensionRecord::span(date(2024, 3, 2), date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_parses_rows() {
        let csv = "FullDate,Day,WeekOfYear,Month,MonthName,ShortMonthName,Quarter,QuarterName,Year,YearMonth,YearQuarter\n\
                   2024-10-05,5,40,10,October,Oct,4,Q4,2024,2024-10,2024-Q4\n";

        let records = parse_date_dimensions(csv.as_bytes()).unwrap();

        assert_eq!(records, vec![DateDimensionRecord::from_date(date(2024, 10, 5))]);
    }

    #[test]
    fn test_rejects_non_numeric_day() {
        let csv = "FullDate,Day,WeekOfYear,Month,MonthName,ShortMonthName,Quarter,QuarterName,Year,YearMonth,YearQuarter\n\
                   2024-10-05,five,40,10,October,Oct,4,Q4,2024,2024-10,2024-Q4\n\
                   2024-13-01,1,1,1,January,Jan,1,Q1,2024,2024-01,2024-Q1\n";

        let err = parse_date_dimensions(csv.as_bytes()).unwrap_err();

        let ImportError::InvalidRows(errors) = err else {
            panic!("expected row errors");
        };
        assert_eq!(errors.iter().map(|e| e.row).collect::<Vec<_>>(), vec![1, 2]);
        assert!(errors[1].message.contains("2024-13-01"));
    }
}
