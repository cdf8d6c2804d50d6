//! Fiscal calendar: mapping between calendar months and fiscal years.
//!
//! A fiscal year is labelled by the calendar year in which it begins. With a
//! start month of October, fiscal year 2024 runs from October 2024 through
//! September 2025, so September 2025 belongs to fiscal year 2024 and October
//! 2025 to fiscal year 2025.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use fiscora_shared::FiscalConfig;
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// A calendar month of a calendar year.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl CalendarMonth {
    /// Creates a calendar month, validating the month number.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` if `month` is outside 1-12.
    pub fn new(month: u32, year: i32) -> Result<Self, FiscalError> {
        if !(1..=12).contains(&month) {
            return Err(FiscalError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns the calendar month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the first day of this month.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Fiscal calendar with a fixed start month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalCalendar {
    start_month: u32,
}

impl FiscalCalendar {
    /// Creates a calendar whose fiscal year begins in `start_month`.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidStartMonth` if `start_month` is outside 1-12.
    pub fn new(start_month: u32) -> Result<Self, FiscalError> {
        if !(1..=12).contains(&start_month) {
            return Err(FiscalError::InvalidStartMonth(start_month));
        }
        Ok(Self { start_month })
    }

    /// First calendar month of every fiscal year.
    #[must_use]
    pub const fn start_month(&self) -> u32 {
        self.start_month
    }

    /// Fiscal year label of a calendar month.
    ///
    /// Months before the start month belong to the fiscal year that began in
    /// the previous calendar year.
    #[must_use]
    pub fn fiscal_year_of(&self, period: CalendarMonth) -> i32 {
        if period.month >= self.start_month {
            period.year
        } else {
            period.year - 1
        }
    }

    /// Fiscal year label of the month containing `date`.
    #[must_use]
    pub fn fiscal_year_of_date(&self, date: NaiveDate) -> i32 {
        self.fiscal_year_of(CalendarMonth::of(date))
    }

    /// Fiscal year that contains `today`.
    #[must_use]
    pub fn current_fiscal_year(&self, today: NaiveDate) -> i32 {
        self.fiscal_year_of_date(today)
    }

    /// First day of a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::YearOutOfRange` if the date cannot be represented.
    pub fn start_date(&self, fiscal_year: i32) -> Result<NaiveDate, FiscalError> {
        NaiveDate::from_ymd_opt(fiscal_year, self.start_month, 1)
            .ok_or(FiscalError::YearOutOfRange(fiscal_year))
    }

    /// Last day of a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::YearOutOfRange` if the date cannot be represented.
    pub fn end_date(&self, fiscal_year: i32) -> Result<NaiveDate, FiscalError> {
        let next_year = fiscal_year
            .checked_add(1)
            .ok_or(FiscalError::YearOutOfRange(fiscal_year))?;
        self.start_date(next_year)?
            .pred_opt()
            .ok_or(FiscalError::YearOutOfRange(fiscal_year))
    }

    /// The twelve calendar months of a fiscal year, in fiscal order.
    ///
    /// With start month 10, fiscal year 2024 yields October 2024 through
    /// September 2025.
    #[must_use]
    pub fn months(&self, fiscal_year: i32) -> Vec<CalendarMonth> {
        let next_year = fiscal_year.saturating_add(1);
        (self.start_month..=12)
            .map(|month| CalendarMonth {
                year: fiscal_year,
                month,
            })
            .chain((1..self.start_month).map(|month| CalendarMonth {
                year: next_year,
                month,
            }))
            .collect()
    }

    /// Calendar month of a record stored as (fiscal year label, calendar month).
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` if `month` is outside 1-12.
    pub fn calendar_month_of(
        &self,
        fiscal_year: i32,
        month: u32,
    ) -> Result<CalendarMonth, FiscalError> {
        let year = if month >= self.start_month {
            fiscal_year
        } else {
            fiscal_year.saturating_add(1)
        };
        CalendarMonth::new(month, year)
    }

    /// Position (1-12) of a calendar month within the fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidMonth` if `month` is outside 1-12.
    pub fn period_number(&self, month: u32) -> Result<u32, FiscalError> {
        if !(1..=12).contains(&month) {
            return Err(FiscalError::InvalidMonth(month));
        }
        Ok((month + 12 - self.start_month) % 12 + 1)
    }
}

impl TryFrom<&FiscalConfig> for FiscalCalendar {
    type Error = FiscalError;

    fn try_from(config: &FiscalConfig) -> Result<Self, Self::Error> {
        Self::new(config.start_month)
    }
}
