//! Forecast seeder: replicate the last actual into the remaining fiscal months.

use fiscora_shared::types::CutoffRule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::{CalendarMonth, FiscalCalendar};
use crate::record::{RecordDraft, RecordKey, Slice};

/// An ACTUAL record value as stored: fiscal year label plus calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualPoint {
    /// Fiscal year label.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Recorded value.
    pub value: Decimal,
}

/// Builds FORECAST drafts for the months after the actual cutoff.
pub struct ForecastSeeder;

impl ForecastSeeder {
    /// Fiscal months strictly after `cutoff`.
    ///
    /// Empty when the cutoff is not one of the fiscal year's months.
    #[must_use]
    pub fn forecast_months(
        calendar: &FiscalCalendar,
        fiscal_year: i32,
        cutoff: CalendarMonth,
    ) -> Vec<CalendarMonth> {
        let months = calendar.months(fiscal_year);
        months
            .iter()
            .position(|month| *month == cutoff)
            .map(|index| months[index + 1..].to_vec())
            .unwrap_or_default()
    }

    /// Value of the latest actual at or before `cutoff`, if any.
    ///
    /// The caller decides what a missing actual means; the seeder uses zero.
    #[must_use]
    pub fn latest_actual(
        calendar: &FiscalCalendar,
        actuals: &[ActualPoint],
        cutoff: CalendarMonth,
        rule: CutoffRule,
    ) -> Option<Decimal> {
        match rule {
            CutoffRule::Chronological => actuals
                .iter()
                .filter_map(|point| {
                    calendar
                        .calendar_month_of(point.year, point.month)
                        .ok()
                        .map(|period| (period, point.value))
                })
                .filter(|(period, _)| *period <= cutoff)
                .max_by_key(|(period, _)| *period)
                .map(|(_, value)| value),
            CutoffRule::FieldWise => actuals
                .iter()
                .filter(|point| point.year <= cutoff.year && point.month <= cutoff.month)
                .max_by_key(|point| (point.year, point.month))
                .map(|point| point.value),
        }
    }

    /// One editable FORECAST draft per (slice, forecast month).
    ///
    /// Drafts carry the fiscal year label of the run and the calendar month.
    #[must_use]
    pub fn seed_records(
        fiscal_year: i32,
        months: &[CalendarMonth],
        seeds: &[(Slice, Decimal)],
    ) -> Vec<RecordDraft> {
        seeds
            .iter()
            .flat_map(|(slice, value)| {
                months.iter().map(move |month| {
                    RecordDraft::forecast(
                        RecordKey {
                            slice: *slice,
                            year: fiscal_year,
                            month: month.month,
                        },
                        *value,
                    )
                })
            })
            .collect()
    }
}
