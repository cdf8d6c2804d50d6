//! Ledger aggregation into monthly ACTUAL records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{LedgerLine, MonthlyTotal};
use crate::fiscal::{CalendarMonth, FiscalCalendar, FiscalError};
use crate::record::{RecordDraft, RecordKey, Slice};

/// Groups ledger lines into per-slice monthly totals.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Sums amounts per (slice, calendar month).
    ///
    /// Output is ordered by slice, then chronologically.
    #[must_use]
    pub fn monthly_totals<I>(lines: I) -> Vec<MonthlyTotal>
    where
        I: IntoIterator<Item = LedgerLine>,
    {
        let mut totals: BTreeMap<(Slice, CalendarMonth), Decimal> = BTreeMap::new();
        for line in lines {
            *totals
                .entry((line.slice, CalendarMonth::of(line.date)))
                .or_insert(Decimal::ZERO) += line.amount;
        }

        totals
            .into_iter()
            .map(|((slice, period), total)| MonthlyTotal {
                slice,
                period,
                total,
            })
            .collect()
    }

    /// Turns monthly totals into ACTUAL record drafts.
    ///
    /// Each total is labelled with the fiscal year its calendar month belongs
    /// to, whatever fiscal year the run was started for.
    #[must_use]
    pub fn actual_records(calendar: &FiscalCalendar, totals: &[MonthlyTotal]) -> Vec<RecordDraft> {
        totals
            .iter()
            .map(|total| {
                RecordDraft::actual(
                    RecordKey {
                        slice: total.slice,
                        year: calendar.fiscal_year_of(total.period),
                        month: total.period.month,
                    },
                    total.total,
                )
            })
            .collect()
    }

    /// Aggregates the lines dated from the start of `fiscal_year` through
    /// `cutoff` (inclusive) into ACTUAL record drafts.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::YearOutOfRange` if the fiscal year has no start date.
    pub fn aggregate<I>(
        calendar: &FiscalCalendar,
        fiscal_year: i32,
        cutoff: NaiveDate,
        lines: I,
    ) -> Result<Vec<RecordDraft>, FiscalError>
    where
        I: IntoIterator<Item = LedgerLine>,
    {
        let start = calendar.start_date(fiscal_year)?;
        let totals = Self::monthly_totals(
            lines
                .into_iter()
                .filter(|line| start <= line.date && line.date <= cutoff),
        );
        Ok(Self::actual_records(calendar, &totals))
    }
}
