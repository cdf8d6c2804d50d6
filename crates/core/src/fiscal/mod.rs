//! Fiscal calendar management.

pub mod calendar;
pub mod error;

pub use calendar::{CalendarMonth, FiscalCalendar};
pub use error::FiscalError;
