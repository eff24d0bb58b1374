//! Date ranges for report queries.
//!
//! Reporting endpoints take an inclusive `[from, to]` calendar date range.
//! [`DateRange`] enforces `from <= to` at construction and provides the
//! day/month iteration and formatting that gap filling relies on.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// Canonical day format used in report `DATE` columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical month format used in report `MONTH` columns.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// The start date is after the end date.
    #[error("date range start {from} is after end {to}")]
    Inverted {
        /// Requested start date.
        from: NaiveDate,
        /// Requested end date.
        to: NaiveDate,
    },
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] if `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        if from > to {
            return Err(DateRangeError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns the inclusive start date.
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    /// Returns the inclusive end date.
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Iterates every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }

    /// Iterates the first day of every month touched by the range, in order.
    pub fn months(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        // with_day(1) is always valid for day 1.
        let start = self.from.with_day(1).unwrap_or(self.from);
        std::iter::successors(Some(start), |m| m.checked_add_months(Months::new(1)))
            .take_while(move |m| *m <= to)
    }

    /// Formats a date the way report `DATE` cells are written.
    pub fn format_day(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Formats a date's year-month the way report `MONTH` cells are written.
    pub fn format_month(date: NaiveDate) -> String {
        date.format(MONTH_FORMAT).to_string()
    }
}
