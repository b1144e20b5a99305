//! Enrollment period model.
//!
//! This module contains the [`EnrollmentPeriod`] type naming the calendar
//! window in which enrollment work, and therefore pay, is earned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The open enrollment period (OEP) a projection covers.
///
/// The period is informational: the engine scales pay by the configured
/// number of working days, not by the calendar length of the window.
///
/// # Example
///
/// ```
/// use earnings_engine::models::EnrollmentPeriod;
/// use chrono::NaiveDate;
///
/// let period = EnrollmentPeriod {
///     name: "OEP 2026".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()));
/// assert_eq!(period.calendar_days(), 76);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPeriod {
    /// Display name of the period (e.g., "OEP 2026").
    pub name: String,
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl EnrollmentPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of calendar days in the period, inclusive of both ends.
    ///
    /// An inverted period (end before start) has zero days.
    pub fn calendar_days(&self) -> i64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(0)
    }

    /// Formats the period the way the calculator header shows it,
    /// e.g. "November 1, 2025 – January 15, 2026".
    pub fn describe(&self) -> String {
        format!(
            "{} – {}",
            self.start_date.format("%B %-d, %Y"),
            self.end_date.format("%B %-d, %Y")
        )
    }
}
