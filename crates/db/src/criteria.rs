//! Helpers shared by the filter builders: criterion presence and date ranges.

use bookstore_kernel::{DomainError, DomainResult};
use chrono::{Days, NaiveDate};

/// Decides whether an optional text criterion contributes a predicate.
///
/// Any supplied value counts as present, including the empty string. The
/// legacy search screens relied on this: an empty `?title=` still adds a
/// (match-everything) substring predicate rather than being dropped.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some()
}

/// Moves a lower date bound back by one calendar day.
pub fn shift_back_one_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Optional `[start, end]` window over a date column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Fails when both bounds are set and `start` is after `end`.
    ///
    /// `label` names the column in the error, e.g. "birth date".
    pub fn validate(&self, label: &str) -> DomainResult<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(DomainError::validation(format!(
                "Start {label} cannot be after end {label}."
            ))),
            _ => Ok(()),
        }
    }

    /// Exclusive lower bound: the start day shifted back by one.
    pub fn lower_bound(&self) -> Option<NaiveDate> {
        self.start.map(shift_back_one_day)
    }

    /// Whether `date` falls inside the window.
    ///
    /// The lower comparison is strict against the shifted bound, so the start
    /// day itself is included and the day before it is not.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let above = self.lower_bound().map_or(true, |lower| date > lower);
        let below = self.end.map_or(true, |end| date <= end);
        above && below
    }
}
