//! Dynamic filter assembly.
//!
//! A [`Filter`] accumulates one typed predicate per supplied search criterion
//! and folds them with logical AND. Absent criteria contribute nothing, so an
//! empty filter matches every record. There is no OR anywhere in a filter.

use std::cmp::Ordering;
use std::fmt;

use bookstore_kernel::DomainResult;
use chrono::NaiveDate;

use crate::criteria::{is_present, DateRange};
use crate::entity::Id;

/// Boxed row predicate.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Clause<T> {
    field: &'static str,
    predicate: Predicate<T>,
}

/// Conjunction of predicates over records of type `T`.
pub struct Filter<T> {
    clauses: Vec<Clause<T>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("fields", &self.fields())
            .finish()
    }
}

impl<T: 'static> Filter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary predicate on `field`.
    pub fn and<F>(mut self, field: &'static str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.clauses.push(Clause {
            field,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Substring match on a text column, when `needle` is present.
    pub fn contains(self, field: &'static str, needle: Option<&str>, get: fn(&T) -> &str) -> Self {
        if !is_present(needle) {
            return self;
        }
        let needle = needle.unwrap_or_default().to_owned();
        self.and(field, move |record| get(record).contains(needle.as_str()))
    }

    /// Exact equality on a column, when `value` is present.
    pub fn equals<V>(self, field: &'static str, value: Option<V>, get: fn(&T) -> V) -> Self
    where
        V: PartialEq + Send + Sync + 'static,
    {
        match value {
            Some(expected) => self.and(field, move |record| get(record) == expected),
            None => self,
        }
    }

    /// Restricts a reference column to a precomputed id set.
    ///
    /// Used for criteria on related records: the caller resolves the related
    /// ids first, then the filter keeps rows pointing at one of them.
    pub fn one_of(self, field: &'static str, ids: Option<Vec<Id>>, get: fn(&T) -> Id) -> Self {
        match ids {
            Some(ids) => self.and(field, move |record| ids.contains(&get(record))),
            None => self,
        }
    }

    /// Date window on a column.
    ///
    /// Only `end` set gives `date <= end`. Only `start` set gives
    /// `date > start - 1 day`. Both set are validated first (start must not be
    /// after end) and then combined into a single clause.
    pub fn within(
        self,
        field: &'static str,
        label: &str,
        range: DateRange,
        get: fn(&T) -> NaiveDate,
    ) -> DomainResult<Self> {
        range.validate(label)?;

        let filter = match (range.lower_bound(), range.end) {
            (None, None) => self,
            (None, Some(end)) => self.and(field, move |record| get(record) <= end),
            (Some(lower), None) => self.and(field, move |record| get(record) > lower),
            (Some(lower), Some(end)) => self.and(field, move |record| {
                let date = get(record);
                date > lower && date <= end
            }),
        };
        Ok(filter)
    }
}

impl<T> Filter<T> {
    /// Evaluates every clause; all must hold.
    pub fn matches(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| (clause.predicate)(record))
    }

    /// Names of the fields that contributed a clause, in insertion order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.clauses.iter().map(|clause| clause.field).collect()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Fixed sort key for a listing.
pub struct Order<T> {
    field: &'static str,
    direction: Direction,
    compare: fn(&T, &T) -> Ordering,
}

impl<T> Clone for Order<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Order<T> {}

impl<T> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("field", &self.field)
            .field("direction", &self.direction)
            .finish()
    }
}

impl<T> Order<T> {
    pub const fn ascending(field: &'static str, compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
            compare,
        }
    }

    pub const fn descending(field: &'static str, compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            field,
            direction: Direction::Descending,
            compare,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    pub fn sort(&self, records: &mut [T]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}
