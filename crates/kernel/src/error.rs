//! Domain error taxonomy shared by every bookstore module.

use std::fmt;

use thiserror::Error;

/// Kind of record a generic helper is operating on.
///
/// Supplies the user-facing labels for "not found" and "none found" errors so
/// shared CRUD helpers never rely on string constants owned by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Author,
    Category,
    Client,
}

impl EntityKind {
    /// Singular label used in messages
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Book => "Book",
            EntityKind::Author => "Author",
            EntityKind::Category => "Category",
            EntityKind::Client => "Client",
        }
    }

    const fn plural(self) -> &'static str {
        match self {
            EntityKind::Book => "books",
            EntityKind::Author => "authors",
            EntityKind::Category => "categories",
            EntityKind::Client => "clients",
        }
    }

    /// Message for a detail lookup that found nothing
    pub fn not_found_message(self) -> String {
        format!("{} not found.", self.label())
    }

    /// Message for a listing or filtered search that produced no records
    pub fn none_found_message(self) -> String {
        format!("No {} found.", self.plural())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised by services and the record store.
///
/// Everything except `Internal` is caller-correctable and must never be retried.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A detail fetch or filtered search matched zero records.
    #[error("{message}")]
    NotFound { message: String },

    /// A business rule was violated (duplicate natural key, malformed ISBN,
    /// negative stock, inverted date range, missing identity on delete).
    #[error("{message}")]
    Validation { message: String },

    /// Payload-level field checks failed; one message per offending field.
    #[error("invalid fields: {}", .fields.join("; "))]
    InputFormat { fields: Vec<String> },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn input_format(fields: Vec<String>) -> Self {
        Self::InputFormat { fields }
    }

    /// Not-found error for a single record of the given kind
    pub fn missing(kind: EntityKind) -> Self {
        Self::not_found(kind.not_found_message())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
