use bookstore_db::{Entity, Id};
use bookstore_kernel::DomainResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::{date_format, FieldErrors};

/// A person credited with writing books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<Id>,
    pub name: String,
    #[serde(with = "date_format")]
    pub date_of_birth: NaiveDate,
}

impl Entity for Author {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn assign_id(&mut self, id: Id) {
        self.id = Some(id);
    }
}

pub fn name_of(author: &Author) -> &str {
    &author.name
}

pub fn date_of_birth_of(author: &Author) -> NaiveDate {
    author.date_of_birth
}

/// Request body for creating or replacing an author.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorPayload {
    pub name: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub date_of_birth: Option<NaiveDate>,
}

impl AuthorPayload {
    /// Field checks; every failure is reported at once.
    pub fn validate(self, today: NaiveDate) -> DomainResult<Author> {
        let mut errors = FieldErrors::new();
        errors.text("Name", self.name.as_deref(), 5..=150);
        match self.date_of_birth {
            None => errors.push("Date of birth is required."),
            Some(date) if date > today => errors.push("Date of birth cannot be after today."),
            Some(_) => {}
        }

        match (self.name, self.date_of_birth) {
            (Some(name), Some(date_of_birth)) if errors.is_empty() => Ok(Author {
                id: None,
                name,
                date_of_birth,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// Query parameters of `GET /filter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorCriteria {
    pub name: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub birth_date_start: Option<NaiveDate>,
    #[serde(default, with = "date_format::option")]
    pub birth_date_end: Option<NaiveDate>,
}
