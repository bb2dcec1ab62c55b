use bookstore_db::{Entity, Id};
use bookstore_kernel::DomainResult;
use serde::{Deserialize, Serialize};

use crate::utils::FieldErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<Id>,
    pub description: String,
}

impl Entity for Category {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn assign_id(&mut self, id: Id) {
        self.id = Some(id);
    }
}

pub fn description_of(category: &Category) -> &str {
    &category.description
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPayload {
    pub description: Option<String>,
}

impl CategoryPayload {
    pub fn validate(self) -> DomainResult<Category> {
        let mut errors = FieldErrors::new();
        errors.text("Description", self.description.as_deref(), 5..=150);

        match self.description {
            Some(description) if errors.is_empty() => Ok(Category {
                id: None,
                description,
            }),
            _ => Err(errors.into_error()),
        }
    }
}
