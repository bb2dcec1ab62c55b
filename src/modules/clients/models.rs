use bookstore_db::{Entity, Id};
use bookstore_kernel::{DomainError, DomainResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::{date_format, FieldErrors};

/// Kind of identity document a client registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Individual taxpayer number.
    Cpf,
    /// Company taxpayer number.
    Cnpj,
}

impl DocumentType {
    pub const fn code(self) -> i32 {
        match self {
            DocumentType::Cpf => 1,
            DocumentType::Cnpj => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        [DocumentType::Cpf, DocumentType::Cnpj]
            .into_iter()
            .find(|kind| kind.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<Id>,
    pub full_name: String,
    pub document: String,
    #[serde(with = "date_format")]
    pub date_of_birth: NaiveDate,
    pub has_book: Option<bool>,
    pub document_type: DocumentType,
}

impl Entity for Client {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn assign_id(&mut self, id: Id) {
        self.id = Some(id);
    }
}

pub fn full_name_of(client: &Client) -> &str {
    &client.full_name
}

pub fn document_of(client: &Client) -> &str {
    &client.document
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPayload {
    pub full_name: Option<String>,
    pub document: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub date_of_birth: Option<NaiveDate>,
    pub has_book: Option<bool>,
    pub document_type: Option<i32>,
}

impl ClientPayload {
    /// Field checks, then the document type code lookup.
    pub fn validate(self) -> DomainResult<Client> {
        let mut errors = FieldErrors::new();
        errors.text("Full name", self.full_name.as_deref(), 5..=250);
        errors.not_blank("Document", self.document.as_deref());
        errors.required("Date of birth", &self.date_of_birth);
        errors.required("Document type", &self.document_type);

        let (Some(full_name), Some(document), Some(date_of_birth), Some(code)) = (
            self.full_name,
            self.document,
            self.date_of_birth,
            self.document_type,
        ) else {
            return Err(errors.into_error());
        };
        if !errors.is_empty() {
            return Err(errors.into_error());
        }

        let document_type = DocumentType::from_code(code)
            .ok_or_else(|| DomainError::validation("Enter a valid document type."))?;

        Ok(Client {
            id: None,
            full_name,
            document,
            date_of_birth,
            has_book: self.has_book,
            document_type,
        })
    }
}

/// Query parameters of `GET /filter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientCriteria {
    pub full_name: Option<String>,
    pub document: Option<String>,
    pub has_book: Option<bool>,
    pub document_type: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ClientPayload {
        ClientPayload {
            full_name: Some("Gabriel Ferreira".into()),
            document: Some("12345678900".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20),
            has_book: Some(true),
            document_type: Some(1),
        }
    }

    #[test]
    fn document_type_codes() {
        assert_eq!(DocumentType::from_code(1), Some(DocumentType::Cpf));
        assert_eq!(DocumentType::from_code(2), Some(DocumentType::Cnpj));
        assert_eq!(DocumentType::from_code(3), None);
        assert_eq!(DocumentType::Cnpj.code(), 2);
    }

    #[test]
    fn valid_payload_maps_document_type() {
        let client = payload().validate().unwrap();
        assert_eq!(client.document_type, DocumentType::Cpf);
        assert_eq!(client.has_book, Some(true));
    }

    #[test]
    fn unknown_document_type_is_a_business_error() {
        let err = ClientPayload {
            document_type: Some(9),
            ..payload()
        }
        .validate()
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Enter a valid document type.");
    }

    #[test]
    fn missing_fields_are_input_errors() {
        let err = ClientPayload {
            document: None,
            document_type: None,
            ..payload()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid fields: Document is required.; Document type is required."
        );
    }

    #[test]
    fn document_type_serialises_by_name() {
        let client = payload().validate().unwrap();
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["document_type"], "CPF");
        assert_eq!(json["date_of_birth"], "20/05/1990");
    }
}
