use bookstore_db::{Entity, Id};
use bookstore_kernel::DomainResult;
use serde::{Deserialize, Serialize};

use crate::modules::authors::models::Author;
use crate::modules::categories::models::Category;
use crate::utils::FieldErrors;

/// A stocked title. References its author and category by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<Id>,
    pub title: String,
    pub subtitle: String,
    pub synopsis: String,
    pub isbn: String,
    pub stock: i32,
    pub author_id: Id,
    pub category_id: Id,
}

impl Entity for Book {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn assign_id(&mut self, id: Id) {
        self.id = Some(id);
    }
}

pub fn title_of(book: &Book) -> &str {
    &book.title
}

pub fn isbn_of(book: &Book) -> &str {
    &book.isbn
}

/// A book as returned to callers, with its author and category resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Option<Id>,
    pub title: String,
    pub subtitle: String,
    pub synopsis: String,
    pub isbn: String,
    pub stock: i32,
    pub author: Author,
    pub category: Category,
}

impl BookView {
    pub fn new(book: Book, author: Author, category: Category) -> Self {
        Self {
            id: book.id,
            title: book.title,
            subtitle: book.subtitle,
            synopsis: book.synopsis,
            isbn: book.isbn,
            stock: book.stock,
            author,
            category,
        }
    }
}

/// Request body for creating or replacing a book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub synopsis: Option<String>,
    pub isbn: Option<String>,
    pub stock: Option<i32>,
    pub author_id: Option<Id>,
    pub category_id: Option<Id>,
}

impl BookPayload {
    /// Field checks; the business rules run afterwards in the service.
    pub fn validate(self) -> DomainResult<Book> {
        let mut errors = FieldErrors::new();
        errors.text("Title", self.title.as_deref(), 5..=150);
        errors.text("Subtitle", self.subtitle.as_deref(), 5..=250);
        errors.text("Synopsis", self.synopsis.as_deref(), 5..=250);
        errors.not_blank("ISBN", self.isbn.as_deref());
        errors.required("Stock", &self.stock);
        errors.required("Author id", &self.author_id);
        errors.required("Category id", &self.category_id);

        match (
            self.title,
            self.subtitle,
            self.synopsis,
            self.isbn,
            self.stock,
            self.author_id,
            self.category_id,
        ) {
            (
                Some(title),
                Some(subtitle),
                Some(synopsis),
                Some(isbn),
                Some(stock),
                Some(author_id),
                Some(category_id),
            ) if errors.is_empty() => Ok(Book {
                id: None,
                title,
                subtitle,
                synopsis,
                isbn,
                stock,
                author_id,
                category_id,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// Query parameters of `GET /filter`.
///
/// `author` and `category` match the related author's name and category's
/// description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookCriteria {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_kernel::DomainError;

    fn payload() -> BookPayload {
        BookPayload {
            title: Some("Teste Livro".into()),
            subtitle: Some("Um subtitulo".into()),
            synopsis: Some("Uma sinopse qualquer".into()),
            isbn: Some("123456".into()),
            stock: Some(10),
            author_id: Some(1),
            category_id: Some(1),
        }
    }

    #[test]
    fn complete_payload_is_accepted() {
        let book = payload().validate().unwrap();
        assert_eq!(book.id, None);
        assert_eq!(book.isbn, "123456");
    }

    #[test]
    fn negative_stock_is_left_to_the_service() {
        let book = BookPayload {
            stock: Some(-1),
            ..payload()
        }
        .validate()
        .unwrap();
        assert_eq!(book.stock, -1);
    }

    #[test]
    fn missing_fields_are_aggregated() {
        let err = BookPayload {
            title: Some("abc".into()),
            isbn: Some(" ".into()),
            author_id: None,
            ..payload()
        }
        .validate()
        .unwrap_err();

        match err {
            DomainError::InputFormat { fields } => assert_eq!(
                fields,
                vec![
                    "Title must have between 5 and 150 characters.",
                    "ISBN is required.",
                    "Author id is required.",
                ]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
