use std::cmp::Ordering;

use bookstore_db::{crud, Filter, Id, Order, StoreArc};
use bookstore_kernel::{DomainError, DomainResult, EntityKind};

use super::models::{Category, CategoryPayload};
use crate::modules::books::models::Book;

fn by_id(a: &Category, b: &Category) -> Ordering {
    a.id.cmp(&b.id)
}

fn book_by_id(a: &Book, b: &Book) -> Ordering {
    a.id.cmp(&b.id)
}

const LISTING: Order<Category> = Order::ascending("id", by_id);

pub struct CategoryService {
    categories: StoreArc<Category>,
    books: StoreArc<Book>,
}

impl CategoryService {
    pub fn new(categories: StoreArc<Category>, books: StoreArc<Book>) -> Self {
        Self { categories, books }
    }

    pub async fn create(&self, payload: CategoryPayload) -> DomainResult<Category> {
        let category = payload.validate()?;
        self.categories.save(category).await
    }

    pub async fn update(&self, id: Id, payload: CategoryPayload) -> DomainResult<Category> {
        self.get(id).await?;
        let mut category = payload.validate()?;
        category.id = Some(id);
        self.categories.save(category).await
    }

    pub async fn get(&self, id: Id) -> DomainResult<Category> {
        crud::get_detail(&*self.categories, EntityKind::Category, id).await
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        crud::list_all(&*self.categories, EntityKind::Category, &LISTING).await
    }

    /// Refuses while any book is filed under the category.
    pub async fn delete(&self, id: Option<Id>) -> DomainResult<()> {
        if let Some(id) = id {
            let filed = Filter::<Book>::new()
                .and("category_id", move |book: &Book| book.category_id == id);
            let books = self
                .books
                .find_all(&filed, &Order::ascending("id", book_by_id))
                .await?;
            if !books.is_empty() {
                tracing::debug!(category = id, books = books.len(), "category still in use");
                return Err(DomainError::validation(
                    "Category cannot be deleted while books reference it.",
                ));
            }
        }

        crud::delete::<Category, _>(&*self.categories, EntityKind::Category, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_db::MemoryStore;
    use std::sync::Arc;

    fn category(id: Id, description: &str) -> Category {
        Category {
            id: Some(id),
            description: description.to_string(),
        }
    }

    fn filed_book(category_id: Id) -> Book {
        Book {
            id: Some(1),
            title: "Capitaes Da Areia".into(),
            subtitle: "Subtitulo".into(),
            synopsis: "Sinopse".into(),
            isbn: "123".into(),
            stock: 3,
            author_id: 1,
            category_id,
        }
    }

    fn service(books: Vec<Book>) -> CategoryService {
        CategoryService::new(
            Arc::new(MemoryStore::with_data(vec![
                category(1, "Romance"),
                category(2, "Poesia"),
            ])),
            Arc::new(MemoryStore::with_data(books)),
        )
    }

    #[tokio::test]
    async fn create_and_update() {
        let service = service(Vec::new());
        let created = service
            .create(CategoryPayload {
                description: Some("Ficcao Cientifica".into()),
            })
            .await
            .unwrap();
        assert_eq!(created.id, Some(3));

        let updated = service
            .update(
                3,
                CategoryPayload {
                    description: Some("Fantasia".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "Fantasia");
        assert_eq!(service.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_of_missing_category_is_not_found() {
        let err = service(Vec::new())
            .update(
                9,
                CategoryPayload {
                    description: Some("Fantasia".into()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Category not found.");
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let service = service(vec![filed_book(1)]);

        let err = service.delete(Some(1)).await.unwrap_err();
        assert!(err.is_validation());
        assert!(service.get(1).await.is_ok());

        service.delete(Some(2)).await.unwrap();
        assert!(service.get(2).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn deleting_unknown_category_is_not_found() {
        let err = service(Vec::new()).delete(Some(7)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
