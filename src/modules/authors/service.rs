use std::cmp::Ordering;

use bookstore_db::{
    crud, ensure_unique, DateRange, Filter, Id, NaturalKey, Order, StoreArc, UniqueConstraint,
};
use bookstore_kernel::{DomainResult, EntityKind};
use chrono::{Local, NaiveDate};

use super::models::{date_of_birth_of, name_of, Author, AuthorCriteria, AuthorPayload};
use crate::modules::books::models::Book;
use crate::utils::format_name;

const NAME: UniqueConstraint<Author> = UniqueConstraint::new(
    NaturalKey::new("name", name_of),
    "This author is already registered.",
    "Author already exists when updating.",
);

fn by_id(a: &Author, b: &Author) -> Ordering {
    a.id.cmp(&b.id)
}

fn book_by_id(a: &Book, b: &Book) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_date_of_birth(a: &Author, b: &Author) -> Ordering {
    a.date_of_birth.cmp(&b.date_of_birth)
}

const LISTING: Order<Author> = Order::ascending("id", by_id);
const BOOKS_BY_ID: Order<Book> = Order::ascending("id", book_by_id);
const FILTERED: Order<Author> = Order::descending("date_of_birth", by_date_of_birth);

pub struct AuthorService {
    authors: StoreArc<Author>,
    books: StoreArc<Book>,
}

impl AuthorService {
    pub fn new(authors: StoreArc<Author>, books: StoreArc<Book>) -> Self {
        Self { authors, books }
    }

    pub async fn create(&self, payload: AuthorPayload) -> DomainResult<Author> {
        self.save(None, payload, today()).await
    }

    /// Replaces an existing author; the name check ignores the author itself.
    pub async fn update(&self, id: Id, payload: AuthorPayload) -> DomainResult<Author> {
        self.get(id).await?;
        self.save(Some(id), payload, today()).await
    }

    async fn save(
        &self,
        id: Option<Id>,
        payload: AuthorPayload,
        today: NaiveDate,
    ) -> DomainResult<Author> {
        let mut author = payload.validate(today)?;
        author.id = id;
        author.name = format_name(&author.name);

        ensure_unique(&*self.authors, &author, &[NAME]).await?;

        self.authors.save(author).await
    }

    pub async fn get(&self, id: Id) -> DomainResult<Author> {
        crud::get_detail(&*self.authors, EntityKind::Author, id).await
    }

    pub async fn list(&self) -> DomainResult<Vec<Author>> {
        crud::list_all(&*self.authors, EntityKind::Author, &LISTING).await
    }

    /// Name substring plus birth-date window, newest birth date first.
    pub async fn filter(&self, criteria: AuthorCriteria) -> DomainResult<Vec<Author>> {
        let range = DateRange::new(criteria.birth_date_start, criteria.birth_date_end);
        let filter = Filter::<Author>::new()
            .contains("name", criteria.name.as_deref(), name_of)
            .within("date_of_birth", "birth date", range, date_of_birth_of)?;

        crud::search(&*self.authors, EntityKind::Author, &filter, &FILTERED).await
    }

    /// Deletes an author together with every book credited to them.
    pub async fn delete(&self, id: Option<Id>) -> DomainResult<()> {
        if let Some(id) = id {
            self.get(id).await?;

            let credited = Filter::<Book>::new()
                .and("author_id", move |book: &Book| book.author_id == id);
            let books = self.books.find_all(&credited, &BOOKS_BY_ID).await?;
            for book_id in books.iter().filter_map(|book| book.id) {
                self.books.delete_by_id(book_id).await?;
            }
            tracing::debug!(author = id, books = books.len(), "removed credited books");
        }

        crud::delete::<Author, _>(&*self.authors, EntityKind::Author, id).await
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_db::MemoryStore;
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn author(id: Id, name: &str, born: NaiveDate) -> Author {
        Author {
            id: Some(id),
            name: name.to_string(),
            date_of_birth: born,
        }
    }

    fn payload(name: &str, born: NaiveDate) -> AuthorPayload {
        AuthorPayload {
            name: Some(name.to_string()),
            date_of_birth: Some(born),
        }
    }

    fn service(authors: Vec<Author>, books: Vec<Book>) -> AuthorService {
        AuthorService::new(
            Arc::new(MemoryStore::with_data(authors)),
            Arc::new(MemoryStore::with_data(books)),
        )
    }

    fn seeded() -> AuthorService {
        service(
            vec![
                author(1, "Machado De Assis", day(2022, 4, 3)),
                author(2, "Clarice Lispector", day(2022, 4, 4)),
                author(3, "Jorge Amado", day(2022, 4, 5)),
                author(4, "Cecilia Meireles", day(2022, 4, 6)),
            ],
            Vec::new(),
        )
    }

    fn names(authors: &[Author]) -> Vec<&str> {
        authors.iter().map(|a| a.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_formats_and_assigns_identity() {
        let service = service(Vec::new(), Vec::new());
        let created = service
            .create(payload("  jorge   AMADO ", day(1912, 8, 10)))
            .await
            .unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.name, "Jorge Amado");
    }

    #[tokio::test]
    async fn duplicate_name_on_create() {
        let service = seeded();
        let err = service
            .create(payload("jorge amado", day(1912, 8, 10)))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "This author is already registered.");
    }

    #[tokio::test]
    async fn update_keeps_own_name_but_not_anothers() {
        let service = seeded();
        let kept = service
            .update(3, payload("Jorge Amado", day(1912, 8, 10)))
            .await
            .unwrap();
        assert_eq!(kept.date_of_birth, day(1912, 8, 10));

        let err = service
            .update(3, payload("Clarice Lispector", day(1912, 8, 10)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Author already exists when updating.");
    }

    #[tokio::test]
    async fn update_of_missing_author_is_not_found() {
        let err = seeded()
            .update(99, payload("Graciliano Ramos", day(1892, 10, 27)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Author not found.");
    }

    #[tokio::test]
    async fn empty_criteria_return_everyone_by_birth_date() {
        let found = seeded().filter(AuthorCriteria::default()).await.unwrap();
        assert_eq!(
            names(&found),
            vec![
                "Cecilia Meireles",
                "Jorge Amado",
                "Clarice Lispector",
                "Machado De Assis"
            ]
        );
    }

    #[tokio::test]
    async fn closed_birth_date_window_includes_both_ends() {
        let found = seeded()
            .filter(AuthorCriteria {
                birth_date_start: Some(day(2022, 4, 4)),
                birth_date_end: Some(day(2022, 4, 5)),
                ..AuthorCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Jorge Amado", "Clarice Lispector"]);
    }

    #[tokio::test]
    async fn inverted_window_fails_before_querying() {
        let err = service(Vec::new(), Vec::new())
            .filter(AuthorCriteria {
                birth_date_start: Some(day(2022, 4, 10)),
                birth_date_end: Some(day(2022, 4, 5)),
                ..AuthorCriteria::default()
            })
            .await
            .unwrap_err();

        // An empty store would otherwise answer not-found.
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn name_criterion_alone() {
        let found = seeded()
            .filter(AuthorCriteria {
                name: Some("Lispector".into()),
                ..AuthorCriteria::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Clarice Lispector"]);

        let err = seeded()
            .filter(AuthorCriteria {
                name: Some("Rosa".into()),
                ..AuthorCriteria::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No authors found.");
    }

    #[tokio::test]
    async fn listing_is_by_identity() {
        let listed = seeded().list().await.unwrap();
        let ids: Vec<Option<Id>> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);

        let err = service(Vec::new(), Vec::new()).list().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_credited_books() {
        let book = |id: Id, author_id: Id| Book {
            id: Some(id),
            title: format!("Livro {id}"),
            subtitle: "Subtitulo".into(),
            synopsis: "Sinopse".into(),
            isbn: format!("{id}"),
            stock: 1,
            author_id,
            category_id: 1,
        };
        let books: StoreArc<Book> = Arc::new(MemoryStore::with_data(vec![
            book(1, 1),
            book(2, 2),
            book(3, 1),
        ]));
        let service = AuthorService::new(
            Arc::new(MemoryStore::with_data(vec![
                author(1, "Machado De Assis", day(1839, 6, 21)),
                author(2, "Jorge Amado", day(1912, 8, 10)),
            ])),
            books.clone(),
        );

        service.delete(Some(1)).await.unwrap();

        assert!(service.get(1).await.unwrap_err().is_not_found());
        assert!(books.find_by_id(1).await.unwrap().is_none());
        assert!(books.find_by_id(2).await.unwrap().is_some());
        assert!(books.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_without_identity_is_rejected() {
        let err = seeded().delete(None).await.unwrap_err();
        assert!(err.is_validation());
    }
}
