//! Book registration and search.
//!
//! Registration runs, in order: author and category lookup, title uniqueness,
//! ISBN uniqueness, ISBN format, stock range. The first failure aborts.

use std::cmp::Ordering;

use bookstore_db::{
    crud, ensure_unique, is_present, Filter, Id, NaturalKey, Order, StoreArc, UniqueConstraint,
};
use bookstore_kernel::{DomainError, DomainResult, EntityKind};

use super::models::{isbn_of, title_of, Book, BookCriteria, BookPayload, BookView};
use crate::modules::authors::models::{name_of, Author};
use crate::modules::categories::models::{description_of, Category};
use crate::utils::format_name;

const MAX_ISBN_LEN: usize = 13;

const TITLE: UniqueConstraint<Book> = UniqueConstraint::new(
    NaturalKey::new("title", title_of),
    "This title is already registered to another book.",
    "Title already exists when updating.",
);

const ISBN: UniqueConstraint<Book> = UniqueConstraint::new(
    NaturalKey::new("isbn", isbn_of),
    "This ISBN is already registered to another book.",
    "ISBN already exists when updating.",
);

fn by_title(a: &Book, b: &Book) -> Ordering {
    a.title.cmp(&b.title)
}

fn author_by_id(a: &Author, b: &Author) -> Ordering {
    a.id.cmp(&b.id)
}

fn category_by_id(a: &Category, b: &Category) -> Ordering {
    a.id.cmp(&b.id)
}

const FILTERED: Order<Book> = Order::descending("title", by_title);

/// ISBNs are digits only and at most 13 of them.
pub fn check_isbn(isbn: &str) -> DomainResult<()> {
    if isbn.is_empty() || !isbn.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation("ISBN must contain digits only."));
    }
    if isbn.len() > MAX_ISBN_LEN {
        return Err(DomainError::validation(format!(
            "ISBN can have at most {MAX_ISBN_LEN} characters."
        )));
    }
    Ok(())
}

pub fn check_stock(stock: i32) -> DomainResult<()> {
    if stock < 0 {
        return Err(DomainError::validation("Book stock cannot be less than 0."));
    }
    Ok(())
}

pub struct BookService {
    books: StoreArc<Book>,
    authors: StoreArc<Author>,
    categories: StoreArc<Category>,
}

impl BookService {
    pub fn new(
        books: StoreArc<Book>,
        authors: StoreArc<Author>,
        categories: StoreArc<Category>,
    ) -> Self {
        Self {
            books,
            authors,
            categories,
        }
    }

    pub async fn create(&self, payload: BookPayload) -> DomainResult<BookView> {
        self.save(None, payload).await
    }

    /// Replaces an existing book; uniqueness ignores the book's own record.
    pub async fn update(&self, id: Id, payload: BookPayload) -> DomainResult<BookView> {
        crud::get_detail::<Book, _>(&*self.books, EntityKind::Book, id).await?;
        self.save(Some(id), payload).await
    }

    async fn save(&self, id: Option<Id>, payload: BookPayload) -> DomainResult<BookView> {
        let mut book = payload.validate()?;
        let author: Author =
            crud::get_detail(&*self.authors, EntityKind::Author, book.author_id).await?;
        let category: Category =
            crud::get_detail(&*self.categories, EntityKind::Category, book.category_id).await?;

        book.id = id;
        book.title = format_name(&book.title);

        ensure_unique(&*self.books, &book, &[TITLE, ISBN]).await?;
        check_isbn(&book.isbn)?;
        check_stock(book.stock)?;

        let saved = self.books.save(book).await?;
        Ok(BookView::new(saved, author, category))
    }

    pub async fn get(&self, id: Id) -> DomainResult<BookView> {
        let book: Book = crud::get_detail(&*self.books, EntityKind::Book, id).await?;
        self.view(book).await
    }

    /// Title and ISBN substrings, author name and category description.
    /// Titles in descending order.
    pub async fn filter(&self, criteria: BookCriteria) -> DomainResult<Vec<BookView>> {
        let author_ids = self.author_ids(criteria.author.as_deref()).await?;
        let category_ids = self.category_ids(criteria.category.as_deref()).await?;

        let filter = Filter::<Book>::new()
            .contains("title", criteria.title.as_deref(), title_of)
            .contains("isbn", criteria.isbn.as_deref(), isbn_of)
            .one_of("author", author_ids, |b: &Book| b.author_id)
            .one_of("category", category_ids, |b: &Book| b.category_id);

        let books = crud::search(&*self.books, EntityKind::Book, &filter, &FILTERED).await?;

        let mut views = Vec::with_capacity(books.len());
        for book in books {
            views.push(self.view(book).await?);
        }
        Ok(views)
    }

    pub async fn delete(&self, id: Option<Id>) -> DomainResult<()> {
        crud::delete::<Book, _>(&*self.books, EntityKind::Book, id).await
    }

    /// Ids of authors whose name contains `name`, when the criterion is present.
    async fn author_ids(&self, name: Option<&str>) -> DomainResult<Option<Vec<Id>>> {
        if !is_present(name) {
            return Ok(None);
        }
        let filter = Filter::<Author>::new().contains("name", name, name_of);
        let authors = self
            .authors
            .find_all(&filter, &Order::ascending("id", author_by_id))
            .await?;
        Ok(Some(authors.iter().filter_map(|a| a.id).collect()))
    }

    async fn category_ids(&self, description: Option<&str>) -> DomainResult<Option<Vec<Id>>> {
        if !is_present(description) {
            return Ok(None);
        }
        let filter =
            Filter::<Category>::new().contains("description", description, description_of);
        let categories = self
            .categories
            .find_all(&filter, &Order::ascending("id", category_by_id))
            .await?;
        Ok(Some(categories.iter().filter_map(|c| c.id).collect()))
    }

    async fn view(&self, book: Book) -> DomainResult<BookView> {
        let author: Author =
            crud::get_detail(&*self.authors, EntityKind::Author, book.author_id).await?;
        let category: Category =
            crud::get_detail(&*self.categories, EntityKind::Category, book.category_id).await?;
        Ok(BookView::new(book, author, category))
    }
}
