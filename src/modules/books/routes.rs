use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bookstore_db::Id;
use bookstore_http::{AppJson, AppPath, AppQuery, AppResult};

use super::models::{BookCriteria, BookPayload, BookView};
use super::service::BookService;
use crate::modules::ApiState;
use crate::utils::{paginate, Page, PageParams};

pub type BooksState = ApiState<BookService>;

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", post(create_book))
        .route("/filter", get(filter_books))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn create_book(
    State(state): State<BooksState>,
    AppJson(payload): AppJson<BookPayload>,
) -> AppResult<(StatusCode, Json<BookView>)> {
    let book = state.service.create(payload).await?;
    tracing::info!(book = ?book.id, isbn = %book.isbn, "book registered");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(
    State(state): State<BooksState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<Json<BookView>> {
    Ok(Json(state.service.get(id).await?))
}

async fn update_book(
    State(state): State<BooksState>,
    AppPath(id): AppPath<Id>,
    AppJson(payload): AppJson<BookPayload>,
) -> AppResult<StatusCode> {
    state.service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(state): State<BooksState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<StatusCode> {
    state.service.delete(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn filter_books(
    State(state): State<BooksState>,
    AppQuery(criteria): AppQuery<BookCriteria>,
    AppQuery(paging): AppQuery<PageParams>,
) -> AppResult<Json<Page<BookView>>> {
    let books = state.service.filter(criteria).await?;
    Ok(Json(paginate(books, paging, &state.pagination)))
}
