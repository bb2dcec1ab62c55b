use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_db::Id;
use bookstore_http::{AppJson, AppPath, AppQuery, AppResult};

use super::models::{Author, AuthorCriteria, AuthorPayload};
use super::service::AuthorService;
use crate::modules::ApiState;
use crate::utils::{paginate, Page, PageParams};

pub type AuthorsState = ApiState<AuthorService>;

pub fn router(state: AuthorsState) -> Router {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/filter", get(filter_authors))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "authors module is healthy"
}

async fn create_author(
    State(state): State<AuthorsState>,
    AppJson(payload): AppJson<AuthorPayload>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.service.create(payload).await?;
    tracing::info!(author = ?author.id, "author created");
    Ok((StatusCode::CREATED, Json(author)))
}

async fn list_authors(State(state): State<AuthorsState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.service.list().await?))
}

async fn filter_authors(
    State(state): State<AuthorsState>,
    AppQuery(criteria): AppQuery<AuthorCriteria>,
    AppQuery(paging): AppQuery<PageParams>,
) -> AppResult<Json<Page<Author>>> {
    let authors = state.service.filter(criteria).await?;
    Ok(Json(paginate(authors, paging, &state.pagination)))
}

async fn get_author(
    State(state): State<AuthorsState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.service.get(id).await?))
}

async fn update_author(
    State(state): State<AuthorsState>,
    AppPath(id): AppPath<Id>,
    AppJson(payload): AppJson<AuthorPayload>,
) -> AppResult<StatusCode> {
    state.service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_author(
    State(state): State<AuthorsState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<StatusCode> {
    state.service.delete(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
