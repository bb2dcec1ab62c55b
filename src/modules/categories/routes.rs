use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_db::Id;
use bookstore_http::{AppJson, AppPath, AppQuery, AppResult};

use super::models::{Category, CategoryPayload};
use super::service::CategoryService;
use crate::modules::ApiState;
use crate::utils::{paginate, Page, PageParams};

pub type CategoriesState = ApiState<CategoryService>;

pub fn router(state: CategoriesState) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "categories module is healthy"
}

async fn create_category(
    State(state): State<CategoriesState>,
    AppJson(payload): AppJson<CategoryPayload>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list_categories(
    State(state): State<CategoriesState>,
    AppQuery(paging): AppQuery<PageParams>,
) -> AppResult<Json<Page<Category>>> {
    let categories = state.service.list().await?;
    Ok(Json(paginate(categories, paging, &state.pagination)))
}

async fn get_category(
    State(state): State<CategoriesState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.service.get(id).await?))
}

async fn update_category(
    State(state): State<CategoriesState>,
    AppPath(id): AppPath<Id>,
    AppJson(payload): AppJson<CategoryPayload>,
) -> AppResult<StatusCode> {
    state.service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_category(
    State(state): State<CategoriesState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<StatusCode> {
    state.service.delete(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
