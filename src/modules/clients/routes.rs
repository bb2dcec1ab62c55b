use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_db::Id;
use bookstore_http::{AppJson, AppPath, AppQuery, AppResult};

use super::models::{Client, ClientCriteria, ClientPayload};
use super::service::ClientService;
use crate::modules::ApiState;
use crate::utils::{paginate, Page, PageParams};

pub type ClientsState = ApiState<ClientService>;

pub fn router(state: ClientsState) -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/filter", get(filter_clients))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "clients module is healthy"
}

async fn create_client(
    State(state): State<ClientsState>,
    AppJson(payload): AppJson<ClientPayload>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn list_clients(State(state): State<ClientsState>) -> AppResult<Json<Vec<Client>>> {
    Ok(Json(state.service.list().await?))
}

async fn filter_clients(
    State(state): State<ClientsState>,
    AppQuery(criteria): AppQuery<ClientCriteria>,
    AppQuery(paging): AppQuery<PageParams>,
) -> AppResult<Json<Page<Client>>> {
    let clients = state.service.filter(criteria).await?;
    Ok(Json(paginate(clients, paging, &state.pagination)))
}

async fn get_client(
    State(state): State<ClientsState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<Json<Client>> {
    Ok(Json(state.service.get(id).await?))
}

async fn update_client(
    State(state): State<ClientsState>,
    AppPath(id): AppPath<Id>,
    AppJson(payload): AppJson<ClientPayload>,
) -> AppResult<StatusCode> {
    state.service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_client(
    State(state): State<ClientsState>,
    AppPath(id): AppPath<Id>,
) -> AppResult<StatusCode> {
    state.service.delete(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
