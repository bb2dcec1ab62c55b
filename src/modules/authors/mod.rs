pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{settings::PaginationSettings, InitCtx, Migration, Module};
use serde_json::json;

use crate::modules::ApiState;
use crate::Stores;
use service::AuthorService;

/// Authors ("usuarios" in the legacy API): people credited with books.
pub struct AuthorsModule {
    service: Arc<AuthorService>,
    pagination: PaginationSettings,
}

impl AuthorsModule {
    pub fn new(service: AuthorService, pagination: PaginationSettings) -> Self {
        Self {
            service: Arc::new(service),
            pagination,
        }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(ApiState::new(self.service.clone(), self.pagination))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let author = json!({ "$ref": "#/components/schemas/Author" });
        let payload = json!({
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AuthorPayload" } } }
        });
        let id = json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "Every author by identity",
                                "content": { "application/json": { "schema": { "type": "array", "items": author } } }
                            },
                            "404": error
                        }
                    },
                    "post": {
                        "summary": "Create an author",
                        "tags": ["Authors"],
                        "requestBody": payload,
                        "responses": {
                            "201": { "description": "Created", "content": { "application/json": { "schema": author } } },
                            "400": error,
                            "422": error
                        }
                    }
                },
                "/filter": {
                    "get": {
                        "summary": "Filter authors by name and birth date window",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "name", "in": "query", "schema": { "type": "string" } },
                            { "name": "birth_date_start", "in": "query", "schema": { "type": "string", "example": "04/04/2022" } },
                            { "name": "birth_date_end", "in": "query", "schema": { "type": "string", "example": "05/04/2022" } },
                            { "name": "page", "in": "query", "schema": { "type": "integer" } },
                            { "name": "page_size", "in": "query", "schema": { "type": "integer" } }
                        ],
                        "responses": {
                            "200": { "description": "Page of authors, newest birth date first" },
                            "400": error,
                            "404": error
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get an author",
                        "tags": ["Authors"],
                        "parameters": id,
                        "responses": {
                            "200": { "description": "Author", "content": { "application/json": { "schema": author } } },
                            "404": error
                        }
                    },
                    "put": {
                        "summary": "Replace an author",
                        "tags": ["Authors"],
                        "parameters": id,
                        "requestBody": payload,
                        "responses": { "204": { "description": "Updated" }, "400": error, "404": error, "422": error }
                    },
                    "delete": {
                        "summary": "Delete an author and their books",
                        "tags": ["Authors"],
                        "parameters": id,
                        "responses": { "204": { "description": "Deleted" }, "404": error }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Authors health check",
                        "tags": ["Authors"],
                        "responses": { "200": { "description": "OK" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "date_of_birth": { "type": "string", "description": "dd/MM/yyyy" }
                        },
                        "required": ["id", "name", "date_of_birth"]
                    },
                    "AuthorPayload": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "minLength": 5, "maxLength": 150 },
                            "date_of_birth": { "type": "string", "description": "dd/MM/yyyy, not after today" }
                        },
                        "required": ["name", "date_of_birth"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE author SCHEMAFULL;
                DEFINE FIELD name          ON author TYPE string ASSERT string::len($value) >= 5;
                DEFINE FIELD date_of_birth ON author TYPE datetime;
                DEFINE INDEX author_name_unique ON author FIELDS name UNIQUE;
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

pub fn create_module(stores: &Stores, pagination: PaginationSettings) -> Arc<dyn Module> {
    let service = AuthorService::new(stores.authors.clone(), stores.books.clone());
    Arc::new(AuthorsModule::new(service, pagination))
}
