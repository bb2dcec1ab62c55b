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
use service::BookService;

/// Books module: registration with title/ISBN uniqueness and filtered search
pub struct BooksModule {
    service: Arc<BookService>,
    pagination: PaginationSettings,
}

impl BooksModule {
    pub fn new(service: BookService, pagination: PaginationSettings) -> Self {
        Self {
            service: Arc::new(service),
            pagination,
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(ApiState::new(self.service.clone(), self.pagination))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let view = json!({ "$ref": "#/components/schemas/Book" });
        let payload = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });
        let id = json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }]);

        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Register a book",
                        "tags": ["Books"],
                        "requestBody": payload,
                        "responses": {
                            "201": {
                                "description": "Registered book",
                                "content": { "application/json": { "schema": view } }
                            },
                            "400": error,
                            "404": error,
                            "422": error
                        }
                    }
                },
                "/filter": {
                    "get": {
                        "summary": "Filter books",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "title", "in": "query", "schema": { "type": "string" } },
                            { "name": "isbn", "in": "query", "schema": { "type": "string" } },
                            { "name": "author", "in": "query", "schema": { "type": "string" } },
                            { "name": "category", "in": "query", "schema": { "type": "string" } },
                            { "name": "page", "in": "query", "schema": { "type": "integer" } },
                            { "name": "page_size", "in": "query", "schema": { "type": "integer" } }
                        ],
                        "responses": {
                            "200": { "description": "Page of books, titles descending" },
                            "404": error
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": id,
                        "responses": {
                            "200": {
                                "description": "Book",
                                "content": { "application/json": { "schema": view } }
                            },
                            "404": error
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": id,
                        "requestBody": payload,
                        "responses": {
                            "204": { "description": "Updated" },
                            "400": error,
                            "404": error,
                            "422": error
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id,
                        "responses": { "204": { "description": "Deleted" }, "404": error }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "subtitle": { "type": "string" },
                            "synopsis": { "type": "string" },
                            "isbn": { "type": "string", "description": "Digits only, at most 13" },
                            "stock": { "type": "integer", "minimum": 0 },
                            "author": { "$ref": "#/components/schemas/Author" },
                            "category": { "$ref": "#/components/schemas/Category" }
                        },
                        "required": ["id", "title", "subtitle", "synopsis", "isbn", "stock", "author", "category"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 5, "maxLength": 150 },
                            "subtitle": { "type": "string", "minLength": 5, "maxLength": 250 },
                            "synopsis": { "type": "string", "minLength": 5, "maxLength": 250 },
                            "isbn": { "type": "string" },
                            "stock": { "type": "integer" },
                            "author_id": { "type": "integer" },
                            "category_id": { "type": "integer" }
                        },
                        "required": ["title", "subtitle", "synopsis", "isbn", "stock", "author_id", "category_id"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE book SCHEMAFULL;
                DEFINE FIELD title    ON book TYPE string ASSERT string::len($value) >= 5;
                DEFINE FIELD subtitle ON book TYPE string;
                DEFINE FIELD synopsis ON book TYPE string;
                DEFINE FIELD isbn     ON book TYPE string ASSERT $value = /^[0-9]{1,13}$/;
                DEFINE FIELD stock    ON book TYPE int ASSERT $value >= 0;
                DEFINE FIELD author   ON book TYPE record<author>;
                DEFINE FIELD category ON book TYPE record<category>;
                DEFINE INDEX book_title_unique ON book FIELDS title UNIQUE;
                DEFINE INDEX book_isbn_unique  ON book FIELDS isbn UNIQUE;
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

pub fn create_module(stores: &Stores, pagination: PaginationSettings) -> Arc<dyn Module> {
    let service = BookService::new(
        stores.books.clone(),
        stores.authors.clone(),
        stores.categories.clone(),
    );
    Arc::new(BooksModule::new(service, pagination))
}
