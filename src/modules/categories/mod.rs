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
use service::CategoryService;

pub struct CategoriesModule {
    service: Arc<CategoryService>,
    pagination: PaginationSettings,
}

impl CategoriesModule {
    pub fn new(service: CategoryService, pagination: PaginationSettings) -> Self {
        Self {
            service: Arc::new(service),
            pagination,
        }
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn routes(&self) -> Router {
        routes::router(ApiState::new(self.service.clone(), self.pagination))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let category = json!({ "$ref": "#/components/schemas/Category" });
        let payload = json!({
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/CategoryPayload" } } }
        });
        let id = json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List categories",
                        "tags": ["Categories"],
                        "parameters": [
                            { "name": "page", "in": "query", "schema": { "type": "integer" } },
                            { "name": "page_size", "in": "query", "schema": { "type": "integer" } }
                        ],
                        "responses": { "200": { "description": "Page of categories" }, "404": error }
                    },
                    "post": {
                        "summary": "Create a category",
                        "tags": ["Categories"],
                        "requestBody": payload,
                        "responses": {
                            "201": { "description": "Created", "content": { "application/json": { "schema": category } } },
                            "422": error
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a category",
                        "tags": ["Categories"],
                        "parameters": id,
                        "responses": {
                            "200": { "description": "Category", "content": { "application/json": { "schema": category } } },
                            "404": error
                        }
                    },
                    "put": {
                        "summary": "Replace a category",
                        "tags": ["Categories"],
                        "parameters": id,
                        "requestBody": payload,
                        "responses": { "204": { "description": "Updated" }, "404": error, "422": error }
                    },
                    "delete": {
                        "summary": "Delete a category with no books",
                        "tags": ["Categories"],
                        "parameters": id,
                        "responses": { "204": { "description": "Deleted" }, "400": error, "404": error }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Categories health check",
                        "tags": ["Categories"],
                        "responses": { "200": { "description": "OK" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "description": { "type": "string" }
                        },
                        "required": ["id", "description"]
                    },
                    "CategoryPayload": {
                        "type": "object",
                        "properties": {
                            "description": { "type": "string", "minLength": 5, "maxLength": 150 }
                        },
                        "required": ["description"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE category SCHEMAFULL;
                DEFINE FIELD description ON category TYPE string ASSERT string::len($value) >= 5;
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "categories module started");
        Ok(())
    }
}

pub fn create_module(stores: &Stores, pagination: PaginationSettings) -> Arc<dyn Module> {
    let service = CategoryService::new(stores.categories.clone(), stores.books.clone());
    Arc::new(CategoriesModule::new(service, pagination))
}
