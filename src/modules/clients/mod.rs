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
use service::ClientService;

/// Clients of the store, identified by a CPF or CNPJ document.
pub struct ClientsModule {
    service: Arc<ClientService>,
    pagination: PaginationSettings,
}

impl ClientsModule {
    pub fn new(service: ClientService, pagination: PaginationSettings) -> Self {
        Self {
            service: Arc::new(service),
            pagination,
        }
    }
}

#[async_trait]
impl Module for ClientsModule {
    fn name(&self) -> &'static str {
        "clients"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "clients module initialized"
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
        let client = json!({ "$ref": "#/components/schemas/Client" });
        let payload = json!({
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ClientPayload" } } }
        });
        let id = json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List clients",
                        "tags": ["Clients"],
                        "responses": {
                            "200": {
                                "description": "Every client by identity",
                                "content": { "application/json": { "schema": { "type": "array", "items": client } } }
                            },
                            "404": error
                        }
                    },
                    "post": {
                        "summary": "Create a client",
                        "tags": ["Clients"],
                        "requestBody": payload,
                        "responses": {
                            "201": { "description": "Created", "content": { "application/json": { "schema": client } } },
                            "400": error,
                            "422": error
                        }
                    }
                },
                "/filter": {
                    "get": {
                        "summary": "Filter clients",
                        "tags": ["Clients"],
                        "parameters": [
                            { "name": "full_name", "in": "query", "schema": { "type": "string" } },
                            { "name": "document", "in": "query", "schema": { "type": "string" } },
                            { "name": "has_book", "in": "query", "schema": { "type": "boolean" } },
                            { "name": "document_type", "in": "query", "schema": { "type": "integer", "enum": [1, 2] } },
                            { "name": "page", "in": "query", "schema": { "type": "integer" } },
                            { "name": "page_size", "in": "query", "schema": { "type": "integer" } }
                        ],
                        "responses": { "200": { "description": "Page of clients, newest first" }, "404": error }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a client",
                        "tags": ["Clients"],
                        "parameters": id,
                        "responses": {
                            "200": { "description": "Client", "content": { "application/json": { "schema": client } } },
                            "404": error
                        }
                    },
                    "put": {
                        "summary": "Replace a client",
                        "tags": ["Clients"],
                        "parameters": id,
                        "requestBody": payload,
                        "responses": { "204": { "description": "Updated" }, "400": error, "404": error, "422": error }
                    },
                    "delete": {
                        "summary": "Delete a client",
                        "tags": ["Clients"],
                        "parameters": id,
                        "responses": { "204": { "description": "Deleted" }, "404": error }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Clients health check",
                        "tags": ["Clients"],
                        "responses": { "200": { "description": "OK" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Client": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "full_name": { "type": "string" },
                            "document": { "type": "string" },
                            "date_of_birth": { "type": "string", "description": "dd/MM/yyyy" },
                            "has_book": { "type": "boolean", "nullable": true },
                            "document_type": { "type": "string", "enum": ["CPF", "CNPJ"] }
                        },
                        "required": ["id", "full_name", "document", "date_of_birth", "document_type"]
                    },
                    "ClientPayload": {
                        "type": "object",
                        "properties": {
                            "full_name": { "type": "string", "minLength": 5, "maxLength": 250 },
                            "document": { "type": "string" },
                            "date_of_birth": { "type": "string", "description": "dd/MM/yyyy" },
                            "has_book": { "type": "boolean" },
                            "document_type": { "type": "integer", "description": "1 = CPF, 2 = CNPJ" }
                        },
                        "required": ["full_name", "document", "date_of_birth", "document_type"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE client SCHEMAFULL;
                DEFINE FIELD full_name     ON client TYPE string ASSERT string::len($value) >= 5;
                DEFINE FIELD document      ON client TYPE string ASSERT $value != "";
                DEFINE FIELD date_of_birth ON client TYPE datetime;
                DEFINE FIELD has_book      ON client TYPE option<bool>;
                DEFINE FIELD document_type ON client TYPE int ASSERT $value IN [1, 2];
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "clients module stopped");
        Ok(())
    }
}

pub fn create_module(stores: &Stores, pagination: PaginationSettings) -> Arc<dyn Module> {
    Arc::new(ClientsModule::new(
        ClientService::new(stores.clients.clone()),
        pagination,
    ))
}
