pub mod store;

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use folio_http::error::AppError;
use folio_kernel::{InitCtx, Module};
use serde_json::json;

use crate::modules::catalog::models::{Book, BookFields};
use store::{Shelf, ShelfError};

/// Personal shelf module: id-keyed CRUD over the user's own book list.
pub struct ShelfModule {
    shelf: Arc<Mutex<Shelf>>,
}

impl ShelfModule {
    pub fn new() -> Self {
        Self {
            shelf: Arc::new(Mutex::new(Shelf::new())),
        }
    }
}

impl Default for ShelfModule {
    fn default() -> Self {
        Self::new()
    }
}

type ShelfState = Arc<Mutex<Shelf>>;

impl From<ShelfError> for AppError {
    fn from(error: ShelfError) -> Self {
        match error {
            ShelfError::AlreadyExists(id) => AppError::conflict(
                vec![json!({"field": "id", "value": id})],
                error.to_string(),
            ),
            ShelfError::NotFound(_) => AppError::not_found(error.to_string()),
        }
    }
}

// Shelf mutations are serialized through a single mutex; a poisoned lock
// surfaces as an internal error instead of a panic.
fn lock_shelf(state: &ShelfState) -> Result<MutexGuard<'_, Shelf>, AppError> {
    state
        .lock()
        .map_err(|_| AppError::Internal(anyhow!("shelf lock poisoned")))
}

#[async_trait]
impl Module for ShelfModule {
    fn name(&self) -> &'static str {
        "shelf"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "shelf module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_shelf).post(add_book))
            .route("/{id}", put(edit_book).delete(delete_book))
            .route("/health", get(health_check))
            .with_state(Arc::clone(&self.shelf))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List the shelf",
                        "tags": ["Shelf"],
                        "responses": {
                            "200": {
                                "description": "Shelved books in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book to the shelf",
                        "tags": ["Shelf"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/Book"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book shelved"
                            },
                            "409": {
                                "description": "A book with this id is already shelved",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "put": {
                        "summary": "Edit a shelved book in place",
                        "tags": ["Shelf"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/BookFields"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "204": {
                                "description": "Book updated"
                            },
                            "404": {
                                "description": "No shelved book carries this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Remove a book from the shelf",
                        "description": "Removing an absent id is a no-op, not an error",
                        "tags": ["Shelf"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "204": {
                                "description": "Book removed (or was never shelved)"
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Shelf health check",
                        "tags": ["Shelf"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": {
                                            "type": "string"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookFields": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "description": {
                                "type": "string",
                                "description": "Short description of the book"
                            },
                            "country": {
                                "type": "string",
                                "description": "Country of origin"
                            },
                            "language": {
                                "type": "string",
                                "description": "Original publication language"
                            },
                            "year": {
                                "type": "integer",
                                "description": "Publication year; negative values denote BCE"
                            }
                        },
                        "required": ["title", "author", "description", "country", "language", "year"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "shelf module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "shelf module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "shelf module is healthy"
}

/// List the shelf in insertion order.
async fn list_shelf(State(state): State<ShelfState>) -> Result<Json<Vec<Book>>, AppError> {
    let shelf = lock_shelf(&state)?;
    Ok(Json(shelf.list()))
}

/// Add a book; a duplicate id is rejected with a conflict.
async fn add_book(
    State(state): State<ShelfState>,
    Json(book): Json<Book>,
) -> Result<StatusCode, AppError> {
    let mut shelf = lock_shelf(&state)?;
    shelf.add(book)?;
    Ok(StatusCode::CREATED)
}

/// Replace a shelved book's fields in place; the id never changes.
async fn edit_book(
    State(state): State<ShelfState>,
    Path(id): Path<u64>,
    Json(fields): Json<BookFields>,
) -> Result<StatusCode, AppError> {
    let mut shelf = lock_shelf(&state)?;
    shelf.edit(id, fields)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a book; deleting an absent id is a no-op.
async fn delete_book(
    State(state): State<ShelfState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut shelf = lock_shelf(&state)?;
    shelf.delete(id);
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the shelf module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(ShelfModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::provider::seed_books;

    fn shelf_state() -> ShelfState {
        Arc::new(Mutex::new(Shelf::new()))
    }

    #[tokio::test]
    async fn duplicate_add_maps_to_a_conflict() {
        let state = shelf_state();
        let book = seed_books()[0].clone();

        let created = add_book(State(Arc::clone(&state)), Json(book.clone()))
            .await
            .unwrap();
        assert_eq!(created, StatusCode::CREATED);

        let error = add_book(State(Arc::clone(&state)), Json(book))
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Conflict { .. }));

        let Json(books) = list_shelf(State(state)).await.unwrap();
        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn editing_a_missing_book_maps_to_not_found() {
        let state = shelf_state();
        let fields = BookFields {
            title: "New Title".to_string(),
            author: "Nobody".to_string(),
            description: String::new(),
            country: String::new(),
            language: String::new(),
            year: 2000,
        };

        let error = edit_book(State(state), Path(42), Json(fields))
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deleting_an_absent_book_succeeds() {
        let state = shelf_state();

        let status = delete_book(State(state), Path(42)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
