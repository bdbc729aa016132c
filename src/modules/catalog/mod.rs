pub mod models;
pub mod provider;
pub mod view;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, Module};
use serde::{Deserialize, Serialize};
use serde_json::json;

use models::{Book, FilterField, QueryState, SortKey};
use provider::{CatalogProvider, SeedCatalog};
use view::compute_view;

/// Catalog browsing module: a pure view computation over provider snapshots.
pub struct CatalogModule {
    provider: Arc<dyn CatalogProvider>,
    page_size: usize,
}

impl CatalogModule {
    pub fn new(provider: Arc<dyn CatalogProvider>, page_size: usize) -> Self {
        Self {
            provider,
            page_size,
        }
    }
}

/// Shared state for the catalog routes.
#[derive(Clone)]
struct CatalogState {
    provider: Arc<dyn CatalogProvider>,
    page_size: usize,
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            page_size = self.page_size,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let state = CatalogState {
            provider: Arc::clone(&self.provider),
            page_size: self.page_size,
        };
        Router::new()
            .route("/", get(browse_catalog))
            .route("/health", get(health_check))
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Browse the catalog",
                        "description": "Search, filter, sort, and paginate the catalog snapshot",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "search",
                                "in": "query",
                                "schema": { "type": "string" },
                                "description": "Case-insensitive substring matched against titles"
                            },
                            {
                                "name": "filter_field",
                                "in": "query",
                                "schema": {
                                    "type": "string",
                                    "enum": ["all", "title", "author", "country", "language", "year"]
                                },
                                "description": "Field the filter value applies to"
                            },
                            {
                                "name": "filter_value",
                                "in": "query",
                                "schema": { "type": "string" },
                                "description": "Case-insensitive substring matched against the filter field"
                            },
                            {
                                "name": "sort",
                                "in": "query",
                                "schema": { "type": "string", "enum": ["title", "author"] },
                                "description": "Sort key for the result"
                            },
                            {
                                "name": "page",
                                "in": "query",
                                "schema": { "type": "integer", "minimum": 1 },
                                "description": "1-indexed page number"
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of the catalog view",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BrowsePage"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed query parameters",
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
                "/health": {
                    "get": {
                        "summary": "Catalog health check",
                        "tags": ["Catalog"],
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
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Unique identifier for the book"
                            },
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
                        "required": ["id", "title", "author", "description", "country", "language", "year"]
                    },
                    "BrowsePage": {
                        "type": "object",
                        "properties": {
                            "page": {
                                "type": "integer",
                                "description": "1-indexed page number of this slice"
                            },
                            "total_pages": {
                                "type": "integer",
                                "description": "Total page count for the current query"
                            },
                            "items": {
                                "type": "array",
                                "items": {
                                    "$ref": "#/components/schemas/Book"
                                }
                            }
                        },
                        "required": ["page", "total_pages", "items"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// Query parameters accepted by the browse endpoint.
#[derive(Debug, Default, Deserialize)]
struct BrowseParams {
    #[serde(default)]
    search: String,
    #[serde(default)]
    filter_field: FilterField,
    #[serde(default)]
    filter_value: String,
    #[serde(default)]
    sort: SortKey,
    #[serde(default = "BrowseParams::default_page")]
    page: usize,
}

impl BrowseParams {
    fn default_page() -> usize {
        1
    }
}

/// One page of the catalog view as served over HTTP.
#[derive(Debug, Serialize)]
struct BrowsePage {
    page: usize,
    total_pages: usize,
    items: Vec<Book>,
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "catalog module is healthy"
}

/// Browse endpoint: fetch a snapshot, then search, filter, sort, and paginate it.
///
/// A provider failure degrades to an empty catalog rather than an error.
async fn browse_catalog(
    State(state): State<CatalogState>,
    Query(params): Query<BrowseParams>,
) -> Json<BrowsePage> {
    let search = (!params.search.is_empty()).then_some(params.search.as_str());
    let catalog = match state.provider.fetch(search).await {
        Ok(books) => books,
        Err(error) => {
            tracing::warn!(
                module = "catalog",
                %error,
                "catalog fetch failed; serving empty catalog"
            );
            Vec::new()
        }
    };

    let query = QueryState {
        search_text: params.search,
        filter_field: params.filter_field,
        filter_value: params.filter_value,
        sort_key: params.sort,
        page: params.page.max(1),
        page_size: state.page_size,
    };
    let page = compute_view(&catalog, &query);

    Json(BrowsePage {
        page: query.page,
        total_pages: page.total_pages,
        items: page.page_items,
    })
}

/// Create a new instance of the catalog module over the seed provider
pub fn create_module(settings: &Settings) -> Arc<dyn Module> {
    Arc::new(CatalogModule::new(
        Arc::new(SeedCatalog::new()),
        settings.catalog.page_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl CatalogProvider for FailingProvider {
        async fn fetch(&self, _search: Option<&str>) -> anyhow::Result<Vec<Book>> {
            Err(anyhow::anyhow!("catalog source unreachable"))
        }
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_an_empty_catalog() {
        let state = CatalogState {
            provider: Arc::new(FailingProvider),
            page_size: 3,
        };

        let Json(response) = browse_catalog(State(state), Query(BrowseParams::default())).await;

        assert!(response.items.is_empty());
        assert_eq!(response.total_pages, 1);
    }

    #[tokio::test]
    async fn browse_serves_the_first_seed_page_by_default() {
        let state = CatalogState {
            provider: Arc::new(SeedCatalog::new()),
            page_size: 3,
        };
        let params = BrowseParams {
            page: 1,
            ..BrowseParams::default()
        };

        let Json(response) = browse_catalog(State(state), Query(params)).await;

        assert_eq!(response.page, 1);
        assert_eq!(response.total_pages, 4);
        assert_eq!(response.items.len(), 3);
        assert_eq!(response.items[0].title, "1984");
    }
}
