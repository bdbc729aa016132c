//! Router assembly: middleware layers, module mounting, and the merged
//! OpenAPI document.

use std::time::Duration;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use uuid::{Timestamp, Uuid};

use folio_kernel::ModuleRegistry;

/// Stamps each request with a sortable UUIDv7 `x-request-id`.
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let header = id.to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(header))
    }
}

/// Incremental assembly of the application router.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route(mut self, path: &str, handler: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, handler);
        self
    }

    /// Nest a module router under its `/api/{name}` mount point.
    pub fn mount_module(mut self, name: &str, routes: Router) -> Self {
        self.router = self.router.nest(&format!("/api/{name}"), routes);
        self
    }

    pub fn with_tracing(mut self) -> Self {
        let layer = TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().include_headers(true))
            .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO));
        self.router = self.router.layer(layer);
        self
    }

    pub fn with_cors(mut self) -> Self {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        self.router = self.router.layer(cors);
        self
    }

    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Merge every module's OpenAPI fragment and expose the document through
    /// Swagger UI and `/docs/openapi.json`.
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let spec = assemble_openapi(registry);

        let document: utoipa::openapi::OpenApi =
            serde_json::from_value(spec.clone()).unwrap_or_else(|_| fallback_openapi());

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", document),
        );
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(spec.clone()) }),
        );
        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Base document plus each module's paths (prefixed with the module mount
/// point) and schemas.
fn assemble_openapi(registry: &ModuleRegistry) -> Value {
    let mut spec = base_openapi();

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let mounted = format!("/api/{}{}", module.name(), path);
                spec["paths"][mounted] = item.clone();
            }
        }

        let schemas = fragment
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object);
        if let Some(schemas) = schemas {
            for (name, schema) in schemas {
                spec["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    spec
}

fn base_openapi() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "FOLIO API",
            "version": "1.0.0",
            "description": "Book catalog browsing and personal shelf API"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": {
                                    "schema": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" },
                                "details": {
                                    "type": "array",
                                    "items": {}
                                },
                                "trace_id": { "type": "string" },
                                "timestamp": { "type": "string" }
                            },
                            "required": ["code", "message", "trace_id", "timestamp"]
                        }
                    },
                    "required": ["error"]
                }
            }
        }
    })
}

fn fallback_openapi() -> utoipa::openapi::OpenApi {
    utoipa::openapi::OpenApiBuilder::new()
        .info(
            utoipa::openapi::InfoBuilder::new()
                .title("FOLIO API")
                .version("1.0.0")
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use folio_kernel::Module;

    struct DocModule;

    #[async_trait::async_trait]
    impl Module for DocModule {
        fn name(&self) -> &'static str {
            "demo"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": {
                    "/": {
                        "get": { "summary": "Demo root" }
                    }
                },
                "components": {
                    "schemas": {
                        "Demo": { "type": "object" }
                    }
                }
            }))
        }
    }

    #[test]
    fn module_paths_are_prefixed_with_their_mount_point() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(DocModule));

        let spec = assemble_openapi(&registry);

        assert!(spec["paths"].get("/api/demo/").is_some());
        assert!(spec["paths"].get("/healthz").is_some());
        assert!(spec["components"]["schemas"].get("Demo").is_some());
        assert!(spec["components"]["schemas"].get("ErrorResponse").is_some());
    }

    #[tokio::test]
    async fn builder_composes_layers_routes_and_docs() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(DocModule));

        let _router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .route("/healthz", get(|| async { "ok" }))
            .mount_module("demo", Router::new().route("/", get(|| async { "demo" })))
            .with_openapi(&registry)
            .build();
    }
}
