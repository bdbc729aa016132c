//! Axum server facade for FOLIO: middleware, error rendering, and the merged
//! OpenAPI surface.

use anyhow::Context;
use axum::routing::get;
use axum::Router;

use folio_kernel::settings::Settings;
use folio_kernel::ModuleRegistry;

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Bind the configured address and serve the assembled router until the
/// process exits.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}

/// Assemble the application router: global middleware, a `/healthz` probe,
/// each module nested under `/api/{name}`, and the OpenAPI document.
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut builder = RouterBuilder::new()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(module = module.name(), "mounting /api/{}", module.name());
        builder = builder.mount_module(module.name(), module.routes());
    }

    builder.with_openapi(registry).build()
}

async fn health_check() -> &'static str {
    "ok"
}
