//! Module lifecycle contract.

use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Shared context handed to every lifecycle hook.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// A self-contained application module.
///
/// The registry drives each module through init, start, and stop; routers
/// and OpenAPI fragments are collected up front when the HTTP surface is
/// assembled.
#[async_trait]
pub trait Module: Send + Sync {
    /// Stable identifier, also the mount point (`/api/{name}`).
    fn name(&self) -> &'static str;

    /// Router serving this module's endpoints. Empty for modules without an
    /// HTTP surface.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment describing `routes()`, merged into the application
    /// document. Paths are relative to the module mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// One-time setup, run before any module starts.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Launch background work once every module has initialized.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Release resources during shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
