mod modules;

use anyhow::Context;
use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load FOLIO settings")?;

    folio_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        page_size = settings.catalog.page_size,
        "folio-app bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    folio_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;

    Ok(())
}
