//! Ordered module registry.

use std::sync::Arc;

use anyhow::Context;

use crate::module::{InitCtx, Module};

/// Holds the application's modules in registration order.
///
/// Startup hooks run front to back; shutdown runs back to front, so later
/// modules can rely on earlier ones for their whole lifetime.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: Arc<dyn Module>) {
        tracing::debug!(module = module.name(), "module registered");
        self.modules.push(module);
    }

    /// Registered modules, in order.
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Look a module up by name.
    pub fn find(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Run every module's `init` hook in registration order.
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.modules {
            module
                .init(ctx)
                .await
                .with_context(|| format!("module '{}' failed to initialize", module.name()))?;
            tracing::info!(module = module.name(), "module initialized");
        }
        Ok(())
    }

    /// Run every module's `start` hook in registration order.
    pub async fn start_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.modules {
            module
                .start(ctx)
                .await
                .with_context(|| format!("module '{}' failed to start", module.name()))?;
            tracing::info!(module = module.name(), "module started");
        }
        Ok(())
    }

    /// Run every module's `stop` hook in reverse registration order.
    pub async fn stop_all(&self) -> anyhow::Result<()> {
        for module in self.modules.iter().rev() {
            module
                .stop()
                .await
                .with_context(|| format!("module '{}' failed to stop", module.name()))?;
            tracing::info!(module = module.name(), "module stopped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::settings::Settings;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Module for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("init {}", self.name));
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("stop {}", self.name));
            Ok(())
        }
    }

    #[test]
    fn find_resolves_registered_names() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Recorder {
            name: "alpha",
            log: Arc::clone(&log),
        }));

        assert!(registry.find("alpha").is_some());
        assert!(registry.find("beta").is_none());
        assert_eq!(registry.modules().len(), 1);
    }

    #[tokio::test]
    async fn init_runs_forward_and_stop_runs_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        for name in ["first", "second"] {
            registry.register(Arc::new(Recorder {
                name,
                log: Arc::clone(&log),
            }));
        }

        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };
        registry.init_all(&ctx).await.unwrap();
        registry.start_all(&ctx).await.unwrap();
        registry.stop_all().await.unwrap();

        let order = log.lock().unwrap().clone();
        assert_eq!(
            order,
            vec!["init first", "init second", "stop second", "stop first"]
        );
    }
}
