pub mod catalog;
pub mod shelf;

use folio_kernel::settings::Settings;
use folio_kernel::ModuleRegistry;

/// Register all FOLIO modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(catalog::create_module(settings));
    registry.register(shelf::create_module());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_modules_are_registered() {
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();

        register_all(&mut registry, &settings);

        assert_eq!(registry.modules().len(), 2);
        assert!(registry.find("catalog").is_some());
        assert!(registry.find("shelf").is_some());
    }
}
