use std::sync::Arc;

use log::debug;

use crate::command::Module;

/// Central collection of every module known to the shell.
///
/// The registry is populated once during startup and never mutated again, so
/// readers share it behind an [`Arc`] without locking. Module names are
/// compared case-insensitively; registering a second module under an existing
/// name is silently ignored, the first registration wins.
///
/// Modules are kept in registration order and resolved in that order, which
/// gives a deterministic winner when two modules expose the same command
/// keyword: the module registered earlier. Callers must not otherwise rely on
/// the ordering.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module unless one with the same name is already present.
    pub fn register(&mut self, module: Arc<dyn Module>) {
        if self.get_by_name(module.name()).is_some() {
            debug!("module {:?} already registered, ignoring", module.name());
            return;
        }
        self.modules.push(module);
    }

    /// Case-insensitive lookup by module name.
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules
            .iter()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }

    /// All registered modules, in registration order.
    pub fn get_all(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandHandler;

    struct EmptyModule {
        name: &'static str,
        description: &'static str,
    }

    impl Module for EmptyModule {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn commands(&self) -> Vec<Arc<dyn CommandHandler>> {
            Vec::new()
        }
    }

    fn module(name: &'static str, description: &'static str) -> Arc<dyn Module> {
        Arc::new(EmptyModule { name, description })
    }

    #[test]
    fn duplicate_name_keeps_first_registration() {
        let mut registry = ModuleRegistry::new();
        registry.register(module("Tools", "first"));
        registry.register(module("tools", "second"));

        assert_eq!(registry.get_all().len(), 1);
        let found = registry.get_by_name("TOOLS").expect("module registered");
        assert_eq!(found.description(), "first");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = ModuleRegistry::new();
        registry.register(module("Greeter", "greets"));

        assert!(registry.get_by_name("greeter").is_some());
        assert!(registry.get_by_name("GREETER").is_some());
    }

    #[test]
    fn missing_module_is_absent() {
        let registry = ModuleRegistry::new();
        assert!(registry.get_by_name("anything").is_none());
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = ModuleRegistry::new();
        registry.register(module("beta", ""));
        registry.register(module("alpha", ""));

        let names: Vec<&str> = registry.get_all().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["beta", "alpha"]);
    }
}
