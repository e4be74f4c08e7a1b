/// Adapter registry: maps adapter names to their constructors
use crate::adapter::LogAdapter;
use crate::error::{AdapterError, Result};
use crate::route::Route;
use crate::transport::TransportRegistry;
use std::collections::BTreeMap;

/// Builds an adapter for a route, dialing through the given transports.
pub type AdapterFactory = fn(&Route, &TransportRegistry) -> Result<Box<dyn LogAdapter>>;

/// Adapter constructors keyed by adapter name.
///
/// The host builds one of these at startup, lets each adapter module
/// register itself, then calls [`AdapterRegistry::build`] for every
/// configured route.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    factories: BTreeMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every adapter this crate provides
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::adapter::logstash::register(&mut registry);
        registry
    }

    /// Register a factory, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, factory: AdapterFactory) -> &mut Self {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::warn!("Adapter factory {name} registered twice, keeping the latest");
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Option<AdapterFactory> {
        self.factories.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct the adapter named by the route's adapter type.
    pub fn build(
        &self,
        route: &Route,
        transports: &TransportRegistry,
    ) -> Result<Box<dyn LogAdapter>> {
        let factory = self
            .lookup(route.adapter_type())
            .ok_or_else(|| AdapterError::UnknownAdapter(route.adapter_type().to_string()))?;
        factory(route, transports)
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::LogRecord;
    use std::sync::mpsc::Receiver;

    struct NullAdapter;

    impl LogAdapter for NullAdapter {
        fn name(&self) -> &str {
            "null"
        }

        fn stream(&mut self, logstream: Receiver<LogRecord>) {
            for _ in logstream {}
        }
    }

    fn null_factory(_: &Route, _: &TransportRegistry) -> Result<Box<dyn LogAdapter>> {
        Ok(Box::new(NullAdapter))
    }

    fn failing_factory(route: &Route, _: &TransportRegistry) -> Result<Box<dyn LogAdapter>> {
        Err(AdapterError::InvalidRoute(route.to_string()))
    }

    #[test]
    fn test_defaults_register_logstash() {
        let registry = AdapterRegistry::with_defaults();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["logstash"]);
    }

    #[test]
    fn test_build_dispatches_on_adapter_type() {
        let mut registry = AdapterRegistry::new();
        registry.register("null", null_factory);

        let route = Route::new("null+udp", "nowhere:1");
        let adapter = registry.build(&route, &TransportRegistry::new());
        assert_eq!(
            adapter.ok().map(|a| a.name().to_string()),
            Some("null".to_string())
        );
    }

    #[test]
    fn test_build_unknown_adapter() {
        let registry = AdapterRegistry::with_defaults();
        let route = Route::new("syslog+tcp", "x:1");

        let result = registry.build(&route, &TransportRegistry::with_defaults());
        assert!(matches!(result, Err(AdapterError::UnknownAdapter(name)) if name == "syslog"));
    }

    #[test]
    fn test_build_propagates_factory_error() {
        let mut registry = AdapterRegistry::new();
        registry.register("broken", failing_factory);

        let result = registry.build(&Route::new("broken", "x:1"), &TransportRegistry::new());
        assert!(matches!(result, Err(AdapterError::InvalidRoute(_))));
    }

    #[test]
    fn test_build_logstash_without_transport() {
        let registry = AdapterRegistry::with_defaults();
        let route = Route::new("logstash", "x:1");

        let result = registry.build(&route, &TransportRegistry::new());
        assert!(matches!(result, Err(AdapterError::TransportNotFound { .. })));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = AdapterRegistry::new();
        registry
            .register("a", failing_factory)
            .register("a", null_factory);

        assert_eq!(registry.names().count(), 1);
        assert!(registry
            .build(&Route::new("a", "x:1"), &TransportRegistry::new())
            .is_ok());
    }
}
