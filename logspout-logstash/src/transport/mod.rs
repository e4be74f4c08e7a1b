//! Transport module for outbound connections
//!
//! Adapters never open sockets themselves. They look a transport up by name
//! in a [`TransportRegistry`] and ask it to dial the route's address.
//!
//! - `tcp`: [`TcpTransport`], the default for the logstash adapter
//! - `udp`: [`UdpTransport`], one datagram per message

pub mod tcp;
pub mod transport_kind;
pub mod udp;

pub use tcp::TcpTransport;
pub use transport_kind::TransportKind;
pub use udp::{UdpConnection, UdpTransport};

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

/// An established outbound byte stream.
pub trait Connection: Write + Send {}

impl<T: Write + Send> Connection for T {}

/// Something that can open a [`Connection`] to an address.
///
/// Implementations may read transport-specific settings from the route
/// options passed to [`Transport::dial`].
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn dial(
        &self,
        address: &str,
        options: &BTreeMap<String, String>,
    ) -> io::Result<Box<dyn Connection>>;
}

/// Transports available to adapters, keyed by name.
#[derive(Default, Clone)]
pub struct TransportRegistry {
    transports: BTreeMap<String, Arc<dyn Transport>>,
}

impl TransportRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in transport
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TransportKind::Tcp.to_string(), TcpTransport);
        registry.register(TransportKind::Udp.to_string(), UdpTransport);
        registry
    }

    /// Register a transport, replacing any previous one with the same name
    pub fn register<T: Transport + 'static>(
        &mut self,
        name: impl Into<String>,
        transport: T,
    ) -> &mut Self {
        self.transports.insert(name.into(), Arc::new(transport));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Transport>> {
        self.transports.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transports.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("transports", &self.transports.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_conn() -> io::Result<Box<dyn Connection>> {
        Ok(Box::new(Vec::<u8>::new()))
    }

    #[test]
    fn test_empty_registry() {
        let registry = TransportRegistry::new();
        assert!(registry.lookup("tcp").is_none());
        assert_eq!(registry.names().count(), 0);
    }

    #[test]
    fn test_defaults_contain_builtin_transports() {
        let registry = TransportRegistry::with_defaults();
        assert!(registry.lookup("tcp").is_some());
        assert!(registry.lookup("udp").is_some());
        assert!(registry.lookup("tls").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["tcp", "udp"]);
    }

    #[test]
    fn test_register_custom_transport() {
        let mut mock = MockTransport::new();
        mock.expect_dial()
            .times(1)
            .returning(|_, _| memory_conn());

        let mut registry = TransportRegistry::new();
        registry.register("memory", mock);

        let transport = registry.lookup("memory");
        assert!(transport.is_some());

        let conn = transport.map(|t| t.dial("anywhere", &BTreeMap::new()));
        assert!(matches!(conn, Some(Ok(_))));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut failing = MockTransport::new();
        failing
            .expect_dial()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")));

        let mut registry = TransportRegistry::with_defaults();
        registry.register("tcp", failing);

        let result = registry
            .lookup("tcp")
            .map(|t| t.dial("127.0.0.1:1", &BTreeMap::new()));
        assert!(matches!(result, Some(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused));
    }
}
