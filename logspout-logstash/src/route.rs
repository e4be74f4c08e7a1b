/// Route describing one log destination
use crate::error::{AdapterError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Route option that selects a transport when the adapter string has no
/// `+transport` suffix.
pub const TRANSPORT_OPTION: &str = "transport";

/// A configured destination: which adapter handles it, where it sends, and
/// any adapter-specific options.
///
/// The adapter string may carry a transport suffix, e.g. `logstash+udp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub adapter: String,
    pub address: String,
    pub options: BTreeMap<String, String>,
}

impl Route {
    pub fn new(adapter: impl Into<String>, address: impl Into<String>) -> Self {
        Route {
            id: String::new(),
            adapter: adapter.into(),
            address: address.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Parse a route URI of the form `adapter[+transport]://address[?key=value&...]`.
    ///
    /// Query values are taken verbatim; no percent-decoding is applied.
    pub fn parse(uri: &str) -> Result<Self> {
        let (adapter, rest) = uri
            .split_once("://")
            .ok_or_else(|| AdapterError::InvalidRoute(format!("missing '://' in {uri:?}")))?;

        if adapter.is_empty() {
            return Err(AdapterError::InvalidRoute(format!(
                "missing adapter in {uri:?}"
            )));
        }

        let (address, query) = match rest.split_once('?') {
            Some((address, query)) => (address, Some(query)),
            None => (rest, None),
        };

        if address.is_empty() {
            return Err(AdapterError::InvalidRoute(format!(
                "missing address in {uri:?}"
            )));
        }

        let mut route = Route::new(adapter, address);
        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            route.options.insert(key.to_string(), value.to_string());
        }

        Ok(route)
    }

    /// Adapter name without any transport suffix.
    pub fn adapter_type(&self) -> &str {
        self.adapter
            .split_once('+')
            .map_or(self.adapter.as_str(), |(kind, _)| kind)
    }

    /// Transport to dial for this route.
    ///
    /// The `+transport` segment of the adapter string wins, then the
    /// `transport` option, then `default`. Segments after the second `+`
    /// are ignored.
    pub fn adapter_transport<'a>(&'a self, default: &'a str) -> &'a str {
        if let Some(transport) = self.adapter.split('+').nth(1) {
            return transport;
        }
        self.options
            .get(TRANSPORT_OPTION)
            .map_or(default, String::as_str)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.adapter, self.address)?;
        let mut sep = '?';
        for (key, value) in &self.options {
            write!(f, "{sep}{key}={value}")?;
            sep = '&';
        }
        Ok(())
    }
}
