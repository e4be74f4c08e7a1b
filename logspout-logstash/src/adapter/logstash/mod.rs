//! Logstash adapter.
//!
//! Streams every record to a Logstash input as a JSON document. Lines that
//! already are JSON objects are forwarded with their own fields plus a
//! `docker` object; anything else is wrapped in a `message` field.
//!
//! # Example
//!
//! ```no_run
//! use logspout_logstash::prelude::*;
//! use std::sync::mpsc;
//! use std::thread;
//!
//! # fn main() -> Result<()> {
//! let route = Route::parse("logstash+tcp://logstash.local:5000")?;
//! let mut adapter = LogstashAdapter::new(&route, &TransportRegistry::with_defaults())?;
//!
//! let (tx, rx) = mpsc::channel();
//! let worker = thread::spawn(move || adapter.stream(rx));
//!
//! tx.send(LogRecord::new(Container::default(), "stdout", "hello world"))
//!     .ok();
//! drop(tx);
//! worker.join().ok();
//! # Ok(())
//! # }
//! ```
//!
//! Delivery is best effort: a record that cannot be encoded or written is
//! logged at debug level and dropped, and streaming continues with the next
//! one. Reconnecting is left to the host.

pub mod normalizer;

pub use normalizer::{normalize, Envelope, LogstashMessage, DOCKER_KEY};

use crate::adapter::{AdapterRegistry, LogAdapter};
use crate::error::{AdapterError, Result};
use crate::message::{DockerInfo, LogRecord};
use crate::route::Route;
use crate::transport::{Connection, TransportRegistry};
use std::io::Write;
use std::sync::mpsc::Receiver;

/// Name the adapter registers under.
pub const ADAPTER_NAME: &str = "logstash";

/// Transport used when the route does not name one.
pub const DEFAULT_TRANSPORT: &str = "tcp";

/// Adapter that streams JSON to Logstash over a single connection.
pub struct LogstashAdapter<W = Box<dyn Connection>> {
    conn: W,
    route: Route,
}

impl LogstashAdapter {
    /// Dial the route's address with the transport it names (TCP by default).
    ///
    /// # Errors
    /// [`AdapterError::TransportNotFound`] if the transport is not registered,
    /// [`AdapterError::Connect`] if dialing fails.
    pub fn new(route: &Route, transports: &TransportRegistry) -> Result<Self> {
        let transport_name = route.adapter_transport(DEFAULT_TRANSPORT);
        let transport = transports.lookup(transport_name).ok_or_else(|| {
            AdapterError::TransportNotFound {
                adapter: route.adapter.clone(),
            }
        })?;

        let conn = transport
            .dial(&route.address, &route.options)
            .map_err(AdapterError::Connect)?;

        log::info!(
            "Logstash adapter connected to {} over {transport_name}",
            route.address
        );
        Ok(Self::with_connection(route.clone(), conn))
    }
}

impl<W: Write + Send> LogstashAdapter<W> {
    /// Create an adapter around an already established connection.
    pub fn with_connection(route: Route, conn: W) -> Self {
        Self { conn, route }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Consume the adapter and hand back its connection.
    pub fn into_inner(self) -> W {
        self.conn
    }

    /// Forward records in order until the sequence ends.
    ///
    /// Failures are logged and the failing record is dropped.
    pub fn forward<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = LogRecord>,
    {
        for record in records {
            if let Err(e) = self.forward_one(&record) {
                log::debug!("Dropping message from {}: {e}", record.container.name);
            }
        }
    }

    /// Encode one record and write it to the connection in a single write.
    pub fn forward_one(&mut self, record: &LogRecord) -> Result<()> {
        let docker = DockerInfo::from(&record.container);
        log::debug!("Received message: {}", record.data);

        let js = normalize(&record.data, &docker)?;

        log::debug!("Ready to write {} bytes", js.len());
        self.conn.write_all(&js).map_err(AdapterError::Write)
    }
}

impl<W: Write + Send> LogAdapter for LogstashAdapter<W> {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn stream(&mut self, logstream: Receiver<LogRecord>) {
        self.forward(logstream);
        log::debug!("Log stream for {} closed", self.route);
    }
}

/// Constructor registered in the [`AdapterRegistry`].
pub fn factory(route: &Route, transports: &TransportRegistry) -> Result<Box<dyn LogAdapter>> {
    Ok(Box::new(LogstashAdapter::new(route, transports)?))
}

/// Register the logstash adapter under [`ADAPTER_NAME`].
pub fn register(registry: &mut AdapterRegistry) {
    registry.register(ADAPTER_NAME, factory);
}
