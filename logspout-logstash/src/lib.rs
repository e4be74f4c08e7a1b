#![forbid(unsafe_code)]

pub mod adapter;
mod error;
pub mod message;
pub mod route;
pub mod transport;

pub use crate::error::{AdapterError, Result};

///
/// Expose all structures a routing host needs to build and drive adapters
///
/// ```
/// use logspout_logstash::prelude::*;
/// ```
pub mod prelude {
    pub use crate::adapter::{AdapterFactory, AdapterRegistry, LogAdapter, LogstashAdapter};
    pub use crate::message::{Container, ContainerConfig, DockerInfo, LogRecord};
    pub use crate::route::Route;
    pub use crate::transport::{Connection, Transport, TransportRegistry};
    pub use crate::{AdapterError, Result};
}
