mod _traits;
pub mod logstash;
mod registry;

// Re-exporting all public structures
pub use _traits::log_adapter::LogAdapter;

pub use registry::{AdapterFactory, AdapterRegistry};

pub use logstash::LogstashAdapter;
