//! Records handed to adapters by the routing host.
//!
//! A [`LogRecord`] is one line a container wrote to one of its output
//! streams, together with the [`Container`] it came from. Adapters only read
//! records; the host owns them until they are sent down an adapter's channel.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Container configuration fields the adapters care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Image reference the container was started from
    pub image: String,
    /// Hostname configured inside the container
    pub hostname: String,
}

/// Identity of the container a record was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub config: ContainerConfig,
}

/// One log line as delivered by the host.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub container: Container,
    /// Stream the line was read from (`stdout` or `stderr`)
    pub source: String,
    /// Raw line, without its trailing newline
    pub data: String,
    pub time: SystemTime,
}

impl LogRecord {
    pub fn new(container: Container, source: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            container,
            source: source.into(),
            data: data.into(),
            time: SystemTime::now(),
        }
    }
}

/// Container metadata attached under the `docker` key of every message sent
/// to Logstash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerInfo {
    pub name: String,
    pub id: String,
    pub image: String,
    pub hostname: String,
}

impl From<&Container> for DockerInfo {
    fn from(container: &Container) -> Self {
        DockerInfo {
            name: container.name.clone(),
            id: container.id.clone(),
            image: container.config.image.clone(),
            hostname: container.config.hostname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_container() -> Container {
        Container {
            id: "abc123".to_string(),
            name: "web".to_string(),
            config: ContainerConfig {
                image: "nginx".to_string(),
                hostname: "host1".to_string(),
            },
        }
    }

    #[test]
    fn test_docker_info_from_container() {
        let info = DockerInfo::from(&web_container());

        assert_eq!(info.name, "web");
        assert_eq!(info.id, "abc123");
        assert_eq!(info.image, "nginx");
        assert_eq!(info.hostname, "host1");
    }

    #[test]
    fn test_docker_info_serializes_four_fields() {
        let info = DockerInfo::from(&web_container());
        let value = serde_json::to_value(&info).ok();

        let obj = value.as_ref().and_then(|v| v.as_object());
        assert!(obj.is_some(), "docker info should serialize to an object");
        assert_eq!(obj.map(|o| o.len()), Some(4));
        assert_eq!(
            obj.and_then(|o| o.get("image")).and_then(|v| v.as_str()),
            Some("nginx")
        );
    }

    #[test]
    fn test_log_record_new() {
        let record = LogRecord::new(web_container(), "stdout", "hello world");

        assert_eq!(record.source, "stdout");
        assert_eq!(record.data, "hello world");
        assert_eq!(record.container.name, "web");
    }
}
