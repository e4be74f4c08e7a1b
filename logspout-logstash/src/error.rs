use thiserror::Error;

/// Errors raised while building or driving an adapter.
///
/// `TransportNotFound`, `Connect`, `UnknownAdapter` and `InvalidRoute` are
/// construction-time errors and are handed back to the host. `Serialize` and
/// `Write` only ever concern a single record; the forwarder logs them and
/// moves on to the next one.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unable to find adapter: {adapter}")]
    TransportNotFound { adapter: String },

    #[error("failed to connect: {0}")]
    Connect(#[source] std::io::Error),

    #[error("failed to encode message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write message: {0}")]
    Write(#[source] std::io::Error),

    #[error("no adapter registered under name: {0}")]
    UnknownAdapter(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_not_found_message() {
        let err = AdapterError::TransportNotFound {
            adapter: "logstash+carrier-pigeon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unable to find adapter: logstash+carrier-pigeon"
        );
    }

    #[test]
    fn test_serialize_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").err();
        assert!(json_err.is_some());

        let err: Option<AdapterError> = json_err.map(AdapterError::from);
        assert!(matches!(err, Some(AdapterError::Serialize(_))));
    }

    #[test]
    fn test_io_errors_keep_source() {
        use std::error::Error as _;

        let err = AdapterError::Write(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "peer went away",
        ));
        assert_eq!(err.to_string(), "failed to write message: peer went away");
        assert!(err.source().is_some());
    }
}
