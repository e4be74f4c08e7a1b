use strum_macros::{EnumString, VariantNames};

/// Transports that ship with the crate.
#[derive(EnumString, VariantNames, Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum TransportKind {
    Tcp,
    Udp,
}

use std::fmt;

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Tcp => write!(f, "tcp"),
            TransportKind::Udp => write!(f, "udp"),
        }
    }
}
