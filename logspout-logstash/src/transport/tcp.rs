/// Stream transport over TCP
use crate::transport::{Connection, Transport};
use std::collections::BTreeMap;
use std::io;
use std::net::TcpStream;

/// Dials a plain TCP connection with Nagle's algorithm disabled, so each
/// message leaves as soon as it is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    fn dial(
        &self,
        address: &str,
        _options: &BTreeMap<String, String>,
    ) -> io::Result<Box<dyn Connection>> {
        let stream = TcpStream::connect(address)?;
        if let Err(e) = stream.set_nodelay(true) {
            log::warn!("Failed to set TCP_NODELAY on connection to {address}: {e}");
        }
        log::debug!("Connected to {address} over tcp");
        Ok(Box::new(stream))
    }
}
