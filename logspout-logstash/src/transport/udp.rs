/// Datagram transport over UDP
use crate::transport::{Connection, Transport};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

/// A UDP socket connected to a single peer. Every write is sent as one
/// datagram.
#[derive(Debug)]
pub struct UdpConnection {
    socket: UdpSocket,
}

impl Write for UdpConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for UdpTransport {
    fn dial(
        &self,
        address: &str,
        _options: &BTreeMap<String, String>,
    ) -> io::Result<Box<dyn Connection>> {
        let peer = address.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{address} did not resolve to any address"),
            )
        })?;
        let local = match peer {
            SocketAddr::V4(_) => "0.0.0.0:0",
            SocketAddr::V6(_) => "[::]:0",
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(peer)?;
        log::debug!("Connected to {address} over udp");
        Ok(Box::new(UdpConnection { socket }))
    }
}
