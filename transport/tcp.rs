// TCP transport implementation
use std::net::SocketAddrV4;
use std::os::fd::{AsFd, BorrowedFd};

use nix::sys::socket::AddressFamily;
use tracing::{debug, info};

use crate::config::TransportConfig;
use crate::error::{Result, TransportError};
use crate::resolver::{Resolve, SystemResolver};
use crate::socket::{wait_readable, TcpSocket};
use crate::traits::{Received, Transport};

/// Blocking transport over a single TCP connection.
///
/// Holds at most one socket; `None` means not connected. Every operation
/// blocks the calling thread. Only `receive` is bounded, by
/// [`TransportConfig::recv_timeout`].
#[derive(Debug)]
pub struct TcpTransport<R = SystemResolver> {
    config: TransportConfig,
    resolver: R,
    socket: Option<TcpSocket>,
    peer: Option<SocketAddrV4>,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Self {
        Self::with_resolver(config, SystemResolver)
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolve> TcpTransport<R> {
    pub fn with_resolver(config: TransportConfig, resolver: R) -> Self {
        TcpTransport {
            config,
            resolver,
            socket: None,
            peer: None,
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Address the live connection was made to.
    pub fn peer_addr(&self) -> Option<SocketAddrV4> {
        self.peer
    }

    /// Handle for an external readiness wait, while connected.
    pub fn as_fd(&self) -> Option<BorrowedFd<'_>> {
        self.socket.as_ref().map(|s| s.as_fd())
    }

    fn open_and_connect(&self, host: &str, port: u16) -> std::io::Result<(TcpSocket, SocketAddrV4)> {
        let socket = TcpSocket::open(AddressFamily::Inet)?;
        let ip = self.resolver.resolve(host)?;
        let addr = SocketAddrV4::new(ip, port);
        // On error the socket is dropped here, closing it
        socket.connect(&addr)?;
        Ok((socket, addr))
    }

    fn connected(&self) -> Result<&TcpSocket> {
        self.socket.as_ref().ok_or(TransportError::NotConnected)
    }
}

impl<R: Resolve> Transport for TcpTransport<R> {
    fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        if self.socket.is_some() {
            return Err(TransportError::AlreadyConnected);
        }

        let (socket, addr) = self
            .open_and_connect(host, port)
            .map_err(|source| TransportError::Connect {
                host: host.to_string(),
                port,
                source,
            })?;

        self.socket = Some(socket);
        self.peer = Some(addr);
        info!(host, port, "TCP connected");
        Ok(())
    }

    fn disconnect(&mut self) {
        self.peer = None;
        if let Some(socket) = self.socket.take() {
            socket.close();
            debug!("TCP disconnected");
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<Received> {
        let socket = self.connected()?;
        let timeout = self.config.recv_timeout;

        if !wait_readable(socket.as_fd(), timeout).map_err(TransportError::Wait)? {
            debug!(timeout = ?timeout, "receive timed out");
            return Ok(Received::Timeout);
        }

        buf.fill(0);
        let n = socket.recv(buf).map_err(TransportError::Read)?;
        Ok(Received::Data(n))
    }

    fn send(&mut self, buf: &[u8]) -> Result<usize> {
        self.connected()?.send(buf).map_err(TransportError::Write)
    }

    fn is_connected(&self) -> bool {
        self.socket.is_some()
    }
}
