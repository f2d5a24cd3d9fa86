// Address resolution collaborator: hostname -> IPv4 address
use std::io::{Error, ErrorKind, Result};
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

pub trait Resolve: Send {
    fn resolve(&self, host: &str) -> Result<Ipv4Addr>;
}

/// Resolves through the system resolver, keeping the first IPv4 answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str) -> Result<Ipv4Addr> {
        if let Ok(addr) = host.parse::<Ipv4Addr>() {
            return Ok(addr);
        }

        (host, 0)
            .to_socket_addrs()?
            .find_map(|addr| match addr {
                SocketAddr::V4(v4) => Some(*v4.ip()),
                SocketAddr::V6(_) => None,
            })
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::AddrNotAvailable,
                    format!("no IPv4 address for {}", host),
                )
            })
    }
}

impl<F> Resolve for F
where
    F: Fn(&str) -> Result<Ipv4Addr> + Send,
{
    fn resolve(&self, host: &str) -> Result<Ipv4Addr> {
        self(host)
    }
}
