// Transport abstraction - the calling layer only sees this trait
use crate::error::Result;

/// Outcome of a receive that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// The socket was readable and a single read returned this many bytes.
    /// Zero means the peer closed its side (or sent nothing) while readable.
    Data(usize),
    /// Nothing became readable within the configured receive timeout.
    Timeout,
}

impl Received {
    /// Byte count with the legacy numeric contract: a timeout reads as `0`,
    /// indistinguishable from an empty read. Use [`Received::is_timeout`]
    /// when the difference matters.
    pub fn len(&self) -> usize {
        match self {
            Received::Data(n) => *n,
            Received::Timeout => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Received::Timeout)
    }
}

pub trait Transport: Send {
    /// Open, resolve and connect. Fails if already connected.
    fn connect(&mut self, host: &str, port: u16) -> Result<()>;

    /// Release the connection, if any. Never fails.
    fn disconnect(&mut self);

    /// Wait up to the configured timeout for data, then read once into `buf`.
    ///
    /// `buf` is zero-filled before the read, so bytes past the returned count
    /// are always zero.
    fn receive(&mut self, buf: &mut [u8]) -> Result<Received>;

    /// Write once; partial writes are returned as-is.
    fn send(&mut self, buf: &[u8]) -> Result<usize>;

    fn is_connected(&self) -> bool;
}
