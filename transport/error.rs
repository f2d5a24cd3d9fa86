//! Error types for the TCP transport.

use std::io;

use thiserror::Error;

/// Errors surfaced by [`Transport`](crate::Transport) operations.
///
/// Nothing is retried inside the transport; every variant reaches the caller
/// on the first failure. A receive timeout is not an error, see
/// [`Received::Timeout`](crate::Received::Timeout).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Resolution, socket open or connect failed.
    #[error("connect to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The readiness wait before a read failed.
    #[error("readiness wait failed: {0}")]
    Wait(#[source] io::Error),

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// `receive` or `send` called without a live connection.
    #[error("not connected")]
    NotConnected,

    /// `connect` called while a connection is still held.
    #[error("already connected")]
    AlreadyConnected,
}

impl TransportError {
    /// True for caller misuse, false for I/O faults.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            TransportError::NotConnected | TransportError::AlreadyConnected
        )
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
