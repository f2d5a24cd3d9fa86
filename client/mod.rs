// client: calling layer over a Transport, used by the probe binary and by
// higher-level signaling code
use sig_transport::{Received, TcpTransport, Transport, TransportConfig, TransportError};
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_RECV_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The transport accepted zero bytes of a non-empty write.
    #[error("write accepted 0 of {remaining} remaining bytes")]
    WriteZero { remaining: usize },
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub struct SignalClient {
    transport: Box<dyn Transport>,
    buffer: Vec<u8>,
}

impl SignalClient {
    pub fn connect(host: &str, port: u16, config: TransportConfig) -> Result<Self> {
        let mut transport = TcpTransport::with_config(config);
        transport.connect(host, port)?;
        Ok(Self::from_transport(Box::new(transport)))
    }

    /// Wrap an already connected transport.
    pub fn from_transport(transport: Box<dyn Transport>) -> Self {
        SignalClient {
            transport,
            buffer: vec![0u8; DEFAULT_RECV_BUFFER_SIZE],
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Write the whole message, issuing as many sends as the transport needs.
    pub fn send_all(&mut self, data: &[u8]) -> Result<()> {
        let mut offset = 0;
        while offset < data.len() {
            let n = self.transport.send(&data[offset..])?;
            if n == 0 {
                return Err(ClientError::WriteZero {
                    remaining: data.len() - offset,
                });
            }
            offset += n;
            trace!(sent = n, remaining = data.len() - offset, "partial send");
        }
        Ok(())
    }

    /// One receive. `None` on timeout; an empty slice means the peer closed.
    pub fn poll(&mut self) -> Result<Option<&[u8]>> {
        match self.transport.receive(&mut self.buffer)? {
            Received::Timeout => Ok(None),
            Received::Data(n) => Ok(Some(&self.buffer[..n])),
        }
    }

    pub fn close(&mut self) {
        self.transport.disconnect();
    }
}

impl Drop for SignalClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// Render a received chunk for display: local time, length, and the bytes
/// as lossy UTF-8.
pub fn format_chunk(data: &[u8]) -> String {
    let now = chrono::Local::now();
    format!(
        "{} {:5} [{}]",
        now.format("%Y/%m/%d %H:%M:%S%.6f"),
        data.len(),
        String::from_utf8_lossy(data).trim_end_matches('\0')
    )
}
