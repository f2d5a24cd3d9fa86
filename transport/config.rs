// Transport configuration, fixed when the transport is built
use std::env;
use std::time::Duration;

// Environment variable for configuration
// SIG_TRANSPORT_READ_TIMEOUT_MS: receive readiness timeout in ms (default: 3000)

pub const DEFAULT_RECV_TIMEOUT_MS: u64 = 3000;
pub const RECV_TIMEOUT_ENV: &str = "SIG_TRANSPORT_READ_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound on the readiness wait in `receive`.
    pub recv_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            recv_timeout: Duration::from_millis(DEFAULT_RECV_TIMEOUT_MS),
        }
    }
}

impl TransportConfig {
    pub fn from_env() -> Self {
        Self::from_timeout_var(env::var(RECV_TIMEOUT_ENV).ok().as_deref())
    }

    fn from_timeout_var(value: Option<&str>) -> Self {
        let millis = value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RECV_TIMEOUT_MS);
        TransportConfig {
            recv_timeout: Duration::from_millis(millis),
        }
    }

    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }
}
