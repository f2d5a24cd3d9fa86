use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sig_client::{ClientError, SignalClient};
use sig_transport::{Received, Result, Transport, TransportConfig, TransportError};

/// Transport that accepts at most `chunk` bytes per send and replays a
/// script of receive outcomes.
struct Scripted {
    chunk: usize,
    written: Arc<Mutex<Vec<u8>>>,
    receives: VecDeque<Received>,
    connected: bool,
}

impl Scripted {
    fn new(chunk: usize, receives: Vec<Received>) -> (Self, Arc<Mutex<Vec<u8>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let transport = Scripted {
            chunk,
            written: written.clone(),
            receives: receives.into(),
            connected: true,
        };
        (transport, written)
    }
}

impl Transport for Scripted {
    fn connect(&mut self, _host: &str, _port: u16) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<Received> {
        let next = self.receives.pop_front().unwrap_or(Received::Timeout);
        if let Received::Data(n) = next {
            buf[..n].fill(b'x');
        }
        Ok(next)
    }

    fn send(&mut self, buf: &[u8]) -> Result<usize> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        let n = buf.len().min(self.chunk);
        self.written.lock().unwrap().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[test]
fn send_all_completes_over_partial_writes() {
    let (transport, written) = Scripted::new(3, vec![]);
    let mut client = SignalClient::from_transport(Box::new(transport));

    client.send_all(b"candidate:1 1 UDP 2130706431").unwrap();
    assert_eq!(&written.lock().unwrap()[..], b"candidate:1 1 UDP 2130706431");
}

#[test]
fn zero_length_write_is_reported() {
    let (transport, _) = Scripted::new(0, vec![]);
    let mut client = SignalClient::from_transport(Box::new(transport));

    let err = client.send_all(b"abc").unwrap_err();
    assert!(matches!(err, ClientError::WriteZero { remaining: 3 }));
}

#[test]
fn poll_maps_receive_outcomes() {
    let (transport, _) = Scripted::new(8, vec![Received::Data(5), Received::Timeout, Received::Data(0)]);
    let mut client = SignalClient::from_transport(Box::new(transport));

    assert_eq!(client.poll().unwrap(), Some(&b"xxxxx"[..]));
    assert_eq!(client.poll().unwrap(), None);
    assert_eq!(client.poll().unwrap(), Some(&b""[..]));
}

#[test]
fn send_after_close_fails() {
    let (transport, _) = Scripted::new(8, vec![]);
    let mut client = SignalClient::from_transport(Box::new(transport));

    client.close();
    assert!(!client.is_connected());
    let err = client.send_all(b"bye").unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::NotConnected)));
}

#[test]
fn tcp_exchange() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = TransportConfig::default().with_recv_timeout(Duration::from_millis(100));

    let mut client = SignalClient::connect("127.0.0.1", port, config).unwrap();
    let (mut peer, _) = listener.accept().unwrap();

    client.send_all(b"HELLO").unwrap();
    let mut got = [0u8; 5];
    peer.read_exact(&mut got).unwrap();
    assert_eq!(&got, b"HELLO");

    peer.write_all(b"WELCOME").unwrap();
    assert_eq!(client.poll().unwrap(), Some(&b"WELCOME"[..]));
    assert_eq!(client.poll().unwrap(), None);
}
