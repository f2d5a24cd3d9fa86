// Socket primitive: a thin owner of one stream socket descriptor, plus the
// poll(2) readiness wait used before every read
use std::io;
use std::net::SocketAddrV4;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::time::Duration;

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::socket::{self, AddressFamily, MsgFlags, SockFlag, SockType, SockaddrIn};

// A peer that went away must show up as EPIPE, not as SIGPIPE
#[cfg(any(target_os = "linux", target_os = "android"))]
const SEND_FLAGS: MsgFlags = MsgFlags::MSG_NOSIGNAL;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SEND_FLAGS: MsgFlags = MsgFlags::empty();

/// Exclusively owned stream socket. Dropping it closes the descriptor.
#[derive(Debug)]
pub struct TcpSocket {
    fd: OwnedFd,
}

impl TcpSocket {
    pub fn open(family: AddressFamily) -> io::Result<Self> {
        let fd = socket::socket(family, SockType::Stream, SockFlag::empty(), None)?;
        Ok(TcpSocket { fd })
    }

    /// Blocking connect, no timeout.
    pub fn connect(&self, addr: &SocketAddrV4) -> io::Result<()> {
        socket::connect(self.fd.as_raw_fd(), &SockaddrIn::from(*addr))?;
        Ok(())
    }

    pub fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(socket::recv(self.fd.as_raw_fd(), buf, MsgFlags::empty())?)
    }

    pub fn send(&self, buf: &[u8]) -> io::Result<usize> {
        Ok(socket::send(self.fd.as_raw_fd(), buf, SEND_FLAGS)?)
    }

    pub fn close(self) {
        drop(self.fd);
    }
}

impl AsFd for TcpSocket {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

/// Block until `fd` is readable or `timeout` elapses, at millisecond
/// precision. Hang-up and error conditions count as readable so the
/// following read reports them.
///
/// Returns `Ok(false)` when the wait expired with nothing to read. An
/// interrupted wait (EINTR) is returned as an error, not retried.
pub fn wait_readable(fd: BorrowedFd<'_>, timeout: Duration) -> io::Result<bool> {
    let timeout = PollTimeout::try_from(timeout).unwrap_or(PollTimeout::MAX);
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];

    if poll(&mut fds, timeout)? == 0 {
        return Ok(false);
    }
    let ready = PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR;
    Ok(fds[0].revents().is_some_and(|r| r.intersects(ready)))
}
