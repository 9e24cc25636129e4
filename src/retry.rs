use std::io;

use crate::errors::ChannelError;

/// Check an error return value for timeouts.
///
/// Due to the fact that timeouts are reported as errors, a write on a
/// socket with a timeout (or in non-blocking mode) that cannot queue its
/// frame in time will result in an error being returned. This trait adds a
/// `should_retry` method to `Error` and `Result` to check for this
/// condition. `BusChannel` never retries by itself.
pub trait ShouldRetry {
    /// Check for timeout
    ///
    /// If `true`, the error is probably due to a timeout.
    fn should_retry(&self) -> bool;
}

impl ShouldRetry for io::Error {
    fn should_retry(&self) -> bool {
        // EAGAIN, EINPROGRESS and EWOULDBLOCK are the three possible codes
        // returned when a timeout occurs. the stdlib already maps EAGAIN
        // and EWOULDBLOCK to WouldBlock
        self.kind() == io::ErrorKind::WouldBlock || self.raw_os_error() == Some(libc::EINPROGRESS)
    }
}

impl<T> ShouldRetry for io::Result<T> {
    fn should_retry(&self) -> bool {
        if let Err(ref e) = *self {
            e.should_retry()
        } else {
            false
        }
    }
}

impl ShouldRetry for ChannelError {
    fn should_retry(&self) -> bool {
        match *self {
            ChannelError::Write(ref e) | ChannelError::Read(ref e) => e.should_retry(),
            _ => false,
        }
    }
}
