use std::{error, fmt, io};

use crate::constants::{CAN_MAX_DLEN, IFNAME_MAX_LEN};

/// Reason an interface name was rejected before touching the OS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameError {
    /// The name was the empty string.
    Empty,

    /// The name was longer than `IFNAME_MAX_LEN` bytes. Contains the actual
    /// length in bytes.
    TooLong(usize),

    /// The name contained a NUL byte at the given offset.
    NulByte(usize),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NameError::Empty => write!(f, "interface name is empty"),
            NameError::TooLong(n) => write!(
                f,
                "interface name is {} bytes long, maximum is {}",
                n, IFNAME_MAX_LEN
            ),
            NameError::NulByte(pos) => write!(f, "interface name contains NUL at byte {}", pos),
        }
    }
}

impl error::Error for NameError {}

/// Error that occurs when creating CAN frames
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// More than 8 bytes of payload data were passed in. Contains the
    /// offending length.
    TooMuchData(usize),

    /// Text form of a frame could not be parsed.
    Malformed,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConstructionError::TooMuchData(n) => write!(
                f,
                "payload of {} bytes is larger than CAN maximum of {} bytes",
                n, CAN_MAX_DLEN
            ),
            ConstructionError::Malformed => write!(f, "malformed CAN frame text"),
        }
    }
}

impl error::Error for ConstructionError {}

/// Errors returned by `BusChannel` operations.
///
/// Every error is local to the call that produced it. Errors from `open`
/// leave no socket behind; errors from `send` and `receive` leave the
/// channel open and usable.
#[derive(Debug)]
pub enum ChannelError {
    /// Interface name is empty, too long or not representable.
    InvalidName(NameError),

    /// The raw CAN socket could not be created (CAN module missing,
    /// insufficient privilege, ...).
    SocketCreate(io::Error),

    /// No interface with the given name exists.
    InterfaceNotFound { name: String, source: nix::Error },

    /// Binding (or preparing) the socket for the interface failed.
    Bind(io::Error),

    /// Payload exceeds the classic CAN limit. Nothing was written.
    PayloadTooLarge(usize),

    /// The OS rejected the write.
    Write(io::Error),

    /// The OS read failed or returned a partial frame.
    Read(io::Error),
}

impl ChannelError {
    /// The OS error code behind this error, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match *self {
            ChannelError::SocketCreate(ref e)
            | ChannelError::Bind(ref e)
            | ChannelError::Write(ref e)
            | ChannelError::Read(ref e) => e.raw_os_error(),
            ChannelError::InterfaceNotFound { source, .. } => Some(source as i32),
            ChannelError::InvalidName(_) | ChannelError::PayloadTooLarge(_) => None,
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChannelError::InvalidName(ref e) => write!(f, "invalid interface name: {}", e),
            ChannelError::SocketCreate(ref e) => write!(f, "could not create CAN socket: {}", e),
            ChannelError::InterfaceNotFound { ref name, ref source } => {
                write!(f, "CAN device {:?} not found: {}", name, source)
            }
            ChannelError::Bind(ref e) => write!(f, "could not bind CAN socket: {}", e),
            ChannelError::PayloadTooLarge(n) => write!(
                f,
                "payload of {} bytes exceeds CAN maximum of {} bytes",
                n, CAN_MAX_DLEN
            ),
            ChannelError::Write(ref e) => write!(f, "CAN write failed: {}", e),
            ChannelError::Read(ref e) => write!(f, "CAN read failed: {}", e),
        }
    }
}

impl error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ChannelError::InvalidName(ref e) => Some(e),
            ChannelError::SocketCreate(ref e)
            | ChannelError::Bind(ref e)
            | ChannelError::Write(ref e)
            | ChannelError::Read(ref e) => Some(e),
            ChannelError::InterfaceNotFound { ref source, .. } => Some(source),
            ChannelError::PayloadTooLarge(_) => None,
        }
    }
}

impl From<NameError> for ChannelError {
    fn from(e: NameError) -> ChannelError {
        ChannelError::InvalidName(e)
    }
}

/// A frame that could not be built was never written: oversized payloads
/// keep their own variant, anything else is reported as an invalid-input
/// write.
impl From<ConstructionError> for ChannelError {
    fn from(e: ConstructionError) -> ChannelError {
        match e {
            ConstructionError::TooMuchData(n) => ChannelError::PayloadTooLarge(n),
            ConstructionError::Malformed => {
                ChannelError::Write(io::Error::new(io::ErrorKind::InvalidInput, e))
            }
        }
    }
}
