use std::{
    cmp, io,
    mem::size_of,
    os::raw::{c_int, c_short, c_uint, c_void},
    os::unix::io::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd},
    time::Duration,
};

use log::{debug, trace, warn};
use nix::net::if_::if_nametoindex;

use crate::config::ChannelConfig;
use crate::constants::*;
use crate::errors::ChannelError;
use crate::frame::CanFrame;
use crate::ifname::InterfaceName;
use crate::retry::ShouldRetry;
use crate::util::{c_bool, set_socket_option, timeval_from_duration};

#[derive(Debug)]
#[repr(C)]
struct CanAddr {
    _af_can: c_short,
    if_index: c_int,
    rx_id: u32,
    tx_id: u32,
}

/// Outcome of a single read on a channel.
///
/// Only genuine failures are reported as `Err(ChannelError::Read)`; an empty
/// socket and an orderly end of stream are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reception<T> {
    /// One frame was read.
    Frame(T),
    /// Nothing was queued: the socket is non-blocking or the read timeout
    /// expired.
    NoData,
    /// The read returned zero bytes.
    Eof,
}

impl<T> Reception<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reception<U> {
        match self {
            Reception::Frame(t) => Reception::Frame(f(t)),
            Reception::NoData => Reception::NoData,
            Reception::Eof => Reception::Eof,
        }
    }

    #[inline]
    pub fn is_frame(&self) -> bool {
        matches!(*self, Reception::Frame(_))
    }

    /// The frame, if one was read.
    pub fn frame(self) -> Option<T> {
        match self {
            Reception::Frame(t) => Some(t),
            _ => None,
        }
    }
}

/// Payload and identifier copied out of a received frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    payload: Vec<u8>,
    raw_id: u32,
}

impl Received {
    fn copy_from(frame: &CanFrame, capacity: usize) -> Received {
        let data = frame.data();
        let len = cmp::min(capacity, data.len());

        Received {
            payload: data[..len].to_vec(),
            raw_id: frame.raw_id(),
        }
    }

    /// Payload bytes, truncated to the capacity passed to `receive`.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// The full id word as read from the bus, EFF/RTR/ERR flags included.
    ///
    /// Unlike `send`, which keeps only 11 bits, nothing is masked here.
    #[inline]
    pub fn raw_id(&self) -> u32 {
        self.raw_id
    }

    /// The identifier without flags: 11 bits for standard frames, 29 bits
    /// for extended ones.
    #[inline]
    pub fn id(&self) -> u32 {
        if self.raw_id & EFF_FLAG != 0 {
            self.raw_id & EFF_MASK
        } else {
            self.raw_id & SFF_MASK
        }
    }
}

/// A raw CAN socket bound to one interface.
///
/// The socket is released exactly once: either by `close`, which consumes
/// the channel, or when the channel is dropped.
#[derive(Debug)]
pub struct BusChannel {
    fd: OwnedFd,
    ifname: Option<InterfaceName>,
    if_index: Option<c_uint>,
}

fn raw_open_socket() -> io::Result<OwnedFd> {
    let sock_fd = unsafe { libc::socket(PF_CAN, libc::SOCK_RAW | libc::SOCK_CLOEXEC, CAN_RAW) };

    if sock_fd == -1 {
        return Err(io::Error::last_os_error());
    }

    Ok(unsafe { OwnedFd::from_raw_fd(sock_fd) })
}

impl BusChannel {
    /// Open a named CAN device with the default configuration.
    ///
    /// Opens a socket can device by name, such as "vcan0" or "can0". The
    /// socket is blocking and has no timeouts.
    pub fn open(ifname: &str) -> Result<BusChannel, ChannelError> {
        BusChannel::open_with(ifname, &ChannelConfig::default())
    }

    /// Open a named CAN device, applying `config` before binding.
    pub fn open_with(ifname: &str, config: &ChannelConfig) -> Result<BusChannel, ChannelError> {
        let name = InterfaceName::new(ifname)?;

        let if_index = if_nametoindex(name.as_str()).map_err(|source| {
            ChannelError::InterfaceNotFound {
                name: name.to_string(),
                source,
            }
        })?;

        let fd = raw_open_socket().map_err(ChannelError::SocketCreate)?;
        let channel = BusChannel::bind_configured(fd, name, if_index, config)?;

        debug!("opened CAN channel on {} (ifindex {})", channel.label(), if_index);
        Ok(channel)
    }

    /// Apply `config` to a freshly created socket and bind it.
    ///
    /// Takes ownership of `fd`; on failure the socket is closed before the
    /// error is returned.
    pub(crate) fn bind_configured(
        fd: OwnedFd,
        name: InterfaceName,
        if_index: c_uint,
        config: &ChannelConfig,
    ) -> Result<BusChannel, ChannelError> {
        let channel = BusChannel {
            fd,
            ifname: Some(name),
            if_index: Some(if_index),
        };

        channel.configure(config).map_err(ChannelError::Bind)?;
        channel.bind(if_index).map_err(ChannelError::Bind)?;
        Ok(channel)
    }

    /// Apply every option set in `config` to the socket.
    ///
    /// `open_with` calls this before binding; it is also the way to
    /// configure a channel adopted through `FromRawFd`. Options left at
    /// `None` are not touched.
    pub fn configure(&self, config: &ChannelConfig) -> io::Result<()> {
        self.set_blocking(config.blocking)?;
        if config.read_timeout.is_some() {
            self.set_read_timeout(config.read_timeout)?;
        }
        if config.write_timeout.is_some() {
            self.set_write_timeout(config.write_timeout)?;
        }
        if let Some(enabled) = config.loopback {
            self.set_loopback(enabled)?;
        }
        if let Some(enabled) = config.recv_own_msgs {
            self.set_recv_own_msgs(enabled)?;
        }
        Ok(())
    }

    fn bind(&self, if_index: c_uint) -> io::Result<()> {
        let addr = CanAddr {
            _af_can: AF_CAN as c_short,
            if_index: if_index as c_int,
            rx_id: 0, // ?
            tx_id: 0, // ?
        };

        let bind_rv = unsafe {
            let sockaddr_ptr = &addr as *const CanAddr;
            libc::bind(
                self.fd.as_raw_fd(),
                sockaddr_ptr as *const libc::sockaddr,
                size_of::<CanAddr>() as libc::socklen_t,
            )
        };

        if bind_rv == -1 {
            return Err(io::Error::last_os_error());
        }

        Ok(())
    }

    fn label(&self) -> &str {
        self.ifname.as_ref().map(|n| n.as_str()).unwrap_or("<adopted fd>")
    }

    /// Name of the interface this channel was opened on. `None` for
    /// channels built with `FromRawFd`.
    pub fn interface_name(&self) -> Option<&InterfaceName> {
        self.ifname.as_ref()
    }

    /// Kernel interface index the socket is bound to, if known.
    pub fn interface_index(&self) -> Option<u32> {
        self.if_index
    }

    /// Send one standard frame.
    ///
    /// `id` is masked to its low 11 bits. A payload longer than 8 bytes is
    /// rejected without writing anything. Returns the number of bytes the
    /// OS accepted, which is the size of the whole kernel frame rather than
    /// the payload length. A single write is attempted; see `ShouldRetry`
    /// for building a retry policy on top.
    pub fn send(&self, id: u32, payload: &[u8]) -> Result<usize, ChannelError> {
        let frame = CanFrame::new(id, payload)?;
        self.write_frame(&frame)
    }

    /// Write a single can frame.
    ///
    /// Note that this function can fail with an `EAGAIN` error or similar
    /// on a non-blocking socket or after a write timeout.
    pub fn write_frame(&self, frame: &CanFrame) -> Result<usize, ChannelError> {
        let write_rv = unsafe {
            let frame_ptr = frame as *const CanFrame;
            libc::write(self.fd.as_raw_fd(), frame_ptr as *const c_void, size_of::<CanFrame>())
        };

        if write_rv < 0 {
            return Err(ChannelError::Write(io::Error::last_os_error()));
        }

        let written = write_rv as usize;
        if written != CAN_MTU {
            warn!("{}: partial write of {} bytes for {:X}", self.label(), written, frame);
        } else {
            trace!("{}: sent {:X}", self.label(), frame);
        }

        Ok(written)
    }

    /// Read a single can frame.
    ///
    /// Blocks unless the channel is non-blocking or has a read timeout.
    pub fn read_frame(&self) -> Result<Reception<CanFrame>, ChannelError> {
        let mut frame = CanFrame::default();

        let read_rv = unsafe {
            let frame_ptr = &mut frame as *mut CanFrame;
            libc::read(self.fd.as_raw_fd(), frame_ptr as *mut c_void, size_of::<CanFrame>())
        };

        if read_rv < 0 {
            let e = io::Error::last_os_error();
            if e.should_retry() {
                return Ok(Reception::NoData);
            }
            return Err(ChannelError::Read(e));
        }

        match read_rv as usize {
            0 => {
                debug!("{}: end of stream", self.label());
                Ok(Reception::Eof)
            }
            CAN_MTU => {
                trace!("{}: received {:X}", self.label(), frame);
                Ok(Reception::Frame(frame))
            }
            n => Err(ChannelError::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("short read of {} bytes, expected {}", n, CAN_MTU),
            ))),
        }
    }

    /// Receive one frame, keeping at most `capacity` payload bytes.
    ///
    /// Payload beyond `capacity` is dropped silently. The identifier is
    /// returned unmasked; see `Received::raw_id` and `Received::id`.
    pub fn receive(&self, capacity: usize) -> Result<Reception<Received>, ChannelError> {
        Ok(self.read_frame()?.map(|frame| Received::copy_from(&frame, capacity)))
    }

    /// Release the socket.
    ///
    /// Consumes the channel, so the descriptor can not be released twice.
    /// Dropping a channel closes it as well, discarding any error.
    pub fn close(self) -> io::Result<()> {
        debug!("closing CAN channel on {}", self.label());

        let fd = self.fd.into_raw_fd();
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Change socket to blocking or non-blocking mode
    pub fn set_blocking(&self, blocking: bool) -> io::Result<()> {
        let fd = self.fd.as_raw_fd();

        // retrieve current flags
        let oldfl = unsafe { libc::fcntl(fd, libc::F_GETFL) };

        if oldfl == -1 {
            return Err(io::Error::last_os_error());
        }

        let newfl = if blocking {
            oldfl & !libc::O_NONBLOCK
        } else {
            oldfl | libc::O_NONBLOCK
        };

        let rv = unsafe { libc::fcntl(fd, libc::F_SETFL, newfl) };

        if rv != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Sets the read timeout on the socket; `None` blocks indefinitely.
    ///
    /// An expired timeout surfaces as `Reception::NoData`.
    pub fn set_read_timeout(&self, duration: Option<Duration>) -> io::Result<()> {
        set_socket_option(
            self.fd.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_RCVTIMEO,
            &timeval_from_duration(duration),
        )
    }

    /// Sets the write timeout on the socket; `None` blocks indefinitely.
    pub fn set_write_timeout(&self, duration: Option<Duration>) -> io::Result<()> {
        set_socket_option(
            self.fd.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_SNDTIMEO,
            &timeval_from_duration(duration),
        )
    }

    /// Enable or disable loopback.
    ///
    /// By default, loopback is enabled, causing other applications that open
    /// the same CAN bus to see frames emitted by different applications on
    /// the same system.
    pub fn set_loopback(&self, enabled: bool) -> io::Result<()> {
        set_socket_option(self.fd.as_raw_fd(), SOL_CAN_RAW, CAN_RAW_LOOPBACK, &c_bool(enabled))
    }

    /// Enable or disable receiving of own frames.
    ///
    /// When loopback is enabled, this settings controls if CAN frames sent
    /// are received back immediately by sender. Default is off.
    pub fn set_recv_own_msgs(&self, enabled: bool) -> io::Result<()> {
        set_socket_option(
            self.fd.as_raw_fd(),
            SOL_CAN_RAW,
            CAN_RAW_RECV_OWN_MSGS,
            &c_bool(enabled),
        )
    }
}

impl AsRawFd for BusChannel {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl AsFd for BusChannel {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl FromRawFd for BusChannel {
    /// Adopt an already bound socket. The channel takes ownership of `fd`
    /// and will close it.
    unsafe fn from_raw_fd(fd: RawFd) -> BusChannel {
        BusChannel {
            fd: OwnedFd::from_raw_fd(fd),
            ifname: None,
            if_index: None,
        }
    }
}

impl IntoRawFd for BusChannel {
    fn into_raw_fd(self) -> RawFd {
        self.fd.into_raw_fd()
    }
}
