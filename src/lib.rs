//! Single-channel SocketCAN support.
//!
//! The Linux kernel supports using CAN-devices through a network-like API
//! (see https://www.kernel.org/doc/Documentation/networking/can.txt). This
//! crate wraps exactly one raw CAN socket, bound to one named interface,
//! without having to wrestle libc calls.
//!
//! # An introduction to CAN
//!
//! The CAN bus was originally designed to allow microcontrollers inside a
//! vehicle to communicate over a single shared bus. Messages called
//! *frames* are multicast to all devices on the bus.
//!
//! Every frame consists of an ID and a payload of up to 8 bytes. If two
//! devices attempt to send a frame at the same time, the device with the
//! higher ID will notice the conflict, stop sending and reattempt to sent its
//! frame in the next time slot. This means that the lower the ID, the higher
//! the priority.
//!
//! The Linux socketcan subsystem makes the CAN bus available as a regular
//! networking device. A device can be opened multiple times, every channel
//! will receive all CAN frames simultaneously.
//!
//! # Channels
//!
//! A `BusChannel` owns its socket. It is opened with `BusChannel::open`,
//! sends standard (11 bit) frames with `send`, receives one frame per
//! `receive` call and is released by `close` or by being dropped.
//!
//! ```no_run
//! use cansock::{BusChannel, Reception};
//!
//! let channel = BusChannel::open("vcan0")?;
//! channel.send(0x123, &[0xde, 0xad, 0xbe, 0xef])?;
//!
//! if let Reception::Frame(rx) = channel.receive(8)? {
//!     println!("{:03X}: {:02X?}", rx.id(), rx.payload());
//! }
//! channel.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # RawFd
//!
//! The underlying file descriptor is reachable through `AsRawFd` and
//! `IntoRawFd`. `FromRawFd` adopts an already bound socket as a channel.

pub extern crate libc;
pub extern crate nix;

mod channel;
mod config;
mod constants;
mod errors;
mod frame;
mod ifname;
mod retry;
mod util;

pub use crate::channel::{BusChannel, Received, Reception};
pub use crate::config::ChannelConfig;
pub use crate::constants::{CAN_MAX_DLEN, CAN_MTU, EFF_FLAG, EFF_MASK, IFNAME_MAX_LEN, SFF_MASK};
pub use crate::errors::{ChannelError, ConstructionError, NameError};
pub use crate::frame::CanFrame;
pub use crate::ifname::InterfaceName;
pub use crate::retry::ShouldRetry;
