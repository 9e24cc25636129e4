use std::{cmp, fmt, str::FromStr};

use itertools::Itertools;

use crate::constants::*;
use crate::errors::ConstructionError;

/// CanFrame
///
/// Uses the same memory layout as the underlying kernel struct, so a frame
/// is read or written with a single syscall.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct CanFrame {
    /// 32 bit CAN_ID + EFF/RTR/ERR flags
    _id: u32,
    /// data length. Bytes beyond are not valid
    _data_len: u8,
    /// padding
    _pad: u8,
    /// reserved
    _res0: u8,
    /// reserved
    _res1: u8,
    /// buffer for data
    _data: [u8; CAN_MAX_DLEN],
}

impl CanFrame {
    /// Build a standard frame.
    ///
    /// Only the low 11 bits of `id` are kept; anything above is silently
    /// discarded. Fails if `data` is longer than 8 bytes.
    pub fn new(id: u32, data: &[u8]) -> Result<CanFrame, ConstructionError> {
        if data.len() > CAN_MAX_DLEN {
            return Err(ConstructionError::TooMuchData(data.len()));
        }

        let mut full_data = [0; CAN_MAX_DLEN];
        full_data[..data.len()].copy_from_slice(data);

        Ok(CanFrame {
            _id: id & SFF_MASK,
            _data_len: data.len() as u8,
            _pad: 0,
            _res0: 0,
            _res1: 0,
            _data: full_data,
        })
    }

    /// The id word as the kernel delivered it, flags included.
    #[inline]
    pub fn raw_id(&self) -> u32 {
        self._id
    }

    /// Return the actual CAN ID (without EFF/RTR/ERR flags)
    #[inline]
    pub fn id(&self) -> u32 {
        if self.is_extended() {
            self._id & EFF_MASK
        } else {
            self._id & SFF_MASK
        }
    }

    /// Check if frame uses 29 bit extended frame format
    #[inline]
    pub fn is_extended(&self) -> bool {
        self._id & EFF_FLAG != 0
    }

    /// Check if frame is an error message
    #[inline]
    pub fn is_error(&self) -> bool {
        self._id & ERR_FLAG != 0
    }

    /// Check if frame is a remote transmission request
    #[inline]
    pub fn is_rtr(&self) -> bool {
        self._id & RTR_FLAG != 0
    }

    /// A slice into the actual data. Slice will always be <= 8 bytes in
    /// length, even if the length field claims more.
    #[inline]
    pub fn data(&self) -> &[u8] {
        let len = cmp::min(self._data_len as usize, CAN_MAX_DLEN);
        &self._data[..len]
    }
}

impl fmt::UpperHex for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:X}#", self.id())?;

        let mut parts = self.data().iter().map(|v| format!("{:02X}", v));

        let sep = if f.alternate() { " " } else { "" };
        write!(f, "{}", parts.join(sep))
    }
}

/// Parses the candump notation `<hex id>#<hex data>`, e.g. `7B#DEADBEEF`.
///
/// Spaces inside the data part are ignored, so the alternate `{:#X}` output
/// parses as well.
impl FromStr for CanFrame {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, data) = s.trim().split_once('#').ok_or(ConstructionError::Malformed)?;

        let id = u32::from_str_radix(id, 16).map_err(|_| ConstructionError::Malformed)?;

        let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        let data = hex::decode(data).map_err(|_| ConstructionError::Malformed)?;

        CanFrame::new(id, &data)
    }
}
