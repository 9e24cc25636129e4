use std::{convert::TryFrom, fmt, ops::Deref};

use crate::constants::IFNAME_MAX_LEN;
use crate::errors::NameError;

/// InterfaceName
///
/// Owned name of a network interface such as `"can0"` or `"vcan0"`. The
/// length is checked on construction, so nothing downstream ever copies an
/// oversized or NUL-carrying name into an OS structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Validate and take ownership of an interface name.
    ///
    /// The name must be between 1 and `IFNAME_MAX_LEN` bytes long and must
    /// not contain NUL. Other characters are passed to the kernel as-is.
    pub fn new(name: &str) -> Result<InterfaceName, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }

        if name.len() > IFNAME_MAX_LEN {
            return Err(NameError::TooLong(name.len()));
        }

        if let Some(pos) = name.bytes().position(|b| b == 0) {
            return Err(NameError::NulByte(pos));
        }

        Ok(InterfaceName(name.to_owned()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for InterfaceName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for InterfaceName {
    type Error = NameError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        InterfaceName::new(name)
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
