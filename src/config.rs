use std::time::Duration;

/// Options applied to a channel's socket between creation and bind.
///
/// `ChannelConfig::default()` gives a blocking socket without timeouts and
/// leaves the kernel's loopback settings alone.
///
/// ```
/// use std::time::Duration;
/// use cansock::ChannelConfig;
///
/// let config = ChannelConfig::default()
///     .read_timeout(Duration::from_millis(250))
///     .recv_own_msgs(true);
/// assert!(config.blocking);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// `false` puts the socket in `O_NONBLOCK` mode; reads with nothing
    /// queued then return `Reception::NoData` immediately.
    pub blocking: bool,
    /// Upper bound on a blocking read. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Upper bound on a blocking write. `None` waits forever.
    pub write_timeout: Option<Duration>,
    /// `CAN_RAW_LOOPBACK`; `None` keeps the kernel default (enabled).
    pub loopback: Option<bool>,
    /// `CAN_RAW_RECV_OWN_MSGS`; `None` keeps the kernel default (disabled).
    pub recv_own_msgs: Option<bool>,
}

impl Default for ChannelConfig {
    fn default() -> ChannelConfig {
        ChannelConfig {
            blocking: true,
            read_timeout: None,
            write_timeout: None,
            loopback: None,
            recv_own_msgs: None,
        }
    }
}

impl ChannelConfig {
    pub fn blocking(mut self, blocking: bool) -> ChannelConfig {
        self.blocking = blocking;
        self
    }

    /// A zero duration means "no timeout", same as the kernel reads it.
    pub fn read_timeout(mut self, timeout: Duration) -> ChannelConfig {
        self.read_timeout = non_zero(timeout);
        self
    }

    /// A zero duration means "no timeout", same as the kernel reads it.
    pub fn write_timeout(mut self, timeout: Duration) -> ChannelConfig {
        self.write_timeout = non_zero(timeout);
        self
    }

    pub fn loopback(mut self, enabled: bool) -> ChannelConfig {
        self.loopback = Some(enabled);
        self
    }

    pub fn recv_own_msgs(mut self, enabled: bool) -> ChannelConfig {
        self.recv_own_msgs = Some(enabled);
        self
    }
}

fn non_zero(timeout: Duration) -> Option<Duration> {
    if timeout == Duration::from_secs(0) {
        None
    } else {
        Some(timeout)
    }
}
