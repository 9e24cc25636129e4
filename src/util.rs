use std::{io, mem, time};

/// `setsockopt` wrapper
///
/// The libc `setsockopt` function is set to set various options on a socket.
/// `set_socket_option` offers a somewhat type-safe wrapper that does not
/// require messing around with `*const c_void`s.
///
/// A proper `std::io::Error` will be returned on failure.
///
/// Example use:
///
/// ```text
/// let fd = ...;  // a bound CAN socket
/// set_socket_option(fd, SOL_CAN_RAW, CAN_RAW_LOOPBACK, &(1 as c_int))
/// ```
///
/// Note that the `val` parameter must be specified correctly; if an option
/// expects an integer, it is advisable to pass in a `c_int`, not the default
/// of `i32`.
pub fn set_socket_option<T>(fd: libc::c_int,
                            level: libc::c_int,
                            name: libc::c_int,
                            val: &T) -> io::Result<()> {
    let r = unsafe {
        let val_ptr: *const T = val as *const T;
        libc::setsockopt(fd,
                         level,
                         name,
                         val_ptr as *const libc::c_void,
                         mem::size_of::<T>() as libc::socklen_t)
    };

    if r != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// `SO_RCVTIMEO`/`SO_SNDTIMEO` take a `timeval`; `None` maps to the zero
/// timeval, which the kernel reads as "block forever".
///
/// A non-zero duration below one microsecond is rounded up to 1us so it
/// never turns into that zero timeval.
pub fn timeval_from_duration(t: Option<time::Duration>) -> libc::timeval {
    let t = t.unwrap_or_default();
    let mut tv_usec = t.subsec_micros() as libc::suseconds_t;

    if t.as_secs() == 0 && tv_usec == 0 && t.subsec_nanos() != 0 {
        tv_usec = 1;
    }

    libc::timeval {
        tv_sec: t.as_secs() as libc::time_t,
        tv_usec,
    }
}

#[inline]
pub fn c_bool(enabled: bool) -> libc::c_int {
    if enabled { 1 } else { 0 }
}
