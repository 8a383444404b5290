use core::fmt::{Display, Formatter};

/// Outcome codes of the driver.
///
/// `InvalidArgument`, `NoMemory`, `Busy` and `InvalidUsage` are returned synchronously by the
/// command that detected them. `Io` is only ever delivered through a completion notification.
/// `Driver` is returned for completions that do not match the outstanding step, and delivered for
/// inconsistent internal state found mid-sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An argument is outside its valid set.
    InvalidArgument,
    /// No storage could be acquired for a new instance.
    NoMemory,
    /// Another command is still in flight on this instance.
    Busy,
    /// A precondition of the command does not hold, e.g. measuring before calibration.
    InvalidUsage,
    /// A register transaction failed.
    Io,
    /// Something went wrong inside the driver.
    Driver,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::NoMemory => f.write_str("no memory for instance"),
            Error::Busy => f.write_str("another command is in flight"),
            Error::InvalidUsage => f.write_str("invalid usage"),
            Error::Io => f.write_str("register transaction failed"),
            Error::Driver => f.write_str("driver error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
