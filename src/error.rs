//! Driver errors and status codes
//!
//! Every fallible operation returns [`Result`]. Callers that need the flat
//! numeric status of the classic C-style interface can fold any error with
//! [`Error::status`] or any result with [`Status::from_result`].

use std::io;

use crate::transport::Capabilities;

/// Result alias used throughout the driver.
pub type Result<T> = core::result::Result<T, Error>;

/// Status codes surfaced to callers.
///
/// Read and write operations additionally report a non-negative byte count on
/// success, so a negative code is never confused with a zero-length transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum Status {
    /// Operation succeeded
    Success = 0,
    /// An underlying transport call failed or reported an unexpected result
    GenericError = -1,
    /// A required handle, transport or capability is absent
    NullArgument = -2,
    /// Bus acquisition or bus parameter negotiation failed
    OpenFailure = -3,
}

impl Status {
    /// Raw numeric value of the status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Folds a driver result into its status code.
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => err.status(),
        }
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

/// Reason a bus device could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenErrorKind {
    /// The device node does not exist
    NotFound,
    /// The caller may not open the device node
    PermissionDenied,
    /// Any other failure while opening or configuring the bus
    Io,
}

impl From<io::ErrorKind> for OpenErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io,
        }
    }
}

/// Errors reported by the driver.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle has no transport bound, or has no open bus.
    #[error("no transport bound to the handle")]
    NullArgument,
    /// The bound transport does not implement the requested operation.
    #[error("transport lacks the {0:?} capability")]
    MissingCapability(Capabilities),
    /// The transport failed to acquire or configure the bus device.
    #[error("failed to open bus device ({0:?})")]
    Open(OpenErrorKind),
    /// The handle could not be opened because its transport failed to open
    /// the bus.
    #[error("failed to open device handle ({0:?})")]
    OpenFailed(OpenErrorKind),
    /// A register access was attempted on a handle without an open bus.
    #[error("device is not open")]
    NotOpen,
    /// The transport reported a bus-level failure.
    #[error("bus transfer failed")]
    Bus,
    /// The transport moved fewer bytes than the frame required.
    #[error("short transfer: expected {expected} bytes, got {actual}")]
    ShortTransfer { expected: usize, actual: usize },
    /// The transport could not toggle the reset line.
    #[error("reset signal failed")]
    ResetFailed,
    /// A configuration value is outside what the chip accepts.
    #[error("parameter out of range")]
    OutOfRange,
    /// A typed register could not be encoded or decoded.
    #[error("register value could not be converted")]
    Register,
}

impl Error {
    /// Why the bus device could not be opened, for either open error.
    pub fn open_kind(&self) -> Option<OpenErrorKind> {
        match self {
            Self::Open(kind) | Self::OpenFailed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Folds the error into one of the published status codes.
    pub fn status(&self) -> Status {
        match self {
            Self::NullArgument => Status::NullArgument,
            Self::MissingCapability(caps) if caps.contains(Capabilities::OPEN) => {
                Status::GenericError
            }
            Self::MissingCapability(_) => Status::NullArgument,
            Self::Open(_) | Self::NotOpen => Status::OpenFailure,
            Self::OpenFailed(_)
            | Self::Bus
            | Self::ShortTransfer { .. }
            | Self::ResetFailed
            | Self::OutOfRange
            | Self::Register => Status::GenericError,
        }
    }
}
