//! Bus transports
//!
//! A [`Transport`] is the capability set a bus backend provides to the driver:
//! acquiring the bus device, toggling the chip's reset line, and moving raw
//! bytes in each direction. The register access layer and the sequencer only
//! ever talk to this trait, so a new bus is added by implementing it and
//! nothing above changes.
//!
//! # Framing
//! The transport does not impose a frame layout. The register access layer
//! hands it two-byte frames whose first byte is a register address:
//! - writes: `[address, value]`
//! - reads: `[address, 0x00]`, exchanged full-duplex so that the payload byte
//!   comes back at index 1
//!
//! SX127x SPI encodes the access direction in bit 7 of the address byte.
//! SPI backends set [`WRITE_ACCESS`] on the first byte of every write and
//! clear it on every read, so the frames seen at the trait boundary always
//! carry the plain register address.
//!
//! # Blocking
//! Every call blocks until the bus transaction completes or fails. There is no
//! timeout at this layer; a hung bus blocks the caller.

use bitflags::bitflags;

use crate::error::{Error, Result};

pub mod hal;
#[cfg(feature = "spidev")]
pub mod spi;

pub use hal::{HalBus, HalTransport, ResetLine};
#[cfg(feature = "spidev")]
pub use spi::{SpiConfig, SpidevTransport};

/// Address bit selecting a write access on the SX127x SPI interface.
pub const WRITE_ACCESS: u8 = 0x80;

bitflags! {
    /// Operations a transport implements.
    ///
    /// The device handle checks these before touching the bus, so calling an
    /// operation the transport lacks fails with
    /// [`Error::MissingCapability`] instead of reaching the bus.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Acquire and configure the bus device
        const OPEN = 1 << 0;
        /// Pulse the chip reset line
        const RESET = 1 << 1;
        /// Full-duplex read transfer
        const READ = 1 << 2;
        /// Write transfer
        const WRITE = 1 << 3;
    }
}

/// A bus backend able to reach an SX1278.
///
/// Transports are shared: a device handle borrows one for its whole lifetime
/// and keeps the per-device state in [`Transport::Bus`]. Dropping the bus
/// releases the underlying resource.
pub trait Transport {
    /// The open bus resource, e.g. a spidev file descriptor.
    type Bus;

    /// Operations this transport supports.
    fn capabilities(&self) -> Capabilities;

    /// Acquires exclusive access to the bus device at `path` and negotiates
    /// the bus parameters.
    ///
    /// Any partially acquired resource must be released before an error is
    /// returned.
    fn open(&self, _path: &str) -> Result<Self::Bus> {
        Err(Error::MissingCapability(Capabilities::OPEN))
    }

    /// Pulses the chip reset line. Returns `false` when the signal could not
    /// be driven.
    fn reset(&self, _bus: &mut Self::Bus) -> bool {
        false
    }

    /// Performs a read transfer. `data` holds the outgoing frame on entry and
    /// the received bytes on return.
    ///
    /// Returns the number of bytes transferred.
    fn read(&self, _bus: &mut Self::Bus, _data: &mut [u8]) -> Result<usize> {
        Err(Error::MissingCapability(Capabilities::READ))
    }

    /// Performs a write transfer.
    ///
    /// Returns the number of bytes transferred.
    fn write(&self, _bus: &mut Self::Bus, _data: &[u8]) -> Result<usize> {
        Err(Error::MissingCapability(Capabilities::WRITE))
    }
}

/// Copies a write frame with the write-access bit set on its address byte.
pub(crate) fn write_frame(data: &[u8]) -> Vec<u8> {
    let mut frame = data.to_vec();
    if let Some(address) = frame.first_mut() {
        *address |= WRITE_ACCESS;
    }
    frame
}

/// Clears the write-access bit on the address byte of a read frame.
pub(crate) fn mark_read(data: &mut [u8]) {
    if let Some(address) = data.first_mut() {
        *address &= !WRITE_ACCESS;
    }
}
