//! SX1278 Device Handle
//!
//! This module provides the handle through which all chip access flows. A
//! [`Device`] borrows a [`Transport`], owns the bus the transport opened for
//! it, and caches the RF [`Config`] last applied to the chip.
//!
//! The handle provides methods for:
//! - Opening, resetting and closing the bus
//! - Raw reads and writes
//! - Reading and writing single register bytes
//! - Reading and writing typed registers
//!
//! # Lifecycle
//! A handle is unopened until [`Device::open`] succeeds. Every operation on an
//! unopened or closed handle fails before any bus activity:
//! - raw [`read`](Device::read), [`write`](Device::write) and
//!   [`reset`](Device::reset) report [`Error::NullArgument`]
//! - register accesses report [`Error::NullArgument`] when no transport is
//!   bound and [`Error::NotOpen`] when the bus was closed
//!
//! # Example
//! ```no_run
//! use sx1278::{Device, OpMode};
//!
//! let mut device = Device::open_spidev("/dev/spidev0.0")?;
//!
//! // Read a register
//! let op_mode: OpMode = device.read_register()?;
//!
//! // Write a single register byte
//! device.write_register_byte(0x39, 0xAA)?;
//!
//! device.close();
//! # Ok::<(), sx1278::Error>(())
//! ```

use core::fmt;

use log::{info, trace, warn};
use regiface::{ByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::registers::{lookup, Modem, RegisterDescriptor};
use crate::transport::{Capabilities, Transport, WRITE_ACCESS};

/// Length of a register access frame: address byte plus data byte.
const FRAME_LEN: usize = 2;

/// Handle to one SX1278.
///
/// The transport is shared and must outlive the handle; the bus it opened is
/// owned by the handle and released by [`close`](Device::close) or on drop.
/// A handle is meant for a single owner; callers sharing one across threads
/// must serialize access themselves.
pub struct Device<'t, T: Transport> {
    transport: Option<&'t T>,
    bus: Option<T::Bus>,
    config: Config,
    modem: Modem,
}

impl<'t, T: Transport> Device<'t, T> {
    /// Creates an unopened handle.
    pub fn new() -> Self {
        Self {
            transport: None,
            bus: None,
            config: Config::default(),
            modem: Modem::default(),
        }
    }

    /// Opens the bus at `path` through `transport`.
    ///
    /// On success the handle holds the default [`Config`]. Nothing is written
    /// to the chip; call [`apply_config`](Device::apply_config) to do so.
    ///
    /// # Errors
    /// * `Error::MissingCapability` - the transport cannot open buses
    /// * `Error::OpenFailed` - the bus device could not be acquired or
    ///   configured
    pub fn open(transport: &'t T, path: &str) -> Result<Self> {
        let mut device = Self::new();
        device.reopen(transport, path)?;
        Ok(device)
    }

    /// Opens the bus at `path`, closing any bus the handle already holds.
    ///
    /// On failure the handle is left unopened with no transport bound.
    pub fn reopen(&mut self, transport: &'t T, path: &str) -> Result<()> {
        self.close();
        self.transport = None;
        self.config = Config::default();
        self.modem = Modem::default();

        if !transport.capabilities().contains(Capabilities::OPEN) {
            warn!("{}: transport cannot open buses", path);
            return Err(Error::MissingCapability(Capabilities::OPEN));
        }

        let bus = transport.open(path).map_err(|err| match err {
            Error::Open(kind) => Error::OpenFailed(kind),
            other => other,
        })?;
        self.transport = Some(transport);
        self.bus = Some(bus);
        info!("{}: SX1278 handle opened", path);
        Ok(())
    }

    /// Releases the bus. Further operations on the handle fail until it is
    /// reopened. Closing an unopened handle does nothing.
    pub fn close(&mut self) {
        if self.bus.take().is_some() {
            info!("SX1278 handle closed");
        }
    }

    /// Whether the handle holds an open bus.
    pub fn is_open(&self) -> bool {
        self.transport.is_some() && self.bus.is_some()
    }

    /// Configuration last applied through this handle.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Modem the handle believes is selected on the chip.
    pub fn modem(&self) -> Modem {
        self.modem
    }

    /// Describes `address` as seen by the currently selected modem.
    pub fn describe(&self, address: u8) -> Option<&'static RegisterDescriptor> {
        lookup(address, self.modem)
    }

    /// Consumes the handle and returns the open bus, if any.
    pub fn release(mut self) -> Option<T::Bus> {
        self.bus.take()
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub(crate) fn set_modem(&mut self, modem: Modem) {
        self.modem = modem;
    }

    /// Resolves the transport and bus for an operation needing `capability`.
    /// `unopened` is reported when a transport is bound but the bus is closed.
    fn bound(&mut self, capability: Capabilities, unopened: Error) -> Result<(&'t T, &mut T::Bus)> {
        let transport = self.transport.ok_or(Error::NullArgument)?;
        if !transport.capabilities().contains(capability) {
            return Err(Error::MissingCapability(capability));
        }
        let bus = self.bus.as_mut().ok_or(unopened)?;
        Ok((transport, bus))
    }

    /// Pulses the chip's reset line.
    ///
    /// All registers return to their power-on values, which selects the
    /// FSK/OOK modem; the cached configuration is kept so that it can be
    /// re-applied.
    ///
    /// # Errors
    /// * `Error::NullArgument` - the handle is not open
    /// * `Error::MissingCapability` - the transport has no reset line
    /// * `Error::ResetFailed` - the reset line could not be driven
    pub fn reset(&mut self) -> Result<()> {
        let (transport, bus) = self.bound(Capabilities::RESET, Error::NullArgument)?;
        if !transport.reset(bus) {
            warn!("reset signal failed");
            return Err(Error::ResetFailed);
        }
        self.modem = Modem::Fsk;
        Ok(())
    }

    /// Performs a raw read transfer through the transport.
    ///
    /// The bundled SPI transports treat the first byte of `data` as an
    /// SX127x address byte and clear its write-access bit (bit 7) before
    /// clocking the frame out; the remaining bytes pass unchanged.
    ///
    /// Returns the number of bytes transferred, which may legitimately be 0.
    pub fn read(&mut self, data: &mut [u8]) -> Result<usize> {
        let (transport, bus) = self.bound(Capabilities::READ, Error::NullArgument)?;
        transport.read(bus, data)
    }

    /// Performs a raw write transfer through the transport.
    ///
    /// The bundled SPI transports treat the first byte of `data` as an
    /// SX127x address byte and set its write-access bit (bit 7), so
    /// `[0x01, 0x81]` goes out as `[0x81, 0x81]`; the remaining bytes pass
    /// unchanged.
    ///
    /// Returns the number of bytes transferred, which may legitimately be 0.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let (transport, bus) = self.bound(Capabilities::WRITE, Error::NullArgument)?;
        transport.write(bus, data)
    }

    /// Writes one register byte as the frame `[address, value]`.
    ///
    /// # Errors
    /// * `Error::NullArgument` - no transport is bound
    /// * `Error::NotOpen` - the bus was closed
    /// * `Error::ShortTransfer` - the transport wrote fewer than two bytes
    pub fn write_register_byte(&mut self, address: u8, value: u8) -> Result<()> {
        let (transport, bus) = self.bound(Capabilities::WRITE, Error::NotOpen)?;

        let frame = [address, value];
        let written = transport.write(bus, &frame)?;
        if written < FRAME_LEN {
            warn!("register {:#04x}: wrote {} of {} bytes", address, written, FRAME_LEN);
            return Err(Error::ShortTransfer {
                expected: FRAME_LEN,
                actual: written,
            });
        }

        trace!("write {:#04x} <- {:#04x}", address, value);
        Ok(())
    }

    /// Reads one register byte.
    ///
    /// The frame `[address & 0x7F, 0x00]` is exchanged full-duplex; the chip shifts
    /// the register value out while the dummy byte is clocked in, so the
    /// payload is the second byte received.
    ///
    /// # Errors
    /// * `Error::NullArgument` - no transport is bound
    /// * `Error::NotOpen` - the bus was closed
    /// * `Error::ShortTransfer` - the transport read fewer than two bytes
    pub fn read_register_byte(&mut self, address: u8) -> Result<u8> {
        let (transport, bus) = self.bound(Capabilities::READ, Error::NotOpen)?;

        let mut frame = [address & !WRITE_ACCESS, 0x00];
        let read = transport.read(bus, &mut frame)?;
        if read < FRAME_LEN {
            warn!("register {:#04x}: read {} of {} bytes", address, read, FRAME_LEN);
            return Err(Error::ShortTransfer {
                expected: FRAME_LEN,
                actual: read,
            });
        }

        trace!("read {:#04x} -> {:#04x}", address, frame[1]);
        Ok(frame[1])
    }

    /// Read-modify-write of one register byte: the bits in `mask` are cleared,
    /// `bits` is OR-ed in and the result written back.
    ///
    /// Returns the value written.
    pub fn modify_register_byte(&mut self, address: u8, mask: u8, bits: u8) -> Result<u8> {
        let current = self.read_register_byte(address)?;
        let value = (current & !mask) | bits;
        self.write_register_byte(address, value)?;
        Ok(value)
    }

    /// Reads a typed register.
    ///
    /// A register spanning several bytes is read one byte at a time from
    /// consecutive addresses starting at `R::id()`.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * any error of [`read_register_byte`](Device::read_register_byte)
    /// * `Error::Register` - the bytes do not decode to `R`
    pub fn read_register<R>(&mut self) -> Result<R>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();
        let bytes: &mut [u8] = raw_value.as_mut();
        for (offset, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_register_byte(R::id().wrapping_add(offset as u8))?;
        }

        R::from_bytes(raw_value).map_err(|_| Error::Register)
    }

    /// Writes a typed register.
    ///
    /// A register spanning several bytes is written one byte at a time to
    /// consecutive addresses starting at `R::id()`, most significant first.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing WritableRegister with u8 ID
    pub fn write_register<R>(&mut self, register: R) -> Result<()>
    where
        R: WritableRegister<IdType = u8>,
    {
        let raw_value = register.to_bytes().map_err(|_| Error::Register)?;
        let bytes: &[u8] = raw_value.as_ref();
        for (offset, byte) in bytes.iter().enumerate() {
            self.write_register_byte(R::id().wrapping_add(offset as u8), *byte)?;
        }
        Ok(())
    }
}

impl<'t, T: Transport> Default for Device<'t, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, T: Transport> fmt::Debug for Device<'t, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("open", &self.is_open())
            .field("modem", &self.modem)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "spidev")]
impl Device<'static, crate::transport::SpidevTransport> {
    /// Opens the spidev node at `path` with the default SPI transport
    /// (mode 3, 8-bit words, 100 kHz).
    pub fn open_spidev(path: &str) -> Result<Self> {
        Self::open(&crate::transport::spi::DEFAULT_TRANSPORT, path)
    }
}
