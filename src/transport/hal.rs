//! `embedded-hal` transport
//!
//! Reaches the SX1278 through any [`SpiDevice`] implementation, optionally
//! with the chip's NRESET pin on an [`OutputPin`]. How a path maps to a bus is
//! up to the caller: the transport is built from a factory closure that turns
//! the path passed to [`Device::open`](crate::Device::open) into a [`HalBus`].
//!
//! # Example
//! ```no_run
//! use embedded_hal::spi::SpiDevice;
//! use sx1278::transport::{HalBus, HalTransport};
//! use sx1278::Device;
//!
//! fn bring_up<SPI: SpiDevice>(spi: SPI) -> Result<(), sx1278::Error> {
//!     let mut slot = Some(spi);
//!     let transport = HalTransport::new(move |_path: &str| {
//!         slot.take()
//!             .map(HalBus::new)
//!             .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
//!     });
//!     let mut device = Device::open(&transport, "spi0")?;
//!     device.set_sleep_mode()?;
//!     Ok(())
//! }
//! ```

use core::convert::Infallible;
use std::cell::RefCell;
use std::io;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{Error as _, SpiDevice};
use log::{debug, error, warn};

use super::{mark_read, write_frame, Capabilities, Transport};
use crate::error::{Error, OpenErrorKind, Result};

/// NRESET must be held low for at least 100 µs.
const RESET_PULSE_US: u32 = 100;
/// The chip is ready 5 ms after NRESET is released.
const RESET_SETTLE_MS: u32 = 5;

/// Placeholder for buses without a reset line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReset;

impl digital::ErrorType for NoReset {
    type Error = Infallible;
}

impl OutputPin for NoReset {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

impl DelayNs for NoReset {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// The chip's NRESET pin and a delay source to time the pulse.
pub struct ResetLine<RST, D> {
    pin: RST,
    delay: D,
}

impl<RST, D> ResetLine<RST, D>
where
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: RST, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Drives NRESET low, releases it and waits for the chip to come up.
    fn pulse(&mut self) -> bool {
        if self.pin.set_low().is_err() {
            return false;
        }
        self.delay.delay_us(RESET_PULSE_US);
        if self.pin.set_high().is_err() {
            return false;
        }
        self.delay.delay_ms(RESET_SETTLE_MS);
        true
    }

    /// Releases the pin and delay source.
    pub fn release(self) -> (RST, D) {
        (self.pin, self.delay)
    }
}

/// An open `embedded-hal` bus.
pub struct HalBus<SPI, RST = NoReset, D = NoReset> {
    spi: SPI,
    reset: Option<ResetLine<RST, D>>,
}

impl<SPI> HalBus<SPI> {
    /// A bus without a reset line.
    pub fn new(spi: SPI) -> Self {
        Self { spi, reset: None }
    }
}

impl<SPI, RST, D> HalBus<SPI, RST, D> {
    /// A bus whose NRESET pin is driven by `reset`.
    pub fn with_reset(spi: SPI, reset: ResetLine<RST, D>) -> Self {
        Self {
            spi,
            reset: Some(reset),
        }
    }

    /// Releases the SPI device and reset line.
    pub fn release(self) -> (SPI, Option<ResetLine<RST, D>>) {
        (self.spi, self.reset)
    }
}

/// Transport over `embedded-hal` peripherals.
///
/// The factory is called once per open. It sits behind a [`RefCell`] so that
/// factories which hand out a single peripheral (`FnMut`) can be shared as
/// `&HalTransport`.
pub struct HalTransport<F> {
    factory: RefCell<F>,
    reset: bool,
}

impl<F> HalTransport<F> {
    /// A transport whose buses have no reset line.
    pub fn new(factory: F) -> Self {
        Self {
            factory: RefCell::new(factory),
            reset: false,
        }
    }

    /// A transport whose buses carry a reset line.
    pub fn with_reset(factory: F) -> Self {
        Self {
            factory: RefCell::new(factory),
            reset: true,
        }
    }
}

impl<F, SPI, RST, D> Transport for HalTransport<F>
where
    F: FnMut(&str) -> io::Result<HalBus<SPI, RST, D>>,
    SPI: SpiDevice,
    RST: OutputPin,
    D: DelayNs,
{
    type Bus = HalBus<SPI, RST, D>;

    fn capabilities(&self) -> Capabilities {
        let caps = Capabilities::OPEN | Capabilities::READ | Capabilities::WRITE;
        if self.reset {
            caps | Capabilities::RESET
        } else {
            caps
        }
    }

    fn open(&self, path: &str) -> Result<Self::Bus> {
        let mut factory = self.factory.borrow_mut();
        let bus = (&mut *factory)(path).map_err(|e| {
            error!("{}: can't open bus: {}", path, e);
            Error::Open(OpenErrorKind::from(e.kind()))
        })?;
        debug!("{}: opened", path);
        Ok(bus)
    }

    fn reset(&self, bus: &mut Self::Bus) -> bool {
        match bus.reset.as_mut() {
            Some(line) => line.pulse(),
            None => {
                warn!("bus has no reset line");
                false
            }
        }
    }

    fn read(&self, bus: &mut Self::Bus, data: &mut [u8]) -> Result<usize> {
        mark_read(data);
        bus.spi.transfer_in_place(data).map_err(|e| {
            error!("spi read transfer failed: {:?}", e.kind());
            Error::Bus
        })?;
        Ok(data.len())
    }

    fn write(&self, bus: &mut Self::Bus, data: &[u8]) -> Result<usize> {
        let frame = write_frame(data);
        bus.spi.write(&frame).map_err(|e| {
            error!("spi write failed: {:?}", e.kind());
            Error::Bus
        })?;
        Ok(frame.len())
    }
}
