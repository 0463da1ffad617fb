//! Linux spidev transport
//!
//! Drives the SX1278 through a `/dev/spidevB.C` character device. This is the
//! transport [`Device::open_spidev`](crate::Device::open_spidev) binds.
//!
//! The SX1278 has no software-visible reset line on a bare spidev node, so this
//! transport does not advertise [`Capabilities::RESET`]. Boards that wire the
//! NRESET pin to a GPIO can use [`HalTransport`](super::HalTransport) instead.

use std::io::{self, Write};

use log::{debug, error};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};

use super::{mark_read, write_frame, Capabilities, Transport};
use crate::error::{Error, OpenErrorKind, Result};

/// SPI clock polarity and phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL = 0, CPHA = 0
    Mode0,
    /// CPOL = 0, CPHA = 1
    Mode1,
    /// CPOL = 1, CPHA = 0
    Mode2,
    /// CPOL = 1, CPHA = 1
    Mode3,
}

impl SpiMode {
    fn flags(self) -> SpiModeFlags {
        match self {
            Self::Mode0 => SpiModeFlags::SPI_MODE_0,
            Self::Mode1 => SpiModeFlags::SPI_MODE_1,
            Self::Mode2 => SpiModeFlags::SPI_MODE_2,
            Self::Mode3 => SpiModeFlags::SPI_MODE_3,
        }
    }
}

/// Bus parameters negotiated when the device node is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock polarity and phase
    pub mode: SpiMode,
    /// Word size in bits
    pub bits_per_word: u8,
    /// Maximum clock speed in Hz
    pub max_speed_hz: u32,
}

impl SpiConfig {
    /// Mode 3, 8-bit words, 100 kHz clock.
    pub const DEFAULT: Self = Self {
        mode: SpiMode::Mode3,
        bits_per_word: 8,
        max_speed_hz: 100_000,
    };

    fn options(&self) -> SpidevOptions {
        SpidevOptions::new()
            .bits_per_word(self.bits_per_word)
            .max_speed_hz(self.max_speed_hz)
            .mode(self.mode.flags())
            .build()
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Transport over a Linux spidev node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpidevTransport {
    config: SpiConfig,
}

impl SpidevTransport {
    /// Creates a transport that negotiates `config` on every open.
    pub const fn new(config: SpiConfig) -> Self {
        Self { config }
    }

    /// Bus parameters used when opening.
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }
}

impl Default for SpidevTransport {
    fn default() -> Self {
        Self::new(SpiConfig::DEFAULT)
    }
}

/// Process-wide transport bound by [`Device::open_spidev`](crate::Device::open_spidev).
pub static DEFAULT_TRANSPORT: SpidevTransport = SpidevTransport::new(SpiConfig::DEFAULT);

fn open_error(path: &str, what: &str, err: io::Error) -> Error {
    error!("{}: {}: {}", path, what, err);
    Error::Open(OpenErrorKind::from(err.kind()))
}

impl Transport for SpidevTransport {
    type Bus = Spidev;

    fn capabilities(&self) -> Capabilities {
        Capabilities::OPEN | Capabilities::READ | Capabilities::WRITE
    }

    fn open(&self, path: &str) -> Result<Spidev> {
        let mut spi = Spidev::open(path).map_err(|e| open_error(path, "can't open device", e))?;

        // `spi` is dropped, and the descriptor closed, if negotiation fails.
        spi.configure(&self.config.options())
            .map_err(|e| open_error(path, "can't configure bus", e))?;

        debug!(
            "{}: opened ({:?}, {} bits, {} Hz)",
            path, self.config.mode, self.config.bits_per_word, self.config.max_speed_hz
        );
        Ok(spi)
    }

    fn read(&self, bus: &mut Spidev, data: &mut [u8]) -> Result<usize> {
        let mut tx = data.to_vec();
        mark_read(&mut tx);

        let mut transfer = SpidevTransfer::read_write(&tx, data);
        bus.transfer(&mut transfer).map_err(|e| {
            error!("spidev read transfer failed: {}", e);
            Error::Bus
        })?;
        Ok(tx.len())
    }

    fn write(&self, bus: &mut Spidev, data: &[u8]) -> Result<usize> {
        bus.write(&write_frame(data)).map_err(|e| {
            error!("spidev write failed: {}", e);
            Error::Bus
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_chip_bus_parameters() {
        let config = SpiConfig::default();
        assert_eq!(config.mode, SpiMode::Mode3);
        assert_eq!(config.bits_per_word, 8);
        assert_eq!(config.max_speed_hz, 100_000);
        assert_eq!(DEFAULT_TRANSPORT.config(), &config);
    }

    #[test]
    fn advertises_no_reset() {
        let caps = SpidevTransport::default().capabilities();
        assert!(caps.contains(Capabilities::OPEN | Capabilities::READ | Capabilities::WRITE));
        assert!(!caps.contains(Capabilities::RESET));
    }

    #[test]
    fn missing_node_reports_not_found() {
        match SpidevTransport::default().open("/dev/spidev-does-not-exist") {
            Ok(_) => panic!("opened a missing device node"),
            Err(err) => assert_eq!(err, Error::Open(OpenErrorKind::NotFound)),
        }
    }
}
