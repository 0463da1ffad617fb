//! SX1278 Radio Driver
//!
//! This crate provides a register-level interface for the Semtech SX1278 LoRa
//! transceiver (and its SX1276/77/79 siblings, which share the register map).
//! The SX1278 is a long range, low power sub-GHz transceiver targeting the
//! 137-525 MHz bands.
//!
//! # Features
//! - Frequency range: 137-525 MHz
//! - Modulation support:
//!   - LoRa: SF7-12, BW 7.8-500kHz
//!   - FSK/OOK: up to 300kbps
//! - Output power up to +20 dBm on PA_BOOST
//! - SPI register interface with byte-level access
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Device handle and register access layer
//!   - Opens, resets and closes the bus through a transport
//!   - Frames single register byte reads and writes
//!
//! - [`registers`]: Register definitions for direct hardware access
//!   - A static map of every register, resolved per modem
//!   - Typed registers for the fields the driver configures
//!
//! - [`transport`]: Bus backends
//!   - [`transport::SpidevTransport`]: Linux spidev (feature `spidev`)
//!   - [`transport::HalTransport`]: any `embedded-hal` SPI device
//!
//! - [`sequence`]: Mode changes and RF configuration as ordered register
//!   read-modify-writes
//!
//! - [`config`]: RF configuration and modulation parameters
//!
//! # Usage
//! Typed registers use the `regiface` crate. The main entry point is the
//! [`Device`] struct, which borrows a [`transport::Transport`] and provides
//! methods for interacting with the radio.
//!
//! Configuration follows a specific sequence:
//!
//! 1. Open a [`Device`] on a bus
//! 2. Enter sleep mode and select the LoRa modem
//! 3. Set the carrier frequency
//! 4. Set modem parameters (bandwidth, coding rate, spreading factor, CRC)
//! 5. Set sync word and output power
//! 6. Enter standby, then TX or RX
//!
//! [`Device::apply_config`] performs steps 2 to 6 from the handle's [`Config`].
//!
//! # Important Notes
//! - The modem can only be switched in sleep mode
//! - Registers 0x0D-0x3F mean different things in FSK and LoRa mode
//! - A failed configuration sequence is not rolled back
//!
//! # Example
//! ```no_run
//! use sx1278::{Device, Error};
//!
//! fn configure_radio() -> Result<(), Error> {
//!     let mut device = Device::open_spidev("/dev/spidev0.0")?;
//!
//!     // Sleep, LoRa modem, 433.92 MHz, 62.5 kHz, 4/8, standby
//!     device.apply_config()?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod registers;
pub mod sequence;
pub mod transport;

pub use config::*;
pub use device::Device;
pub use error::{Error, OpenErrorKind, Result, Status};
pub use registers::*;
