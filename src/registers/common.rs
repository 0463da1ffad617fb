//! Registers shared by the FSK/OOK and LoRa modems
//!
//! This module contains the registers the driver touches regardless of the
//! selected modem:
//! - Operating mode and modem selection
//! - RF carrier frequency
//! - Power amplifier configuration
//! - Silicon version
//!
//! Registers are modelled as wrappers around the raw byte so that a
//! read-modify-write only changes the field being set.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Crystal oscillator frequency in Hz.
pub const FXOSC_HZ: f64 = 32_000_000.0;

/// Frequency synthesizer step is FXOSC / 2^19.
const FRF_SHIFT: u32 = 19;

/// Transceiver modes selected by bits 2:0 of RegOpMode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Lowest power; the only mode in which the modem may be switched
    Sleep = 0x00,
    /// Oscillator and baseband blocks running
    Standby = 0x01,
    /// Frequency synthesis at the TX frequency
    FsTx = 0x02,
    /// Transmit
    Tx = 0x03,
    /// Frequency synthesis at the RX frequency
    FsRx = 0x04,
    /// Continuous receive
    RxContinuous = 0x05,
    /// Single receive, returns to standby after a packet or timeout
    RxSingle = 0x06,
    /// Channel activity detection
    Cad = 0x07,
}

impl Mode {
    /// Bits of RegOpMode holding the mode.
    pub const MASK: u8 = 0x07;

    /// Decodes the mode field of a RegOpMode value.
    pub fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0x00 => Self::Sleep,
            0x01 => Self::Standby,
            0x02 => Self::FsTx,
            0x03 => Self::Tx,
            0x04 => Self::FsRx,
            0x05 => Self::RxContinuous,
            0x06 => Self::RxSingle,
            _ => Self::Cad,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Operating mode register (address: 0x01)
///
/// Selects the modem and the transceiver mode.
///
/// # Important Notes
/// - LongRangeMode (bit 7) can only be changed while in sleep mode
/// - Bits 6:3 differ between modems and are preserved by every setter
/// - Resets to 0x01: FSK/OOK modem, standby
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct OpMode {
    bits: u8,
}

impl OpMode {
    pub const ADDRESS: u8 = 0x01;

    /// LongRangeMode bit: set for LoRa, clear for FSK/OOK.
    pub const LONG_RANGE_MODE: u8 = 0x80;

    pub fn from_raw(bits: u8) -> Self {
        Self { bits }
    }

    pub fn raw(self) -> u8 {
        self.bits
    }

    pub fn mode(self) -> Mode {
        Mode::from_bits(self.bits)
    }

    /// Replaces bits 2:0, leaving the rest untouched.
    pub fn with_mode(self, mode: Mode) -> Self {
        Self {
            bits: (self.bits & !Mode::MASK) | mode.bits(),
        }
    }

    /// Whether the LoRa modem is selected.
    pub fn long_range(self) -> bool {
        self.bits & Self::LONG_RANGE_MODE != 0
    }

    /// Replaces bit 7, leaving the rest untouched.
    pub fn with_long_range(self, lora: bool) -> Self {
        let bits = self.bits & !Self::LONG_RANGE_MODE;
        Self {
            bits: if lora {
                bits | Self::LONG_RANGE_MODE
            } else {
                bits
            },
        }
    }
}

impl Default for OpMode {
    fn default() -> Self {
        Self { bits: 0x01 }
    }
}

/// RF carrier frequency registers (addresses: 0x06 - 0x08)
///
/// 24-bit synthesizer word, most significant byte first. The carrier
/// frequency is `frf * FXOSC / 2^19`, a step of about 61 Hz.
///
/// # Important Notes
/// - The frequency only changes once the least significant byte is written,
///   so the three bytes must be written MSB, MID, LSB
/// - Resets to 0x6C8000, i.e. 434 MHz
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Frf {
    /// 24-bit synthesizer value
    pub value: u32,
}

impl Frf {
    /// Largest value the 24-bit register holds.
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Synthesizer word for a carrier frequency, rounded to the nearest step.
    pub fn from_hz(hz: f64) -> Self {
        let steps = (hz * f64::from(1u32 << FRF_SHIFT) / FXOSC_HZ).round();
        Self {
            value: (steps as u32).min(Self::MAX),
        }
    }

    /// Carrier frequency the register selects.
    pub fn to_hz(self) -> f64 {
        f64::from(self.value) * FXOSC_HZ / f64::from(1u32 << FRF_SHIFT)
    }
}

impl Default for Frf {
    fn default() -> Self {
        Self { value: 0x6C_8000 }
    }
}

/// PA selection and output power register (address: 0x09)
///
/// - Bit 7: PaSelect, 0 = RFO pin (up to +14 dBm), 1 = PA_BOOST pin (up to +20 dBm)
/// - Bits 6:4: MaxPower, Pmax = 10.8 + 0.6 * MaxPower dBm
/// - Bits 3:0: OutputPower
///
/// On PA_BOOST, Pout = 17 - (15 - OutputPower) dBm. On RFO,
/// Pout = Pmax - (15 - OutputPower) dBm.
#[register(0x09u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaConfig {
    /// Route the PA to the PA_BOOST pin
    pub pa_boost: bool,
    /// MaxPower field, 0-7
    pub max_power: u8,
    /// OutputPower field, 0-15
    pub output_power: u8,
}

impl Default for PaConfig {
    fn default() -> Self {
        Self {
            pa_boost: false,
            max_power: 0x04,
            output_power: 0x0F,
        }
    }
}

/// High power PA DAC register (address: 0x4D)
///
/// Enables the +20 dBm option on PA_BOOST. Only the low three bits are
/// significant; the upper bits must keep their reset value.
#[register(0x4Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub enum PaDac {
    /// Default PA setting (0x84)
    Default,
    /// +20 dBm on PA_BOOST when OutputPower = 15 (0x87)
    HighPower,
}

impl PaDac {
    /// Decodes the low three bits; anything but 0x07 runs the default PA.
    pub fn from_byte(value: u8) -> Self {
        match value & 0x07 {
            0x07 => Self::HighPower,
            _ => Self::Default,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Default => 0x84,
            Self::HighPower => 0x87,
        }
    }
}

impl Default for PaDac {
    fn default() -> Self {
        Self::Default
    }
}

/// Silicon version register (address: 0x42)
///
/// Read-only. Bits 7:4 hold the full revision, bits 3:0 the metal mask
/// revision. The SX1278 reports 0x12.
#[register(0x42u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Version {
    pub value: u8,
}

impl Version {
    /// Version reported by production SX1276/77/78 silicon.
    pub const SX1278: u8 = 0x12;
}

impl FromByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { bits: bytes[0] })
    }
}

impl ToByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits])
    }
}

impl FromByteArray for Frf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            value: u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        })
    }
}

impl ToByteArray for Frf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [_, msb, mid, lsb] = self.value.to_be_bytes();
        Ok([msb, mid, lsb])
    }
}

impl FromByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            pa_boost: bytes[0] & 0x80 != 0,
            max_power: (bytes[0] >> 4) & 0x07,
            output_power: bytes[0] & 0x0F,
        })
    }
}

impl ToByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(if self.pa_boost { 0x80 } else { 0x00 })
            | ((self.max_power & 0x07) << 4)
            | (self.output_power & 0x0F)])
    }
}

impl FromByteArray for PaDac {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_byte(bytes[0]))
    }
}

impl ToByteArray for PaDac {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.to_byte()])
    }
}

impl FromByteArray for Version {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}
