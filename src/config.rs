//! Radio configuration
//!
//! [`Config`] is the driver's view of the chip's RF setup. [`Device::open`]
//! starts from [`Config::default`]; the sequencer setters update a field only
//! after the matching registers were written, and
//! [`Device::apply_config`] pushes the whole struct to the chip.
//!
//! [`Device::open`]: crate::Device::open
//! [`Device::apply_config`]: crate::Device::apply_config

/// Output power class, named by the target output in dBm.
///
/// `Op0` and `Op1` use the RFO pin; `Op2` to `Op17` use PA_BOOST; `Op20`
/// additionally enables the high power PA DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPower {
    Op0 = 0,
    Op1 = 1,
    Op2 = 2,
    Op3 = 3,
    Op4 = 4,
    Op5 = 5,
    Op6 = 6,
    Op7 = 7,
    Op8 = 8,
    Op9 = 9,
    Op10 = 10,
    Op11 = 11,
    Op12 = 12,
    Op13 = 13,
    Op14 = 14,
    Op15 = 15,
    Op16 = 16,
    Op17 = 17,
    Op20 = 20,
}

impl OutputPower {
    /// Highest output power the SX1278 supports.
    pub const MAX: Self = Self::Op20;

    /// Output power in dBm.
    pub fn dbm(self) -> u8 {
        self as u8
    }
}

/// LoRa signal bandwidth, encoded for bits 7:4 of RegModemConfig1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    /// 7.8 kHz
    Bw7_8 = 0x00,
    /// 10.4 kHz
    Bw10_4 = 0x10,
    /// 15.6 kHz
    Bw15_6 = 0x20,
    /// 20.8 kHz
    Bw20_8 = 0x30,
    /// 31.25 kHz
    Bw31_25 = 0x40,
    /// 41.7 kHz
    Bw41_7 = 0x50,
    /// 62.5 kHz
    Bw62_5 = 0x60,
    /// 125 kHz
    Bw125 = 0x70,
    /// 250 kHz
    Bw250 = 0x80,
    /// 500 kHz
    Bw500 = 0x90,
}

impl Bandwidth {
    pub fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0x00 => Self::Bw7_8,
            0x10 => Self::Bw10_4,
            0x20 => Self::Bw15_6,
            0x30 => Self::Bw20_8,
            0x40 => Self::Bw31_25,
            0x50 => Self::Bw41_7,
            0x60 => Self::Bw62_5,
            0x70 => Self::Bw125,
            0x80 => Self::Bw250,
            0x90 => Self::Bw500,
            _ => return None,
        })
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Bandwidth in Hz.
    pub fn hz(self) -> u32 {
        match self {
            Self::Bw7_8 => 7_800,
            Self::Bw10_4 => 10_400,
            Self::Bw15_6 => 15_600,
            Self::Bw20_8 => 20_800,
            Self::Bw31_25 => 31_250,
            Self::Bw41_7 => 41_700,
            Self::Bw62_5 => 62_500,
            Self::Bw125 => 125_000,
            Self::Bw250 => 250_000,
            Self::Bw500 => 500_000,
        }
    }
}

/// LoRa error coding rate, encoded for bits 3:1 of RegModemConfig1.
///
/// `CrN` is the rate 4/N; `Cr8` carries the most redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodeRate {
    Cr5 = 0x02,
    Cr6 = 0x04,
    Cr7 = 0x06,
    Cr8 = 0x08,
}

impl CodeRate {
    pub fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0x02 => Self::Cr5,
            0x04 => Self::Cr6,
            0x06 => Self::Cr7,
            0x08 => Self::Cr8,
            _ => return None,
        })
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// LoRa spreading factor, encoded for bits 7:4 of RegModemConfig2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpreadingFactor {
    Sf7 = 0x70,
    Sf8 = 0x80,
    Sf9 = 0x90,
    Sf10 = 0xA0,
    Sf11 = 0xB0,
    Sf12 = 0xC0,
}

impl SpreadingFactor {
    pub fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0x70 => Self::Sf7,
            0x80 => Self::Sf8,
            0x90 => Self::Sf9,
            0xA0 => Self::Sf10,
            0xB0 => Self::Sf11,
            0xC0 => Self::Sf12,
            _ => return None,
        })
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Chips per symbol exponent.
    pub fn value(self) -> u8 {
        self.bits() >> 4
    }
}

/// Lowest carrier the SX1278 synthesizer covers, in Hz.
pub const MIN_FREQUENCY_HZ: f64 = 137e6;
/// Highest carrier the SX1278 synthesizer covers, in Hz.
pub const MAX_FREQUENCY_HZ: f64 = 525e6;

/// RF configuration of one device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Transmit power class
    pub output_power: OutputPower,
    /// Signal bandwidth
    pub bandwidth: Bandwidth,
    /// Error coding rate
    pub code_rate: CodeRate,
    /// Spreading factor
    pub spreading_factor: SpreadingFactor,
    /// Carrier frequency in Hz
    pub frequency: f64,
    /// Generate and check the payload CRC
    pub crc: bool,
    /// Let the AGC pick the LNA gain
    pub agc: bool,
    /// Implicit header mode
    pub implicit_header: bool,
    /// LoRa sync word
    pub sync_word: u8,
}

impl Default for Config {
    /// Maximum power, 62.5 kHz, 4/8, SF7 at 433.92 MHz with CRC, AGC and an
    /// implicit header; sync word 0xAA.
    fn default() -> Self {
        Self {
            output_power: OutputPower::MAX,
            bandwidth: Bandwidth::Bw62_5,
            code_rate: CodeRate::Cr8,
            spreading_factor: SpreadingFactor::Sf7,
            frequency: 433.92e6,
            crc: true,
            agc: true,
            implicit_header: true,
            sync_word: 0xAA,
        }
    }
}
