//! LoRa modem registers
//!
//! These addresses only carry the meaning given here while RegOpMode selects
//! the LoRa modem; in FSK/OOK mode the same addresses hold unrelated
//! registers (see [`lookup`](super::lookup)).

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::config::{Bandwidth, CodeRate, SpreadingFactor};

/// Modem configuration 1 (address: 0x1D)
///
/// - Bits 7:4: signal bandwidth
/// - Bits 3:1: error coding rate
/// - Bit 0: implicit header mode
#[register(0x1Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig1 {
    bits: u8,
}

impl ModemConfig1 {
    const BANDWIDTH_MASK: u8 = 0xF0;
    const CODE_RATE_MASK: u8 = 0x0E;
    const IMPLICIT_HEADER: u8 = 0x01;

    pub fn from_raw(bits: u8) -> Self {
        Self { bits }
    }

    pub fn raw(self) -> u8 {
        self.bits
    }

    pub fn bandwidth(self) -> Option<Bandwidth> {
        Bandwidth::from_bits(self.bits & Self::BANDWIDTH_MASK)
    }

    pub fn with_bandwidth(self, bandwidth: Bandwidth) -> Self {
        Self {
            bits: (self.bits & !Self::BANDWIDTH_MASK) | bandwidth.bits(),
        }
    }

    pub fn code_rate(self) -> Option<CodeRate> {
        CodeRate::from_bits(self.bits & Self::CODE_RATE_MASK)
    }

    pub fn with_code_rate(self, code_rate: CodeRate) -> Self {
        Self {
            bits: (self.bits & !Self::CODE_RATE_MASK) | code_rate.bits(),
        }
    }

    pub fn implicit_header(self) -> bool {
        self.bits & Self::IMPLICIT_HEADER != 0
    }

    pub fn with_implicit_header(self, implicit: bool) -> Self {
        Self {
            bits: (self.bits & !Self::IMPLICIT_HEADER) | u8::from(implicit),
        }
    }
}

impl Default for ModemConfig1 {
    /// 125 kHz, 4/5, explicit header
    fn default() -> Self {
        Self { bits: 0x72 }
    }
}

/// Modem configuration 2 (address: 0x1E)
///
/// - Bits 7:4: spreading factor
/// - Bit 3: TX continuous mode
/// - Bit 2: RX payload CRC on
/// - Bits 1:0: RX time-out MSB
#[register(0x1Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig2 {
    bits: u8,
}

impl ModemConfig2 {
    const SPREADING_FACTOR_MASK: u8 = 0xF0;
    const RX_PAYLOAD_CRC_ON: u8 = 0x04;

    pub fn from_raw(bits: u8) -> Self {
        Self { bits }
    }

    pub fn raw(self) -> u8 {
        self.bits
    }

    pub fn spreading_factor(self) -> Option<SpreadingFactor> {
        SpreadingFactor::from_bits(self.bits & Self::SPREADING_FACTOR_MASK)
    }

    pub fn with_spreading_factor(self, sf: SpreadingFactor) -> Self {
        Self {
            bits: (self.bits & !Self::SPREADING_FACTOR_MASK) | sf.bits(),
        }
    }

    pub fn crc(self) -> bool {
        self.bits & Self::RX_PAYLOAD_CRC_ON != 0
    }

    pub fn with_crc(self, crc: bool) -> Self {
        let bits = self.bits & !Self::RX_PAYLOAD_CRC_ON;
        Self {
            bits: if crc {
                bits | Self::RX_PAYLOAD_CRC_ON
            } else {
                bits
            },
        }
    }
}

impl Default for ModemConfig2 {
    /// SF7, CRC off
    fn default() -> Self {
        Self { bits: 0x70 }
    }
}

/// Modem configuration 3 (address: 0x26)
///
/// - Bit 3: low data rate optimize, mandatory when a symbol exceeds 16 ms
/// - Bit 2: AGC auto on; when clear the LNA gain comes from RegLna
#[register(0x26u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig3 {
    bits: u8,
}

impl ModemConfig3 {
    const LOW_DATA_RATE_OPTIMIZE: u8 = 0x08;
    const AGC_AUTO_ON: u8 = 0x04;

    pub fn from_raw(bits: u8) -> Self {
        Self { bits }
    }

    pub fn raw(self) -> u8 {
        self.bits
    }

    pub fn agc(self) -> bool {
        self.bits & Self::AGC_AUTO_ON != 0
    }

    pub fn with_agc(self, agc: bool) -> Self {
        let bits = self.bits & !Self::AGC_AUTO_ON;
        Self {
            bits: if agc { bits | Self::AGC_AUTO_ON } else { bits },
        }
    }

    pub fn low_data_rate_optimize(self) -> bool {
        self.bits & Self::LOW_DATA_RATE_OPTIMIZE != 0
    }

    pub fn with_low_data_rate_optimize(self, enabled: bool) -> Self {
        let bits = self.bits & !Self::LOW_DATA_RATE_OPTIMIZE;
        Self {
            bits: if enabled {
                bits | Self::LOW_DATA_RATE_OPTIMIZE
            } else {
                bits
            },
        }
    }
}

impl Default for ModemConfig3 {
    fn default() -> Self {
        Self { bits: 0x04 }
    }
}

/// LoRa sync word (address: 0x39)
///
/// Packets whose sync word differs are dropped by the receiver. 0x34 is
/// reserved for LoRaWAN networks.
#[register(0x39u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct SyncWord {
    pub value: u8,
}

impl Default for SyncWord {
    fn default() -> Self {
        Self { value: 0x12 }
    }
}

macro_rules! raw_byte_register {
    ($($reg:ty),+) => {
        $(
            impl FromByteArray for $reg {
                type Error = Infallible;
                type Array = [u8; 1];

                fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                    Ok(Self { bits: bytes[0] })
                }
            }

            impl ToByteArray for $reg {
                type Error = Infallible;
                type Array = [u8; 1];

                fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                    Ok([self.bits])
                }
            }
        )+
    };
}

raw_byte_register!(ModemConfig1, ModemConfig2, ModemConfig3);

impl FromByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl ToByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modem_config1_fields_are_independent() {
        let reg = ModemConfig1::default()
            .with_bandwidth(Bandwidth::Bw62_5)
            .with_code_rate(CodeRate::Cr8)
            .with_implicit_header(true);
        assert_eq!(reg.raw(), 0x69);
        assert_eq!(reg.bandwidth(), Some(Bandwidth::Bw62_5));
        assert_eq!(reg.code_rate(), Some(CodeRate::Cr8));
        assert!(reg.implicit_header());

        let explicit = reg.with_implicit_header(false);
        assert_eq!(explicit.raw(), 0x68);
    }

    #[test]
    fn modem_config1_rejects_reserved_fields() {
        let reg = ModemConfig1::from_raw(0xF0);
        assert_eq!(reg.bandwidth(), None);
        assert_eq!(reg.code_rate(), None);
    }

    #[test]
    fn modem_config2_keeps_timeout_bits() {
        let reg = ModemConfig2::from_raw(0x73)
            .with_spreading_factor(SpreadingFactor::Sf12)
            .with_crc(true);
        assert_eq!(reg.raw(), 0xC7);
        assert_eq!(reg.spreading_factor(), Some(SpreadingFactor::Sf12));
        assert!(!reg.with_crc(false).crc());
    }

    #[test]
    fn modem_config3_agc_bit() {
        let reg = ModemConfig3::from_raw(0x08).with_agc(true);
        assert_eq!(reg.raw(), 0x0C);
        assert!(reg.low_data_rate_optimize());
        assert_eq!(reg.with_low_data_rate_optimize(false).raw(), 0x04);
    }
}
