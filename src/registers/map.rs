//! Static register map
//!
//! Describes every addressable SX1278 register with its power-on reset value
//! and the value it resets to in FSK/OOK mode. Addresses 0x0D through 0x3F are
//! dual-purpose: the same address names a different register depending on
//! whether the chip is in FSK/OOK or LoRa mode, so each of those addresses has
//! one descriptor per [`Modem`]. Registers shared by both modes carry
//! [`Bank::Common`].
//!
//! Reset values of FSK/OOK and shared registers follow the SX1276/77/78/79
//! datasheet, rev. 7, table 41. LoRa registers take their values from the
//! LoRa register table (section 6.4); having no separate FSK/OOK default,
//! they carry the LoRa value in both columns. Read-only registers without a
//! meaningful reset value are listed as `0x00`.

/// Modem selected by the LongRangeMode bit of RegOpMode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modem {
    /// FSK/OOK modem
    Fsk,
    /// LoRa modem
    #[default]
    Lora,
}

/// Which modems a descriptor applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Same register in both modes
    Common,
    /// Only meaningful in FSK/OOK mode
    Fsk,
    /// Only meaningful in LoRa mode
    Lora,
}

impl Bank {
    fn serves(self, modem: Modem) -> bool {
        matches!(
            (self, modem),
            (Self::Common, _) | (Self::Fsk, Modem::Fsk) | (Self::Lora, Modem::Lora)
        )
    }
}

/// Static description of one chip register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDescriptor {
    /// Register address
    pub address: u8,
    /// Datasheet name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Value after power-on reset
    pub por_default: u8,
    /// Value after reset while in FSK/OOK mode; equal to `por_default` for
    /// LoRa registers
    pub fsk_default: u8,
    /// Modems the register exists in
    pub bank: Bank,
}

const fn reg(
    address: u8,
    bank: Bank,
    name: &'static str,
    por_default: u8,
    fsk_default: u8,
    description: &'static str,
) -> RegisterDescriptor {
    RegisterDescriptor {
        address,
        name,
        description,
        por_default,
        fsk_default,
        bank,
    }
}

use Bank::{Common, Fsk, Lora};

/// Every register the SX1278 exposes, sorted by address.
pub static REGISTERS: &[RegisterDescriptor] = &[
    reg(0x00, Common, "RegFifo", 0x00, 0x00, "FIFO read/write access"),
    reg(0x01, Common, "RegOpMode", 0x01, 0x01, "Operating mode and LoRa/FSK selection"),
    reg(0x02, Fsk, "RegBitrateMsb", 0x1A, 0x1A, "Bit rate setting, most significant bits"),
    reg(0x03, Fsk, "RegBitrateLsb", 0x0B, 0x0B, "Bit rate setting, least significant bits"),
    reg(0x04, Fsk, "RegFdevMsb", 0x00, 0x00, "Frequency deviation, most significant bits"),
    reg(0x05, Fsk, "RegFdevLsb", 0x52, 0x52, "Frequency deviation, least significant bits"),
    reg(0x06, Common, "RegFrfMsb", 0x6C, 0x6C, "RF carrier frequency, most significant bits"),
    reg(0x07, Common, "RegFrfMid", 0x80, 0x80, "RF carrier frequency, intermediate bits"),
    reg(0x08, Common, "RegFrfLsb", 0x00, 0x00, "RF carrier frequency, least significant bits"),
    reg(0x09, Common, "RegPaConfig", 0x4F, 0x4F, "PA selection and output power control"),
    reg(0x0A, Common, "RegPaRamp", 0x09, 0x09, "PA ramp time, low phase noise PLL"),
    reg(0x0B, Common, "RegOcp", 0x2B, 0x2B, "Over current protection control"),
    reg(0x0C, Common, "RegLna", 0x20, 0x20, "LNA settings"),
    reg(0x0D, Fsk, "RegRxConfig", 0x08, 0x0E, "AFC, AGC and receiver trigger control"),
    reg(0x0D, Lora, "RegFifoAddrPtr", 0x00, 0x00, "FIFO SPI pointer"),
    reg(0x0E, Fsk, "RegRssiConfig", 0x02, 0x02, "RSSI smoothing and offset"),
    reg(0x0E, Lora, "RegFifoTxBaseAddr", 0x80, 0x80, "Start TX data"),
    reg(0x0F, Fsk, "RegRssiCollision", 0x0A, 0x0A, "RSSI collision detector"),
    reg(0x0F, Lora, "RegFifoRxBaseAddr", 0x00, 0x00, "Start RX data"),
    reg(0x10, Fsk, "RegRssiThresh", 0xFF, 0xFF, "RSSI threshold control"),
    reg(0x10, Lora, "RegFifoRxCurrentAddr", 0x00, 0x00, "Start address of last packet received"),
    reg(0x11, Fsk, "RegRssiValue", 0x00, 0x00, "RSSI value in dBm"),
    reg(0x11, Lora, "RegIrqFlagsMask", 0x00, 0x00, "Optional IRQ flag mask"),
    reg(0x12, Fsk, "RegRxBw", 0x15, 0x15, "Channel filter bandwidth control"),
    reg(0x12, Lora, "RegIrqFlags", 0x00, 0x00, "IRQ flags"),
    reg(0x13, Fsk, "RegAfcBw", 0x0B, 0x0B, "AFC channel filter bandwidth"),
    reg(0x13, Lora, "RegRxNbBytes", 0x00, 0x00, "Number of received bytes"),
    reg(0x14, Fsk, "RegOokPeak", 0x28, 0x28, "OOK demodulator selection and control in peak mode"),
    reg(0x14, Lora, "RegRxHeaderCntValueMsb", 0x00, 0x00, "Number of valid headers received, MSB"),
    reg(0x15, Fsk, "RegOokFix", 0x0C, 0x0C, "Fixed threshold of the OOK demodulator"),
    reg(0x15, Lora, "RegRxHeaderCntValueLsb", 0x00, 0x00, "Number of valid headers received, LSB"),
    reg(0x16, Fsk, "RegOokAvg", 0x12, 0x12, "Average of the OOK demodulator"),
    reg(0x16, Lora, "RegRxPacketCntValueMsb", 0x00, 0x00, "Number of valid packets received, MSB"),
    reg(0x17, Fsk, "Reserved17", 0x47, 0x47, "Reserved"),
    reg(0x17, Lora, "RegRxPacketCntValueLsb", 0x00, 0x00, "Number of valid packets received, LSB"),
    reg(0x18, Fsk, "Reserved18", 0x32, 0x32, "Reserved"),
    reg(0x18, Lora, "RegModemStat", 0x10, 0x10, "Live LoRa modem status"),
    reg(0x19, Fsk, "Reserved19", 0x3E, 0x3E, "Reserved"),
    reg(0x19, Lora, "RegPktSnrValue", 0x00, 0x00, "Estimation of last packet SNR"),
    reg(0x1A, Fsk, "RegAfcFei", 0x00, 0x00, "AFC and FEI control"),
    reg(0x1A, Lora, "RegPktRssiValue", 0x00, 0x00, "RSSI of last packet"),
    reg(0x1B, Fsk, "RegAfcMsb", 0x00, 0x00, "Frequency correction value of the AFC, MSB"),
    reg(0x1B, Lora, "RegRssiValue", 0x00, 0x00, "Current RSSI"),
    reg(0x1C, Fsk, "RegAfcLsb", 0x00, 0x00, "Frequency correction value of the AFC, LSB"),
    reg(0x1C, Lora, "RegHopChannel", 0x00, 0x00, "FHSS start channel"),
    reg(0x1D, Fsk, "RegFeiMsb", 0x00, 0x00, "Frequency error indicator, MSB"),
    reg(0x1D, Lora, "RegModemConfig1", 0x72, 0x72, "Bandwidth, coding rate and header mode"),
    reg(0x1E, Fsk, "RegFeiLsb", 0x00, 0x00, "Frequency error indicator, LSB"),
    reg(0x1E, Lora, "RegModemConfig2", 0x70, 0x70, "Spreading factor, TX continuous mode and CRC"),
    reg(0x1F, Fsk, "RegPreambleDetect", 0x40, 0xAA, "Preamble detector settings"),
    reg(0x1F, Lora, "RegSymbTimeoutLsb", 0x64, 0x64, "Receiver timeout value, LSB"),
    reg(0x20, Fsk, "RegRxTimeout1", 0x00, 0x00, "Timeout between RX request and RSSI detection"),
    reg(0x20, Lora, "RegPreambleMsb", 0x00, 0x00, "Preamble length, MSB"),
    reg(0x21, Fsk, "RegRxTimeout2", 0x00, 0x00, "Timeout between RSSI detection and PayloadReady"),
    reg(0x21, Lora, "RegPreambleLsb", 0x08, 0x08, "Preamble length, LSB"),
    reg(0x22, Fsk, "RegRxTimeout3", 0x00, 0x00, "Timeout between RSSI detection and SyncAddress"),
    reg(0x22, Lora, "RegPayloadLength", 0x01, 0x01, "Payload length in implicit header mode"),
    reg(0x23, Fsk, "RegRxDelay", 0x00, 0x00, "Delay between RX cycles"),
    reg(0x23, Lora, "RegMaxPayloadLength", 0xFF, 0xFF, "Maximum payload length"),
    reg(0x24, Fsk, "RegOsc", 0x07, 0x05, "RC oscillator settings, CLKOUT frequency"),
    reg(0x24, Lora, "RegHopPeriod", 0x00, 0x00, "FHSS hop period"),
    reg(0x25, Fsk, "RegPreambleMsb", 0x00, 0x00, "Preamble length, MSB"),
    reg(0x25, Lora, "RegFifoRxByteAddr", 0x00, 0x00, "Address of last byte written in FIFO"),
    reg(0x26, Fsk, "RegPreambleLsb", 0x03, 0x03, "Preamble length, LSB"),
    reg(0x26, Lora, "RegModemConfig3", 0x04, 0x04, "Low data rate optimization and AGC"),
    reg(0x27, Fsk, "RegSyncConfig", 0x93, 0x93, "Sync word recognition control"),
    reg(0x28, Fsk, "RegSyncValue1", 0x55, 0x55, "Sync word byte 1"),
    reg(0x28, Lora, "RegFeiMsb", 0x00, 0x00, "Estimated frequency error, MSB"),
    reg(0x29, Fsk, "RegSyncValue2", 0x55, 0x55, "Sync word byte 2"),
    reg(0x29, Lora, "RegFeiMid", 0x00, 0x00, "Estimated frequency error, middle bits"),
    reg(0x2A, Fsk, "RegSyncValue3", 0x55, 0x55, "Sync word byte 3"),
    reg(0x2A, Lora, "RegFeiLsb", 0x00, 0x00, "Estimated frequency error, LSB"),
    reg(0x2B, Fsk, "RegSyncValue4", 0x55, 0x55, "Sync word byte 4"),
    reg(0x2C, Fsk, "RegSyncValue5", 0x55, 0x55, "Sync word byte 5"),
    reg(0x2C, Lora, "RegRssiWideband", 0x00, 0x00, "Wideband RSSI measurement"),
    reg(0x2D, Fsk, "RegSyncValue6", 0x55, 0x55, "Sync word byte 6"),
    reg(0x2E, Fsk, "RegSyncValue7", 0x55, 0x55, "Sync word byte 7"),
    reg(0x2F, Fsk, "RegSyncValue8", 0x55, 0x55, "Sync word byte 8"),
    reg(0x2F, Lora, "RegIfFreq2", 0x45, 0x45, "IF frequency setting, upper byte"),
    reg(0x30, Fsk, "RegPacketConfig1", 0x90, 0x90, "Packet mode settings"),
    reg(0x30, Lora, "RegIfFreq1", 0x55, 0x55, "IF frequency setting, lower byte"),
    reg(0x31, Fsk, "RegPacketConfig2", 0x40, 0x40, "Packet mode settings"),
    reg(0x31, Lora, "RegDetectOptimize", 0xC3, 0xC3, "LoRa detection optimize for SF6"),
    reg(0x32, Fsk, "RegPayloadLength", 0x40, 0x40, "Payload length setting"),
    reg(0x33, Fsk, "RegNodeAdrs", 0x00, 0x00, "Node address"),
    reg(0x33, Lora, "RegInvertIQ", 0x27, 0x27, "Invert LoRa I and Q signals"),
    reg(0x34, Fsk, "RegBroadcastAdrs", 0x00, 0x00, "Broadcast address"),
    reg(0x35, Fsk, "RegFifoThresh", 0x0F, 0x8F, "FIFO threshold, TX start condition"),
    reg(0x36, Fsk, "RegSeqConfig1", 0x00, 0x00, "Top level sequencer settings"),
    reg(0x36, Lora, "RegHighBwOptimize1", 0x03, 0x03, "Sensitivity optimization for 500 kHz bandwidth"),
    reg(0x37, Fsk, "RegSeqConfig2", 0x00, 0x00, "Top level sequencer settings"),
    reg(0x37, Lora, "RegDetectionThreshold", 0x0A, 0x0A, "LoRa detection threshold for SF6"),
    reg(0x38, Fsk, "RegTimerResol", 0x00, 0x00, "Timer 1 and 2 resolution control"),
    reg(0x39, Fsk, "RegTimer1Coef", 0xF5, 0xF5, "Timer 1 setting"),
    reg(0x39, Lora, "RegSyncWord", 0x12, 0x12, "LoRa sync word"),
    reg(0x3A, Fsk, "RegTimer2Coef", 0x20, 0x20, "Timer 2 setting"),
    reg(0x3A, Lora, "RegHighBwOptimize2", 0x52, 0x52, "Sensitivity optimization for 500 kHz bandwidth"),
    reg(0x3B, Fsk, "RegImageCal", 0x82, 0x02, "Image calibration engine control"),
    reg(0x3B, Lora, "RegInvertIQ2", 0x1D, 0x1D, "Optimize for inverted IQ"),
    reg(0x3C, Fsk, "RegTemp", 0x00, 0x00, "Temperature sensor value"),
    reg(0x3D, Fsk, "RegLowBat", 0x02, 0x02, "Low battery indicator settings"),
    reg(0x3E, Fsk, "RegIrqFlags1", 0x80, 0x80, "Status register: PLL lock state, timeout, RSSI"),
    reg(0x3F, Fsk, "RegIrqFlags2", 0x40, 0x40, "Status register: FIFO handling flags, low battery"),
    reg(0x40, Common, "RegDioMapping1", 0x00, 0x00, "Mapping of pins DIO0 to DIO3"),
    reg(0x41, Common, "RegDioMapping2", 0x00, 0x00, "Mapping of pins DIO4 and DIO5, ClkOut frequency"),
    reg(0x42, Common, "RegVersion", 0x12, 0x12, "Semtech ID relating the silicon revision"),
    reg(0x44, Fsk, "RegPllHop", 0x2D, 0x2D, "Control the fast frequency hopping mode"),
    reg(0x4B, Common, "RegTcxo", 0x09, 0x09, "TCXO or XTAL input setting"),
    reg(0x4D, Common, "RegPaDac", 0x84, 0x84, "Higher power settings of the PA"),
    reg(0x5B, Common, "RegFormerTemp", 0x00, 0x00, "Stored temperature during the former IQ calibration"),
    reg(0x5D, Fsk, "RegBitRateFrac", 0x00, 0x00, "Fractional part in the bit rate division ratio"),
    reg(0x61, Common, "RegAgcRef", 0x13, 0x13, "Adjustment of the AGC thresholds"),
    reg(0x62, Common, "RegAgcThresh1", 0x0E, 0x0E, "Adjustment of the AGC thresholds"),
    reg(0x63, Common, "RegAgcThresh2", 0x5B, 0x5B, "Adjustment of the AGC thresholds"),
    reg(0x64, Common, "RegAgcThresh3", 0xDB, 0xDB, "Adjustment of the AGC thresholds"),
    reg(0x70, Common, "RegPll", 0xD0, 0xD0, "Control of the PLL bandwidth"),
];

/// Looks up the register at `address` as seen by `modem`.
///
/// Returns `None` for addresses with no documented register in that mode;
/// such addresses are still reachable as raw byte slots.
pub fn lookup(address: u8, modem: Modem) -> Option<&'static RegisterDescriptor> {
    REGISTERS
        .iter()
        .find(|reg| reg.address == address && reg.bank.serves(modem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{ModemConfig1, ModemConfig2, ModemConfig3, SyncWord, Version};

    #[test]
    fn lookup_is_total_and_deterministic() {
        for address in 0..=u8::MAX {
            for modem in [Modem::Fsk, Modem::Lora] {
                let first = lookup(address, modem);
                assert_eq!(first, lookup(address, modem));
                if let Some(desc) = first {
                    assert_eq!(desc.address, address);
                }
            }
        }
    }

    #[test]
    fn table_is_sorted() {
        assert!(REGISTERS.windows(2).all(|w| w[0].address <= w[1].address));
    }

    #[test]
    fn address_and_modem_pairs_are_unique() {
        for modem in [Modem::Fsk, Modem::Lora] {
            for address in 0..=u8::MAX {
                let hits = REGISTERS
                    .iter()
                    .filter(|reg| reg.address == address && reg.bank.serves(modem))
                    .count();
                assert!(hits <= 1, "address {:#04x} resolves twice", address);
            }
        }
    }

    #[test]
    fn dual_purpose_addresses_resolve_per_modem() {
        assert_eq!(lookup(0x0D, Modem::Fsk).unwrap().name, "RegRxConfig");
        assert_eq!(lookup(0x0D, Modem::Lora).unwrap().name, "RegFifoAddrPtr");
        assert_eq!(lookup(0x39, Modem::Lora).unwrap().name, "RegSyncWord");
        assert_eq!(lookup(0x1D, Modem::Lora).unwrap().name, "RegModemConfig1");
    }

    #[test]
    fn shared_registers_resolve_in_both_modes() {
        let fsk = lookup(0x01, Modem::Fsk).unwrap();
        let lora = lookup(0x01, Modem::Lora).unwrap();
        assert_eq!(fsk, lora);
        assert_eq!(fsk.por_default, 0x01);
    }

    #[test]
    fn undocumented_addresses_are_absent() {
        assert!(lookup(0x43, Modem::Lora).is_none());
        assert!(lookup(0xFF, Modem::Fsk).is_none());
        assert!(lookup(0x02, Modem::Lora).is_none());
    }

    #[test]
    fn default_modem_is_lora() {
        assert_eq!(Modem::default(), Modem::Lora);
    }

    #[test]
    fn lora_defaults_agree_with_typed_registers() {
        let por = |address| lookup(address, Modem::Lora).unwrap().por_default;
        assert_eq!(por(0x39), SyncWord::default().value);
        assert_eq!(por(0x1D), ModemConfig1::default().raw());
        assert_eq!(por(0x1E), ModemConfig2::default().raw());
        assert_eq!(por(0x26), ModemConfig3::default().raw());
        assert_eq!(por(0x42), Version::SX1278);
    }

    #[test]
    fn lora_registers_carry_lora_reset_values() {
        let por = |address| lookup(address, Modem::Lora).unwrap().por_default;
        assert_eq!(por(0x0E), 0x80);
        assert_eq!(por(0x0F), 0x00);
        assert_eq!(por(0x1F), 0x64);
        assert_eq!(por(0x21), 0x08);
        assert_eq!(por(0x22), 0x01);
        assert_eq!(por(0x23), 0xFF);
        assert_eq!(por(0x24), 0x00);
        for desc in REGISTERS.iter().filter(|desc| desc.bank == Bank::Lora) {
            assert_eq!(desc.por_default, desc.fsk_default, "{}", desc.name);
        }
    }

    #[test]
    fn fsk_fifo_threshold_defaults() {
        let desc = lookup(0x35, Modem::Fsk).unwrap();
        assert_eq!((desc.por_default, desc.fsk_default), (0x0F, 0x8F));
    }

    #[test]
    fn frequency_resets_to_434_mhz() {
        let frf = [0x06, 0x07, 0x08]
            .map(|address| lookup(address, Modem::Lora).unwrap().por_default);
        assert_eq!(frf, [0x6C, 0x80, 0x00]);
    }
}
