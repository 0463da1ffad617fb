//! Mode and configuration sequences
//!
//! Higher-level operations composed of ordered register accesses. Every
//! sequence issues its accesses in the order written here and stops at the
//! first failing step, returning that step's error. Steps already completed
//! are not rolled back: after an error the chip may be partially configured,
//! and callers should re-apply the configuration before trusting it.
//!
//! Mode changes are read-modify-writes of RegOpMode so that bits owned by
//! other settings (modem selection, LowFrequencyModeOn, FSK modulation type)
//! survive.
//!
//! # Important Notes
//! - The modem (LoRa vs FSK/OOK) may only be switched in sleep mode, so
//!   [`Device::set_lora_mode`] always enters sleep first
//! - Frequency and modem parameters are best changed in sleep or standby

use log::debug;

use crate::config::{
    Bandwidth, CodeRate, Config, OutputPower, SpreadingFactor, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ,
};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::registers::{
    Frf, Mode, ModemConfig1, ModemConfig2, ModemConfig3, Modem, OpMode, PaConfig, PaDac, SyncWord,
    Version,
};
use crate::transport::Transport;

impl<'t, T: Transport> Device<'t, T> {
    /// Reads RegOpMode.
    pub fn op_mode(&mut self) -> Result<OpMode> {
        self.read_register()
    }

    /// Switches the transceiver mode, preserving every other RegOpMode bit.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        debug!("set mode {:?}", mode);
        self.modify_register_byte(OpMode::ADDRESS, Mode::MASK, mode.bits())?;
        Ok(())
    }

    /// Enters sleep mode.
    pub fn set_sleep_mode(&mut self) -> Result<()> {
        self.set_mode(Mode::Sleep)
    }

    /// Enters standby mode.
    pub fn set_standby_mode(&mut self) -> Result<()> {
        self.set_mode(Mode::Standby)
    }

    /// Selects the LoRa modem.
    ///
    /// The chip only accepts a modem change while asleep, so this first
    /// enters sleep mode, then sets LongRangeMode. The chip is left asleep.
    pub fn set_lora_mode(&mut self) -> Result<()> {
        self.set_sleep_mode()?;
        debug!("select LoRa modem");
        self.modify_register_byte(
            OpMode::ADDRESS,
            OpMode::LONG_RANGE_MODE,
            OpMode::LONG_RANGE_MODE,
        )?;
        self.set_modem(Modem::Lora);
        Ok(())
    }

    /// Sets the carrier frequency in Hz.
    ///
    /// RegFrfMsb, RegFrfMid and RegFrfLsb are written in that order; the
    /// synthesizer picks up the new value on the last write.
    ///
    /// # Errors
    /// * `Error::OutOfRange` - `hz` is outside 137 - 525 MHz
    pub fn set_frequency(&mut self, hz: f64) -> Result<()> {
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&hz) {
            return Err(Error::OutOfRange);
        }
        let frf = Frf::from_hz(hz);
        debug!("set frequency {} Hz (frf {:#08x})", hz, frf.value);
        self.write_register(frf)?;
        self.config_mut().frequency = hz;
        Ok(())
    }

    /// Sets the signal bandwidth.
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<()> {
        debug!("set bandwidth {:?}", bandwidth);
        let reg: ModemConfig1 = self.read_register()?;
        self.write_register(reg.with_bandwidth(bandwidth))?;
        self.config_mut().bandwidth = bandwidth;
        Ok(())
    }

    /// Sets the error coding rate.
    pub fn set_code_rate(&mut self, code_rate: CodeRate) -> Result<()> {
        debug!("set code rate {:?}", code_rate);
        let reg: ModemConfig1 = self.read_register()?;
        self.write_register(reg.with_code_rate(code_rate))?;
        self.config_mut().code_rate = code_rate;
        Ok(())
    }

    /// Selects implicit or explicit header mode.
    pub fn set_implicit_header(&mut self, implicit: bool) -> Result<()> {
        debug!("set implicit header {}", implicit);
        let reg: ModemConfig1 = self.read_register()?;
        self.write_register(reg.with_implicit_header(implicit))?;
        self.config_mut().implicit_header = implicit;
        Ok(())
    }

    /// Sets the spreading factor.
    pub fn set_spreading_factor(&mut self, sf: SpreadingFactor) -> Result<()> {
        debug!("set spreading factor {:?}", sf);
        let reg: ModemConfig2 = self.read_register()?;
        self.write_register(reg.with_spreading_factor(sf))?;
        self.config_mut().spreading_factor = sf;
        Ok(())
    }

    /// Enables or disables the payload CRC.
    pub fn set_crc(&mut self, crc: bool) -> Result<()> {
        debug!("set crc {}", crc);
        let reg: ModemConfig2 = self.read_register()?;
        self.write_register(reg.with_crc(crc))?;
        self.config_mut().crc = crc;
        Ok(())
    }

    /// Enables or disables automatic gain control.
    pub fn set_agc(&mut self, agc: bool) -> Result<()> {
        debug!("set agc {}", agc);
        let reg: ModemConfig3 = self.read_register()?;
        self.write_register(reg.with_agc(agc))?;
        self.config_mut().agc = agc;
        Ok(())
    }

    /// Sets the LoRa sync word.
    pub fn set_sync_word(&mut self, sync_word: u8) -> Result<()> {
        debug!("set sync word {:#04x}", sync_word);
        self.write_register(SyncWord { value: sync_word })?;
        self.config_mut().sync_word = sync_word;
        Ok(())
    }

    /// Sets the transmit power.
    ///
    /// RegPaConfig is written first, then RegPaDac. `Op20` routes the PA to
    /// PA_BOOST and enables the high power DAC; every other class leaves the
    /// DAC at its default.
    pub fn set_output_power(&mut self, power: OutputPower) -> Result<()> {
        debug!("set output power {:?}", power);
        let (pa_config, pa_dac) = pa_settings(power);
        self.write_register(pa_config)?;
        self.write_register(pa_dac)?;
        self.config_mut().output_power = power;
        Ok(())
    }

    /// Reads the silicon version (0x12 on SX1278).
    pub fn version(&mut self) -> Result<u8> {
        let version: Version = self.read_register()?;
        Ok(version.value)
    }

    /// Writes the cached configuration to the chip.
    ///
    /// Sequence: sleep, LoRa modem, frequency, bandwidth, code rate, header
    /// mode, spreading factor, CRC, AGC, sync word, output power, standby.
    pub fn apply_config(&mut self) -> Result<()> {
        let config = *self.config();
        self.configure(&config)
    }

    /// Writes `config` to the chip using the same sequence as
    /// [`apply_config`](Device::apply_config).
    pub fn configure(&mut self, config: &Config) -> Result<()> {
        self.set_lora_mode()?;
        self.set_frequency(config.frequency)?;
        self.set_bandwidth(config.bandwidth)?;
        self.set_code_rate(config.code_rate)?;
        self.set_implicit_header(config.implicit_header)?;
        self.set_spreading_factor(config.spreading_factor)?;
        self.set_crc(config.crc)?;
        self.set_agc(config.agc)?;
        self.set_sync_word(config.sync_word)?;
        self.set_output_power(config.output_power)?;
        self.set_standby_mode()
    }
}

/// RegPaConfig and RegPaDac values for an output power class.
fn pa_settings(power: OutputPower) -> (PaConfig, PaDac) {
    match power {
        OutputPower::Op20 => (
            PaConfig {
                pa_boost: true,
                max_power: 0x07,
                output_power: 0x0F,
            },
            PaDac::HighPower,
        ),
        // RFO with Pmax = 15 dBm: Pout = OutputPower
        OutputPower::Op0 | OutputPower::Op1 => (
            PaConfig {
                pa_boost: false,
                max_power: 0x07,
                output_power: power.dbm(),
            },
            PaDac::Default,
        ),
        // PA_BOOST: Pout = 2 + OutputPower
        _ => (
            PaConfig {
                pa_boost: true,
                max_power: 0x07,
                output_power: power.dbm() - 2,
            },
            PaDac::Default,
        ),
    }
}
