mod common;

use common::MockTransport;
use sx1278::{
    Bandwidth, CodeRate, Config, Device, Error, Mode, Modem, OutputPower, SpreadingFactor,
};

#[test]
fn sleep_preserves_upper_op_mode_bits() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    for initial in 0..=u8::MAX {
        mock.set_reg(0x01, initial);
        device.set_sleep_mode().unwrap();
        assert_eq!(mock.reg(0x01), initial & 0xF8, "initial {:#04x}", initial);
    }
}

#[test]
fn standby_sets_mode_bits_only() {
    let mock = MockTransport::new();
    mock.set_reg(0x01, 0x85);
    let mut device = Device::open(&mock, "bus").unwrap();

    device.set_standby_mode().unwrap();
    assert_eq!(mock.reg(0x01), 0x81);
    assert_eq!(device.op_mode().unwrap().mode(), Mode::Standby);
}

#[test]
fn lora_mode_sleeps_before_switching_modem() {
    let mock = MockTransport::new();
    mock.set_reg(0x01, 0x01);
    let mut device = Device::open(&mock, "bus").unwrap();
    device.reset().unwrap();
    assert_eq!(device.modem(), Modem::Fsk);

    device.set_lora_mode().unwrap();
    assert_eq!(mock.written_frames(), vec![vec![0x01, 0x00], vec![0x01, 0x80]]);
    assert_eq!(device.modem(), Modem::Lora);

    let op_mode = device.op_mode().unwrap();
    assert!(op_mode.long_range());
    assert_eq!(op_mode.mode(), Mode::Sleep);
}

#[test]
fn frequency_is_written_msb_first() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    device.set_frequency(433.92e6).unwrap();
    assert_eq!(
        mock.written_frames(),
        vec![vec![0x06, 0x6C], vec![0x07, 0x7A], vec![0x08, 0xE1]]
    );
    assert_eq!(device.config().frequency, 433.92e6);
}

#[test]
fn out_of_range_frequency_writes_nothing() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    assert_eq!(device.set_frequency(100e6).unwrap_err(), Error::OutOfRange);
    assert_eq!(device.set_frequency(868e6).unwrap_err(), Error::OutOfRange);
    assert!(mock.written_frames().is_empty());
    assert_eq!(device.config().frequency, 433.92e6);
}

#[test]
fn apply_config_programs_documented_defaults() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    device.apply_config().unwrap();

    assert_eq!(
        mock.written_addresses(),
        vec![
            0x01, 0x01, 0x06, 0x07, 0x08, 0x1D, 0x1D, 0x1D, 0x1E, 0x1E, 0x26, 0x39, 0x09, 0x4D,
            0x01
        ]
    );
    assert_eq!(mock.reg(0x01), 0x81);
    assert_eq!(
        [mock.reg(0x06), mock.reg(0x07), mock.reg(0x08)],
        [0x6C, 0x7A, 0xE1]
    );
    assert_eq!(mock.reg(0x1D), 0x69);
    assert_eq!(mock.reg(0x1E) & 0xF0, 0x70);
    assert_ne!(mock.reg(0x1E) & 0x04, 0);
    assert_ne!(mock.reg(0x26) & 0x04, 0);
    assert_eq!(mock.reg(0x39), 0xAA);
    assert_eq!(mock.reg(0x09), 0xFF);
    assert_eq!(mock.reg(0x4D), 0x87);
}

#[test]
fn configure_caches_applied_settings() {
    let mock = MockTransport::with_reset_values();
    let mut device = Device::open(&mock, "bus").unwrap();

    let config = Config {
        output_power: OutputPower::Op14,
        bandwidth: Bandwidth::Bw125,
        code_rate: CodeRate::Cr5,
        spreading_factor: SpreadingFactor::Sf9,
        frequency: 434e6,
        crc: false,
        agc: false,
        implicit_header: false,
        sync_word: 0x34,
    };
    device.configure(&config).unwrap();

    assert_eq!(*device.config(), config);
    assert_eq!(mock.reg(0x1D), 0x72);
    assert_eq!(mock.reg(0x1E) & 0xF4, 0x90);
    assert_eq!(mock.reg(0x26) & 0x04, 0);
    assert_eq!(mock.reg(0x39), 0x34);
    assert_eq!(mock.reg(0x09), 0xFC);
    assert_eq!(mock.reg(0x4D), 0x84);
    assert_eq!(mock.reg(0x01), 0x81);
}

#[test]
fn failed_step_stops_the_sequence() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    // Sixth write is the bandwidth update.
    mock.fail_write_at.set(Some(5));
    let config = Config {
        frequency: 434e6,
        bandwidth: Bandwidth::Bw250,
        ..Config::default()
    };
    assert_eq!(device.configure(&config).unwrap_err(), Error::Bus);

    assert_eq!(mock.written_addresses(), vec![0x01, 0x01, 0x06, 0x07, 0x08]);
    assert_eq!(device.config().frequency, 434e6);
    assert_eq!(device.config().bandwidth, Bandwidth::Bw62_5);
    assert_eq!(device.config().sync_word, 0xAA);
}

#[test]
fn failed_sleep_leaves_modem_unselected() {
    let mock = MockTransport::new();
    mock.set_reg(0x01, 0x01);
    let mut device = Device::open(&mock, "bus").unwrap();
    device.reset().unwrap();

    mock.fail_write_at.set(Some(0));
    assert_eq!(device.set_lora_mode().unwrap_err(), Error::Bus);

    assert!(mock.written_frames().is_empty());
    assert_eq!(mock.calls.write.get(), 1);
    assert_eq!(mock.reg(0x01) & 0x80, 0);
    assert_eq!(device.modem(), Modem::Fsk);

    assert_eq!(device.apply_config().unwrap_err(), Error::Bus);
    assert_eq!(mock.calls.write.get(), 2);
    assert_eq!(device.modem(), Modem::Fsk);
}

#[test]
fn sequences_on_closed_handle_fail_before_bus_access() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();
    device.close();

    let calls = mock.calls.total();
    assert_eq!(device.apply_config().unwrap_err(), Error::NotOpen);
    assert_eq!(device.set_sync_word(0x34).unwrap_err(), Error::NotOpen);
    assert_eq!(mock.calls.total(), calls);
    assert_eq!(device.config().sync_word, 0xAA);
}

#[test]
fn output_power_writes_pa_config_then_dac() {
    let mock = MockTransport::new();
    let mut device = Device::open(&mock, "bus").unwrap();

    device.set_output_power(OutputPower::Op1).unwrap();
    assert_eq!(
        mock.written_frames(),
        vec![vec![0x09, 0x71], vec![0x4D, 0x84]]
    );
    assert_eq!(device.config().output_power, OutputPower::Op1);
}
