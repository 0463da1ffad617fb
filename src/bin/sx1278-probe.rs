//! Probe an SX1278 on a spidev node.
//!
//! Opens the bus, reads the silicon version, applies the default
//! configuration and prints the resulting RegOpMode.
//!
//! Usage: `sx1278-probe [/dev/spidevB.C]`

use std::env;
use std::process::ExitCode;

use log::{error, info};
use sx1278::Device;

const DEFAULT_PATH: &str = "/dev/spidev0.0";

fn run(path: &str) -> sx1278::Result<()> {
    let mut device = Device::open_spidev(path)?;

    let version = device.version()?;
    info!("silicon version {:#04x}", version);

    device.apply_config()?;
    let op_mode = device.op_mode()?;
    println!(
        "{}: version {:#04x}, op mode {:#04x} ({:?}, LoRa: {})",
        path,
        version,
        op_mode.raw(),
        op_mode.mode(),
        op_mode.long_range()
    );
    println!("{:#?}", device.config());

    device.close();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}: {} (status {})", path, err, err.status().code());
            ExitCode::FAILURE
        }
    }
}
