//! Register definitions for the SX1278 radio
//! Reconstructed from the SX1276/77/78/79 datasheet, rev. 7

mod common;
mod lora;
mod map;

pub use common::*;
pub use lora::*;
pub use map::*;
