#![cfg_attr(not(feature = "std"), no_std)]

//! # Morse Core
//!
//! International Morse Code for embedded systems.
//! Packs the ITU table into one byte per character and keys it onto a
//! binary output (LED, buzzer, transmitter keying line) with blocking,
//! unit-accurate timing.

pub mod types;
pub mod table;
pub mod hal;
pub mod writer;


pub use types::*;
pub use table::*;
pub use hal::*;
pub use writer::*;

/// Morse library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 250 ms dot
pub fn default_config() -> MorseConfig {
    MorseConfig::default()
}
