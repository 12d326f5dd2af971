//! eeprom25-core - Driver core for 25-series SPI EEPROMs
//!
//! This crate implements the command protocol of byte-addressable SPI
//! EEPROMs using the classic 25-series command set (WREN, WRDI, RDSR,
//! READ, WRITE): opcode framing, page-bounded writes, write-in-progress
//! polling and chip-select transaction bracketing. It is `no_std`
//! compatible for use in embedded firmware.
//!
//! The driver is built on a narrow [`Transport`] seam: one full-duplex
//! byte exchange plus chip-select control. Platform code configures the
//! SPI peripheral and pins, wraps them in a `Transport` implementation
//! and hands it to [`Eeprom::new`].
//!
//! # Features
//!
//! - `std` - Enable standard library support (`std::error::Error` impls)
//!
//! # Example
//!
//! ```ignore
//! use eeprom25_core::{Eeprom, EepromConfig, Transport};
//!
//! fn store_calibration<T: Transport>(spi: T, cal: &[u8]) {
//!     let mut eeprom = Eeprom::new(spi, EepromConfig::default());
//!     match eeprom.write(0x0100, cal) {
//!         Ok(()) => {}
//!         Err(e) => log::error!("calibration write failed: {}", e),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod codec;
pub mod eeprom;
pub mod error;
pub mod opcodes;
pub mod status;
pub mod transport;

pub use eeprom::{Eeprom, EepromConfig};
pub use error::{Error, Result};
pub use status::{Status, WaitMode};
pub use transport::Transport;
