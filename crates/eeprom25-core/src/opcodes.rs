//! 25-series SPI EEPROM opcodes
//!
//! This module defines the command set shared by classic 25-series serial
//! EEPROMs (25LC/25AA/M95 families). The address phase of READ and WRITE
//! is a fixed 16-bit field transmitted high byte first, regardless of the
//! actual device capacity.

// ============================================================================
// Write control
// ============================================================================

/// Write Enable - sets the write enable latch, required before WRITE
pub const WREN: u8 = 0x06;
/// Write Disable - clears the write enable latch
pub const WRDI: u8 = 0x04;

// ============================================================================
// Status register operations
// ============================================================================

/// Read Status Register
pub const RDSR: u8 = 0x05;
/// Write Status Register (block-protect configuration)
pub const WRSR: u8 = 0x01;

// ============================================================================
// Memory array operations
// ============================================================================

/// Read Data - 16-bit address, streams until deselect
pub const READ: u8 = 0x03;
/// Write Data - 16-bit address, up to one page of data
pub const WRITE: u8 = 0x02;

// ============================================================================
// Status register bit definitions
// ============================================================================

/// Status Register: Write In Progress
pub const SR_WIP: u8 = 0x01;
/// Status Register: Write Enable Latch
pub const SR_WEL: u8 = 0x02;
/// Status Register: Block Protect bit 0
pub const SR_BP0: u8 = 0x04;
/// Status Register: Block Protect bit 1
pub const SR_BP1: u8 = 0x08;

/// Filler byte clocked out while the device drives the data line
pub const FILL: u8 = 0x00;
