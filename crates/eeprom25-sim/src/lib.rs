//! eeprom25-sim - In-memory 25-series SPI EEPROM emulator
//!
//! This crate emulates the device side of the EEPROM wire protocol at the
//! byte level: opcode decoding, the write enable latch, the write-cycle
//! busy window and in-page address wrap. It implements the driver core's
//! [`Transport`] trait so tests and host tools can run the real driver
//! without hardware.

use eeprom25_core::opcodes;
use eeprom25_core::Transport;

/// Configuration for the simulated device
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Capacity in bytes
    pub size: usize,
    /// Page size in bytes
    pub page_size: usize,
    /// Number of status polls that report Write-In-Progress after each
    /// accepted write, before the internal cycle is considered finished
    pub write_busy_polls: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 0x4000,
            page_size: 64,
            write_busy_polls: 2,
        }
    }
}

/// Simulated 25-series SPI EEPROM
///
/// Commands take effect on deselect, like the real part latches them on
/// the chip-select edge. While an emulated write cycle is pending, every
/// command except RDSR is ignored. The MOSI bytes of every transaction
/// are recorded for protocol-level assertions.
pub struct SimEeprom {
    config: SimConfig,
    data: Vec<u8>,
    selected: bool,
    frame: Vec<u8>,
    wel: bool,
    busy: u32,
    transactions: Vec<Vec<u8>>,
}

impl SimEeprom {
    /// Create a simulated device with the given configuration
    ///
    /// EEPROM cells ship erased to 0xFF.
    pub fn new(config: SimConfig) -> Self {
        let data = vec![0xFF; config.size];
        Self {
            config,
            data,
            selected: false,
            frame: Vec::new(),
            wel: false,
            busy: 0,
            transactions: Vec::new(),
        }
    }

    /// Create a simulated device with the default configuration
    pub fn new_default() -> Self {
        Self::new(SimConfig::default())
    }

    /// Create a simulated device with pre-filled contents
    pub fn with_data(config: SimConfig, initial_data: &[u8]) -> Self {
        let mut sim = Self::new(config);
        let len = initial_data.len().min(sim.data.len());
        sim.data[..len].copy_from_slice(&initial_data[..len]);
        sim
    }

    /// Get a reference to the memory array
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the memory array
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get the configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// MOSI bytes of every completed transaction, oldest first
    pub fn transactions(&self) -> &[Vec<u8>] {
        &self.transactions
    }

    /// Forget recorded transactions
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    fn status_byte(&mut self) -> u8 {
        let mut status = 0;
        if self.busy > 0 {
            status |= opcodes::SR_WIP;
            self.busy -= 1;
        }
        if self.wel {
            status |= opcodes::SR_WEL;
        }
        status
    }

    fn frame_address(&self) -> usize {
        (usize::from(self.frame[1]) << 8) | usize::from(self.frame[2])
    }

    /// Apply the completed frame's side effects
    fn commit(&mut self, frame: &[u8]) {
        let Some(&opcode) = frame.first() else {
            return;
        };

        // During an internal write cycle only RDSR is honored
        if self.busy > 0 && opcode != opcodes::RDSR {
            log::debug!("sim: opcode 0x{:02X} ignored, write in progress", opcode);
            return;
        }

        match opcode {
            // The latch commands are only valid as bare one-byte frames
            opcodes::WREN if frame.len() == 1 => self.wel = true,
            opcodes::WRDI if frame.len() == 1 => self.wel = false,

            opcodes::WRITE if frame.len() >= 4 => {
                if !self.wel {
                    log::debug!("sim: WRITE ignored, write enable latch clear");
                    return;
                }
                let addr = (usize::from(frame[1]) << 8) | usize::from(frame[2]);
                let page_base = addr & !(self.config.page_size - 1);
                let mut offset = addr - page_base;
                for &byte in &frame[3..] {
                    self.data[page_base + offset] = byte;
                    // Real parts wrap within the addressed page
                    offset = (offset + 1) % self.config.page_size;
                }
                log::trace!("sim: wrote {} bytes @ 0x{:04X}", frame.len() - 3, addr);
                self.wel = false;
                self.busy = self.config.write_busy_polls;
            }

            // No deselect-time effects
            opcodes::RDSR | opcodes::READ => {}

            _ => log::debug!("sim: unhandled frame, opcode 0x{:02X}", opcode),
        }
    }
}

impl Transport for SimEeprom {
    fn select(&mut self) {
        assert!(!self.selected, "chip-select asserted twice");
        self.selected = true;
    }

    fn deselect(&mut self) {
        assert!(self.selected, "chip-select released while inactive");
        self.selected = false;
        let frame = std::mem::take(&mut self.frame);
        self.commit(&frame);
        self.transactions.push(frame);
    }

    fn exchange(&mut self, out: u8) -> u8 {
        assert!(self.selected, "byte exchanged outside a transaction");

        // The response is driven by the bytes received so far
        let pos = self.frame.len();
        let response = match (self.frame.first().copied(), pos) {
            (None, _) => 0xFF,
            (Some(opcodes::RDSR), _) => self.status_byte(),
            (Some(opcodes::READ), p) if p >= 3 && self.busy == 0 => {
                // Reads stream on, rolling over at the end of the array
                let addr = (self.frame_address() + (p - 3)) % self.config.size;
                self.data[addr]
            }
            _ => 0xFF,
        };

        self.frame.push(out);
        response
    }

    fn delay_us(&mut self, _us: u32) {
        // Simulated time: the busy window counts polls, not microseconds
    }
}
