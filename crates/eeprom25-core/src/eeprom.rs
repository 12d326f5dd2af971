//! Public driver API
//!
//! [`Eeprom`] owns its transport exclusively, validates byte ranges before
//! any bus activity and splits writes on page boundaries. All calls are
//! blocking; concurrent use from multiple execution contexts requires
//! external mutual exclusion around the whole API.

use crate::codec;
use crate::error::{Error, Result};
use crate::status::{self, WaitMode};
use crate::transport::Transport;

/// Device geometry and poll policy
///
/// `size` and `page_size` are fixed per device variant. The defaults model
/// a 16 KiB part with 64-byte pages (25LC128-class).
#[derive(Debug, Clone)]
pub struct EepromConfig {
    /// Device capacity in bytes; valid addresses are `[0, size)`
    pub size: u32,
    /// Page size in bytes; a single write command must stay within a page
    pub page_size: u32,
    /// How to wait for the device's internal write cycle
    pub wait: WaitMode,
}

impl Default for EepromConfig {
    fn default() -> Self {
        Self {
            size: 0x4000,
            page_size: 64,
            wait: WaitMode::default(),
        }
    }
}

/// Driver handle for a 25-series SPI EEPROM
///
/// Construction replaces one-time initialization: the platform
/// collaborator configures the link and hands it over, and the driver is
/// the only owner of the chip-select line from then on.
pub struct Eeprom<T> {
    transport: T,
    config: EepromConfig,
}

impl<T: Transport> Eeprom<T> {
    /// Create a driver over an already-configured transport
    ///
    /// # Panics
    ///
    /// Geometry is a per-device-variant constant, so invalid values are a
    /// construction bug, not a runtime condition: panics if `page_size` is
    /// not a power of two or if `size` does not fit the 16-bit wire
    /// address field.
    pub fn new(transport: T, config: EepromConfig) -> Self {
        assert!(
            config.page_size.is_power_of_two(),
            "page size must be a power of two"
        );
        assert!(
            config.size > 0 && config.size <= 1 << 16,
            "capacity must fit the 16-bit address field"
        );
        Self { transport, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &EepromConfig {
        &self.config
    }

    /// Release the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Read `buf.len()` bytes starting at `addr`
    ///
    /// Fails with [`Error::AddressOutOfBounds`] before any bus activity if
    /// the range does not lie entirely within the device. Otherwise waits
    /// once for any internal write cycle to finish, then reads the whole
    /// range in one transaction.
    pub fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<()> {
        self.check_range(addr, buf.len())?;
        if buf.is_empty() {
            return Ok(());
        }

        status::wait_ready(&mut self.transport, self.config.wait)?;
        codec::read(&mut self.transport, addr as u16, buf);
        Ok(())
    }

    /// Write `data` starting at `addr`
    ///
    /// Fails with [`Error::AddressOutOfBounds`] before any bus activity if
    /// the range does not lie entirely within the device. Otherwise the
    /// request is split into page-bounded chunks, written in ascending
    /// order; each chunk waits for the previous internal write cycle
    /// before going on the bus. There is no partial-success reporting:
    /// a request is rejected up front or attempted in full.
    pub fn write(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        self.check_range(addr, data.len())?;

        let page_size = self.config.page_size as usize;
        let mut offset = 0usize;
        let mut current_addr = addr;

        while offset < data.len() {
            // Bytes until the next page boundary
            let page_offset = (current_addr as usize) % page_size;
            let bytes_to_page_end = page_size - page_offset;
            let remaining = data.len() - offset;
            let chunk_size = core::cmp::min(bytes_to_page_end, remaining);

            log::debug!(
                "write: page chunk {} bytes @ 0x{:04X}",
                chunk_size,
                current_addr
            );

            codec::write_page(
                &mut self.transport,
                current_addr as u16,
                &data[offset..offset + chunk_size],
                self.config.wait,
            )?;

            offset += chunk_size;
            current_addr += chunk_size as u32;
        }

        Ok(())
    }

    fn check_range(&self, addr: u32, len: usize) -> Result<()> {
        if addr >= self.config.size {
            return Err(Error::AddressOutOfBounds);
        }
        if u64::from(addr) + len as u64 > u64::from(self.config.size) {
            return Err(Error::AddressOutOfBounds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes;
    use crate::status::Status;
    use std::vec;
    use std::vec::Vec;

    /// A mock transport that records every transaction
    ///
    /// Responses are scripted: RDSR reports WIP for the first `busy_polls`
    /// status reads, READ streams `read_data`. Both directions of every
    /// transaction are kept so tests can assert on the exact frames.
    struct MockTransport {
        selected: bool,
        mosi: Vec<u8>,
        miso: Vec<u8>,
        transactions: Vec<(Vec<u8>, Vec<u8>)>,
        busy_polls: u32,
        status_reads: u32,
        read_data: Vec<u8>,
        delays_us: u64,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                selected: false,
                mosi: Vec::new(),
                miso: Vec::new(),
                transactions: Vec::new(),
                busy_polls: 0,
                status_reads: 0,
                read_data: Vec::new(),
                delays_us: 0,
            }
        }

        fn busy_for(busy_polls: u32) -> Self {
            Self {
                busy_polls,
                ..Self::new()
            }
        }

        /// Transactions whose opcode matches, as (address, data) pairs
        fn writes(&self) -> Vec<(u16, Vec<u8>)> {
            self.transactions
                .iter()
                .filter(|(mosi, _)| mosi[0] == opcodes::WRITE)
                .map(|(mosi, _)| {
                    let addr = (u16::from(mosi[1]) << 8) | u16::from(mosi[2]);
                    (addr, mosi[3..].to_vec())
                })
                .collect()
        }

        fn opcode_of(&self, index: usize) -> u8 {
            self.transactions[index].0[0]
        }
    }

    impl Transport for MockTransport {
        fn select(&mut self) {
            assert!(!self.selected, "select while selected");
            self.selected = true;
        }

        fn deselect(&mut self) {
            assert!(self.selected, "deselect while deselected");
            self.selected = false;
            let mosi = core::mem::take(&mut self.mosi);
            let miso = core::mem::take(&mut self.miso);
            self.transactions.push((mosi, miso));
        }

        fn exchange(&mut self, out: u8) -> u8 {
            assert!(self.selected, "exchange outside a transaction");
            let pos = self.mosi.len();
            let response = match (self.mosi.first().copied(), pos) {
                (None, _) => 0xFF,
                (Some(opcodes::RDSR), 1) => {
                    self.status_reads += 1;
                    if self.status_reads <= self.busy_polls {
                        Status::WIP.bits()
                    } else {
                        0
                    }
                }
                (Some(opcodes::READ), p) if p >= 3 => {
                    self.read_data.get(p - 3).copied().unwrap_or(0xFF)
                }
                _ => 0xFF,
            };
            self.mosi.push(out);
            self.miso.push(response);
            response
        }

        fn delay_us(&mut self, us: u32) {
            self.delays_us += u64::from(us);
        }
    }

    fn eeprom(transport: MockTransport) -> Eeprom<MockTransport> {
        Eeprom::new(transport, EepromConfig::default())
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn zero_page_size_is_rejected_at_construction() {
        Eeprom::new(
            MockTransport::new(),
            EepromConfig {
                page_size: 0,
                ..EepromConfig::default()
            },
        );
    }

    #[test]
    #[should_panic(expected = "16-bit address field")]
    fn oversized_capacity_is_rejected_at_construction() {
        Eeprom::new(
            MockTransport::new(),
            EepromConfig {
                size: 0x20000,
                ..EepromConfig::default()
            },
        );
    }

    #[test]
    fn read_out_of_range_touches_no_bus() {
        let mut dev = eeprom(MockTransport::new());
        let mut buf = [0u8; 8];

        assert_eq!(dev.read(0x4000, &mut buf), Err(Error::AddressOutOfBounds));
        assert_eq!(dev.read(0x3FFD, &mut buf), Err(Error::AddressOutOfBounds));
        // Address at capacity is rejected even for a zero-length request
        assert_eq!(dev.read(0x4000, &mut []), Err(Error::AddressOutOfBounds));
        assert_eq!(
            dev.read(u32::MAX, &mut buf),
            Err(Error::AddressOutOfBounds)
        );

        assert!(dev.release().transactions.is_empty());
    }

    #[test]
    fn write_out_of_range_touches_no_bus() {
        let mut dev = eeprom(MockTransport::new());

        assert_eq!(dev.write(0x4000, &[0]), Err(Error::AddressOutOfBounds));
        assert_eq!(
            dev.write(0x3FFF, &[0, 0]),
            Err(Error::AddressOutOfBounds)
        );

        assert!(dev.release().transactions.is_empty());
    }

    #[test]
    fn zero_length_read_in_range_is_a_no_op() {
        let mut dev = eeprom(MockTransport::new());
        dev.read(0x0100, &mut []).unwrap();
        assert!(dev.release().transactions.is_empty());
    }

    #[test]
    fn read_is_one_transaction_after_one_poll() {
        let mut transport = MockTransport::new();
        transport.read_data = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let mut dev = eeprom(transport);

        let mut buf = [0u8; 4];
        dev.read(0x0102, &mut buf).unwrap();
        assert_eq!(buf, [0xDE, 0xAD, 0xBE, 0xEF]);

        let transport = dev.release();
        assert_eq!(transport.transactions.len(), 2);
        assert_eq!(transport.opcode_of(0), opcodes::RDSR);
        // READ, address high, address low, one filler byte per data byte
        assert_eq!(
            transport.transactions[1].0,
            vec![opcodes::READ, 0x01, 0x02, 0, 0, 0, 0]
        );
    }

    #[test]
    fn address_is_sent_msb_first() {
        let mut dev = eeprom(MockTransport::new());
        dev.write(0x1234, &[0x55]).unwrap();

        let writes = dev.release().writes();
        assert_eq!(writes, vec![(0x1234, vec![0x55])]);
    }

    #[test]
    fn write_splits_at_page_boundary() {
        // 0x003D + 6 bytes crosses the page boundary at 0x0040
        let mut dev = eeprom(MockTransport::new());
        dev.write(0x003D, &[1, 2, 3, 4, 5, 6]).unwrap();

        let writes = dev.release().writes();
        assert_eq!(
            writes,
            vec![(0x003D, vec![1, 2, 3]), (0x0040, vec![4, 5, 6])]
        );
    }

    #[test]
    fn straddling_two_bytes_become_two_single_byte_writes() {
        let mut dev = eeprom(MockTransport::new());
        dev.write(63, &[0xAA, 0xBB]).unwrap();

        let writes = dev.release().writes();
        assert_eq!(writes, vec![(63, vec![0xAA]), (64, vec![0xBB])]);
    }

    #[test]
    fn aligned_full_page_is_one_write() {
        let data = [0x5A; 64];
        let mut dev = eeprom(MockTransport::new());
        dev.write(0x0040, &data).unwrap();

        let writes = dev.release().writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, 0x0040);
        assert_eq!(writes[0].1, data);
    }

    #[test]
    fn write_within_one_page_is_not_split() {
        let mut dev = eeprom(MockTransport::new());
        dev.write(0x0010, &[9; 8]).unwrap();
        assert_eq!(dev.release().writes().len(), 1);
    }

    #[test]
    fn long_write_covers_range_exactly_once_ascending() {
        let data: Vec<u8> = (0..160).map(|i| i as u8).collect();
        let mut dev = eeprom(MockTransport::new());
        dev.write(0x0000, &data).unwrap();

        let writes = dev.release().writes();
        assert_eq!(writes.len(), 3);

        let mut expected_addr = 0u16;
        let mut reassembled = Vec::new();
        for (addr, chunk) in &writes {
            assert_eq!(*addr, expected_addr);
            // Each chunk stays within a single page
            let page = u32::from(*addr) / 64;
            assert_eq!((u32::from(*addr) + chunk.len() as u32 - 1) / 64, page);
            expected_addr += chunk.len() as u16;
            reassembled.extend_from_slice(chunk);
        }
        assert_eq!(reassembled, data);
    }

    #[test]
    fn every_write_is_bracketed_and_gated_on_wip_clear() {
        let mut dev = eeprom(MockTransport::busy_for(2));
        dev.write(0x003D, &[1, 2, 3, 4, 5, 6]).unwrap();

        let transport = dev.release();
        for (i, (mosi, _)) in transport.transactions.iter().enumerate() {
            if mosi[0] != opcodes::WRITE {
                continue;
            }
            assert_eq!(transport.opcode_of(i - 1), opcodes::WREN);
            assert_eq!(transport.opcode_of(i + 1), opcodes::WRDI);

            // The nearest preceding status read must have seen WIP clear
            let (rdsr_mosi, rdsr_miso) = transport.transactions[..i - 1]
                .iter()
                .rev()
                .find(|(mosi, _)| mosi[0] == opcodes::RDSR)
                .expect("no status poll before page write");
            assert_eq!(rdsr_mosi.len(), 2);
            assert_eq!(rdsr_miso[1] & opcodes::SR_WIP, 0);
        }
    }

    #[test]
    fn busy_device_is_polled_with_backoff() {
        let mut dev = eeprom(MockTransport::busy_for(3));
        dev.write(0x0000, &[0x42]).unwrap();

        let transport = dev.release();
        // 3 busy polls, one clear poll, with a delay between each retry
        assert_eq!(transport.status_reads, 4);
        assert_eq!(transport.delays_us, 30);
    }

    #[test]
    fn stuck_device_times_out_without_writing() {
        let mut dev = Eeprom::new(
            MockTransport::busy_for(u32::MAX),
            EepromConfig {
                wait: WaitMode::Bounded {
                    poll_delay_us: 10,
                    timeout_us: 100,
                },
                ..EepromConfig::default()
            },
        );

        assert_eq!(dev.write(0x0000, &[1]), Err(Error::Timeout));
        assert!(dev.release().writes().is_empty());
    }
}
