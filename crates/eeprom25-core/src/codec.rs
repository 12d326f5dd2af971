//! Command codec
//!
//! One primitive per device opcode, each implemented as a complete
//! chip-select-bracketed transaction. The enable/disable pulses around a
//! write are independent framed commands per the device's command set;
//! only the data phase shares a transaction with its opcode and address.

use crate::error::Result;
use crate::opcodes;
use crate::status::{self, Status, WaitMode};
use crate::transport::Transport;

/// Send the 16-bit address field, high byte first
fn send_address<T: Transport>(transport: &mut T, addr: u16) {
    transport.exchange((addr >> 8) as u8);
    transport.exchange(addr as u8);
}

/// Set the write enable latch
pub fn write_enable<T: Transport>(transport: &mut T) {
    transport.select();
    transport.exchange(opcodes::WREN);
    transport.deselect();
}

/// Clear the write enable latch
pub fn write_disable<T: Transport>(transport: &mut T) {
    transport.select();
    transport.exchange(opcodes::WRDI);
    transport.deselect();
}

/// Read the status register
///
/// A filler byte is clocked after the opcode to pump the response phase.
pub fn read_status<T: Transport>(transport: &mut T) -> Status {
    transport.select();
    transport.exchange(opcodes::RDSR);
    let raw = transport.exchange(opcodes::FILL);
    transport.deselect();
    Status::from_bits_truncate(raw)
}

/// Read `buf.len()` bytes starting at `addr`
///
/// One transaction: READ opcode, address, then one filler byte clocked per
/// requested byte while the device streams the array contents.
pub fn read<T: Transport>(transport: &mut T, addr: u16, buf: &mut [u8]) {
    log::trace!("read: {} bytes @ 0x{:04X}", buf.len(), addr);

    transport.select();
    transport.exchange(opcodes::READ);
    send_address(transport, addr);
    for byte in buf.iter_mut() {
        *byte = transport.exchange(opcodes::FILL);
    }
    transport.deselect();
}

/// Write up to one page of data starting at `addr`
///
/// Waits for any previous internal write cycle to finish, then issues
/// three transactions in order: WREN, the WRITE command with address and
/// data, and WRDI. The caller guarantees that `data` does not cross a
/// page boundary from `addr`; the device would silently wrap within the
/// page otherwise.
pub fn write_page<T: Transport>(
    transport: &mut T,
    addr: u16,
    data: &[u8],
    wait: WaitMode,
) -> Result<()> {
    log::trace!("page write: {} bytes @ 0x{:04X}", data.len(), addr);

    status::wait_ready(transport, wait)?;

    write_enable(transport);

    transport.select();
    transport.exchange(opcodes::WRITE);
    send_address(transport, addr);
    for &byte in data {
        transport.exchange(byte);
    }
    transport.deselect();

    write_disable(transport);

    Ok(())
}
