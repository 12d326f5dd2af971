//! Status register polling
//!
//! The device commits writes internally after the bus transaction ends and
//! reports progress through the Write-In-Progress bit of its status
//! register. The status register is read fresh on every poll, never cached.

use crate::codec;
use crate::error::{Error, Result};
use crate::opcodes;
use crate::transport::Transport;
use bitflags::bitflags;

bitflags! {
    /// Status register contents
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Write In Progress - an internal write cycle is running
        const WIP = opcodes::SR_WIP;
        /// Write Enable Latch - set by WREN, cleared by WRDI or a write
        const WEL = opcodes::SR_WEL;
        /// Block Protect bit 0
        const BP0 = opcodes::SR_BP0;
        /// Block Protect bit 1
        const BP1 = opcodes::SR_BP1;
    }
}

/// How to wait for the Write-In-Progress bit to clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Tight poll loop with no backoff and no timeout.
    ///
    /// Matches the device protocol's liveness assumption exactly: a
    /// disconnected or faulted device hangs the caller forever.
    Strict,
    /// Poll with a fixed delay between reads, giving up after a deadline.
    Bounded {
        /// Delay between status register polls, in microseconds
        poll_delay_us: u32,
        /// Maximum time to wait before returning [`Error::Timeout`]
        timeout_us: u32,
    },
}

impl Default for WaitMode {
    /// Page writes complete in at most 5 ms on 25-series parts; poll every
    /// 10 us and give up after 10 ms.
    fn default() -> Self {
        Self::Bounded {
            poll_delay_us: 10,
            timeout_us: 10_000,
        }
    }
}

/// Check if an internal write cycle is in progress
pub fn is_busy<T: Transport>(transport: &mut T) -> bool {
    codec::read_status(transport).contains(Status::WIP)
}

/// Wait for the Write-In-Progress bit to clear
///
/// Returns as soon as a status read observes WIP clear. In
/// [`WaitMode::Bounded`] the poll budget is `timeout_us / poll_delay_us`
/// reads; exhausting it returns [`Error::Timeout`].
pub fn wait_ready<T: Transport>(transport: &mut T, mode: WaitMode) -> Result<()> {
    match mode {
        WaitMode::Strict => {
            while is_busy(transport) {}
            Ok(())
        }
        WaitMode::Bounded {
            poll_delay_us,
            timeout_us,
        } => {
            let max_polls = if poll_delay_us > 0 {
                timeout_us / poll_delay_us
            } else {
                timeout_us // Fall back to polling once per microsecond
            };

            for _ in 0..max_polls {
                if !is_busy(transport) {
                    return Ok(());
                }
                if poll_delay_us > 0 {
                    transport.delay_us(poll_delay_us);
                }
            }

            log::warn!("WIP still set after {} us", timeout_us);
            Err(Error::Timeout)
        }
    }
}
