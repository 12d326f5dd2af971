//! Error types for eeprom25-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
///
/// Range violations are the only faults detected before any bus activity.
/// The transport layer has no fault detection of its own, so the only
/// other error the driver can observe is a device that never clears its
/// Write-In-Progress bit within the configured poll budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested byte range extends beyond the device capacity
    AddressOutOfBounds,
    /// Device did not clear Write-In-Progress within the poll budget
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressOutOfBounds => write!(f, "address out of bounds"),
            Self::Timeout => write!(f, "device busy: write-in-progress did not clear"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
