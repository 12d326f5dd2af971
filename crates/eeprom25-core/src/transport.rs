//! Transport trait definition
//!
//! The driver core is written against a byte-level transport seam instead
//! of touching peripheral registers directly. Platform code owns clock and
//! pin bring-up; the driver owns the link exclusively for the duration of
//! every call through a handle it was constructed with.

/// Minimum chip-deselect time between transactions, in nanoseconds.
///
/// The device latches commands on chip-select edges and needs the select
/// line held inactive at least this long before the next assert.
/// [`Transport::deselect`] implementations must enforce it.
pub const MIN_DESELECT_NS: u32 = 50;

/// Byte-level SPI transport with chip-select control
///
/// One transaction is bracketed by [`select`](Self::select) and
/// [`deselect`](Self::deselect) and carries exactly one device command.
/// All methods block; none of them report errors because the underlying
/// hardware model has no fault detection - a wedged bus wedges the caller.
/// Implementations are expected to be handed over fully configured
/// (master mode, clock polarity/phase matching the device, pins muxed).
pub trait Transport {
    /// Drive chip-select active, opening a transaction.
    ///
    /// Implementations may also gate the peripheral enable on the select
    /// state so the link is idle-safe outside a transaction.
    fn select(&mut self);

    /// Drive chip-select inactive, closing the transaction, then hold the
    /// line idle for at least [`MIN_DESELECT_NS`].
    fn deselect(&mut self);

    /// Clock one byte out while clocking one byte in, blocking until the
    /// outgoing byte is accepted and the incoming byte is available.
    fn exchange(&mut self, out: u8) -> u8;

    /// Block for at least `us` microseconds.
    ///
    /// Sourced from a monotonic timer, not a counting loop, so timing does
    /// not depend on compiler optimization or core clock assumptions.
    fn delay_us(&mut self, us: u32);
}
