//! The memory interface the chip fetches through.
//!
//! The VIC-II sees 16 KiB of the 64 KiB address space at a time; two bank
//! select bits held by the second CIA choose which quarter. The bank bits
//! are sampled at every access because software can flip them mid-frame.
//! Color RAM is a separate 4-bit wide memory read in parallel with the main
//! bus during c-accesses.

/// Read-only view of system memory as seen by the video chip.
///
/// Implementations resolve character-ROM shadowing and RAM-under-ROM the
/// way the host machine wires them; the chip itself only produces 14-bit
/// addresses and the bank it read from the sister chip.
pub trait VicBus {
    /// Read a byte from the VIC's 16 KiB view.
    ///
    /// `bank` is the 16 KiB bank number (0-3); `addr` is a 14-bit address
    /// within the bank.
    fn read(&self, bank: u8, addr: u16) -> u8;

    /// Read a nybble from the 1 KiB color RAM (low 4 bits are significant).
    fn read_color_ram(&self, addr: u16) -> u8;

    /// Current bank select bits from the second CIA (0-3).
    fn bank(&self) -> u8;
}
