//! RISC-V General-Purpose Register storage.
//!
//! This module implements the backing store for the 32 integer registers.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use crate::common::constants::NUM_REGISTERS;

/// Fill pattern for registers whose post-reset contents are unspecified.
///
/// Reset forces only x0 and the PC; x1..x31 power up with whatever the
/// flops held. The fill is deterministic junk, rotated per index so no two
/// registers alias — it is deliberately not zero.
const UNDEF_FILL: u32 = 0xDEAD_BEEF;

/// General-purpose register storage.
///
/// Register `x0` is hardwired to zero: reads of index 0 return 0 and writes
/// to index 0 are ignored.
#[derive(Clone, Debug)]
pub struct Gpr {
    regs: [u32; NUM_REGISTERS],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates register storage with unspecified (non-zero) contents in
    /// x1..x31, matching the no-reset-on-general-registers hardware
    /// tradeoff.
    pub fn new() -> Self {
        let mut regs = [0u32; NUM_REGISTERS];
        for (i, reg) in regs.iter_mut().enumerate().skip(1) {
            *reg = UNDEF_FILL.rotate_left(i as u32);
        }
        Self { regs }
    }

    /// Reads a register value. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register. Writes to `x0` are ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Dumps the contents of all general-purpose registers to stderr.
    ///
    /// Displays registers in pairs with hexadecimal formatting for
    /// debugging purposes.
    pub fn dump(&self) {
        for i in (0..NUM_REGISTERS).step_by(2) {
            eprintln!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1)
            );
        }
    }
}
