//! Control and Status Register (CSR) file, read path.
//!
//! This module implements the CSR collaborator the decode core consults. It
//! provides:
//! 1. **Address Definitions:** Constants for the machine-id register set.
//! 2. **Register Storage:** The `CsrFile` struct holding the 4K CSR space.
//! 3. **Read Access:** Same-cycle reads; the write path belongs to a later
//!    pipeline stage and is not modeled here.

use crate::config::Config;

/// Machine vendor ID CSR address.
pub const MVENDORID: u32 = 0xF11;

/// Machine architecture ID CSR address.
pub const MARCHID: u32 = 0xF12;

/// Machine implementation ID CSR address.
pub const MIMPID: u32 = 0xF13;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;

/// MISA value for this core: MXL=32, base integer ISA.
const MISA_RV32I: u32 = 0x4000_0100;

/// Number of addressable CSRs (12-bit address space).
const CSR_SPACE: usize = 4096;

/// Index mask for the 12-bit CSR address.
const CSR_ADDR_MASK: u32 = 0xFFF;

/// Control and Status Register file.
///
/// Exposed to the decode core as a read-only store with no latency beyond
/// the current cycle. CSR reads do not participate in the dependency
/// scoreboard: a read is always ready.
pub struct CsrFile {
    regs: Box<[u32; CSR_SPACE]>,
}

impl std::fmt::Debug for CsrFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrFile")
            .field("mhartid", &self.read(MHARTID))
            .field("misa", &self.read(MISA))
            .finish_non_exhaustive()
    }
}

impl CsrFile {
    /// Creates a CSR file with the machine-id set populated from `config`.
    pub fn new(config: &Config) -> Self {
        let mut regs = Box::new([0u32; CSR_SPACE]);
        regs[MISA as usize] = MISA_RV32I;
        regs[MHARTID as usize] = config.hart_id;
        // MVENDORID/MARCHID/MIMPID read as zero: unimplemented ids.
        Self { regs }
    }

    /// Reads a CSR value. Unimplemented addresses read as zero.
    pub fn read(&self, addr: u32) -> u32 {
        self.regs[(addr & CSR_ADDR_MASK) as usize]
    }

    /// Forces a CSR value, bypassing the (unmodeled) write path.
    ///
    /// Debug/verification side channel, not part of the operational
    /// contract.
    pub fn force_write(&mut self, addr: u32, value: u32) {
        self.regs[(addr & CSR_ADDR_MASK) as usize] = value;
    }
}
