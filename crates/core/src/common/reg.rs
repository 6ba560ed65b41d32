//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, the single shared mutable
//! resource of the core. It provides:
//! 1. **Storage:** The 32 general-purpose registers and the program counter.
//! 2. **Dependency Tracking:** The per-register pending-write scoreboard
//!    consulted by the decode/hazard unit.
//! 3. **Write Discipline:** A single write port; at most one register write
//!    commits per cycle, through the one `write` method.

use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::scoreboard::Scoreboard;

/// Unified register file: GPR storage, dirty-bit scoreboard, and the PC.
///
/// Reads are unclocked lookups against the contents as they stand at the
/// start of the cycle; a write committing in a cycle is visible only from
/// the following cycle. The register file performs no internal write-to-read
/// forwarding — hazard handling belongs to the decode unit, driven by the
/// dirty flags.
#[derive(Debug)]
pub struct RegisterFile {
    gpr: Gpr,
    scoreboard: Scoreboard,
    pc: u32,
    reset_vector: u32,
}

impl RegisterFile {
    /// Creates a register file with the PC at the configured reset vector.
    ///
    /// General registers x1..x31 start with unspecified contents; only x0
    /// and the PC have defined values after construction or [`reset`].
    ///
    /// [`reset`]: RegisterFile::reset
    pub fn new(config: &Config) -> Self {
        Self {
            gpr: Gpr::new(),
            scoreboard: Scoreboard::new(),
            pc: config.reset_vector,
            reset_vector: config.reset_vector,
        }
    }

    /// Reads both source operands.
    ///
    /// Pure combinational lookup on the two read ports. Index 0 reads as
    /// zero regardless of stored content.
    pub fn read(&self, rs1: usize, rs2: usize) -> (u32, u32) {
        (self.gpr.read(rs1), self.gpr.read(rs2))
    }

    /// Commits a register write at the clock edge.
    ///
    /// Ignored when `write_en` is false or `rd` is x0. This is the only
    /// mutation path for register contents: one call per cycle is the
    /// single-writer invariant.
    pub fn write(&mut self, rd: usize, value: u32, write_en: bool) {
        if write_en && rd != 0 {
            tracing::trace!("RF write x{rd} <- {value:#010x}");
            self.gpr.write(rd, value);
        }
    }

    /// Whether a register has a write pending from an earlier, not-yet-
    /// committed instruction. x0 is always clean.
    pub fn is_dirty(&self, idx: usize) -> bool {
        self.scoreboard.is_pending(idx)
    }

    /// Marks a register as having a pending writer.
    ///
    /// Collaborator entry point: called when an instruction that will write
    /// `idx` is admitted downstream. The decode unit never calls this.
    pub fn mark_dirty(&mut self, idx: usize) {
        self.scoreboard.mark(idx);
    }

    /// Clears a register's pending-write flag.
    ///
    /// Collaborator entry point: the write-back stage clears the flag no
    /// earlier than the cycle its `write` becomes visible to readers.
    pub fn clear_dirty(&mut self, idx: usize) {
        self.scoreboard.clear(idx);
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Updates the program counter.
    ///
    /// The PC updates every cycle unconditionally; holding it across a stall
    /// is the caller's responsibility, by supplying the same value again.
    pub fn pc_advance(&mut self, next_pc: u32) {
        self.pc = next_pc;
    }

    /// Reset: forces the PC to the reset vector and clears all pending-write
    /// flags. x1..x31 keep their prior (unspecified) contents.
    pub fn reset(&mut self) {
        self.pc = self.reset_vector;
        self.scoreboard.flush();
    }

    /// Dumps all general-purpose registers to stderr.
    ///
    /// Debug/verification side channel, not part of the operational contract.
    pub fn dump(&self) {
        self.gpr.dump();
    }
}
