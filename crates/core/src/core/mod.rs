//! Core processor slice.
//!
//! This module contains the decode core itself: architectural state (GPRs,
//! CSRs), the IF/ID pipeline machinery, and the [`Core`] orchestrator that
//! external fetch/execute collaborators drive one clock edge at a time.

/// Architecture-specific components (GPR storage, the CSR file).
pub mod arch;

/// Instruction pipeline implementation (latch, scoreboard, signals, decode).
pub mod pipeline;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::core::arch::csr::CsrFile;
use crate::core::pipeline::decode::{self, IdStage};
use crate::core::pipeline::latch::{FetchBundle, MicroOp, StageRegister};

/// Upstream fetch payload, presented once per cycle.
///
/// While the core reports `ready = false` the producer must keep the payload
/// stable; the payload is consumed only on a cycle where both `valid` and
/// the core's readiness hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchInput {
    /// Program counter of the fetched instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Whether the payload is valid this cycle.
    pub valid: bool,
}

/// The composed instruction-decode core: register file, CSR file, and the
/// IF/ID stage register, advanced in lock-step by [`Core::clock`].
#[derive(Debug)]
pub struct Core {
    /// Architectural registers, scoreboard, and program counter.
    pub regs: RegisterFile,
    /// Read-only CSR collaborator.
    pub csrs: CsrFile,
    /// The IF/ID stage register.
    pub if_id: StageRegister<FetchBundle>,
}

impl Core {
    /// Creates a core in its post-reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(config),
            csrs: CsrFile::new(config),
            if_id: StageRegister::new(),
        }
    }

    /// Combinational view of the decode stage for the current cycle.
    ///
    /// Pure: recomputed from current latch and scoreboard state, so a
    /// stalled instruction is re-evaluated every cycle until its hazard
    /// clears. Calling this any number of times within a cycle is
    /// side-effect free.
    pub fn decode(&self, ex_ready: bool) -> IdStage {
        decode::evaluate(&self.if_id, &self.regs, &self.csrs, ex_ready)
    }

    /// Advances the core by one clock edge.
    ///
    /// Evaluates decode against start-of-cycle state, updates the IF/ID
    /// stage register under the capture condition (`fetch.valid` AND local
    /// readiness), and advances the PC — sequentially past a captured
    /// instruction, held otherwise.
    ///
    /// Returns the micro-op transferred downstream this cycle, if any. The
    /// caller owns the scoreboard discipline for its destination register.
    pub fn clock(&mut self, fetch: &FetchInput, ex_ready: bool) -> Option<MicroOp> {
        let id = self.decode(ex_ready);
        let consumed = id.uop.is_some();

        let upstream = FetchBundle {
            pc: fetch.pc,
            inst: fetch.inst,
        };
        let captured = fetch.valid && id.ready;
        self.if_id
            .clock(fetch.valid.then_some(&upstream), id.ready, consumed);

        let next_pc = if captured {
            fetch.pc.wrapping_add(INSTRUCTION_SIZE)
        } else {
            self.regs.pc()
        };
        self.regs.pc_advance(next_pc);

        id.uop
    }

    /// Reset: clears the stage register and resets the register file (PC to
    /// the reset vector, scoreboard clean). Overrides all other logic.
    pub fn reset(&mut self) {
        self.if_id.reset();
        self.regs.reset();
    }
}
