//! Inter-stage records and the one-slot stage register.
//!
//! This module defines the payloads carried across the two stage boundaries
//! this core touches, and the generic latch between them:
//! 1. **Fetch Bundle:** The IF/ID transfer record (pc + instruction word).
//! 2. **Micro-op:** The fully resolved ID/EX payload (operands + control
//!    groups, faults as data).
//! 3. **Stage Register:** The one-slot buffer implementing the ready/valid
//!    handshake's capture/hold/consume behavior.

use crate::common::error::Fault;
use crate::core::pipeline::signals::{CsrCtrl, ExCtrl, MemCtrl, WbCtrl};

/// The IF/ID pipeline transfer record.
///
/// Created by fetch, owned exclusively by the stage register until consumed
/// by decode; overwritten only under the capture condition, never partially
/// updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchBundle {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
}

/// The ID/EX payload: a fully resolved micro-op.
///
/// Created fresh each cycle by the decode unit, consumed exactly once by the
/// next stage; no backward mutation. Error-like conditions travel in
/// `fault` — a faulted micro-op carries inert control fields and is for a
/// downstream trap path to interpret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MicroOp {
    /// Resolved operand A (register value, PC, or zero/zimm).
    pub op_a: u32,
    /// Resolved operand B (register value, immediate, or CSR read result).
    pub op_b: u32,
    /// Resolved operand C (store data or control-transfer target).
    pub op_c: u32,
    /// Destination register index.
    pub rd: usize,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Execute-group control fields.
    pub ex: ExCtrl,
    /// Memory-group control fields.
    pub mem: MemCtrl,
    /// CSR/system-group control fields.
    pub csr: CsrCtrl,
    /// Write-back/PC-update-group control fields.
    pub wb: WbCtrl,
    /// Decode-detected fault, if any.
    pub fault: Option<Fault>,
}

/// A one-slot stage register between two pipeline stages.
///
/// Holds a single record plus an occupancy flag. Capture, hold, and consume
/// are decided once per clock edge:
/// - capture when the upstream payload is valid AND this stage is ready;
/// - otherwise empty the slot if the held record was consumed downstream;
/// - otherwise hold unchanged (stall semantics — the record survives any
///   number of held cycles with exactly one capture once ready re-asserts).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageRegister<T> {
    data: T,
    occupied: bool,
}

impl<T: Clone + Default> StageRegister<T> {
    /// Creates an empty stage register (the reset state).
    pub fn new() -> Self {
        Self {
            data: T::default(),
            occupied: false,
        }
    }

    /// The held record, if the slot is occupied.
    pub fn get(&self) -> Option<&T> {
        self.occupied.then_some(&self.data)
    }

    /// Whether the slot currently holds a record.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Applies one clock edge.
    ///
    /// `upstream` is the producer's payload for this cycle (`None` when the
    /// producer's `valid` is deasserted), `ready` is this stage's local
    /// readiness, and `consumed` reports whether the held record was
    /// transferred downstream this cycle.
    pub fn clock(&mut self, upstream: Option<&T>, ready: bool, consumed: bool) {
        match upstream {
            Some(record) if ready => {
                self.data = record.clone();
                self.occupied = true;
            }
            _ if consumed => self.occupied = false,
            _ => {}
        }
    }

    /// Reset: clears the slot to a defined empty value.
    pub fn reset(&mut self) {
        self.data = T::default();
        self.occupied = false;
    }
}
