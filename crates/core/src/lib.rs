//! RISC-V instruction-decode and register-dependency core.
//!
//! This crate implements a cycle-level model of the front half of a small
//! single-issue, in-order RV32 pipeline:
//! 1. **Register File:** GPR storage, the program counter, and per-register
//!    pending-write ("dirty") tracking.
//! 2. **Stage Register:** The one-slot IF/ID buffer implementing the
//!    ready/valid handshake's hold-on-stall behavior.
//! 3. **Decode:** Bit-field extraction, control-signal classification, and
//!    operand resolution for RV32I plus CSR reads.
//! 4. **Hazard Gating:** Read-after-write detection against the scoreboard,
//!    expressed as combinational readiness recomputed every cycle.
//!
//! Fetch, execute, and write-back are external collaborators: they drive the
//! [`Core`] cycle API and own the scoreboard's set/clear discipline.

/// Common types and constants (word widths, faults, the register file).
pub mod common;
/// Core configuration (reset vector, hart id).
pub mod config;
/// The processor core slice (architectural state and the decode pipeline).
pub mod core;
/// Instruction set (field extraction, immediate decoding, RV32I opcodes).
pub mod isa;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The composed IF/ID core; drive it with `Core::clock` once per cycle.
pub use crate::core::Core;
