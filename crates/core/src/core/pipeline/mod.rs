//! Instruction pipeline implementation.
//!
//! This module contains the IF/ID slice of the pipeline. It includes the
//! following components:
//! 1. **Latch:** The generic one-slot stage register and the records it
//!    carries (fetch bundle in, micro-op out).
//! 2. **Scoreboard:** Per-register pending-write tracking for
//!    read-after-write hazard detection.
//! 3. **Signals:** Control-field groups generated during instruction decode.
//! 4. **Decode:** The combinational decode/hazard unit.

/// The decode/hazard unit.
pub mod decode;

/// Inter-stage records and the one-slot stage register.
pub mod latch;

/// Dirty-bit scoreboard for register dependency tracking.
pub mod scoreboard;

/// Control signals generated during instruction decode.
pub mod signals;
