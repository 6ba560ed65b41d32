//! Architecture-specific components.
//!
//! General-purpose register storage and the control-and-status register
//! file consumed by the decode core.

/// Control and Status Register file (read path only).
pub mod csr;

/// General-purpose register storage.
pub mod gpr;
