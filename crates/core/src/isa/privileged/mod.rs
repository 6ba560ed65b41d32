//! Privileged Architecture Definitions.
//!
//! Defines the system instruction encodings this core classifies: CSR
//! access, environment calls, breakpoints, and trap returns. Their
//! execution semantics belong to downstream stages.

/// System instruction opcodes (ECALL, EBREAK, MRET, WFI, CSR access).
pub mod opcodes;
