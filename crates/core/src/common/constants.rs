//! Common constants used throughout the decode core.

/// Register width in bits (RV32).
pub const XLEN: u32 = 32;

/// Number of architectural general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Size of an uncompressed instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// ADDI x0, x0, 0 instruction encoding (canonical NOP).
pub const INSTRUCTION_NOP: u32 = 0x0000_0013;
