//! The Decode/Hazard unit.
//!
//! This module implements the combinational heart of the core. Each cycle it
//! performs the following against the currently latched fetch bundle:
//! 1. **Decoding:** Converts the raw instruction bits into control groups
//!    using the ISA decoder.
//! 2. **Hazard Gating:** Checks every required source register against the
//!    scoreboard and downstream readiness before anything is emitted.
//! 3. **Operand Resolution:** Selects register value, immediate, PC, or CSR
//!    read result per operand, per opcode class.
//!
//! The whole unit is a pure function of current state: a stalled
//! instruction is simply re-evaluated on the next cycle (polling, no
//! wake-up event), so a dirty bit cleared by an external write-back is
//! picked up the following cycle with no extra signaling.

use crate::common::error::Fault;
use crate::common::reg::RegisterFile;
use crate::core::arch::csr::CsrFile;
use crate::core::pipeline::latch::{FetchBundle, MicroOp, StageRegister};
use crate::core::pipeline::signals::{
    AluOp, CmpOp, CsrCtrl, CsrOp, ExCtrl, MemCtrl, MemWidth, NextPcSel, OpASrc, OpBSrc, OpCSrc,
    SysOp, WbCtrl, WbSrc,
};
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Bit 5 of the funct7 field indicating the alternate encoding
/// (SUB instead of ADD, SRA instead of SRL).
const FUNCT7_ALT_BIT: u32 = 0x20;

/// JALR targets have bit 0 cleared before use.
const TARGET_ALIGN_MASK: u32 = !1;

/// The decode stage's per-cycle outputs.
///
/// `ready` flows backward to the IF/ID stage register (and from there to
/// fetch as backpressure); `uop` is the forward payload, present exactly on
/// cycles where output validity holds.
#[derive(Clone, Copy, Debug)]
pub struct IdStage {
    /// Whether the stage can accept a new fetch bundle at the next edge.
    pub ready: bool,
    /// The resolved micro-op, when valid this cycle.
    pub uop: Option<MicroOp>,
}

/// Decoded control fields plus the operand-source and register-usage
/// selections the decode stage needs before operand resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CtrlBundle {
    /// Execute-group control fields.
    pub ex: ExCtrl,
    /// Memory-group control fields.
    pub mem: MemCtrl,
    /// CSR/system-group control fields.
    pub csr: CsrCtrl,
    /// Write-back/PC-update-group control fields.
    pub wb: WbCtrl,
    /// Source selection for operand A.
    pub a_src: OpASrc,
    /// Source selection for operand B.
    pub b_src: OpBSrc,
    /// Source selection for operand C.
    pub c_src: OpCSrc,
    /// The instruction reads `rs1` from the register file.
    pub uses_rs1: bool,
    /// The instruction reads `rs2` from the register file.
    pub uses_rs2: bool,
}

/// Evaluates the decode stage for the current cycle.
///
/// Pure combinational: no state is mutated, and calling it repeatedly
/// within one cycle yields the same result. Readiness and validity are
/// asserted only when none of the instruction's required source registers
/// are dirty AND the downstream stage is ready; otherwise the stage stalls
/// with `ready = false` and no output, leaving the latched instruction in
/// place for re-evaluation.
pub fn evaluate(
    latch: &StageRegister<FetchBundle>,
    regs: &RegisterFile,
    csrs: &CsrFile,
    ex_ready: bool,
) -> IdStage {
    // Empty latch: nothing to emit, and the slot is free for a capture.
    let Some(bundle) = latch.get() else {
        return IdStage {
            ready: true,
            uop: None,
        };
    };

    let d = decode(bundle.inst);
    let (ctrl, fault) = match control(&d) {
        Ok(c) => (c, None),
        Err(f) => (CtrlBundle::default(), Some(f)),
    };

    // Hazard gating. An instruction with no destination, or with rd == x0,
    // can never be blocked by its own write: only *source* registers are
    // checked, and x0 is always clean in the scoreboard. CSR reads do not
    // participate: a CSR read is always ready.
    if ctrl.uses_rs1 && regs.is_dirty(d.rs1) {
        tracing::trace!("ID pc={:#010x} STALL rs1=x{} dirty", bundle.pc, d.rs1);
        return IdStage {
            ready: false,
            uop: None,
        };
    }
    if ctrl.uses_rs2 && regs.is_dirty(d.rs2) {
        tracing::trace!("ID pc={:#010x} STALL rs2=x{} dirty", bundle.pc, d.rs2);
        return IdStage {
            ready: false,
            uop: None,
        };
    }

    // Downstream backpressure propagates combinationally: validity and
    // forwarding stay in lock-step with acceptance, so a micro-op is never
    // emitted into a stage that cannot take it.
    if !ex_ready {
        return IdStage {
            ready: false,
            uop: None,
        };
    }

    let (rv1, rv2) = regs.read(d.rs1, d.rs2);

    let op_a = match ctrl.a_src {
        OpASrc::Reg1 => rv1,
        OpASrc::Pc => bundle.pc,
        OpASrc::Zero => 0,
        OpASrc::Zimm => d.rs1 as u32,
    };
    let op_b = match ctrl.b_src {
        OpBSrc::Imm => d.imm as u32,
        OpBSrc::Reg2 => rv2,
        OpBSrc::Csr => csrs.read(ctrl.csr.addr),
    };
    let op_c = match ctrl.c_src {
        OpCSrc::None => 0,
        OpCSrc::StoreData => rv2,
        OpCSrc::PcRel => bundle.pc.wrapping_add(d.imm as u32),
        OpCSrc::RegRel => rv1.wrapping_add(d.imm as u32) & TARGET_ALIGN_MASK,
    };

    let uop = MicroOp {
        op_a,
        op_b,
        op_c,
        rd: d.rd,
        pc: bundle.pc,
        ex: ctrl.ex,
        mem: ctrl.mem,
        csr: ctrl.csr,
        wb: ctrl.wb,
        fault,
    };
    tracing::trace!(
        "ID pc={:#010x} emit rd=x{} fault={:?}",
        bundle.pc,
        uop.rd,
        uop.fault
    );

    IdStage {
        ready: true,
        uop: Some(uop),
    }
}

/// Classifies a decoded instruction into its control bundle.
///
/// Stateless and total over the RV32I + Zicsr-read encoding space.
///
/// # Errors
///
/// Unknown encodings come back as [`Fault::IllegalInstruction`]. The fault
/// is data, not control flow: the caller turns it into a fault-carrying
/// micro-op with inert control fields.
pub fn control(d: &Decoded) -> Result<CtrlBundle, Fault> {
    let mut c = CtrlBundle::default();

    match d.opcode {
        opcodes::OP_LUI => {
            c.wb.reg_write = true;
            c.a_src = OpASrc::Zero;
        }
        opcodes::OP_AUIPC => {
            c.wb.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        opcodes::OP_JAL => {
            c.wb.reg_write = true;
            c.wb.src = WbSrc::Link;
            c.wb.next_pc = NextPcSel::Jump;
            c.c_src = OpCSrc::PcRel;
            c.a_src = OpASrc::Zero;
        }
        opcodes::OP_JALR => {
            c.wb.reg_write = true;
            c.wb.src = WbSrc::Link;
            c.wb.next_pc = NextPcSel::Jump;
            c.c_src = OpCSrc::RegRel;
            c.uses_rs1 = true;
        }
        opcodes::OP_BRANCH => {
            c.wb.next_pc = NextPcSel::Branch;
            c.c_src = OpCSrc::PcRel;
            c.b_src = OpBSrc::Reg2;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.ex.cmp = match d.funct3 {
                funct3::BEQ => CmpOp::Eq,
                funct3::BNE => CmpOp::Ne,
                funct3::BLT => CmpOp::Lt,
                funct3::BGE => CmpOp::Ge,
                funct3::BLTU => CmpOp::Ltu,
                funct3::BGEU => CmpOp::Geu,
                _ => return Err(Fault::IllegalInstruction(d.raw)),
            };
        }
        opcodes::OP_LOAD => {
            c.wb.reg_write = true;
            c.wb.src = WbSrc::Mem;
            c.mem.read = true;
            c.uses_rs1 = true;
            let (w, s) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(Fault::IllegalInstruction(d.raw)),
            };
            c.mem.width = w;
            c.mem.signed = s;
        }
        opcodes::OP_STORE => {
            c.mem.write = true;
            c.c_src = OpCSrc::StoreData;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.mem.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(Fault::IllegalInstruction(d.raw)),
            };
        }
        opcodes::OP_IMM => {
            c.wb.reg_write = true;
            c.uses_rs1 = true;
            c.ex.alu = match d.funct3 {
                funct3::ADD_SUB => AluOp::Add,
                funct3::SLT => AluOp::Slt,
                funct3::SLTU => AluOp::Sltu,
                funct3::XOR => AluOp::Xor,
                funct3::OR => AluOp::Or,
                funct3::AND => AluOp::And,
                funct3::SLL => AluOp::Sll,
                funct3::SRL_SRA => {
                    if (d.funct7 & FUNCT7_ALT_BIT) != 0 {
                        AluOp::Sra
                    } else {
                        AluOp::Srl
                    }
                }
                _ => return Err(Fault::IllegalInstruction(d.raw)),
            };
        }
        opcodes::OP_REG => {
            c.wb.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.ex.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return Err(Fault::IllegalInstruction(d.raw)),
            };
        }
        opcodes::OP_MISC_MEM => match d.funct3 {
            funct3::FENCE => c.csr.sys = SysOp::Fence,
            funct3::FENCE_I => c.csr.sys = SysOp::FenceI,
            _ => return Err(Fault::IllegalInstruction(d.raw)),
        },
        sys_ops::OP_SYSTEM => match d.raw {
            sys_ops::ECALL => c.csr.sys = SysOp::Ecall,
            sys_ops::EBREAK => c.csr.sys = SysOp::Ebreak,
            sys_ops::MRET => c.csr.sys = SysOp::Mret,
            sys_ops::WFI => c.csr.sys = SysOp::Wfi,
            _ => {
                c.csr.op = match d.funct3 {
                    sys_ops::CSRRW => CsrOp::Rw,
                    sys_ops::CSRRS => CsrOp::Rs,
                    sys_ops::CSRRC => CsrOp::Rc,
                    sys_ops::CSRRWI => CsrOp::Rwi,
                    sys_ops::CSRRSI => CsrOp::Rsi,
                    sys_ops::CSRRCI => CsrOp::Rci,
                    _ => return Err(Fault::IllegalInstruction(d.raw)),
                };
                c.csr.addr = d.csr;
                c.wb.reg_write = true;
                c.wb.src = WbSrc::Csr;
                c.b_src = OpBSrc::Csr;
                match c.csr.op {
                    CsrOp::Rwi | CsrOp::Rsi | CsrOp::Rci => c.a_src = OpASrc::Zimm,
                    _ => c.uses_rs1 = true,
                }
            }
        },
        _ => return Err(Fault::IllegalInstruction(d.raw)),
    }
    Ok(c)
}
