//! Arithmetic-logic unit.
//!
//! Operations are a closed enum, so the dispatcher's opcode table is checked
//! for exhaustiveness at compile time and [`apply`] itself has no unsupported
//! path. The fallible seam is [`AluOp::from_opcode`]: an ALU-flagged opcode
//! absent from the table is a decode inconsistency and fails fatally.
//!
//! All arithmetic wraps modulo the register width to match the machine's
//! byte semantics.

use crate::machine::errors::MachineError;
use crate::machine::registers::RegisterFile;

/// Operations the ALU can perform.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AluOp {
    /// regA = regA + regB (wrapping)
    Add,
    /// regA = regA * regB (wrapping)
    Mul,
}

impl AluOp {
    /// Maps an ALU-flagged opcode to its operation.
    ///
    /// Only opcode `0b0010` (MUL) is assigned in the instruction encoding.
    /// Any other ALU-flagged opcode is [`MachineError::UnsupportedAluOp`].
    pub fn from_opcode(opcode: u8) -> Result<Self, MachineError> {
        match opcode {
            0b0010 => Ok(AluOp::Mul),
            _ => Err(MachineError::UnsupportedAluOp(opcode)),
        }
    }

    /// Returns the operation's symbolic name.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
        }
    }
}

/// Applies `op` to registers `reg_a` and `reg_b`, writing the result into
/// `reg_a`. Register indices must already be validated; out-of-range indices
/// surface as [`MachineError::InvalidRegisterIndex`] from the register file.
pub fn apply(
    op: AluOp,
    registers: &mut RegisterFile,
    reg_a: u8,
    reg_b: u8,
) -> Result<(), MachineError> {
    let a = registers.get(reg_a)?;
    let b = registers.get(reg_b)?;
    let result = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Mul => a.wrapping_mul(b),
    };
    registers.set(reg_a, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_writes_a_leaves_b() {
        let mut regs = RegisterFile::new();
        regs.set(0, 6).unwrap();
        regs.set(1, 7).unwrap();
        apply(AluOp::Mul, &mut regs, 0, 1).unwrap();
        assert_eq!(regs.get(0).unwrap(), 42);
        assert_eq!(regs.get(1).unwrap(), 7);
    }

    #[test]
    fn add_wraps() {
        let mut regs = RegisterFile::new();
        regs.set(0, 250).unwrap();
        regs.set(1, 10).unwrap();
        apply(AluOp::Add, &mut regs, 0, 1).unwrap();
        assert_eq!(regs.get(0).unwrap(), 4);
    }

    #[test]
    fn mul_wraps() {
        let mut regs = RegisterFile::new();
        regs.set(2, 16).unwrap();
        regs.set(3, 16).unwrap();
        apply(AluOp::Mul, &mut regs, 2, 3).unwrap();
        assert_eq!(regs.get(2).unwrap(), 0);
    }

    #[test]
    fn from_opcode_table() {
        assert_eq!(AluOp::from_opcode(0b0010).unwrap(), AluOp::Mul);
        for opcode in (0..16u8).filter(|&o| o != 0b0010) {
            assert!(matches!(
                AluOp::from_opcode(opcode),
                Err(MachineError::UnsupportedAluOp(o)) if o == opcode
            ));
        }
    }

    #[test]
    fn mnemonics() {
        assert_eq!(AluOp::Add.mnemonic(), "ADD");
        assert_eq!(AluOp::Mul.mnemonic(), "MUL");
    }
}
