//! Instruction Set Architecture (ISA) definitions.
//!
//! An instruction is a single byte with three bit fields:
//!
//! ```text
//! bit  7 6   5   4   3 2 1 0
//!      │ │   │   │   └─┴─┴─┴── opcode
//!      │ │   │   └──────────── reserved (opcode space if extended)
//!      │ │   └──────────────── ALU flag
//!      └─┴──────────────────── operand count (0-2)
//! ```
//!
//! The operand count tells the dispatcher how many bytes follow the
//! instruction and must be skipped when advancing the program counter.
//! ALU-flagged opcodes are routed to the ALU operation table
//! ([`AluOp::from_opcode`](super::alu::AluOp::from_opcode)); the rest decode
//! through the [`Opcode`] table.

use crate::machine::errors::MachineError;

/// Mask selecting the register index bits of a register-operand byte.
pub const REGISTER_MASK: u8 = 0b111;

/// Decoded bit fields of one instruction byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fields {
    /// Operation identifier (low 4 bits).
    pub opcode: u8,
    /// Whether the opcode dispatches to the ALU.
    pub is_alu: bool,
    /// Number of operand bytes following the instruction (0-2).
    pub operand_count: u8,
}

/// Decodes an instruction byte into its bit fields.
///
/// Infallible: the three fields cover the full byte range.
pub const fn decode(instruction: u8) -> Fields {
    Fields {
        opcode: instruction & 0b1111,
        is_alu: (instruction >> 5) & 1 == 1,
        operand_count: (instruction >> 6) & 0b11,
    }
}

/// Returns whether an operand byte is a valid register reference.
///
/// The low 3 bits name the register; the upper 5 bits must be zero. Only
/// after this check do the low bits become a trusted register index.
pub const fn verify_register(operand: u8) -> bool {
    operand >> 3 == 0
}

/// Directly dispatched (non-ALU) instructions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Opcode {
    /// HLT ; stop execution
    Hlt = 0b0001,
    /// LDI reg, imm ; reg = imm
    Ldi = 0b0010,
    /// PUSH reg ; SP -= 1, memory[SP] = reg
    Push = 0b0101,
    /// POP reg ; reg = memory[SP], SP += 1
    Pop = 0b0110,
    /// PRN reg ; print reg as decimal
    Prn = 0b0111,
}

impl TryFrom<u8> for Opcode {
    type Error = MachineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b0001 => Ok(Opcode::Hlt),
            0b0010 => Ok(Opcode::Ldi),
            0b0101 => Ok(Opcode::Push),
            0b0110 => Ok(Opcode::Pop),
            0b0111 => Ok(Opcode::Prn),
            _ => Err(MachineError::InvalidInstruction(value)),
        }
    }
}

impl Opcode {
    /// Returns the assembly mnemonic for this instruction.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_exhaustive() {
        for b in 0..=255u8 {
            let fields = decode(b);
            assert_eq!(fields.operand_count, (b >> 6) & 0b11);
            assert_eq!(fields.is_alu, (b >> 5) & 1 == 1);
            assert_eq!(fields.opcode, b & 0b1111);
        }
    }

    #[test]
    fn verify_register_exhaustive() {
        for b in 0..=255u8 {
            assert_eq!(verify_register(b), (b & !REGISTER_MASK) == 0);
        }
    }

    #[test]
    fn opcode_try_from_valid() {
        assert_eq!(Opcode::try_from(0b0001).unwrap(), Opcode::Hlt);
        assert_eq!(Opcode::try_from(0b0010).unwrap(), Opcode::Ldi);
        assert_eq!(Opcode::try_from(0b0101).unwrap(), Opcode::Push);
        assert_eq!(Opcode::try_from(0b0110).unwrap(), Opcode::Pop);
        assert_eq!(Opcode::try_from(0b0111).unwrap(), Opcode::Prn);
    }

    #[test]
    fn opcode_try_from_invalid() {
        assert!(matches!(
            Opcode::try_from(0b1111),
            Err(MachineError::InvalidInstruction(0b1111))
        ));
        assert!(matches!(
            Opcode::try_from(0),
            Err(MachineError::InvalidInstruction(0))
        ));
    }

    #[test]
    fn documented_encodings() {
        // LDI r0, 42 starts with 0b10000010: two operands, no ALU, opcode 2.
        let ldi = decode(0b1000_0010);
        assert_eq!(ldi.operand_count, 2);
        assert!(!ldi.is_alu);
        assert_eq!(Opcode::try_from(ldi.opcode).unwrap(), Opcode::Ldi);

        // MUL is ALU-flagged with two operands: 0b10100010.
        let mul = decode(0b1010_0010);
        assert_eq!(mul.operand_count, 2);
        assert!(mul.is_alu);
        assert_eq!(mul.opcode, 0b0010);
    }
}
