use micro8_derive::Error;

/// Errors that can occur while loading or executing a program.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    /// Opcode not present in the direct dispatch table.
    #[error("invalid instruction {0}")]
    InvalidInstruction(u8),
    /// Single register operand with nonzero upper bits (raw operand byte).
    #[error("invalid register {0}")]
    InvalidRegister(u8),
    /// ALU operand pair failed register validation.
    #[error("invalid registers")]
    InvalidRegisters,
    /// Register index exceeds the register file size.
    #[error("register index {index} out of bounds, register file has {available} registers")]
    InvalidRegisterIndex { index: u8, available: usize },
    /// ALU-flagged opcode absent from the ALU operation table.
    #[error("unsupported ALU operation for opcode {0}")]
    UnsupportedAluOp(u8),
    /// Memory access outside the address space.
    #[error("memory address {address} out of range, memory has {size} cells")]
    OutOfRange { address: usize, size: usize },
    /// Program image does not fit into memory at load time.
    #[error("program of {program} bytes does not fit in {memory} memory cells")]
    ProgramTooLarge { program: usize, memory: usize },
    /// Malformed base-2 byte literal in program source.
    #[error("line {line}: invalid byte literal '{literal}'")]
    ParseError { line: usize, literal: String },
    /// File read or output sink failure.
    #[error("io error: {0}")]
    Io(String),
}
