//! Core execution loop.
//!
//! The [`Cpu`] owns the machine state (memory, register file, program
//! counter) and drives the fetch-decode-execute cycle. Each step fetches the
//! instruction byte at the program counter, decodes its bit fields, and
//! dispatches either to the ALU or through the direct opcode table. The
//! program counter advances by one plus the instruction's operand count only
//! after the step succeeds; every error path leaves it in place and halts
//! the machine by bubbling the error out of [`Cpu::run`].

use crate::machine::alu::{self, AluOp};
use crate::machine::errors::MachineError;
use crate::machine::isa::{self, Opcode, REGISTER_MASK};
use crate::machine::memory::{Memory, MEMORY_SIZE};
use crate::machine::registers::{RegisterFile, STACK_POINTER};
use std::fmt::Write as _;
use std::io::Write;

/// Outcome of executing a single instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// The machine is still running.
    Continue,
    /// A HLT instruction was executed.
    Halted,
}

/// The virtual machine: memory, registers, and program counter.
///
/// All state is owned by one instance; independent instances are fully
/// isolated. Output from PRN goes to the [`Write`] sink passed to
/// [`step`](Cpu::step)/[`run`](Cpu::run), so callers decide where program
/// output lands (stdout in the CLI, a buffer in tests).
pub struct Cpu {
    memory: Memory,
    registers: RegisterFile,
    pc: usize,
}

impl Cpu {
    /// Creates a machine in its power-on state: zeroed memory, program
    /// counter at 0, registers at their initial values.
    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            pc: 0,
        }
    }

    /// Copies a program image into memory starting at address 0.
    pub fn load(&mut self, program: &[u8]) -> Result<(), MachineError> {
        if program.len() > MEMORY_SIZE {
            return Err(MachineError::ProgramTooLarge {
                program: program.len(),
                memory: MEMORY_SIZE,
            });
        }
        for (address, byte) in program.iter().enumerate() {
            self.memory.write(address, *byte)?;
        }
        Ok(())
    }

    /// Returns the current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Returns the register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Executes instructions until HLT or a fatal condition.
    ///
    /// `Ok(())` is a clean halt; `Err` carries the condition that stopped
    /// the machine (invalid operand, invalid opcode, memory violation, ...).
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), MachineError> {
        loop {
            if let Step::Halted = self.step(out)? {
                return Ok(());
            }
        }
    }

    /// Executes the instruction at the program counter.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<Step, MachineError> {
        let instruction = self.memory.read(self.pc)?;
        let fields = isa::decode(instruction);

        if fields.is_alu {
            let raw_a = self.memory.read(self.pc + 1)?;
            let raw_b = self.memory.read(self.pc + 2)?;
            if !isa::verify_register(raw_a) || !isa::verify_register(raw_b) {
                return Err(MachineError::InvalidRegisters);
            }
            let op = AluOp::from_opcode(fields.opcode)?;
            alu::apply(
                op,
                &mut self.registers,
                raw_a & REGISTER_MASK,
                raw_b & REGISTER_MASK,
            )?;
        } else {
            match Opcode::try_from(fields.opcode)? {
                Opcode::Hlt => return Ok(Step::Halted),
                Opcode::Ldi => self.op_ldi()?,
                Opcode::Prn => self.op_prn(out)?,
                Opcode::Push => self.op_push()?,
                Opcode::Pop => self.op_pop()?,
            }
        }

        self.pc += 1 + fields.operand_count as usize;
        Ok(Step::Continue)
    }

    /// Reads and validates the register operand at `pc + offset`, returning
    /// the trusted register index.
    fn register_operand(&self, offset: usize) -> Result<u8, MachineError> {
        let raw = self.memory.read(self.pc + offset)?;
        if !isa::verify_register(raw) {
            return Err(MachineError::InvalidRegister(raw));
        }
        Ok(raw & REGISTER_MASK)
    }

    /// LDI reg, imm ; reg = imm
    fn op_ldi(&mut self) -> Result<(), MachineError> {
        let reg = self.register_operand(1)?;
        let imm = self.memory.read(self.pc + 2)?;
        self.registers.set(reg, imm)
    }

    /// PRN reg ; print reg as decimal
    fn op_prn<W: Write>(&mut self, out: &mut W) -> Result<(), MachineError> {
        let reg = self.register_operand(1)?;
        let value = self.registers.get(reg)?;
        writeln!(out, "{value}").map_err(|e| MachineError::Io(e.to_string()))
    }

    /// PUSH reg ; SP -= 1, memory[SP] = reg
    fn op_push(&mut self) -> Result<(), MachineError> {
        let reg = self.register_operand(1)?;
        let value = self.registers.get(reg)?;
        let sp = self.registers.get(STACK_POINTER)?.wrapping_sub(1);
        self.registers.set(STACK_POINTER, sp)?;
        self.memory.write(sp as usize, value)
    }

    /// POP reg ; reg = memory[SP], SP += 1
    fn op_pop(&mut self) -> Result<(), MachineError> {
        let reg = self.register_operand(1)?;
        let sp = self.registers.get(STACK_POINTER)?;
        let value = self.memory.read(sp as usize)?;
        self.registers.set(reg, value)?;
        self.registers.set(STACK_POINTER, sp.wrapping_add(1))
    }

    /// Renders the machine state for debugging: the program counter, the
    /// three bytes at PC..PC+2, and every register, two hex digits each.
    pub fn trace(&self) -> String {
        let at = |offset: usize| self.memory.read(self.pc + offset).unwrap_or(0);
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc,
            at(0),
            at(1),
            at(2)
        );
        for value in self.registers.snapshot() {
            let _ = write!(line, " {:02X}", value);
        }
        line
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
