//! An 8-bit von-Neumann virtual machine.
//!
//! The machine is a fixed 256-cell byte memory, eight byte registers (the
//! last reserved as the stack pointer), and a fetch-decode-execute loop over
//! a one-byte instruction encoding. Programs are loaded into memory at
//! address 0 and run until a HLT instruction or a fatal decode/operand
//! error.
//!
//! # Modules
//!
//! - [`alu`]: arithmetic-logic operations and the opcode→operation table
//! - [`cpu`]: the execution loop, stack discipline, and trace rendering
//! - [`errors`]: load-time and run-time error types
//! - [`isa`]: instruction bit-field decoding and the direct opcode table
//! - [`loader`]: program source parsing (base-2 literals with comments)
//! - [`memory`]: bounds-checked flat byte memory
//! - [`registers`]: the register file and stack pointer conventions

pub mod alu;
pub mod cpu;
pub mod errors;
pub mod isa;
pub mod loader;
pub mod memory;
pub mod registers;
