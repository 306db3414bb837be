//! micro8 library.
//!
//! Provides an 8-bit von-Neumann virtual machine: memory, registers, an
//! instruction decoder, an ALU, an execution loop, and a program loader.

pub mod machine;
pub mod utils;
