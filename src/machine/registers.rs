use crate::machine::errors::MachineError;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Index of the register reserved as the stack pointer (the last one).
pub const STACK_POINTER: u8 = (NUM_REGISTERS - 1) as u8;

/// Initial stack pointer value: top of stack near the end of memory, leaving
/// room below the reserved high addresses.
const STACK_INIT: u8 = 0xF3;

/// Register file holding the machine's byte registers.
///
/// Registers start at zero except the stack pointer, which starts at
/// [`STACK_INIT`] so the stack grows downward from near the top of memory
/// without colliding with low program memory.
pub struct RegisterFile {
    regs: [u8; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file in its power-on state.
    pub fn new() -> Self {
        let mut regs = [0; NUM_REGISTERS];
        regs[STACK_POINTER as usize] = STACK_INIT;
        Self { regs }
    }

    /// Returns the value in register `idx`.
    ///
    /// Returns [`MachineError::InvalidRegisterIndex`] if `idx` is out of
    /// bounds. Callers are expected to validate operands first; this is a
    /// defensive backstop.
    pub fn get(&self, idx: u8) -> Result<u8, MachineError> {
        self.regs
            .get(idx as usize)
            .copied()
            .ok_or(MachineError::InvalidRegisterIndex {
                index: idx,
                available: NUM_REGISTERS,
            })
    }

    /// Stores `value` into register `idx`.
    ///
    /// Returns [`MachineError::InvalidRegisterIndex`] if `idx` is out of bounds.
    pub fn set(&mut self, idx: u8, value: u8) -> Result<(), MachineError> {
        let slot = self
            .regs
            .get_mut(idx as usize)
            .ok_or(MachineError::InvalidRegisterIndex {
                index: idx,
                available: NUM_REGISTERS,
            })?;
        *slot = value;
        Ok(())
    }

    /// Returns a snapshot of all register values, for trace rendering.
    pub fn snapshot(&self) -> [u8; NUM_REGISTERS] {
        self.regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let regs = RegisterFile::new();
        for idx in 0..STACK_POINTER {
            assert_eq!(regs.get(idx).unwrap(), 0);
        }
        assert_eq!(regs.get(STACK_POINTER).unwrap(), STACK_INIT);
    }

    #[test]
    fn set_then_get() {
        let mut regs = RegisterFile::new();
        regs.set(3, 42).unwrap();
        assert_eq!(regs.get(3).unwrap(), 42);
    }

    #[test]
    fn index_out_of_bounds() {
        let mut regs = RegisterFile::new();
        let err = regs.get(NUM_REGISTERS as u8).unwrap_err();
        assert_eq!(
            err,
            MachineError::InvalidRegisterIndex {
                index: NUM_REGISTERS as u8,
                available: NUM_REGISTERS
            }
        );
        assert!(regs.set(0xFF, 0).is_err());
    }
}
