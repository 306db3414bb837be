use crate::machine::errors::MachineError;

/// Number of byte cells in the address space.
pub const MEMORY_SIZE: usize = 256;

/// Flat byte-addressable memory.
///
/// Holds [`MEMORY_SIZE`] zero-initialized cells. Every access is bounds
/// checked; an address outside `[0, MEMORY_SIZE)` is a fatal
/// [`MachineError::OutOfRange`], never a silent wrap.
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates a zeroed memory.
    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the byte at `address`.
    pub fn read(&self, address: usize) -> Result<u8, MachineError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MachineError::OutOfRange {
                address,
                size: MEMORY_SIZE,
            })
    }

    /// Writes `value` to the cell at `address`.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MachineError> {
        let cell = self.cells.get_mut(address).ok_or(MachineError::OutOfRange {
            address,
            size: MEMORY_SIZE,
        })?;
        *cell = value;
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let mem = Memory::new();
        for address in 0..MEMORY_SIZE {
            assert_eq!(mem.read(address).unwrap(), 0);
        }
    }

    #[test]
    fn write_then_read() {
        let mut mem = Memory::new();
        mem.write(0x10, 0xAB).unwrap();
        assert_eq!(mem.read(0x10).unwrap(), 0xAB);
        mem.write(MEMORY_SIZE - 1, 0x01).unwrap();
        assert_eq!(mem.read(MEMORY_SIZE - 1).unwrap(), 0x01);
    }

    #[test]
    fn read_out_of_range() {
        let mem = Memory::new();
        let err = mem.read(MEMORY_SIZE).unwrap_err();
        assert_eq!(
            err,
            MachineError::OutOfRange {
                address: MEMORY_SIZE,
                size: MEMORY_SIZE
            }
        );
    }

    #[test]
    fn write_out_of_range() {
        let mut mem = Memory::new();
        let err = mem.write(usize::MAX, 0).unwrap_err();
        assert!(matches!(err, MachineError::OutOfRange { .. }));
    }
}
