//! GPIO line abstractions
//!
//! Provides the output line trait implemented by chip-specific code, and
//! an allocator that tracks which line numbers are claimed so two
//! consumers can never drive the same pin.

use heapless::FnvIndexSet;

/// Highest line number accepted by [`LineAllocator`] (exclusive)
pub const MAX_LINE_ID: u8 = 32;

/// Digital output line
///
/// Unlike a bare register write, setting a line can fail (an I/O expander
/// NAKs, a sysfs write errors), so every mutating call returns a result.
pub trait OutputPin {
    /// Error produced by the underlying hardware
    type Error: core::fmt::Debug;

    /// Drive the line high (logic 1)
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Drive the line low (logic 0)
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Drive the line to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Line reservation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line number is beyond [`MAX_LINE_ID`]
    OutOfRange(u8),
    /// Line is already claimed by another consumer
    AlreadyReserved(u8),
}

/// Line allocator to track reservations
pub struct LineAllocator {
    /// Set of reserved line numbers
    reserved: FnvIndexSet<u8, 32>,
}

impl Default for LineAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAllocator {
    /// Create an allocator with no lines reserved
    pub fn new() -> Self {
        Self {
            reserved: FnvIndexSet::new(),
        }
    }

    /// Reserve a line
    ///
    /// Fails if the number is out of range or the line is already held.
    pub fn reserve(&mut self, line: u8) -> Result<(), LineError> {
        if line >= MAX_LINE_ID {
            return Err(LineError::OutOfRange(line));
        }
        if self.reserved.contains(&line) {
            return Err(LineError::AlreadyReserved(line));
        }
        // Capacity equals MAX_LINE_ID, so insertion cannot overflow here
        self.reserved
            .insert(line)
            .map_err(|_| LineError::OutOfRange(line))?;
        Ok(())
    }

    /// Reserve every line in `lines`, or none of them
    ///
    /// On failure, lines claimed by this call are released again before
    /// the error is returned.
    pub fn reserve_all(&mut self, lines: &[u8]) -> Result<(), LineError> {
        for (i, &line) in lines.iter().enumerate() {
            if let Err(e) = self.reserve(line) {
                for &claimed in &lines[..i] {
                    self.release(claimed);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Release a line
    pub fn release(&mut self, line: u8) {
        self.reserved.remove(&line);
    }

    /// Check if a line is reserved
    pub fn is_reserved(&self, line: u8) -> bool {
        self.reserved.contains(&line)
    }

    /// Get the number of reserved lines
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator() {
        let mut alloc = LineAllocator::new();

        assert!(alloc.reserve(5).is_ok());
        assert!(alloc.is_reserved(5));

        // Can't reserve same line twice
        assert_eq!(alloc.reserve(5), Err(LineError::AlreadyReserved(5)));

        // Can reserve a different line
        assert!(alloc.reserve(6).is_ok());

        // Release and re-reserve
        alloc.release(5);
        assert!(!alloc.is_reserved(5));
        assert!(alloc.reserve(5).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let mut alloc = LineAllocator::new();
        assert_eq!(alloc.reserve(MAX_LINE_ID), Err(LineError::OutOfRange(32)));
        assert_eq!(alloc.reserved_count(), 0);
    }

    #[test]
    fn test_reserve_all_rolls_back() {
        let mut alloc = LineAllocator::new();
        alloc.reserve(13).unwrap();

        // 13 is taken, so 5 and 6 must not stay reserved
        let result = alloc.reserve_all(&[5, 6, 13, 19]);
        assert_eq!(result, Err(LineError::AlreadyReserved(13)));
        assert!(!alloc.is_reserved(5));
        assert!(!alloc.is_reserved(6));
        assert!(!alloc.is_reserved(19));
        assert_eq!(alloc.reserved_count(), 1);
    }

    #[test]
    fn test_reserve_all_rejects_duplicates() {
        let mut alloc = LineAllocator::new();
        let result = alloc.reserve_all(&[5, 6, 5, 19]);
        assert_eq!(result, Err(LineError::AlreadyReserved(5)));
        assert_eq!(alloc.reserved_count(), 0);
    }

    #[test]
    fn test_set_state_dispatch() {
        struct MockPin {
            high: bool,
        }

        impl OutputPin for MockPin {
            type Error = ();

            fn set_high(&mut self) -> Result<(), ()> {
                self.high = true;
                Ok(())
            }

            fn set_low(&mut self) -> Result<(), ()> {
                self.high = false;
                Ok(())
            }

            fn is_set_high(&self) -> bool {
                self.high
            }
        }

        let mut pin = MockPin { high: false };
        pin.set_state(true).unwrap();
        assert!(pin.is_set_high());
        pin.set_state(false).unwrap();
        assert!(pin.is_set_low());
    }
}
