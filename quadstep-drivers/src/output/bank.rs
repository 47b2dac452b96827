//! Four-line GPIO output bank
//!
//! Lines are claimed through a [`LineAllocator`] when the bank is built and
//! handed back when it is released. Pattern writes are break-before-make:
//! lines that turn off are written before lines that turn on, so a step
//! never asserts two lines the pattern does not ask for.

use quadstep_core::sequence::{Pattern, LINE_COUNT};
use quadstep_core::traits::OutputBank;
use quadstep_hal::{LineAllocator, LineError, OutputPin};

/// A single line could not be driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineFault<E> {
    /// Line number of the failing output
    pub line: u8,
    /// Error from the pin
    pub error: E,
}

/// Bank initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<E> {
    /// A line number could not be reserved
    Reserve(LineError),
    /// The startup pattern could not be driven
    Output(LineFault<E>),
}

impl<E> From<LineError> for InitError<E> {
    fn from(e: LineError) -> Self {
        InitError::Reserve(e)
    }
}

/// Four output lines driven together
pub struct LineBank<P> {
    lines: [P; LINE_COUNT],
    ids: [u8; LINE_COUNT],
    current: Pattern,
}

impl<P: OutputPin> LineBank<P> {
    /// Claim `ids` and drive `startup` on the lines
    ///
    /// `lines[i]` is the pin for line number `ids[i]`. On any failure no
    /// reservation is kept.
    pub fn initialize(
        lines: [P; LINE_COUNT],
        ids: [u8; LINE_COUNT],
        allocator: &mut LineAllocator,
        startup: Pattern,
    ) -> Result<Self, InitError<P::Error>> {
        allocator.reserve_all(&ids)?;

        let mut bank = Self {
            lines,
            ids,
            current: Pattern::OFF,
        };
        bank.current = bank.read_back();

        if let Err(fault) = bank.drive(startup) {
            for id in ids {
                allocator.release(id);
            }
            return Err(InitError::Output(fault));
        }

        Ok(bank)
    }

    /// Line numbers in bank order
    pub fn ids(&self) -> [u8; LINE_COUNT] {
        self.ids
    }

    /// Hand the lines back to the allocator and return the pins
    ///
    /// Call [`OutputBank::shutdown`] first; this does not touch the pins.
    pub fn release(self, allocator: &mut LineAllocator) -> [P; LINE_COUNT] {
        for id in self.ids {
            allocator.release(id);
        }
        self.lines
    }

    fn drive(&mut self, pattern: Pattern) -> Result<(), LineFault<P::Error>> {
        let result = self
            .write_pass(pattern, false)
            .and_then(|()| self.write_pass(pattern, true));

        match result {
            Ok(()) => {
                self.current = pattern;
                Ok(())
            }
            Err(fault) => {
                // Never leave a partial pattern behind
                let _ = self.deassert_all();
                Err(fault)
            }
        }
    }

    /// Write every line whose target level is `level`
    fn write_pass(&mut self, pattern: Pattern, level: bool) -> Result<(), LineFault<P::Error>> {
        for (index, line) in self.lines.iter_mut().enumerate() {
            if pattern.is_set(index) == level {
                line.set_state(level).map_err(|error| LineFault {
                    line: self.ids[index],
                    error,
                })?;
            }
        }
        Ok(())
    }

    /// Drive every line low, returning the first failure
    fn deassert_all(&mut self) -> Result<(), LineFault<P::Error>> {
        let mut first = None;
        for (line, &id) in self.lines.iter_mut().zip(self.ids.iter()) {
            if let Err(error) = line.set_low() {
                if first.is_none() {
                    first = Some(LineFault { line: id, error });
                }
            }
        }
        self.current = self.read_back();
        first.map_or(Ok(()), Err)
    }

    fn read_back(&self) -> Pattern {
        Pattern::new(core::array::from_fn(|i| self.lines[i].is_set_high()))
    }
}

impl<P: OutputPin> OutputBank for LineBank<P> {
    type Error = LineFault<P::Error>;

    fn apply(&mut self, pattern: Pattern) -> Result<(), Self::Error> {
        self.drive(pattern)
    }

    fn current(&self) -> Pattern {
        self.current
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        self.deassert_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Shared record of `(line index, level)` writes across all mock pins
    type WriteLog = Rc<RefCell<Vec<(usize, bool)>>>;

    struct MockPin {
        index: usize,
        high: bool,
        broken: Rc<Cell<bool>>,
        /// Makes `set_low` fail, leaving the line high
        stuck: Rc<Cell<bool>>,
        log: WriteLog,
    }

    impl OutputPin for MockPin {
        type Error = usize;

        fn set_high(&mut self) -> Result<(), usize> {
            if self.broken.get() {
                return Err(self.index);
            }
            self.high = true;
            self.log.borrow_mut().push((self.index, true));
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), usize> {
            if self.stuck.get() {
                return Err(self.index);
            }
            self.high = false;
            self.log.borrow_mut().push((self.index, false));
            Ok(())
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    /// Pins 0..4 with a shared write log; the flag breaks `set_high` on pin 2
    fn pins() -> ([MockPin; 4], Rc<Cell<bool>>, WriteLog) {
        let log = WriteLog::default();
        let broken = Rc::new(Cell::new(false));
        let pins = core::array::from_fn(|index| MockPin {
            index,
            high: false,
            broken: if index == 2 {
                broken.clone()
            } else {
                Rc::new(Cell::new(false))
            },
            stuck: Rc::new(Cell::new(false)),
            log: log.clone(),
        });
        (pins, broken, log)
    }

    const IDS: [u8; 4] = [5, 6, 13, 19];

    #[test]
    fn test_initialize_drives_startup() {
        let (pins, _, _) = pins();
        let mut alloc = LineAllocator::new();
        let bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::ALL_ON).unwrap();

        assert_eq!(bank.current(), Pattern::ALL_ON);
        assert_eq!(bank.ids(), IDS);
        assert_eq!(alloc.reserved_count(), 4);
        assert!(alloc.is_reserved(13));
    }

    #[test]
    fn test_initialize_rejects_taken_line() {
        let (pins, _, log) = pins();
        let mut alloc = LineAllocator::new();
        alloc.reserve(13).unwrap();

        let result = LineBank::initialize(pins, IDS, &mut alloc, Pattern::ALL_ON);
        assert!(matches!(
            result,
            Err(InitError::Reserve(LineError::AlreadyReserved(13)))
        ));
        // Nothing new held, nothing written
        assert_eq!(alloc.reserved_count(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_initialize_output_failure_releases_lines() {
        let (pins, broken, _) = pins();
        broken.set(true);
        let mut alloc = LineAllocator::new();

        let result = LineBank::initialize(pins, IDS, &mut alloc, Pattern::ALL_ON);
        assert!(matches!(
            result,
            Err(InitError::Output(LineFault { line: 13, error: 2 }))
        ));
        assert_eq!(alloc.reserved_count(), 0);
    }

    #[test]
    fn test_apply_break_before_make() {
        let (pins, _, log) = pins();
        let mut alloc = LineAllocator::new();
        let mut bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::single(0)).unwrap();
        log.borrow_mut().clear();

        bank.apply(Pattern::single(1)).unwrap();
        assert_eq!(bank.current(), Pattern::single(1));

        let writes = log.borrow();
        let first_high = writes.iter().position(|&(_, level)| level).unwrap();
        assert!(writes[..first_high].contains(&(0, false)));
        assert_eq!(writes[first_high..], [(1, true)]);
    }

    #[test]
    fn test_apply_failure_deasserts_everything() {
        let (pins, broken, _) = pins();
        let mut alloc = LineAllocator::new();
        let mut bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::single(0)).unwrap();

        broken.set(true);
        assert_eq!(
            bank.apply(Pattern::single(2)),
            Err(LineFault { line: 13, error: 2 })
        );
        assert_eq!(bank.current(), Pattern::OFF);

        // Recovers once the line works again
        broken.set(false);
        bank.apply(Pattern::single(2)).unwrap();
        assert_eq!(bank.current(), Pattern::single(2));
    }

    #[test]
    fn test_shutdown_and_release() {
        let (pins, _, _) = pins();
        let mut alloc = LineAllocator::new();
        let mut bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::ALL_ON).unwrap();

        bank.shutdown().unwrap();
        assert_eq!(bank.current(), Pattern::OFF);

        let pins = bank.release(&mut alloc);
        assert!(pins.iter().all(|p| !p.high));
        assert_eq!(alloc.reserved_count(), 0);

        // Lines can be claimed again
        assert!(alloc.reserve_all(&IDS).is_ok());
    }

    #[test]
    fn test_shutdown_continues_past_failed_line() {
        let (mut pins, _, log) = pins();
        let stuck = Rc::new(Cell::new(false));
        pins[0].stuck = stuck.clone();
        let mut alloc = LineAllocator::new();
        let mut bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::ALL_ON).unwrap();
        log.borrow_mut().clear();

        stuck.set(true);
        assert_eq!(bank.shutdown(), Err(LineFault { line: 5, error: 0 }));

        // The first line failed, the other three were still driven low
        assert_eq!(*log.borrow(), [(1, false), (2, false), (3, false)]);
        assert_eq!(bank.current(), Pattern::single(0));
    }

    #[test]
    fn test_apply_failure_reports_stuck_line_in_current() {
        let (mut pins, _, _) = pins();
        let stuck = Rc::new(Cell::new(false));
        pins[0].stuck = stuck.clone();
        let mut alloc = LineAllocator::new();
        let mut bank = LineBank::initialize(pins, IDS, &mut alloc, Pattern::single(0)).unwrap();

        // Line 0 cannot be released, so the bank cannot fully deassert
        stuck.set(true);
        assert_eq!(
            bank.apply(Pattern::single(2)),
            Err(LineFault { line: 5, error: 0 })
        );
        assert_eq!(bank.current(), Pattern::single(0));
    }
}
