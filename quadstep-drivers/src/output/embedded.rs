//! `embedded-hal` pin adapter
//!
//! `embedded-hal` 1.0 only exposes the driven level through
//! `StatefulOutputPin`, which needs `&mut self`. The adapter caches the
//! level it last drove instead, so any plain `OutputPin` works.

use embedded_hal::digital::OutputPin as HalOutputPin;
use quadstep_hal::OutputPin;

/// One output line backed by an `embedded-hal` pin
pub struct HalLine<P> {
    pin: P,
    high: bool,
}

impl<P: HalOutputPin> HalLine<P> {
    /// Wrap a pin that is currently driven low
    pub fn new(pin: P) -> Self {
        Self { pin, high: false }
    }

    /// Give the pin back
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: HalOutputPin> OutputPin for HalLine<P> {
    type Error = P::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()?;
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()?;
        self.high = false;
        Ok(())
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
