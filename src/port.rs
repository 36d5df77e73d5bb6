// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Digital input source abstraction.
//!
//! A [Port] is one 8 bit GPIO port. Concrete implementations bind to the
//! memory mapped PINx, PORTx and DDRx registers of the target. The engine
//! itself never touches a register address.

/// Pin number 0..=7 within an 8 bit port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    pub const P0: Pin = Pin(0);
    pub const P1: Pin = Pin(1);
    pub const P2: Pin = Pin(2);
    pub const P3: Pin = Pin(3);
    pub const P4: Pin = Pin(4);
    pub const P5: Pin = Pin(5);
    pub const P6: Pin = Pin(6);
    pub const P7: Pin = Pin(7);

    /// Returns `None` for pin numbers outside of 0..=7.
    pub const fn new(number: u8) -> Option<Self> {
        if number < 8 { Some(Self(number)) } else { None }
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Register bit mask of this pin.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// An 8 bit digital I/O port.
///
/// Ports are shared between the timer interrupt (reads) and the
/// foreground context (configuration). Therefore they must be `Sync`.
/// `read` must not have side effects on the port state.
pub trait Port: Sync {
    /// Instantaneous logic level of all pins (PINx).
    fn read(&self) -> u8;

    /// Configure one pin as input or output (DDRx).
    fn set_direction(&self, pin: Pin, dir: Direction);

    /// Enable or disable the internal pull-up resistor of one pin (PORTx).
    fn set_pull_up(&self, pin: Pin, enable: bool);

    /// Instantaneous logic level of one pin.
    #[inline]
    fn is_high(&self, pin: Pin) -> bool {
        self.read() & pin.mask() != 0
    }
}


#[cfg(test)]
mod test {
    use super::{mock::MockPort, *};

    #[test]
    fn test_pin_range() {
        assert_eq!(Pin::new(0), Some(Pin::P0));
        assert_eq!(Pin::new(7), Some(Pin::P7));
        assert_eq!(Pin::new(8), None);
        assert_eq!(Pin::new(0xFF), None);
        assert_eq!(Pin::P5.mask(), 0b0010_0000);
        assert_eq!(Pin::P5.number(), 5);
    }

    #[test]
    fn test_is_high() {
        let port = MockPort::new();
        assert!(port.is_high(Pin::P3));
        port.drive(Pin::P3, false);
        assert!(!port.is_high(Pin::P3));
        assert!(port.is_high(Pin::P2));
        assert_eq!(port.read(), 0b1111_0111);
    }
}

// vim: ts=4 sw=4 expandtab
