// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    error::Error,
    port::{Direction, Pin, Port},
};

/// Index of a button in the [Registry].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(u8);

impl ButtonId {
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for ButtonId {
    #[inline]
    fn from(index: u8) -> Self {
        Self(index)
    }
}

/// Where one button is wired.
///
/// The button is expected to short the pin to ground when closed.
/// The internal pull-up holds the open pin high.
#[derive(Clone, Copy)]
pub struct ButtonConfig<'a> {
    port: &'a dyn Port,
    pin: Pin,
}

impl<'a> ButtonConfig<'a> {
    pub const fn new(port: &'a dyn Port, pin: Pin) -> Self {
        Self { port, pin }
    }

    #[inline]
    pub fn port(&self) -> &'a dyn Port {
        self.port
    }

    #[inline]
    pub const fn pin(&self) -> Pin {
        self.pin
    }

    /// Input direction with pull-up enabled.
    pub fn configure_as_input(&self) {
        self.port.set_direction(self.pin, Direction::Input);
        self.port.set_pull_up(self.pin, true);
    }

    /// Raw logic level. `true` is high, i.e. released.
    #[inline]
    pub fn sample_raw(&self) -> bool {
        self.port.is_high(self.pin)
    }

    /// `true` if the switch is physically closed right now.
    #[inline]
    pub fn sample_pressed(&self) -> bool {
        !self.sample_raw()
    }
}

/// Fixed table of all buttons. The order is the sampling order.
pub struct Registry<'a, const N: usize> {
    buttons: [ButtonConfig<'a>; N],
}

impl<'a, const N: usize> Registry<'a, N> {
    const ID_RANGE_OK: () = assert!(N <= u8::MAX as usize + 1, "ButtonId is 8 bit");

    pub const fn new(buttons: [ButtonConfig<'a>; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::ID_RANGE_OK;
        Self { buttons }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, id: ButtonId) -> Result<&ButtonConfig<'a>, Error> {
        self.buttons.get(id.index()).ok_or(Error::UnknownButton(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = ButtonId> {
        (0..N).map(|i| ButtonId(i as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ButtonConfig<'a>> {
        self.buttons.iter()
    }

    pub fn configure_as_input(&self, id: ButtonId) -> Result<(), Error> {
        self.get(id)?.configure_as_input();
        Ok(())
    }

    pub fn configure_all_inputs(&self) {
        for button in &self.buttons {
            button.configure_as_input();
        }
    }

    pub fn sample_raw(&self, id: ButtonId) -> Result<bool, Error> {
        Ok(self.get(id)?.sample_raw())
    }

    pub fn sample_pressed(&self, id: ButtonId) -> Result<bool, Error> {
        Ok(self.get(id)?.sample_pressed())
    }
}


// vim: ts=4 sw=4 expandtab
