// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    ctx::{CriticalSection, MutexCell},
    error::{ConfigError, Error},
    history::History,
    registry::{ButtonId, Registry},
    state::ButtonState,
};

/// Number of ticks between two samples of the same button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleWindow(u32);

impl SampleWindow {
    /// Sample on every tick.
    pub const EVERY_TICK: SampleWindow = SampleWindow(1);

    pub const fn new(ticks: u32) -> Result<Self, ConfigError> {
        if ticks == 0 {
            Err(ConfigError::ZeroSampleWindow)
        } else {
            Ok(Self(ticks))
        }
    }

    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::EVERY_TICK
    }
}

/// Per button histories and the sampling schedule.
///
/// `tick` is the only writer of the histories, apart from the
/// released edge reset done by `classify`.
pub struct Sampler<const N: usize> {
    window: SampleWindow,
    countdown: MutexCell<u32>,
    histories: [MutexCell<History>; N],
}

impl<const N: usize> Sampler<N> {
    pub const fn new(window: SampleWindow) -> Self {
        Self {
            window,
            countdown: MutexCell::new(window.ticks()),
            histories: [const { MutexCell::new(History::new()) }; N],
        }
    }

    #[inline]
    pub const fn window(&self) -> SampleWindow {
        self.window
    }

    /// Advance the schedule by one tick and, if the window elapsed,
    /// shift one new sample into every history, in registry order.
    ///
    /// Returns `true` if the buttons were sampled.
    pub fn tick(&self, cs: CriticalSection<'_>, registry: &Registry<'_, N>) -> bool {
        let countdown = self.countdown.get(cs);
        if countdown > 1 {
            self.countdown.set(cs, countdown - 1);
            return false;
        }
        self.countdown.set(cs, self.window.ticks());
        for (history, button) in self.histories.iter().zip(registry.iter()) {
            let pressed = button.sample_pressed();
            history.update(cs, |h| h.push(pressed));
        }
        true
    }

    fn cell(&self, id: ButtonId) -> Result<&MutexCell<History>, Error> {
        self.histories
            .get(id.index())
            .ok_or(Error::UnknownButton(id))
    }

    pub fn history(&self, cs: CriticalSection<'_>, id: ButtonId) -> Result<History, Error> {
        Ok(self.cell(id)?.get(cs))
    }

    /// Classify the history of one button.
    ///
    /// The caller must hold a real critical section,
    /// because a released edge writes the history.
    pub fn classify(&self, cs: CriticalSection<'_>, id: ButtonId) -> Result<ButtonState, Error> {
        let cell = self.cell(id)?;
        let mut history = cell.get(cs);
        let state = ButtonState::classify(&mut history);
        if state == ButtonState::ReleasedEdge {
            cell.set(cs, history);
        }
        Ok(state)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        port::{Pin, mock::MockPort},
        registry::ButtonConfig,
    };

    #[test]
    fn test_window() {
        assert_eq!(SampleWindow::new(0), Err(ConfigError::ZeroSampleWindow));
        assert_eq!(SampleWindow::new(5).unwrap().ticks(), 5);
        assert_eq!(SampleWindow::default(), SampleWindow::EVERY_TICK);
    }

    #[test]
    fn test_decimation() {
        let port = MockPort::new();
        let reg = Registry::new([ButtonConfig::new(&port, Pin::P1)]);
        let sampler = Sampler::<1>::new(SampleWindow::new(3).unwrap());
        let id = ButtonId::new(0);
        port.press(Pin::P1, true);

        critical_section::with(|cs| {
            let sampled: [bool; 9] = core::array::from_fn(|_| sampler.tick(cs, &reg));
            assert_eq!(
                sampled,
                [false, false, true, false, false, true, false, false, true]
            );
            assert_eq!(sampler.history(cs, id).unwrap().bits(), 0b111);
        });
    }

    #[test]
    fn test_active_low() {
        let port = MockPort::new();
        let reg = Registry::new([
            ButtonConfig::new(&port, Pin::P0),
            ButtonConfig::new(&port, Pin::P7),
        ]);
        let sampler = Sampler::<2>::new(SampleWindow::EVERY_TICK);
        port.drive(Pin::P0, false);
        port.drive(Pin::P7, true);

        critical_section::with(|cs| {
            for _ in 0..8 {
                assert!(sampler.tick(cs, &reg));
            }
            let a = ButtonId::new(0);
            let b = ButtonId::new(1);
            assert_eq!(sampler.history(cs, a).unwrap().bits(), 0xFF);
            assert_eq!(sampler.history(cs, b).unwrap().bits(), 0x00);
            assert_eq!(sampler.classify(cs, a), Ok(ButtonState::Down));
            assert_eq!(sampler.classify(cs, b), Ok(ButtonState::Up));
            assert_eq!(
                sampler.classify(cs, ButtonId::new(2)),
                Err(Error::UnknownButton(ButtonId::new(2)))
            );
        });
    }

    #[test]
    fn test_release_written_back() {
        let port = MockPort::new();
        let reg = Registry::new([ButtonConfig::new(&port, Pin::P3)]);
        let sampler = Sampler::<1>::new(SampleWindow::EVERY_TICK);
        let id = ButtonId::new(0);

        critical_section::with(|cs| {
            port.press(Pin::P3, true);
            sampler.tick(cs, &reg);
            port.press(Pin::P3, false);
            for _ in 0..7 {
                sampler.tick(cs, &reg);
            }
            assert_eq!(sampler.history(cs, id).unwrap().bits(), 0b1000_0000);
            assert_eq!(sampler.classify(cs, id), Ok(ButtonState::ReleasedEdge));
            assert_eq!(sampler.history(cs, id).unwrap().bits(), 0);
            assert_eq!(sampler.classify(cs, id), Ok(ButtonState::Up));
        });
    }
}

// vim: ts=4 sw=4 expandtab
