// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::history::History;

/// Debounced state of one button, as seen by the polling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Held down, all recent samples pressed.
    Down,
    /// Idle, all recent samples released.
    Up,
    /// Just settled to pressed.
    PressedEdge,
    /// Just settled to released. Reported once per release.
    ReleasedEdge,
    /// The line is bouncing or in transition.
    Indeterminate,
}

impl ButtonState {
    /// Classify a history.
    ///
    /// The released edge resets `history` (see [History::is_released_edge]).
    /// All other outcomes leave it untouched.
    pub fn classify(history: &mut History) -> Self {
        if history.is_down() {
            Self::Down
        } else if history.is_up() {
            Self::Up
        } else if history.is_pressed_edge() {
            Self::PressedEdge
        } else if history.is_released_edge() {
            Self::ReleasedEdge
        } else {
            Self::Indeterminate
        }
    }

    /// Down or just pressed.
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Down | Self::PressedEdge)
    }

    /// Up or just released.
    pub const fn is_released(self) -> bool {
        matches!(self, Self::Up | Self::ReleasedEdge)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn classify(bits: u8) -> (ButtonState, u8) {
        let mut h = History::from_bits(bits);
        let state = ButtonState::classify(&mut h);
        (state, h.bits())
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0xFF), (ButtonState::Down, 0xFF));
        assert_eq!(classify(0x00), (ButtonState::Up, 0x00));
        assert_eq!(classify(0x7F), (ButtonState::PressedEdge, 0x7F));
        assert_eq!(classify(0x80), (ButtonState::ReleasedEdge, 0x00));
        assert_eq!(classify(0x01), (ButtonState::Indeterminate, 0x01));
        assert_eq!(classify(0xFE), (ButtonState::Indeterminate, 0xFE));
        assert_eq!(classify(0xAA), (ButtonState::Indeterminate, 0xAA));
    }

    #[test]
    fn test_exactly_one_state() {
        // Every history maps to exactly one state and only the
        // released edge modifies it.
        let mut counts = [0_u32; 5];
        for bits in 0..=u8::MAX {
            let (state, after) = classify(bits);
            let i = match state {
                ButtonState::Down => 0,
                ButtonState::Up => 1,
                ButtonState::PressedEdge => 2,
                ButtonState::ReleasedEdge => 3,
                ButtonState::Indeterminate => 4,
            };
            counts[i] += 1;
            if state == ButtonState::ReleasedEdge {
                assert_eq!(after, 0);
            } else {
                assert_eq!(after, bits);
            }
        }
        assert_eq!(counts, [1, 1, 1, 1, 252]);
    }

    #[test]
    fn test_release_reported_once() {
        let mut h = History::from_bits(History::RELEASED_EDGE);
        assert_eq!(ButtonState::classify(&mut h), ButtonState::ReleasedEdge);
        assert_eq!(ButtonState::classify(&mut h), ButtonState::Up);
        assert!(ButtonState::Up.is_released());
        assert!(ButtonState::PressedEdge.is_pressed());
        assert!(!ButtonState::Indeterminate.is_pressed());
        assert!(!ButtonState::Indeterminate.is_released());
    }
}

// vim: ts=4 sw=4 expandtab
