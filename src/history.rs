// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rolling history of the most recent raw samples of one button.
///
/// Bit 0 is the newest sample, bit 7 the oldest. A set bit means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct History(u8);

impl History {
    /// Number of samples kept.
    pub const BITS: u32 = u8::BITS;

    /// Number of consecutive agreeing samples that settle an edge.
    pub const SETTLE: u32 = 7;

    const SETTLE_MASK: u8 = u8::MAX >> (Self::BITS - Self::SETTLE);

    /// All samples pressed.
    pub const ALL_PRESSED: u8 = u8::MAX;

    /// All samples released.
    pub const ALL_RELEASED: u8 = 0;

    /// One released sample followed by `SETTLE` pressed samples.
    pub const PRESSED_EDGE: u8 = Self::SETTLE_MASK;

    /// One pressed sample followed by `SETTLE` released samples.
    pub const RELEASED_EDGE: u8 = !Self::SETTLE_MASK;

    pub const fn new() -> Self {
        Self(Self::ALL_RELEASED)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Shift in one new sample. The oldest sample is discarded.
    #[inline]
    #[must_use]
    pub const fn push(self, pressed: bool) -> Self {
        Self((self.0 << 1) | pressed as u8)
    }

    /// Debounced steady pressed state.
    #[inline]
    pub const fn is_down(self) -> bool {
        self.0 == Self::ALL_PRESSED
    }

    /// Debounced steady released state.
    #[inline]
    pub const fn is_up(self) -> bool {
        self.0 == Self::ALL_RELEASED
    }

    /// The button has just settled to pressed.
    #[inline]
    pub const fn is_pressed_edge(self) -> bool {
        self.0 == Self::PRESSED_EDGE
    }

    /// The button has just settled to released.
    ///
    /// Unlike the other predicates this one has a side effect:
    /// if it fires, the history is reset to all-released.
    /// A release is therefore reported exactly once. A second call
    /// returns `false`.
    #[inline]
    pub fn is_released_edge(&mut self) -> bool {
        if self.0 == Self::RELEASED_EDGE {
            self.0 = Self::ALL_RELEASED;
            true
        } else {
            false
        }
    }

    /// Number of pressed samples in the history.
    #[inline]
    pub const fn pressed_count(self) -> u32 {
        self.0.count_ones()
    }
}

const _: () = assert!(History::SETTLE >= 1 && History::SETTLE < History::BITS);
const _: () = assert!(History::PRESSED_EDGE == 0b0111_1111);
const _: () = assert!(History::RELEASED_EDGE == 0b1000_0000);

impl From<History> for u8 {
    #[inline]
    fn from(h: History) -> Self {
        h.0
    }
}


// vim: ts=4 sw=4 expandtab
