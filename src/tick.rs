// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic tick counter.

use crate::ctx::{CriticalSection, MutexCell};
use derive_more::{Add, AddAssign};

/// Absolute tick count.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickCount(pub u64);

/// Distance between two [TickCount]s.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, PartialOrd, Ord, Hash, Add, AddAssign)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDelta(pub u64);

impl TickCount {
    pub const ZERO: TickCount = TickCount(0);
    pub const MAX: TickCount = TickCount(u64::MAX);

    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Modular distance from `earlier` to `self`.
    #[inline]
    pub const fn wrapping_since(self, earlier: TickCount) -> TickDelta {
        TickDelta(self.0.wrapping_sub(earlier.0))
    }
}

impl TickDelta {
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Convert a duration in milliseconds at the given tick rate.
    #[inline]
    pub const fn from_millis(ms: u64, ticks_per_second: u32) -> Self {
        Self(ms * ticks_per_second as u64 / 1000)
    }
}

impl Ord for TickCount {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        if self.0 == other.0 {
            core::cmp::Ordering::Equal
        } else if self.0.wrapping_sub(other.0) & (1 << (u64::BITS - 1)) == 0 {
            core::cmp::Ordering::Greater
        } else {
            core::cmp::Ordering::Less
        }
    }
}

impl PartialOrd for TickCount {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl core::ops::Add<TickDelta> for TickCount {
    type Output = Self;

    #[inline]
    fn add(self, other: TickDelta) -> Self::Output {
        TickCount(self.0.wrapping_add(other.0))
    }
}

impl core::ops::Sub for TickCount {
    type Output = TickDelta;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        self.wrapping_since(other)
    }
}

impl From<u64> for TickCount {
    #[inline]
    fn from(ticks: u64) -> Self {
        TickCount(ticks)
    }
}

impl From<TickCount> for u64 {
    #[inline]
    fn from(stamp: TickCount) -> Self {
        stamp.0
    }
}

impl From<u64> for TickDelta {
    #[inline]
    fn from(ticks: u64) -> Self {
        TickDelta(ticks)
    }
}

impl From<TickDelta> for u64 {
    #[inline]
    fn from(delta: TickDelta) -> Self {
        delta.0
    }
}

/// Consistent view of the counter state.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickSnapshot {
    /// Current count.
    pub now: TickCount,
    /// Count recorded on the tick before the last wraparound.
    pub anchor: TickCount,
    /// Number of wraparounds so far.
    pub wraps: u32,
}

/// Tick counter written by the timer interrupt.
///
/// On the tick where the count sits at `u64::MAX` the current value is
/// recorded as the new anchor before the count wraps to zero.
/// Count, anchor and wrap counter are updated in the same critical section.
///
/// Elapsed time is computed modulo 2^64 and therefore stays correct across
/// the wrap for any interval shorter than 2^64 ticks. Callers that keep marks
/// for longer than that must compare [TickSnapshot::wraps] of the mark with
/// the current one and re-read their mark after a change.
pub struct TickCounter {
    count: MutexCell<u64>,
    anchor: MutexCell<u64>,
    wraps: MutexCell<u32>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self::starting_at(TickCount::ZERO)
    }

    pub const fn starting_at(start: TickCount) -> Self {
        Self {
            count: MutexCell::new(start.0),
            anchor: MutexCell::new(start.0),
            wraps: MutexCell::new(0),
        }
    }

    /// Count one tick. Returns `true` if the anchor was moved.
    ///
    /// Only the timer interrupt may call this.
    #[inline]
    pub fn increment(&self, cs: CriticalSection<'_>) -> bool {
        let count = self.count.get(cs);
        let reanchor = count == u64::MAX;
        if reanchor {
            self.anchor.set(cs, count);
            self.wraps.update(cs, |w| w.wrapping_add(1));
        }
        self.count.set(cs, count.wrapping_add(1));
        reanchor
    }

    /// Current count, for callers already holding a critical section.
    #[inline]
    pub fn now_cs(&self, cs: CriticalSection<'_>) -> TickCount {
        TickCount(self.count.get(cs))
    }

    /// Current count.
    ///
    /// The 64 bit value is read inside a critical section,
    /// because it is not a single atomic access on AVR.
    pub fn now(&self) -> TickCount {
        critical_section::with(|cs| self.now_cs(cs))
    }

    pub fn snapshot(&self) -> TickSnapshot {
        critical_section::with(|cs| TickSnapshot {
            now: self.now_cs(cs),
            anchor: TickCount(self.anchor.get(cs)),
            wraps: self.wraps.get(cs),
        })
    }

    /// Ticks elapsed since `mark`.
    pub fn elapsed_since(&self, mark: TickCount) -> TickDelta {
        self.now() - mark
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}


// vim: ts=4 sw=4 expandtab
