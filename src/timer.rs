// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generator configuration.
//!
//! The tick comes from an 8 bit timer in clear-timer-on-compare mode.
//! The timer counts prescaled clock cycles and restarts at zero when it
//! reaches the compare threshold, so the period does not drift:
//!
//! `threshold = clock / (prescale * ticks_per_second) - 1`

use crate::error::ConfigError;

/// Maximum deviation of the achieved tick rate from the requested one.
pub const MAX_RATE_ERROR_PPM: u64 = 5_000;

/// Clock prescaler of the tick timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div1,
    Div8,
    Div32,
    Div64,
    Div128,
    Div256,
    Div1024,
}

impl Prescaler {
    #[inline]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
            Self::Div32 => 32,
            Self::Div64 => 64,
            Self::Div128 => 128,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }
}

/// Prescalers of the AVR Timer/Counter0, smallest first.
pub const TIMER0_PRESCALERS: &[Prescaler] = &[
    Prescaler::Div1,
    Prescaler::Div8,
    Prescaler::Div64,
    Prescaler::Div256,
    Prescaler::Div1024,
];

/// Prescalers of the AVR Timer/Counter2, smallest first.
pub const TIMER2_PRESCALERS: &[Prescaler] = &[
    Prescaler::Div1,
    Prescaler::Div8,
    Prescaler::Div32,
    Prescaler::Div64,
    Prescaler::Div128,
    Prescaler::Div256,
    Prescaler::Div1024,
];

/// Validated tick timer setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    clock_hz: u32,
    ticks_per_second: u32,
    prescaler: Prescaler,
    compare: u8,
}

impl TimerConfig {
    /// Configuration for Timer/Counter0.
    pub const fn new(clock_hz: u32, ticks_per_second: u32) -> Result<Self, ConfigError> {
        Self::with_prescalers(clock_hz, ticks_per_second, TIMER0_PRESCALERS)
    }

    /// Pick the smallest prescaler from `prescalers` that reaches
    /// `ticks_per_second` with an 8 bit threshold.
    ///
    /// `prescalers` must be sorted smallest first.
    pub const fn with_prescalers(
        clock_hz: u32,
        ticks_per_second: u32,
        prescalers: &[Prescaler],
    ) -> Result<Self, ConfigError> {
        if ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        let clock = clock_hz as u64;
        let mut i = 0;
        while i < prescalers.len() {
            let prescaler = prescalers[i];
            let per_tick = prescaler.divisor() as u64 * ticks_per_second as u64;
            // Timer counts per tick, rounded to nearest.
            let counts = (clock + per_tick / 2) / per_tick;
            if counts >= 1 && counts <= 256 {
                let achieved = counts * per_tick;
                let deviation = achieved.abs_diff(clock);
                if deviation * 1_000_000 <= MAX_RATE_ERROR_PPM * clock {
                    return Ok(Self {
                        clock_hz,
                        ticks_per_second,
                        prescaler,
                        compare: (counts - 1) as u8,
                    });
                }
            }
            i += 1;
        }
        Err(ConfigError::TickRateUnreachable {
            clock_hz,
            ticks_per_second,
        })
    }

    #[inline]
    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Requested tick rate.
    #[inline]
    pub const fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    #[inline]
    pub const fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Compare register value (OCRxA).
    #[inline]
    pub const fn compare(&self) -> u8 {
        self.compare
    }

    /// Achieved tick rate in millihertz.
    pub const fn actual_ticks_per_second_milli(&self) -> u64 {
        let per_tick = self.prescaler.divisor() as u64 * (self.compare as u64 + 1);
        self.clock_hz as u64 * 1000 / per_tick
    }

    /// Achieved tick period in microseconds, rounded down.
    pub const fn tick_micros(&self) -> u32 {
        let per_tick = self.prescaler.divisor() as u64 * (self.compare as u64 + 1);
        (per_tick * 1_000_000 / self.clock_hz as u64) as u32
    }
}

/// A hardware timer that can produce the tick.
///
/// `arm` must set up a free running compare-match timer with the
/// prescaler and the threshold of `config` and enable its interrupt.
/// The interrupt handler then calls [crate::Debouncer::on_tick].
pub trait TickTimer {
    fn arm(&mut self, config: &TimerConfig);
}


// vim: ts=4 sw=4 expandtab
