// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::registry::ButtonId;
use core::fmt;

/// Rejected engine configuration.
///
/// All of these are detected while configuring, never at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A tick rate of zero ticks per second was requested.
    ZeroTickRate,
    /// No supported prescaler yields an 8 bit compare threshold
    /// that hits the requested tick rate closely enough.
    TickRateUnreachable { clock_hz: u32, ticks_per_second: u32 },
    /// The sample window must be at least one tick.
    ZeroSampleWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickRate => write!(f, "tick rate must not be zero"),
            Self::TickRateUnreachable {
                clock_hz,
                ticks_per_second,
            } => write!(
                f,
                "{ticks_per_second} ticks/s cannot be derived from a {clock_hz} Hz clock"
            ),
            Self::ZeroSampleWindow => write!(f, "sample window must be at least one tick"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Config(ConfigError),
    /// The id does not name a button of the registry.
    UnknownButton(ButtonId),
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::UnknownButton(id) => write!(f, "unknown button {}", id.index()),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::UnknownButton(_) => None,
        }
    }
}

// vim: ts=4 sw=4 expandtab
