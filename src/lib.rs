// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button debouncing by periodic sampling.
//!
//! A compare-match timer produces a tick (nominally 1 ms). On every Nth tick
//! the interrupt handler samples each configured button and shifts the sample
//! into an 8 bit rolling history. The foreground loop polls a debounced
//! [ButtonState] derived from that history.
//!
//! ```ignore
//! static ENGINE: Debouncer<'static, 2> = match Debouncer::configure(
//!     [ButtonConfig::new(&PORTD, Pin::P4), ButtonConfig::new(&PORTB, Pin::P5)],
//!     5,          // sample every 5 ticks
//!     16_000_000, // F_CPU
//!     1000,       // ticks per second
//! ) {
//!     Ok(e) => e,
//!     Err(_) => panic!("invalid debounce configuration"),
//! };
//!
//! // Timer compare-match ISR:
//! ENGINE.on_tick(&irq_ctx);
//!
//! // main() loop:
//! if ENGINE.poll(&main_ctx, ButtonId::new(0))? == ButtonState::PressedEdge { /* ... */ }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod ctx;
pub mod debouncer;
pub mod error;
pub mod history;
pub mod port;
pub mod registry;
pub mod sampler;
pub mod state;
pub mod tick;
pub mod timer;

pub use crate::{
    ctx::{IrqCtx, MainCtx, MutexCell},
    debouncer::{Debouncer, TickOutcome},
    error::{ConfigError, Error},
    history::History,
    port::{Direction, Pin, Port},
    registry::{ButtonConfig, ButtonId, Registry},
    sampler::SampleWindow,
    state::ButtonState,
    tick::{TickCount, TickCounter, TickDelta, TickSnapshot},
    timer::{Prescaler, TickTimer, TimerConfig},
};

// vim: ts=4 sw=4 expandtab
