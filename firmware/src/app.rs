// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "debug")]
use crate::debug::Debug;
use crate::{
    ENGINE,
    hw::unwrap_result,
    ports::{led_init, led_set},
};
use avr_debounce::{ButtonState, MainCtx};

/// Foreground application: the status LED follows the buttons.
///
/// The LED is switched on while any button is debounced down
/// and switched off once all buttons are debounced up.
/// Edges and indeterminate histories keep the current LED state.
pub struct App {
    led: bool,
}

impl App {
    pub const fn new() -> Self {
        Self { led: false }
    }

    pub fn init(&mut self, _m: &MainCtx) {
        led_init();
        self.led = false;
    }

    pub fn run(&mut self, m: &MainCtx) {
        let mut any_down = false;
        let mut all_up = true;

        for id in ENGINE.registry().ids() {
            let state = unwrap_result(ENGINE.poll(m, id));
            match state {
                ButtonState::Up => (),
                ButtonState::Down => {
                    any_down = true;
                    all_up = false;
                }
                _ => all_up = false,
            }

            #[cfg(feature = "debug")]
            if let Some(probe) = Debug::button(id.index()) {
                probe.log_u8(unwrap_result(ENGINE.history(m, id)).bits());
            }
        }

        let led = if any_down {
            true
        } else if all_up {
            false
        } else {
            self.led
        };
        if led != self.led {
            led_set(led);
            self.led = led;
        }

        #[cfg(feature = "debug")]
        {
            Debug::Ticks.log_u16(ENGINE.now().ticks() as u16);
            Debug::StackFree.log_u16(avr_stack::estimate_unused_stack_space());
        }
    }
}

// vim: ts=4 sw=4 expandtab
