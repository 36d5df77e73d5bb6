// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    ENGINE,
    hw::{mcu, reset_system},
};
use avr_debounce::{IrqCtx, Prescaler, TickTimer, TimerConfig};

#[allow(non_snake_case)]
pub struct Timer0 {
    pub TC0: mcu::TC0,
}

impl TickTimer for Timer0 {
    #[rustfmt::skip]
    fn arm(&mut self, config: &TimerConfig) {
        let tc0 = &self.TC0;
        // Stop the timer while reconfiguring.
        tc0.tccr0b().write(|w| w.cs0().no_clock());
        tc0.timsk0().write(|w| w);
        tc0.tccr0a().write(|w| w.wgm0().ctc());
        tc0.ocr0a().write(|w| w.set(config.compare()));
        tc0.tcnt0().write(|w| w.set(0));
        tc0.tifr0().write(|w| w.ocf0a().set_bit());
        tc0.timsk0().write(|w| w.ocie0a().set_bit());
        tc0.tccr0b().write(|w| match config.prescaler() {
            Prescaler::Div1 => w.cs0().direct(),
            Prescaler::Div8 => w.cs0().prescale_8(),
            Prescaler::Div64 => w.cs0().prescale_64(),
            Prescaler::Div256 => w.cs0().prescale_256(),
            Prescaler::Div1024 => w.cs0().prescale_1024(),
            // Timer0 does not have these.
            Prescaler::Div32 | Prescaler::Div128 => reset_system(),
        });
    }
}

pub fn irq_handler_timer0_compa(c: &IrqCtx) {
    ENGINE.on_tick(c);
}

// vim: ts=4 sw=4 expandtab
