// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::mcu;
use avr_debounce::{Direction, Pin, Port};

#[rustfmt::skip]
macro_rules! impl_port {
    (
        $struct:ident,
        $name:ident,
        $module:ident,
        $port:ident,
        $pin:ident,
        $ddr:ident
    ) => {
        pub struct $struct;

        pub static $name: $struct = $struct;

        impl $struct {
            #[inline(always)]
            fn regs(&self) -> &'static mcu::$module::RegisterBlock {
                // SAFETY: The port register block is always mapped.
                //         PINx is only ever read. DDRx and PORTx are only
                //         written from the main context.
                unsafe { &*mcu::$name::ptr() }
            }
        }

        impl Port for $struct {
            #[inline(always)]
            fn read(&self) -> u8 {
                self.regs().$pin().read().bits()
            }

            #[inline(always)]
            fn set_direction(&self, pin: Pin, dir: Direction) {
                self.regs().$ddr().modify(|r, w| {
                    let bits = match dir {
                        Direction::Input => r.bits() & !pin.mask(),
                        Direction::Output => r.bits() | pin.mask(),
                    };
                    // SAFETY: All bit patterns are valid for DDRx.
                    unsafe { w.bits(bits) }
                });
            }

            #[inline(always)]
            fn set_pull_up(&self, pin: Pin, enable: bool) {
                self.regs().$port().modify(|r, w| {
                    let bits = if enable {
                        r.bits() | pin.mask()
                    } else {
                        r.bits() & !pin.mask()
                    };
                    // SAFETY: All bit patterns are valid for PORTx.
                    unsafe { w.bits(bits) }
                });
            }
        }

        impl $struct {
            /// Drive an output pin.
            #[inline(always)]
            #[allow(dead_code)]
            pub fn set(&self, pin: Pin, high: bool) {
                // The PORTx bit is the output level for output pins.
                self.set_pull_up(pin, high);
            }
        }
    };
}

impl_port!(PortB, PORTB, portb, portb, pinb, ddrb);
impl_port!(PortC, PORTC, portc, portc, pinc, ddrc);
impl_port!(PortD, PORTD, portd, portd, pind, ddrd);

/// Status LED on PB5, active high.
pub const LED: Pin = Pin::P5;

pub fn led_init() {
    PORTB.set(LED, false);
    PORTB.set_direction(LED, Direction::Output);
}

#[inline]
pub fn led_set(on: bool) {
    PORTB.set(LED, on);
}

// vim: ts=4 sw=4 expandtab
