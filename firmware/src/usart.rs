// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transmit-only USART0 driver for the debug stream.

use crate::{
    debug,
    hw::{F_CPU, mcu},
};
use avr_debounce::IrqCtx;
use critical_section::CriticalSection;

const BAUD: u32 = 19_200;
const UBRR: u16 = ((F_CPU + BAUD * 8) / (BAUD * 16) - 1) as u16;

#[inline(always)]
fn regs() -> &'static mcu::usart0::RegisterBlock {
    // SAFETY: The USART0 register block is always mapped.
    //         It is configured once in main context with interrupts disabled.
    //         Afterwards only the TX path below touches it, always
    //         inside of a critical section.
    unsafe { &*mcu::USART0::ptr() }
}

/// Set up 8N1 transmission with the TX-complete interrupt enabled.
#[rustfmt::skip]
pub fn usart_init(_c: CriticalSection<'_>) {
    let u = regs();
    u.ubrr0().write(|w| w.set(UBRR));
    u.ucsr0a().write(|w| w.u2x0().clear_bit());
    u.ucsr0c().write(|w| {
        w.umsel0().usart_async()
         .upm0().disabled()
         .usbs0().stop1()
         .ucsz0().chr8()
    });
    u.ucsr0b().write(|w| {
        w.txen0().set_bit()
         .txcie0().set_bit()
    });
}

/// Put one byte into the transmit buffer.
///
/// Returns `false` if the buffer was still occupied.
pub fn uart_tx_cs(_cs: CriticalSection<'_>, data: u8) -> bool {
    let u = regs();
    if u.ucsr0a().read().udre0().bit_is_set() {
        u.udr0().write(|w| w.set(data));
        true
    } else {
        false
    }
}

pub fn irq_handler_usart_tx(c: &IrqCtx) {
    debug::tx_complete_callback(c);
}

// vim: ts=4 sw=4 expandtab
