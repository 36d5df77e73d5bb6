// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::usart::{uart_tx_cs, usart_init};
use avr_debounce::{IrqCtx, MainCtx, MutexCell};

/// Debug probes.
///
/// The discriminant is the probe id on the wire.
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Debug {
    Button0,
    Button1,
    Button2,
    Button3,
    Ticks,
    StackFree,
}
const NRVALUES: usize = 6;

const INDEXSHIFT: usize = 2;
const INDEXMASK: u8 = (1 << INDEXSHIFT) - 1;

static VALUES: [MutexCell<u16>; NRVALUES] = [const { MutexCell::new(0) }; NRVALUES];
static INDEX: MutexCell<u8> = MutexCell::new(0);

impl Debug {
    /// Probe of the button with the given registry index.
    pub const fn button(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Button0),
            1 => Some(Self::Button1),
            2 => Some(Self::Button2),
            3 => Some(Self::Button3),
            _ => None,
        }
    }

    pub fn log_u16(&self, value: u16) {
        critical_section::with(|cs| {
            let id = *self as usize;
            if let Some(v) = VALUES.get(id) {
                v.set(cs, value);
            }
        });
    }

    pub fn log_u8(&self, value: u8) {
        self.log_u16(value.into())
    }
}

/// Send the next byte of the round-robin frame stream.
///
/// Frames are `[id, lo, hi]`. After the last probe an end marker
/// frame `[0xFF, 0xFF, 0xFF]` is sent.
pub fn tx_complete_callback(c: &IrqCtx) {
    let cs = c.cs();
    let index = INDEX.get(cs);
    let id = index >> INDEXSHIFT;
    let txindex = index & INDEXMASK;

    let value = match VALUES.get(id as usize) {
        Some(v) => v.get(cs),
        None => 0xFFFF,
    };

    match txindex {
        0 => {
            let data = if id < NRVALUES as u8 { id } else { 0xFF };
            if uart_tx_cs(cs, data) {
                INDEX.set(cs, index + 1);
            }
        }
        1 => {
            if uart_tx_cs(cs, value as u8) {
                INDEX.set(cs, index + 1);
            }
        }
        2 => {
            if uart_tx_cs(cs, (value >> 8) as u8) {
                if id >= NRVALUES as u8 {
                    INDEX.set(cs, 0);
                } else {
                    INDEX.set(cs, (id + 1) << INDEXSHIFT);
                }
            }
        }
        _ => (),
    }
}

/// Start the stream. Interrupts must still be disabled.
pub fn debug_init(m: &MainCtx) {
    let cs = m.cs();
    usart_init(cs);
    // Kick off the TX-complete interrupt chain.
    if uart_tx_cs(cs, 0xFF) {
        INDEX.set(cs, 0);
    }
}

// vim: ts=4 sw=4 expandtab
