// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod app;
#[cfg(feature = "debug")]
mod debug;
mod hw;
mod ports;
mod timer;
#[cfg(feature = "debug")]
mod usart;

use crate::{
    app::App,
    hw::{F_CPU, Peripherals, interrupt, unwrap_option, wdt_init, wdt_poke},
    ports::{PORTC, PORTD},
    timer::Timer0,
};
use avr_debounce::{ButtonConfig, Debouncer, MainCtx, Pin};

/// Tick rate of the debounce timer.
const TICKS_PER_SECOND: u32 = 1000;
/// Sample the buttons on every 5th tick.
const SAMPLE_WINDOW_TICKS: u32 = 5;
/// Number of buttons.
const NR_BUTTONS: usize = 4;

/// The debounce engine. An impossible timer setup fails the build.
pub static ENGINE: Debouncer<'static, NR_BUTTONS> = match Debouncer::configure(
    [
        ButtonConfig::new(&PORTD, Pin::P4),
        ButtonConfig::new(&PORTD, Pin::P5),
        ButtonConfig::new(&PORTD, Pin::P6),
        ButtonConfig::new(&PORTC, Pin::P1),
    ],
    SAMPLE_WINDOW_TICKS,
    F_CPU,
    TICKS_PER_SECOND,
) {
    Ok(engine) => engine,
    Err(_) => panic!("Invalid debounce configuration"),
};

#[avr_device::entry]
fn main() -> ! {
    wdt_init();

    let dp = unwrap_option(Peripherals::take());

    let mut tc0 = Timer0 { TC0: dp.TC0 };

    // SAFETY:
    // This is the context handle for the main() function.
    // Holding a reference to this object proves that the holder
    // is running in main() context.
    // Interrupts are still disabled.
    let m = unsafe { MainCtx::new() };

    let mut app = App::new();
    app.init(&m);

    #[cfg(feature = "debug")]
    debug::debug_init(&m);

    ENGINE.start(&m, &mut tc0);

    // SAFETY: This must be after construction of MainCtx
    //         and after the engine is started.
    unsafe { interrupt::enable() };

    loop {
        app.run(&m);
        wdt_poke(&dp.WDT);
    }
}

// vim: ts=4 sw=4 expandtab
