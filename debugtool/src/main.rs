// -*- coding: utf-8 -*-

#![forbid(unsafe_code)]

mod frame;
mod serial;

use crate::{
    frame::{Frame, Round},
    serial::run_serial,
};
use anyhow as ah;
use avr_debounce::{ButtonState, History};
use clap::Parser;
use std::{fmt::Write as _, sync::mpsc, thread, time::Duration};

#[derive(Parser, Debug)]
struct Opts {
    /// Serial port the firmware debug USART is connected to.
    #[arg(default_value = "/dev/ttyUSB0")]
    port: String,

    /// Only print a round if a button state changed.
    #[arg(short, long)]
    changes_only: bool,
}

fn button_state(bits: u8) -> ButtonState {
    // Classify a copy. The released edge reset must not
    // leak into the next round.
    let mut history = History::from_bits(bits);
    ButtonState::classify(&mut history)
}

fn format_round(round: &Round) -> String {
    let mut line = String::new();
    match round.ticks {
        Some(t) => write!(line, "t={t:5}").ok(),
        None => write!(line, "t=    ?").ok(),
    };
    for (i, b) in round.buttons.iter().enumerate() {
        match b {
            Some(bits) => write!(line, " | B{i} {bits:08b} {:?}", button_state(*bits)).ok(),
            None => write!(line, " | B{i} ?").ok(),
        };
    }
    if let Some(s) = round.stack_free {
        write!(line, " | stack {s}").ok();
    }
    line
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    let (ser_notify_tx, ser_notify_rx) = mpsc::channel();

    thread::scope(|s| {
        s.spawn(|| {
            loop {
                if let Err(e) = run_serial(&opts.port, &ser_notify_tx) {
                    eprintln!("Serial error: {e:?}");
                }
                thread::sleep(Duration::from_millis(5000));
            }
        });

        let mut round = Round::default();
        let mut prev_states = None;
        while let Ok(frame) = ser_notify_rx.recv() {
            match frame {
                Frame::Value { probe, value } => round.update(probe, value),
                Frame::End => {
                    let states = round.buttons.map(|b| b.map(button_state));
                    if !opts.changes_only || prev_states != Some(states) {
                        println!("{}", format_round(&round));
                    }
                    prev_states = Some(states);
                    round = Round::default();
                }
            }
        }
    });
    Ok(())
}


// vim: ts=4 sw=4 expandtab
