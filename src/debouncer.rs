// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    ctx::{IrqCtx, MainCtx},
    error::{ConfigError, Error},
    history::History,
    registry::{ButtonConfig, ButtonId, Registry},
    sampler::{SampleWindow, Sampler},
    state::ButtonState,
    tick::{TickCount, TickCounter, TickDelta, TickSnapshot},
    timer::{TickTimer, TimerConfig},
};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// The buttons were sampled on this tick.
    pub sampled: bool,
    /// The tick counter moved its anchor before wrapping.
    pub reanchored: bool,
}

/// The debounce engine.
///
/// One instance is shared by the timer interrupt, which calls
/// [Debouncer::on_tick], and the foreground loop, which polls.
/// It is meant to live in a `static`.
pub struct Debouncer<'a, const N: usize> {
    registry: Registry<'a, N>,
    timer: TimerConfig,
    counter: TickCounter,
    sampler: Sampler<N>,
}

impl<'a, const N: usize> Debouncer<'a, N> {
    pub const fn new(
        buttons: [ButtonConfig<'a>; N],
        window: SampleWindow,
        timer: TimerConfig,
    ) -> Self {
        Self {
            registry: Registry::new(buttons),
            timer,
            counter: TickCounter::new(),
            sampler: Sampler::new(window),
        }
    }

    /// Validate the sample window and the tick rate and build the engine.
    ///
    /// This is a const fn. Evaluated in a `static` initializer,
    /// an impossible configuration fails the build.
    pub const fn configure(
        buttons: [ButtonConfig<'a>; N],
        sample_window_ticks: u32,
        clock_hz: u32,
        ticks_per_second: u32,
    ) -> Result<Self, ConfigError> {
        let window = match SampleWindow::new(sample_window_ticks) {
            Ok(w) => w,
            Err(e) => return Err(e),
        };
        let timer = match TimerConfig::new(clock_hz, ticks_per_second) {
            Ok(t) => t,
            Err(e) => return Err(e),
        };
        Ok(Self::new(buttons, window, timer))
    }

    /// Configure all button pins as inputs with pull-up and arm the tick timer.
    ///
    /// Interrupts should still be disabled when this runs.
    pub fn start(&self, _m: &MainCtx<'_>, timer: &mut impl TickTimer) {
        self.registry.configure_all_inputs();
        timer.arm(&self.timer);
    }

    /// Timer compare-match callback.
    #[inline]
    pub fn on_tick(&self, c: &IrqCtx<'_>) -> TickOutcome {
        let cs = c.cs();
        let reanchored = self.counter.increment(cs);
        let sampled = self.sampler.tick(cs, &self.registry);
        TickOutcome {
            sampled,
            reanchored,
        }
    }

    /// Debounced state of one button.
    pub fn poll(&self, _m: &MainCtx<'_>, id: ButtonId) -> Result<ButtonState, Error> {
        // A released edge resets the history. That read-modify-write
        // must not interleave with the sampler.
        critical_section::with(|cs| self.sampler.classify(cs, id))
    }

    /// Raw rolling history of one button.
    pub fn history(&self, m: &MainCtx<'_>, id: ButtonId) -> Result<History, Error> {
        self.sampler.history(m.cs(), id)
    }

    pub fn now(&self) -> TickCount {
        self.counter.now()
    }

    pub fn elapsed_since(&self, mark: TickCount) -> TickDelta {
        self.counter.elapsed_since(mark)
    }

    pub fn snapshot(&self) -> TickSnapshot {
        self.counter.snapshot()
    }

    #[inline]
    pub fn registry(&self) -> &Registry<'a, N> {
        &self.registry
    }

    #[inline]
    pub const fn timer_config(&self) -> &TimerConfig {
        &self.timer
    }

    #[inline]
    pub const fn sample_window(&self) -> SampleWindow {
        self.sampler.window()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        port::{Pin, mock::MockPort},
        timer::Prescaler,
    };

    const F_CPU: u32 = 8_000_000;

    #[derive(Default)]
    struct MockTimer {
        armed: Option<TimerConfig>,
    }

    impl TickTimer for MockTimer {
        fn arm(&mut self, config: &TimerConfig) {
            self.armed = Some(*config);
        }
    }

    fn ctx() -> (MainCtx<'static>, IrqCtx<'static>) {
        // SAFETY: Tests have no interrupts. Both contexts run on the test thread.
        unsafe { (MainCtx::new(), IrqCtx::new()) }
    }

    #[test]
    fn test_configure() {
        let port = MockPort::new();
        let deb = Debouncer::configure([ButtonConfig::new(&port, Pin::P0)], 5, F_CPU, 1000)
            .unwrap();
        assert_eq!(deb.sample_window().ticks(), 5);
        assert_eq!(deb.timer_config().prescaler(), Prescaler::Div64);
        assert_eq!(deb.timer_config().compare(), 124);
        assert_eq!(deb.registry().len(), 1);

        assert!(matches!(
            Debouncer::configure([ButtonConfig::new(&port, Pin::P0)], 0, F_CPU, 1000),
            Err(ConfigError::ZeroSampleWindow)
        ));
        assert!(matches!(
            Debouncer::configure([ButtonConfig::new(&port, Pin::P0)], 1, F_CPU, 1),
            Err(ConfigError::TickRateUnreachable { .. })
        ));
    }

    #[test]
    fn test_start() {
        let port_b = MockPort::new();
        let port_d = MockPort::new();
        let deb = Debouncer::configure(
            [
                ButtonConfig::new(&port_d, Pin::P4),
                ButtonConfig::new(&port_b, Pin::P5),
            ],
            1,
            F_CPU,
            1000,
        )
        .unwrap();
        let (m, _) = ctx();
        let mut timer = MockTimer::default();
        deb.start(&m, &mut timer);

        assert_eq!(timer.armed, Some(*deb.timer_config()));
        assert_eq!(port_d.ddr() & Pin::P4.mask(), 0);
        assert_eq!(port_d.pull_ups(), Pin::P4.mask());
        assert_eq!(port_b.ddr() & Pin::P5.mask(), 0);
        assert_eq!(port_b.pull_ups(), Pin::P5.mask());
    }

    #[test]
    fn test_press_release_cycle() {
        let port = MockPort::new();
        let deb =
            Debouncer::configure([ButtonConfig::new(&port, Pin::P2)], 1, F_CPU, 1000).unwrap();
        let (m, c) = ctx();
        let id = ButtonId::new(0);

        assert_eq!(deb.poll(&m, id), Ok(ButtonState::Up));

        port.press(Pin::P2, true);
        let mut states = [ButtonState::Indeterminate; 8];
        for state in &mut states {
            deb.on_tick(&c);
            *state = deb.poll(&m, id).unwrap();
        }
        assert_eq!(states[..6], [ButtonState::Indeterminate; 6]);
        assert_eq!(states[6], ButtonState::PressedEdge);
        assert_eq!(states[7], ButtonState::Down);

        port.press(Pin::P2, false);
        for _ in 0..7 {
            deb.on_tick(&c);
        }
        assert_eq!(deb.history(&m, id).unwrap().bits(), 0b1000_0000);
        assert_eq!(deb.poll(&m, id), Ok(ButtonState::ReleasedEdge));
        assert_eq!(deb.poll(&m, id), Ok(ButtonState::Up));
        assert_eq!(deb.history(&m, id).unwrap().bits(), 0);

        assert_eq!(deb.now(), TickCount(15));
        assert_eq!(
            deb.poll(&m, ButtonId::new(1)),
            Err(Error::UnknownButton(ButtonId::new(1)))
        );
    }

    #[test]
    fn test_steady_levels_all_buttons() {
        let port = MockPort::new();
        let deb = Debouncer::configure(
            [
                ButtonConfig::new(&port, Pin::P0),
                ButtonConfig::new(&port, Pin::P1),
                ButtonConfig::new(&port, Pin::P2),
            ],
            1,
            F_CPU,
            1000,
        )
        .unwrap();
        let (m, c) = ctx();

        port.press(Pin::P1, true);
        for _ in 0..8 {
            deb.on_tick(&c);
        }
        for id in deb.registry().ids() {
            let mut h = deb.history(&m, id).unwrap();
            if id == ButtonId::new(1) {
                assert!(h.is_down());
                assert!(!h.is_up());
            } else {
                assert!(h.is_up());
                assert!(!h.is_down());
            }
            assert!(!h.is_pressed_edge());
            assert!(!h.is_released_edge());
        }
    }

    #[test]
    fn test_mixed_ports_window_5() {
        let port_b = MockPort::new();
        let port_c = MockPort::new();
        let port_d = MockPort::new();
        let buttons = [
            (&port_d, Pin::P4),
            (&port_d, Pin::P5),
            (&port_c, Pin::P6),
            (&port_b, Pin::P5),
        ];
        let deb = Debouncer::configure(
            buttons.map(|(port, pin)| ButtonConfig::new(port, pin)),
            5,
            F_CPU,
            1000,
        )
        .unwrap();
        let (m, c) = ctx();
        let mut timer = MockTimer::default();
        deb.start(&m, &mut timer);

        let press_all = |pressed: bool| {
            for (port, pin) in buttons {
                port.press(pin, pressed);
            }
        };

        // 20 ticks of bouncing: the level flips on every tick.
        for t in 1..=20_u64 {
            press_all(t % 2 == 1);
            let outcome = deb.on_tick(&c);
            assert_eq!(outcome.sampled, t % 5 == 0);
            assert!(!outcome.reanchored);
        }
        let mark = deb.now();
        assert_eq!(mark, TickCount(20));

        // Then steady pressed. The 8th all-pressed sample is taken
        // 40 ticks after the bouncing stopped.
        press_all(true);
        for t in 1..=40_u64 {
            deb.on_tick(&c);
            for id in deb.registry().ids() {
                let state = deb.poll(&m, id).unwrap();
                if t < 40 {
                    assert_ne!(state, ButtonState::Down, "tick {t}");
                } else {
                    assert_eq!(state, ButtonState::Down, "tick {t}");
                }
                if (35..40).contains(&t) {
                    assert_eq!(state, ButtonState::PressedEdge, "tick {t}");
                }
            }
        }
        assert_eq!(deb.elapsed_since(mark), TickDelta(40));
    }
}

// vim: ts=4 sw=4 expandtab
