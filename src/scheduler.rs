//! Control loop pacing
//!
//! Portable tick scheduling without async or platform timers. The caller
//! sleeps for the returned duration between ticks.

use embassy_time::{Duration, Instant};

use crate::PwmOutput;
use crate::engine::LampEngine;
use crate::events::LampEvents;
use crate::intent::IntentProcessor;

/// Default control period
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Periods of lag tolerated before the schedule restarts from `now`
const MAX_LAG_PERIODS: u32 = 2;

/// Result of a control tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// When the next tick is due
    pub next_deadline: Instant,
    /// How long to wait until then (zero when behind schedule)
    pub sleep_duration: Duration,
    /// Intents applied before this tick's output
    pub intents_applied: usize,
}

/// Runs intents and the engine tick at a fixed cadence
///
/// # Usage
///
/// ```ignore
/// let channel = IntentChannel::<8>::new();
/// let engine = LampEngine::new(pwm, &LampEngineConfig::default(), Instant::now());
/// let mut control = ControlLoop::new(engine, IntentProcessor::new(channel.receiver()));
///
/// loop {
///     let result = control.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct ControlLoop<'a, D: PwmOutput, E: LampEvents, const SIZE: usize> {
    engine: LampEngine<D, E>,
    intents: IntentProcessor<'a, SIZE>,
    next_tick: Option<Instant>,
    period: Duration,
}

impl<'a, D: PwmOutput, E: LampEvents, const SIZE: usize> ControlLoop<'a, D, E, SIZE> {
    /// Create a loop running at [`DEFAULT_TICK`]
    pub fn new(engine: LampEngine<D, E>, intents: IntentProcessor<'a, SIZE>) -> Self {
        Self::with_period(engine, intents, DEFAULT_TICK)
    }

    /// Create a loop with a custom period (at least 1 ms)
    pub fn with_period(
        engine: LampEngine<D, E>,
        intents: IntentProcessor<'a, SIZE>,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            intents,
            next_tick: None,
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Apply pending intents, then run one engine tick
    ///
    /// Intents always land before the tick's output so a request shows up in
    /// the same frame. After a stall longer than two periods the schedule
    /// restarts from `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_lag = self.period * MAX_LAG_PERIODS;
        let mut next = match self.next_tick {
            Some(next) if now <= next + max_lag => next,
            _ => now,
        };

        let intents_applied = self.intents.process_pending(&mut self.engine, now);
        self.engine.tick(now);

        next += self.period;
        self.next_tick = Some(next);

        TickResult {
            next_deadline: next,
            sleep_duration: next
                .checked_duration_since(now)
                .unwrap_or(Duration::from_ticks(0)),
            intents_applied,
        }
    }

    pub const fn engine(&self) -> &LampEngine<D, E> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LampEngine<D, E> {
        &mut self.engine
    }

    /// Give the engine back, e.g. to shut down
    pub fn into_engine(self) -> LampEngine<D, E> {
        self.engine
    }
}
