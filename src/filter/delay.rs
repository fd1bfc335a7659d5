use embassy_time::{Duration, Instant};
use heapless::Deque;

use super::{CHAIN_MAX, Filter};
use crate::math::{lerp, sanitize};

const DELAY_MS_DEFAULT: u32 = 180;
const DELAY_FEEDBACK_DEFAULT: f32 = 0.35;
const DELAY_MIX_DEFAULT: f32 = 0.3;
const DELAY_MS_MIN: u32 = 10;
const DELAY_MS_MAX: u32 = 1_000;
const DELAY_FEEDBACK_MAX: f32 = 0.95;

/// Stored samples; entries are thinned so the history spans the delay at
/// any tick rate
const HISTORY_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayConfig {
    pub enabled: bool,
    pub delay_ms: u32,
    pub feedback: f32,
    pub mix: f32,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_ms: DELAY_MS_DEFAULT,
            feedback: DELAY_FEEDBACK_DEFAULT,
            mix: DELAY_MIX_DEFAULT,
        }
    }
}

impl DelayConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            delay_ms: self.delay_ms.clamp(DELAY_MS_MIN, DELAY_MS_MAX),
            feedback: sanitize(self.feedback, 0.0, DELAY_FEEDBACK_MAX, DELAY_FEEDBACK_DEFAULT),
            mix: sanitize(self.mix, 0.0, 1.0, DELAY_MIX_DEFAULT),
        }
    }
}

/// Echo with feedback over a time-stamped sample history
#[derive(Debug, Clone)]
pub struct DelayFilter {
    delay: Duration,
    feedback: f32,
    mix: f32,
    history: Deque<(Instant, f32), HISTORY_LEN>,
}

impl DelayFilter {
    pub fn new(config: &DelayConfig) -> Self {
        Self {
            delay: Duration::from_millis(u64::from(config.delay_ms)),
            feedback: config.feedback,
            mix: config.mix,
            history: Deque::new(),
        }
    }

    /// Newest stored sample at least `delay` old
    ///
    /// Falls back to the oldest sample once the history is full.
    fn delayed(&self, now: Instant) -> f32 {
        let Some(cutoff) = now.checked_sub(self.delay) else {
            return 0.0;
        };
        let found = self.history.iter().rev().find(|(at, _)| *at <= cutoff);
        match found {
            Some((_, value)) => *value,
            None if self.history.is_full() => {
                self.history.front().map_or(0.0, |(_, value)| *value)
            }
            None => 0.0,
        }
    }

    /// Minimum spacing between stored samples
    fn spacing(&self) -> Duration {
        self.delay / (HISTORY_LEN as u32 - 1)
    }

    fn record(&mut self, now: Instant, value: f32) {
        let due = self
            .history
            .back()
            .and_then(|(at, _)| now.checked_duration_since(*at))
            .is_none_or(|dt| dt >= self.spacing());
        if !due {
            return;
        }
        if self.history.is_full() {
            self.history.pop_front();
        }
        let _ = self.history.push_back((now, value));
    }
}

impl Filter for DelayFilter {
    fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let delayed = self.delayed(now);
        let written = (input + delayed * self.feedback).clamp(0.0, CHAIN_MAX);
        self.record(now, written);
        lerp(input, delayed, self.mix)
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
