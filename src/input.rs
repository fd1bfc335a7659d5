//! Debounced switch and touch-dimmer gesture decoding
//!
//! Both helpers only interpret sampled levels; the caller forwards the
//! resulting requests to the engine (usually as intents).

use embassy_time::{Duration, Instant};

use crate::math::sanitize;

/// Time a switch level must stay stable before it counts
pub const SWITCH_DEBOUNCE: Duration = Duration::from_millis(25);

pub const TOUCH_HOLD_DEFAULT: Duration = Duration::from_millis(1_000);
pub const TOUCH_STEP_DEFAULT: f32 = 0.005;
/// Interval between dimming steps while held
pub const DIM_STEP_INTERVAL: Duration = Duration::from_millis(25);
pub const DIM_MIN: f32 = 0.05;
pub const DIM_MAX: f32 = 0.95;
const DIM_STEP_MAX: f32 = 0.2;

fn elapsed_since(start: Instant, now: Instant) -> Duration {
    now.checked_duration_since(start)
        .unwrap_or(Duration::from_ticks(0))
}

/// Debounced mechanical on/off switch
#[derive(Debug, Clone)]
pub struct ToggleSwitch {
    raw: bool,
    stable: bool,
    changed_at: Instant,
}

impl ToggleSwitch {
    pub const fn new(level: bool, now: Instant) -> Self {
        Self {
            raw: level,
            stable: level,
            changed_at: now,
        }
    }

    /// Debounced level
    pub const fn level(&self) -> bool {
        self.stable
    }

    /// Feed a raw level; returns the new stable level on an edge
    pub fn update(&mut self, raw: bool, now: Instant) -> Option<bool> {
        if raw != self.raw {
            self.raw = raw;
            self.changed_at = now;
        }
        let settled = now
            .checked_duration_since(self.changed_at)
            .is_some_and(|held| held >= SWITCH_DEBOUNCE);
        if settled && self.stable != self.raw {
            self.stable = self.raw;
            return Some(self.stable);
        }
        None
    }
}

/// Request decoded from a touch gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchAction {
    /// Touch began; cancels a soft wake
    Pressed,
    /// Short tap released
    Toggle,
    /// Held: set master brightness to this level
    Dim(f32),
    /// Released after dimming
    Persist,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchConfig {
    pub hold: Duration,
    pub step: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            hold: TOUCH_HOLD_DEFAULT,
            step: TOUCH_STEP_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    started: Instant,
    last_step: Instant,
    dim_up: bool,
    dimmed: bool,
    level: f32,
}

/// Capacitive touch: tap toggles, hold dims up and down
#[derive(Debug, Clone)]
pub struct TouchDimmer {
    config: TouchConfig,
    touch: Option<Touch>,
}

impl TouchDimmer {
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config: TouchConfig {
                hold: config.hold,
                step: sanitize(config.step, 0.0, DIM_STEP_MAX, TOUCH_STEP_DEFAULT),
            },
            touch: None,
        }
    }

    pub const fn is_touched(&self) -> bool {
        self.touch.is_some()
    }

    /// Feed one touch sample
    ///
    /// `lamp_on` and `master` describe the engine at sampling time.
    pub fn update(
        &mut self,
        touched: bool,
        lamp_on: bool,
        master: f32,
        now: Instant,
    ) -> Option<TouchAction> {
        let Some(touch) = self.touch.as_mut() else {
            if touched {
                self.touch = Some(Touch {
                    started: now,
                    last_step: now,
                    dim_up: master < 0.5,
                    dimmed: false,
                    level: master,
                });
                return Some(TouchAction::Pressed);
            }
            return None;
        };

        if !touched {
            let touch = *touch;
            self.touch = None;
            if touch.dimmed {
                return Some(TouchAction::Persist);
            }
            let held = elapsed_since(touch.started, now);
            return (held < self.config.hold).then_some(TouchAction::Toggle);
        }

        if !lamp_on {
            return None;
        }
        let held = elapsed_since(touch.started, now);
        let since_step = elapsed_since(touch.last_step, now);
        if held < self.config.hold || since_step < DIM_STEP_INTERVAL {
            return None;
        }

        touch.last_step = now;
        let step = if touch.dim_up {
            self.config.step
        } else {
            -self.config.step
        };
        let mut level = touch.level + step;
        if level >= DIM_MAX {
            level = DIM_MAX;
            touch.dim_up = false;
        } else if level <= DIM_MIN {
            level = DIM_MIN;
            touch.dim_up = true;
        }
        touch.level = level;
        touch.dimmed = true;
        Some(TouchAction::Dim(level))
    }
}
