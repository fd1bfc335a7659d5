use embassy_time::{Duration, Instant};

use crate::ease::EaseCurve;
use crate::math::{clamp01, lerp, progress, scale_duration};

/// Shortest ramp that is still animated
pub const MIN_RAMP_DURATION: Duration = Duration::from_millis(10);

/// Lower bound for the ambient duration multiplier
pub const AMBIENT_MULTIPLIER_MIN: f32 = 0.1;
/// Upper bound for the ambient duration multiplier
pub const AMBIENT_MULTIPLIER_MAX: f32 = 8.0;

/// Which brightness channel a ramp drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampChannel {
    /// User-facing brightness
    Master,
    /// Internal on/off gate
    Output,
}

/// Outcome of starting a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStart {
    /// Value applied immediately, no ramp state created
    Instant,
    /// Ramp is now running
    Animated,
}

#[derive(Debug, Clone, Copy)]
struct ActiveRamp {
    source: f32,
    target: f32,
    start_time: Instant,
    duration: Duration,
    curve: EaseCurve,
}

/// One eased brightness value in `[0, 1]`
///
/// While a ramp is active the current value is a pure function of the tick
/// time and the ramp parameters captured at start.
#[derive(Debug, Clone)]
pub struct BrightnessChannel {
    current: f32,
    ramp: Option<ActiveRamp>,
}

impl BrightnessChannel {
    /// Create a channel resting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            current: clamp01(initial),
            ramp: None,
        }
    }

    /// Get current value
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Check if a ramp is in progress
    pub const fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    /// Value the channel is heading to (current value when idle)
    pub fn target(&self) -> f32 {
        self.ramp.map_or(self.current, |ramp| ramp.target)
    }

    /// Snap to `value`, dropping any active ramp
    pub fn set(&mut self, value: f32) {
        self.current = clamp01(value);
        self.ramp = None;
    }

    /// Start a ramp from the current value
    ///
    /// Supersedes any active ramp. A zero duration or an unchanged value is
    /// applied instantly.
    #[allow(clippy::float_cmp)]
    pub fn start(
        &mut self,
        target: f32,
        duration: Duration,
        curve: EaseCurve,
        now: Instant,
    ) -> RampStart {
        let target = clamp01(target);
        let source = self.current;
        if duration.as_millis() == 0 || source == target {
            self.set(target);
            return RampStart::Instant;
        }

        self.ramp = Some(ActiveRamp {
            source,
            target,
            start_time: now,
            duration,
            curve: curve.sanitized(),
        });
        RampStart::Animated
    }

    /// Update ramp state
    ///
    /// Returns the target when the ramp completes on this tick.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let ramp = self.ramp?;

        let elapsed = now
            .checked_duration_since(ramp.start_time)
            .unwrap_or(Duration::from_millis(0));
        let t = progress(elapsed, ramp.duration);
        if t >= 1.0 {
            self.current = ramp.target;
            self.ramp = None;
            return Some(ramp.target);
        }

        let eased = ramp.curve.apply(t);
        self.current = clamp01(lerp(ramp.source, ramp.target, eased));
        None
    }
}

/// Clamp an ambient multiplier to its accepted range (NaN counts as `1.0`)
pub fn clamp_ambient_multiplier(multiplier: f32) -> f32 {
    if multiplier.is_nan() {
        return 1.0;
    }
    multiplier.clamp(AMBIENT_MULTIPLIER_MIN, AMBIENT_MULTIPLIER_MAX)
}

/// Duration a ramp will actually run for
///
/// Zero stays zero (instant apply); anything else is stretched by the
/// clamped ambient multiplier and floored at [`MIN_RAMP_DURATION`].
pub fn effective_duration(duration: Duration, ambient_multiplier: f32) -> Duration {
    if duration.as_millis() == 0 {
        return duration;
    }
    let stretched = scale_duration(duration, clamp_ambient_multiplier(ambient_multiplier));
    stretched.max(MIN_RAMP_DURATION)
}
