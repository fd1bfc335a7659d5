//! Per-tick brightness composition
//!
//! The composer combines the pattern value with the brightness channels and
//! external scales into one normalized level. It owns only derived state:
//! the optional low-pass and the filter chain.

use embassy_time::{Duration, Instant};

use crate::config::PatternShaping;
use crate::filter::{FilterChain, FilterChainConfig};
use crate::math::{clamp01, finite_or, smoothing_alpha};

/// Contributors sampled by the engine for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionInputs {
    /// Pattern value for the scaled elapsed time
    pub pattern: f32,
    pub master: f32,
    pub ambient_scale: f32,
    /// Output gate (on/off fade)
    pub output_scale: f32,
    /// Audio modulation, `None` when the feature is off
    pub music_scale: Option<f32>,
    /// Notification gate, `None` when no overlay is active
    pub notify_gate: Option<f32>,
    pub enabled: bool,
}

impl Default for CompositionInputs {
    fn default() -> Self {
        Self {
            pattern: 1.0,
            master: 0.0,
            ambient_scale: 1.0,
            output_scale: 0.0,
            music_scale: None,
            notify_gate: None,
            enabled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Composer {
    shaping: PatternShaping,
    /// Base ramp time the low-pass constant is derived from
    base: Duration,
    notify_floor: f32,
    filters_enabled: bool,
    filters: FilterChain,
    smoothed: Option<f32>,
    last: Option<Instant>,
}

impl Composer {
    pub fn new(shaping: PatternShaping, base: Duration, filters: &FilterChainConfig) -> Self {
        Self {
            shaping: shaping.sanitized(),
            base,
            notify_floor: 0.0,
            filters_enabled: true,
            filters: FilterChain::new(filters),
            smoothed: None,
            last: None,
        }
    }

    pub const fn shaping(&self) -> &PatternShaping {
        &self.shaping
    }

    pub fn set_shaping(&mut self, shaping: PatternShaping) {
        self.shaping = shaping.sanitized();
    }

    pub fn set_base(&mut self, base: Duration) {
        self.base = base;
    }

    pub fn set_notify_floor(&mut self, floor: f32) {
        self.notify_floor = clamp01(floor);
    }

    pub fn set_filters_enabled(&mut self, enabled: bool) {
        if self.filters_enabled != enabled {
            self.filters.reset();
        }
        self.filters_enabled = enabled;
    }

    pub fn filters(&self) -> &FilterChainConfig {
        self.filters.config()
    }

    pub fn set_filters(&mut self, config: &FilterChainConfig) {
        self.filters.set_config(config);
    }

    /// Time constant of the optional low-pass in ms
    fn smoothing_tau_ms(&self) -> f32 {
        self.base.as_millis() as f32 * self.shaping.fade_strength
    }

    /// Pattern value after invert and margin remap
    pub fn shape_pattern(&self, pattern: f32) -> f32 {
        let mut value = clamp01(pattern);
        if self.shaping.invert {
            value = 1.0 - value;
        }
        let low = self.shaping.margin_low;
        let high = self.shaping.margin_high;
        clamp01(low + value * (high - low))
    }

    /// Combine all contributors into a level in `[0, 1]`
    pub fn compose(&mut self, inputs: &CompositionInputs, now: Instant) -> f32 {
        let adjusted = self.shape_pattern(inputs.pattern);

        let mut combined = if inputs.enabled {
            adjusted
                * clamp01(inputs.master)
                * clamp01(inputs.ambient_scale)
                * clamp01(inputs.output_scale)
        } else {
            0.0
        };

        if let Some(music) = inputs.music_scale {
            combined *= finite_or(music, 1.0).max(0.0);
        }

        if let Some(gate) = inputs.notify_gate {
            combined = combined.max(self.notify_floor) * clamp01(gate);
        }

        if self.shaping.fade_enabled {
            combined = self.smooth(combined, now);
        } else {
            self.smoothed = None;
            self.last = None;
        }

        if self.filters_enabled && self.filters.config().any_enabled() {
            combined = self.filters.apply(combined, now);
        }

        clamp01(combined)
    }

    fn smooth(&mut self, value: f32, now: Instant) -> f32 {
        let smoothed = match (self.smoothed, self.last) {
            (Some(prev), Some(last)) => {
                let dt = now
                    .checked_duration_since(last)
                    .map_or(0.0, |d| d.as_millis() as f32);
                prev + (value - prev) * smoothing_alpha(dt, self.smoothing_tau_ms())
            }
            _ => value,
        };
        self.smoothed = Some(smoothed);
        self.last = Some(now);
        smoothed
    }

    /// Drop smoothing and filter state
    pub fn reset(&mut self) {
        self.smoothed = None;
        self.last = None;
        self.filters.reset();
    }
}
