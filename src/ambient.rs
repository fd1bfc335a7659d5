//! Ambient light compensation from a raw ADC light sensor
//!
//! Produces a slow-moving brightness scale and a ramp-duration multiplier
//! that stretches transitions in dark rooms.

use embassy_time::{Duration, Instant};

use crate::math::{clamp01, sanitize};
use crate::ramp::{AMBIENT_MULTIPLIER_MAX, AMBIENT_MULTIPLIER_MIN};

/// Minimum spacing between accepted samples
pub const AMBIENT_SAMPLE_INTERVAL: Duration = Duration::from_millis(200);
/// Full scale of the 12-bit ADC
pub const ADC_MAX: u16 = 4095;

const RAW_ALPHA: f32 = 0.1;
/// Raw span needed before min/max normalisation is trusted
const MIN_RANGE: u16 = 20;
const SCALE_BASE: f32 = 0.2;
const SCALE_BLEND: f32 = 0.03;
const SCALE_MAX_STEP: f32 = 0.02;

const GAIN_MAX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmbientConfig {
    pub gain: f32,
    pub clamp_min: f32,
    pub clamp_max: f32,
    /// Extra ramp length per unit of darkness, `0` disables stretching
    pub ramp_factor: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            gain: 1.0,
            clamp_min: 0.2,
            clamp_max: 1.0,
            ramp_factor: 0.0,
        }
    }
}

impl AmbientConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        let clamp_min = sanitize(self.clamp_min, 0.0, 1.0, 0.2);
        Self {
            gain: sanitize(self.gain, 0.0, GAIN_MAX, 1.0),
            clamp_min,
            clamp_max: sanitize(self.clamp_max, 0.0, 1.0, 1.0).max(clamp_min),
            ramp_factor: sanitize(self.ramp_factor, -1.0, AMBIENT_MULTIPLIER_MAX, 0.0),
        }
    }
}

/// Scale and ramp multiplier handed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientReading {
    pub scale: f32,
    pub ramp_multiplier: f32,
}

impl AmbientReading {
    pub const NEUTRAL: Self = Self {
        scale: 1.0,
        ramp_multiplier: 1.0,
    };
}

impl Default for AmbientReading {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone)]
pub struct AmbientLight {
    config: AmbientConfig,
    filtered: Option<f32>,
    min_raw: u16,
    max_raw: u16,
    scale: f32,
    multiplier: f32,
    last_sample: Option<Instant>,
}

impl AmbientLight {
    pub fn new(config: AmbientConfig) -> Self {
        Self {
            config: config.sanitized(),
            filtered: None,
            min_raw: ADC_MAX,
            max_raw: 0,
            scale: 1.0,
            multiplier: 1.0,
            last_sample: None,
        }
    }

    pub const fn config(&self) -> &AmbientConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AmbientConfig) {
        self.config = config.sanitized();
    }

    pub fn reading(&self) -> AmbientReading {
        AmbientReading {
            scale: self.scale,
            ramp_multiplier: self.multiplier,
        }
    }

    /// Feed a raw sample; returns `false` when it arrived too early and was
    /// ignored
    pub fn sample(&mut self, raw: u16, now: Instant) -> bool {
        if let Some(last) = self.last_sample {
            let early = now
                .checked_duration_since(last)
                .is_none_or(|dt| dt < AMBIENT_SAMPLE_INTERVAL);
            if early {
                return false;
            }
        }
        self.last_sample = Some(now);

        let raw = raw.min(ADC_MAX);
        let value = f32::from(raw);
        let filtered = match self.filtered {
            Some(prev) => prev + (value - prev) * RAW_ALPHA,
            None => value,
        };
        self.filtered = Some(filtered);
        self.min_raw = self.min_raw.min(raw);
        self.max_raw = self.max_raw.max(raw);

        let range = self.max_raw.saturating_sub(self.min_raw);
        let norm = if range >= MIN_RANGE {
            clamp01((filtered - f32::from(self.min_raw)) / f32::from(range))
        } else {
            clamp01(value / f32::from(ADC_MAX))
        };

        let cfg = &self.config;
        let target = clamp01(((SCALE_BASE + (1.0 - SCALE_BASE) * norm) * cfg.gain)
            .clamp(cfg.clamp_min, cfg.clamp_max));
        let step = ((target - self.scale) * SCALE_BLEND).clamp(-SCALE_MAX_STEP, SCALE_MAX_STEP);
        self.scale = clamp01(self.scale + step);

        let span = cfg.clamp_max - cfg.clamp_min;
        let bright = if span > 0.001 {
            clamp01((self.scale - cfg.clamp_min) / span)
        } else {
            1.0
        };
        self.multiplier = (1.0 + cfg.ramp_factor * (1.0 - bright))
            .clamp(AMBIENT_MULTIPLIER_MIN, AMBIENT_MULTIPLIER_MAX);
        true
    }
}
