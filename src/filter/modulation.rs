//! Modulation stages: tremolo and sparkle

use core::f32::consts::TAU;

use embassy_time::Instant;

use super::{Filter, elapsed_ms};
use crate::math::{clamp01, sanitize};

const TREM_RATE_DEFAULT: f32 = 1.5;
const TREM_DEPTH_DEFAULT: f32 = 0.3;
const TREM_RATE_MIN: f32 = 0.01;
const TREM_RATE_MAX: f32 = 50.0;

const SPARK_DENSITY_DEFAULT: f32 = 0.6;
const SPARK_INTENSITY_DEFAULT: f32 = 0.25;
const SPARK_DECAY_MS_DEFAULT: u32 = 200;
const SPARK_DENSITY_MAX: f32 = 50.0;
const SPARK_DECAY_MS_MAX: u32 = 10_000;
const SPARK_SEED: u32 = 0x9E37_79B9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TremoloWave {
    #[default]
    Sine,
    Triangle,
}

impl TremoloWave {
    /// Unipolar wave value (0-1) at a phase in radians
    fn value(self, phase: f32) -> f32 {
        match self {
            Self::Sine => libm::sinf(phase) * 0.5 + 0.5,
            Self::Triangle => {
                let norm = libm::fmodf(phase / TAU, 1.0);
                let tri = if norm < 0.5 {
                    norm * 4.0 - 1.0
                } else {
                    3.0 - norm * 4.0
                };
                tri * 0.5 + 0.5
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TremoloConfig {
    pub enabled: bool,
    pub rate_hz: f32,
    pub depth: f32,
    pub wave: TremoloWave,
}

impl Default for TremoloConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rate_hz: TREM_RATE_DEFAULT,
            depth: TREM_DEPTH_DEFAULT,
            wave: TremoloWave::Sine,
        }
    }
}

impl TremoloConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            rate_hz: sanitize(self.rate_hz, TREM_RATE_MIN, TREM_RATE_MAX, TREM_RATE_DEFAULT),
            depth: sanitize(self.depth, 0.0, 1.0, TREM_DEPTH_DEFAULT),
            wave: self.wave,
        }
    }
}

/// Amplitude modulation, phase starts on the first processed sample
#[derive(Debug, Clone)]
pub struct TremoloFilter {
    rate_hz: f32,
    depth: f32,
    wave: TremoloWave,
    start: Option<Instant>,
}

impl TremoloFilter {
    pub fn new(config: &TremoloConfig) -> Self {
        Self {
            rate_hz: config.rate_hz,
            depth: clamp01(config.depth),
            wave: config.wave,
            start: None,
        }
    }
}

impl Filter for TremoloFilter {
    fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let start = *self.start.get_or_insert(now);
        let seconds = elapsed_ms(Some(start), now) / 1000.0;
        // Keep the phase small so f32 precision holds over long uptimes
        let cycles = libm::fmodf(self.rate_hz * seconds, 1.0);
        let m = self.wave.value(TAU * cycles);
        input * ((1.0 - self.depth) + self.depth * m)
    }

    fn reset(&mut self) {
        self.start = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparkleConfig {
    pub enabled: bool,
    /// Expected sparkles per second
    pub density: f32,
    /// Gain added per sparkle
    pub intensity: f32,
    pub decay_ms: u32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            density: SPARK_DENSITY_DEFAULT,
            intensity: SPARK_INTENSITY_DEFAULT,
            decay_ms: SPARK_DECAY_MS_DEFAULT,
        }
    }
}

impl SparkleConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            density: sanitize(self.density, 0.0, SPARK_DENSITY_MAX, SPARK_DENSITY_DEFAULT),
            intensity: sanitize(self.intensity, 0.0, 1.0, SPARK_INTENSITY_DEFAULT),
            decay_ms: self.decay_ms.min(SPARK_DECAY_MS_MAX),
        }
    }
}

/// Random brief brightness boosts with exponential decay
#[derive(Debug, Clone)]
pub struct SparkleFilter {
    density: f32,
    intensity: f32,
    decay_ms: f32,
    value: f32,
    last: Option<Instant>,
    rng: u32,
}

impl SparkleFilter {
    pub fn new(config: &SparkleConfig) -> Self {
        Self {
            density: config.density,
            intensity: config.intensity,
            decay_ms: config.decay_ms as f32,
            value: 0.0,
            last: None,
            rng: SPARK_SEED,
        }
    }

    /// Xorshift32, uniform in `[0, 1]`
    fn random01(&mut self) -> f32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        (x >> 8) as f32 / (1u32 << 24) as f32
    }
}

impl Filter for SparkleFilter {
    fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let dt = elapsed_ms(self.last, now);
        self.last = Some(now);

        // zero decay: each sparkle lasts a single sample
        if self.decay_ms > 0.0 {
            self.value *= libm::expf(-dt / self.decay_ms);
        } else {
            self.value = 0.0;
        }
        let chance = self.density * (dt / 1000.0);
        if chance > 0.0 && self.random01() < chance {
            self.value = (self.value + self.intensity).min(1.0);
        }
        input * (1.0 + self.value)
    }

    fn reset(&mut self) {
        self.value = 0.0;
        self.last = None;
    }
}
