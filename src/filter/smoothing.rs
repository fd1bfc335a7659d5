//! Smoothing stages: one-pole IIR low-pass and envelope follower

use embassy_time::Instant;

use super::{Filter, elapsed_ms};
use crate::math::{clamp01, sanitize, smoothing_alpha};

const IIR_ALPHA_DEFAULT: f32 = 0.2;
const ENV_ATTACK_MS_DEFAULT: u32 = 30;
const ENV_RELEASE_MS_DEFAULT: u32 = 120;
const ENV_TIME_MS_MAX: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IirConfig {
    pub enabled: bool,
    /// Blend factor per sample, `1.0` passes through
    pub alpha: f32,
}

impl Default for IirConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            alpha: IIR_ALPHA_DEFAULT,
        }
    }
}

impl IirConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            alpha: sanitize(self.alpha, 0.0, 1.0, IIR_ALPHA_DEFAULT),
        }
    }
}

/// One-pole low-pass, seeded with the first sample
#[derive(Debug, Clone)]
pub struct IirFilter {
    alpha: f32,
    value: Option<f32>,
}

impl IirFilter {
    pub fn new(config: &IirConfig) -> Self {
        Self {
            alpha: clamp01(config.alpha),
            value: None,
        }
    }
}

impl Filter for IirFilter {
    fn apply(&mut self, input: f32, _now: Instant) -> f32 {
        let value = match self.value {
            Some(prev) => prev + (input - prev) * self.alpha,
            None => input,
        };
        self.value = Some(value);
        value
    }

    fn reset(&mut self) {
        self.value = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvelopeConfig {
    pub enabled: bool,
    pub attack_ms: u32,
    pub release_ms: u32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            attack_ms: ENV_ATTACK_MS_DEFAULT,
            release_ms: ENV_RELEASE_MS_DEFAULT,
        }
    }
}

impl EnvelopeConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            attack_ms: self.attack_ms.min(ENV_TIME_MS_MAX),
            release_ms: self.release_ms.min(ENV_TIME_MS_MAX),
        }
    }
}

/// Peak follower with separate attack and release times
#[derive(Debug, Clone)]
pub struct EnvelopeFilter {
    attack_ms: f32,
    release_ms: f32,
    value: f32,
    last: Option<Instant>,
}

impl EnvelopeFilter {
    pub fn new(config: &EnvelopeConfig) -> Self {
        Self {
            attack_ms: config.attack_ms as f32,
            release_ms: config.release_ms as f32,
            value: 0.0,
            last: None,
        }
    }
}

impl Filter for EnvelopeFilter {
    fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let dt = elapsed_ms(self.last, now);
        if self.last.is_none() {
            self.value = input;
        }
        self.last = Some(now);

        let tau = if input > self.value {
            self.attack_ms
        } else {
            self.release_ms
        };
        self.value += (input - self.value) * smoothing_alpha(dt, tau);
        self.value
    }

    fn reset(&mut self) {
        self.value = 0.0;
        self.last = None;
    }
}
