use embassy_time::Instant;

use super::{Filter, elapsed_ms};
use crate::math::{sanitize, smoothing_alpha};

const COMP_THRESHOLD_DEFAULT: f32 = 0.8;
const COMP_RATIO_DEFAULT: f32 = 3.0;
const COMP_ATTACK_MS_DEFAULT: u32 = 20;
const COMP_RELEASE_MS_DEFAULT: u32 = 180;
const COMP_RATIO_MAX: f32 = 20.0;
const COMP_TIME_MS_MAX: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressorConfig {
    pub enabled: bool,
    pub threshold: f32,
    pub ratio: f32,
    pub attack_ms: u32,
    pub release_ms: u32,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: COMP_THRESHOLD_DEFAULT,
            ratio: COMP_RATIO_DEFAULT,
            attack_ms: COMP_ATTACK_MS_DEFAULT,
            release_ms: COMP_RELEASE_MS_DEFAULT,
        }
    }
}

impl CompressorConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            threshold: sanitize(self.threshold, 0.0, 1.5, COMP_THRESHOLD_DEFAULT),
            ratio: sanitize(self.ratio, 1.0, COMP_RATIO_MAX, COMP_RATIO_DEFAULT),
            attack_ms: self.attack_ms.min(COMP_TIME_MS_MAX),
            release_ms: self.release_ms.min(COMP_TIME_MS_MAX),
        }
    }
}

/// Downward compressor with a smoothed gain
///
/// Above the threshold the excess is divided by `ratio`. Gain reduction
/// follows the attack time, recovery follows the release time.
#[derive(Debug, Clone)]
pub struct CompressorFilter {
    threshold: f32,
    ratio: f32,
    attack_ms: f32,
    release_ms: f32,
    gain: f32,
    last: Option<Instant>,
}

impl CompressorFilter {
    pub fn new(config: &CompressorConfig) -> Self {
        Self {
            threshold: config.threshold,
            ratio: config.ratio.max(1.0),
            attack_ms: config.attack_ms as f32,
            release_ms: config.release_ms as f32,
            gain: 1.0,
            last: None,
        }
    }

    fn target_gain(&self, input: f32) -> f32 {
        if input <= self.threshold || input <= 0.0 {
            return 1.0;
        }
        let compressed = self.threshold + (input - self.threshold) / self.ratio;
        compressed / input
    }
}

impl Filter for CompressorFilter {
    fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let dt = elapsed_ms(self.last, now);
        let first = self.last.is_none();
        self.last = Some(now);

        let target = self.target_gain(input);
        if first {
            self.gain = target;
        } else {
            let tau = if target < self.gain {
                self.attack_ms
            } else {
                self.release_ms
            };
            self.gain += (target - self.gain) * smoothing_alpha(dt, tau);
        }
        input * self.gain
    }

    fn reset(&mut self) {
        self.gain = 1.0;
        self.last = None;
    }
}
