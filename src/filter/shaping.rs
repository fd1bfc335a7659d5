//! Waveshaping stages: soft clip and wavefolder

use embassy_time::Instant;

use super::Filter;
use crate::math::{clamp01, lerp, sanitize};

const CLIP_AMOUNT_DEFAULT: f32 = 0.15;
const FOLD_AMOUNT_DEFAULT: f32 = 0.2;
/// Amounts below this leave the signal untouched
const AMOUNT_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipCurve {
    #[default]
    Tanh,
    SoftSign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftClipConfig {
    pub enabled: bool,
    pub amount: f32,
    pub curve: ClipCurve,
}

impl Default for SoftClipConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: CLIP_AMOUNT_DEFAULT,
            curve: ClipCurve::Tanh,
        }
    }
}

impl SoftClipConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            amount: sanitize(self.amount, 0.0, 1.0, CLIP_AMOUNT_DEFAULT),
            curve: self.curve,
        }
    }
}

/// Saturating soft clip mixed with the dry signal by `amount`
#[derive(Debug, Clone)]
pub struct SoftClipFilter {
    amount: f32,
    curve: ClipCurve,
}

impl SoftClipFilter {
    pub fn new(config: &SoftClipConfig) -> Self {
        Self {
            amount: clamp01(config.amount),
            curve: config.curve,
        }
    }
}

#[inline]
fn softsign(x: f32) -> f32 {
    x / (1.0 + libm::fabsf(x))
}

impl Filter for SoftClipFilter {
    fn apply(&mut self, input: f32, _now: Instant) -> f32 {
        if self.amount < AMOUNT_EPSILON {
            return input;
        }
        let driven = input * (1.0 + 4.0 * self.amount);
        let shaped = match self.curve {
            ClipCurve::Tanh => libm::tanhf(driven),
            ClipCurve::SoftSign => softsign(driven),
        };
        lerp(input, shaped, self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldConfig {
    pub enabled: bool,
    pub amount: f32,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: FOLD_AMOUNT_DEFAULT,
        }
    }
}

impl FoldConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            amount: sanitize(self.amount, 0.0, 1.0, FOLD_AMOUNT_DEFAULT),
        }
    }
}

/// Triangle wavefolder, reflects the driven signal back into `[0, 1]`
#[derive(Debug, Clone)]
pub struct WavefolderFilter {
    amount: f32,
}

impl WavefolderFilter {
    pub fn new(config: &FoldConfig) -> Self {
        Self {
            amount: clamp01(config.amount),
        }
    }
}

/// Fold `x` into `[0, 1]` with period 2
#[inline]
fn fold(x: f32) -> f32 {
    let wrapped = libm::fmodf(libm::fabsf(x), 2.0);
    if wrapped > 1.0 { 2.0 - wrapped } else { wrapped }
}

impl Filter for WavefolderFilter {
    fn apply(&mut self, input: f32, _now: Instant) -> f32 {
        if self.amount < AMOUNT_EPSILON {
            return input;
        }
        let driven = input * (1.0 + 3.0 * self.amount);
        lerp(input, fold(driven), self.amount)
    }
}
