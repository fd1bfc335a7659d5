//! Flame patterns from layered value noise
//!
//! Each layer samples a hash every `step_ms` and crossfades with smoothstep,
//! which gives organic flicker without short repeats.

use embassy_time::Duration;

use super::{Pattern, elapsed_ms};
use crate::math::{clamp01, lerp, smoothstep};

/// One noise octave: sample spacing, salt and peak-to-peak amplitude
struct Layer {
    step_ms: u32,
    salt: u32,
    amplitude: f32,
}

const fn layer(step_ms: u32, salt: u32, amplitude: f32) -> Layer {
    Layer {
        step_ms,
        salt,
        amplitude,
    }
}

const CANDLE_BASE: f32 = 0.35;
const CANDLE_LAYERS: [Layer; 4] = [
    layer(900, 0x11, 0.25),
    layer(180, 0x22, 0.30),
    layer(65, 0x33, 0.18),
    layer(35, 0x44, 0.10),
];

const CANDLE_SOFT_BASE: f32 = 0.42;
const CANDLE_SOFT_LAYERS: [Layer; 3] = [
    layer(1200, 0x55, 0.18),
    layer(260, 0x66, 0.18),
    layer(95, 0x77, 0.08),
];

const CAMPFIRE_BASE: f32 = 0.45;
const CAMPFIRE_LAYERS: [Layer; 4] = [
    layer(1400, 0x88, 0.25),
    layer(320, 0x99, 0.30),
    layer(120, 0xAA, 0.18),
    layer(45, 0xBB, 0.10),
];

/// Integer hash to `[0, 1]`
#[inline]
fn hash11(mut x: u32) -> f32 {
    x ^= x.wrapping_mul(0x27d4_eb2d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x85eb_ca6b);
    x ^= x >> 13;
    (x & 0x00FF_FFFF) as f32 / 16_777_215.0
}

fn smooth_noise(ms: u32, step_ms: u32, salt: u32) -> f32 {
    let step_ms = step_ms.max(1);
    let a = ms / step_ms;
    let t = smoothstep((ms % step_ms) as f32 / step_ms as f32);
    lerp(hash11(a ^ salt), hash11(a.wrapping_add(1) ^ salt), t)
}

fn layered(elapsed: Duration, base: f32, layers: &[Layer]) -> f32 {
    let ms = elapsed_ms(elapsed);
    let sum: f32 = layers
        .iter()
        .map(|l| (smooth_noise(ms, l.step_ms, l.salt) - 0.5) * l.amplitude)
        .sum();
    clamp01(base + sum)
}

/// Candle flicker: slow wobble plus fast flutter
#[derive(Debug, Clone, Copy, Default)]
pub struct CandlePattern;

impl Pattern for CandlePattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        layered(elapsed, CANDLE_BASE, &CANDLE_LAYERS)
    }
}

/// Softer candle with subdued jitter
#[derive(Debug, Clone, Copy, Default)]
pub struct CandleSoftPattern;

impl Pattern for CandleSoftPattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        layered(elapsed, CANDLE_SOFT_BASE, &CANDLE_SOFT_LAYERS)
    }
}

/// Embers, tongues and sporadic sparks
#[derive(Debug, Clone, Copy, Default)]
pub struct CampfirePattern;

impl Pattern for CampfirePattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        layered(elapsed, CAMPFIRE_BASE, &CAMPFIRE_LAYERS)
    }
}
