//! Periodic patterns built from sines and fixed stops

use core::f32::consts::TAU;

use embassy_time::Duration;
use libm::{cosf, fabsf, powf, sinf};

use super::{Pattern, elapsed_ms};
use crate::math::{clamp01, smoothstep};

const BREATHING_PERIOD_MS: u32 = 7_000;
const PULSE_PERIOD_MS: u32 = 4_200;
const PULSE_SHAPE: f32 = 1.6;
const STEP_SEGMENT_MS: u32 = 2_500;
const STEP_STOPS: [f32; 4] = [0.15, 0.45, 0.9, 0.35];

/// Base level shared by breathing and pulse
const SWELL_BASE: f32 = 0.25;
const SWELL_RANGE: f32 = 0.7;

#[inline]
fn phase(ms: u32, period_ms: u32) -> f32 {
    (ms % period_ms) as f32 / period_ms as f32
}

#[inline]
fn seconds(elapsed: Duration) -> f32 {
    // Wrap at ~49 days like the millisecond counter, keeps sines precise
    elapsed_ms(elapsed) as f32 / 1000.0
}

/// Steady full level
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantPattern;

impl Pattern for ConstantPattern {
    fn evaluate(&self, _elapsed: Duration) -> f32 {
        1.0
    }
}

/// Slow breathing with a smoothstep-eased cosine
#[derive(Debug, Clone, Copy, Default)]
pub struct BreathingPattern;

impl Pattern for BreathingPattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        let p = phase(elapsed_ms(elapsed), BREATHING_PERIOD_MS);
        let wave = (1.0 - cosf(TAU * p)) * 0.5;
        SWELL_BASE + SWELL_RANGE * smoothstep(wave)
    }
}

/// Gentle pulse without hard peaks
#[derive(Debug, Clone, Copy, Default)]
pub struct PulsePattern;

impl Pattern for PulsePattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        let p = phase(elapsed_ms(elapsed), PULSE_PERIOD_MS);
        let env = powf(fabsf(sinf(TAU * p)), PULSE_SHAPE);
        SWELL_BASE + SWELL_RANGE * env
    }
}

/// Subtle shimmer from stacked sines
#[derive(Debug, Clone, Copy, Default)]
pub struct SparklePattern;

impl Pattern for SparklePattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        let t = seconds(elapsed);
        let slow = 0.55 + 0.18 * sinf(t * 0.35 * TAU);
        let ripple = 0.15 * sinf(t * 3.6 * TAU)
            + 0.10 * sinf(t * 5.9 * TAU + 1.1)
            + 0.05 * sinf(t * 11.0 * TAU + 2.0);
        clamp01(slow + ripple)
    }
}

/// Linear fades between preset stops
#[derive(Debug, Clone, Copy, Default)]
pub struct StepsPattern;

impl Pattern for StepsPattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        let ms = elapsed_ms(elapsed);
        let seg = (ms / STEP_SEGMENT_MS) as usize % STEP_STOPS.len();
        let progress = phase(ms, STEP_SEGMENT_MS);
        let start = STEP_STOPS[seg];
        let end = STEP_STOPS[(seg + 1) % STEP_STOPS.len()];
        start + (end - start) * progress
    }
}

/// Starry twinkle: slow base wave plus two flicker layers
#[derive(Debug, Clone, Copy, Default)]
pub struct TwinklePattern;

impl Pattern for TwinklePattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        let t = seconds(elapsed);
        let slow = 0.3 + 0.2 * sinf(t * 0.25 * TAU);
        let wave = 0.5 + 0.25 * sinf(t * 0.9 * TAU + sinf(t * 0.15 * TAU));
        let flicker = 0.08 * sinf(t * 7.3 * TAU + 1.7) + 0.05 * sinf(t * 12.1 * TAU);
        clamp01(slow + wave + flicker)
    }
}
