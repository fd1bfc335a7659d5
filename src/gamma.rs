//! Gamma-corrected PWM duty mapping

use crate::math::{clamp01, sanitize};

/// Duty code that turns the output fully off
pub const PWM_OFF: u32 = 0;

/// Smallest accepted gamma
pub const GAMMA_MIN: f32 = 0.5;
/// Largest accepted gamma
pub const GAMMA_MAX: f32 = 4.0;
/// Default gamma, linearizes perceived brightness for typical LED loads
pub const GAMMA_DEFAULT: f32 = 2.8;

/// Default PWM resolution in bits
pub const DEFAULT_RESOLUTION_BITS: u8 = 12;
const MAX_RESOLUTION_BITS: u8 = 16;

/// Maps a normalized level to an integer duty cycle
#[derive(Debug, Clone, Copy)]
pub struct PwmCurve {
    gamma: f32,
    max_duty: u32,
}

impl Default for PwmCurve {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION_BITS, GAMMA_DEFAULT)
    }
}

impl PwmCurve {
    /// Create a curve for a `resolution_bits` wide duty register
    pub fn new(resolution_bits: u8, gamma: f32) -> Self {
        let bits = resolution_bits.clamp(1, MAX_RESOLUTION_BITS);
        Self {
            gamma: sanitize_gamma(gamma),
            max_duty: (1u32 << bits) - 1,
        }
    }

    pub const fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn set_gamma(&mut self, gamma: f32) {
        self.gamma = sanitize_gamma(gamma);
    }

    /// Highest duty code (full on)
    pub const fn max_duty(&self) -> u32 {
        self.max_duty
    }

    /// Duty code for a normalized level
    ///
    /// Levels at or below zero (and NaN) produce exactly [`PWM_OFF`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duty(&self, level: f32) -> u32 {
        let level = clamp01(level);
        if level <= 0.0 {
            return PWM_OFF;
        }
        let scaled = libm::powf(level, self.gamma) * self.max_duty as f32;
        let duty = libm::roundf(scaled.clamp(0.0, self.max_duty as f32)) as u32;
        duty.min(self.max_duty)
    }
}

/// Clamp gamma into `[GAMMA_MIN, GAMMA_MAX]`, non-finite values reset to default
pub fn sanitize_gamma(gamma: f32) -> f32 {
    sanitize(gamma, GAMMA_MIN, GAMMA_MAX, GAMMA_DEFAULT)
}
