//! Engine configuration
//!
//! Every struct has a `Default` built from [`defaults`] and a `sanitized()`
//! method that clamps out-of-range values and resets non-finite ones.

use embassy_time::Duration;

use crate::ease::{EaseCurve, EaseKind};
use crate::filter::FilterChainConfig;
use crate::gamma::{DEFAULT_RESOLUTION_BITS, GAMMA_DEFAULT, sanitize_gamma};
use crate::math::{clamp01, sanitize};
use crate::pattern::PatternId;

/// Default values used on first boot
pub mod defaults {
    pub const BRIGHTNESS: f32 = 0.7;
    pub const RAMP_MS: u32 = 400;
    pub const RAMP_ON_MS: u32 = 950;
    pub const RAMP_OFF_MS: u32 = 2200;
    pub const RAMP_POWER_ON: f32 = 7.0;
    pub const RAMP_POWER_OFF: f32 = 2.0;
    pub const BRIGHTNESS_MIN: f32 = 0.05;
    pub const BRIGHTNESS_MAX: f32 = 0.95;
    pub const BRIGHTNESS_CAP: f32 = 1.0;
    pub const MARGIN_LOW: f32 = 0.0;
    pub const MARGIN_HIGH: f32 = 1.0;
    pub const SPEED_SCALE: f32 = 1.0;
    pub const FADE_STRENGTH: f32 = 1.0;
    pub const NOTIFY_FLOOR: f32 = 0.0;
}

/// Longest accepted ramp, keeps misconfigured values from freezing the lamp
pub const RAMP_MS_MAX: u32 = 60_000;
const SPEED_SCALE_MIN: f32 = 0.01;
const SPEED_SCALE_MAX: f32 = 20.0;
const FADE_STRENGTH_MAX: f32 = 10.0;

/// Ramp durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RampTimings {
    /// Output fade-in and upward brightness changes
    pub on_ms: u32,
    /// Output fade-out and downward brightness changes
    pub off_ms: u32,
    /// Base time constant for pattern smoothing
    pub base_ms: u32,
}

impl Default for RampTimings {
    fn default() -> Self {
        Self {
            on_ms: defaults::RAMP_ON_MS,
            off_ms: defaults::RAMP_OFF_MS,
            base_ms: defaults::RAMP_MS,
        }
    }
}

impl RampTimings {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            on_ms: self.on_ms.min(RAMP_MS_MAX),
            off_ms: self.off_ms.min(RAMP_MS_MAX),
            base_ms: self.base_ms.min(RAMP_MS_MAX),
        }
    }

    pub fn on(&self) -> Duration {
        Duration::from_millis(u64::from(self.on_ms))
    }

    pub fn off(&self) -> Duration {
        Duration::from_millis(u64::from(self.off_ms))
    }

    pub fn base(&self) -> Duration {
        Duration::from_millis(u64::from(self.base_ms))
    }
}

/// User brightness window and hard cap
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrightnessLimits {
    pub min: f32,
    pub max: f32,
    pub cap: f32,
}

impl Default for BrightnessLimits {
    fn default() -> Self {
        Self {
            min: defaults::BRIGHTNESS_MIN,
            max: defaults::BRIGHTNESS_MAX,
            cap: defaults::BRIGHTNESS_CAP,
        }
    }
}

impl BrightnessLimits {
    #[must_use]
    pub fn sanitized(self) -> Self {
        let min = sanitize(self.min, 0.0, 1.0, defaults::BRIGHTNESS_MIN);
        let max = sanitize(self.max, 0.0, 1.0, defaults::BRIGHTNESS_MAX).max(min);
        let cap = sanitize(self.cap, 0.0, 1.0, defaults::BRIGHTNESS_CAP);
        Self { min, max, cap }
    }

    /// Highest brightness a user request may reach
    pub fn upper(&self) -> f32 {
        self.max.min(self.cap).max(self.min)
    }

    /// Clamp a level into `[min, upper]`
    pub fn clamp(&self, level: f32) -> f32 {
        clamp01(level).clamp(self.min, self.upper())
    }
}

/// How the pattern value is shaped before it is combined
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternShaping {
    pub margin_low: f32,
    pub margin_high: f32,
    pub invert: bool,
    /// Playback speed of the pattern clock
    pub speed_scale: f32,
    /// Low-pass the combined value
    pub fade_enabled: bool,
    /// Multiplier on the base ramp time for the low-pass time constant
    pub fade_strength: f32,
}

impl Default for PatternShaping {
    fn default() -> Self {
        Self {
            margin_low: defaults::MARGIN_LOW,
            margin_high: defaults::MARGIN_HIGH,
            invert: false,
            speed_scale: defaults::SPEED_SCALE,
            fade_enabled: false,
            fade_strength: defaults::FADE_STRENGTH,
        }
    }
}

impl PatternShaping {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            margin_low: sanitize(self.margin_low, 0.0, 1.0, defaults::MARGIN_LOW),
            margin_high: sanitize(self.margin_high, 0.0, 1.0, defaults::MARGIN_HIGH),
            invert: self.invert,
            speed_scale: sanitize(
                self.speed_scale,
                SPEED_SCALE_MIN,
                SPEED_SCALE_MAX,
                defaults::SPEED_SCALE,
            ),
            fade_enabled: self.fade_enabled,
            fade_strength: sanitize(
                self.fade_strength,
                0.0,
                FADE_STRENGTH_MAX,
                defaults::FADE_STRENGTH,
            ),
        }
    }
}

/// Runtime capability switches
///
/// A disabled feature is a no-op with neutral telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Features {
    pub filters: bool,
    pub ambient: bool,
    pub music: bool,
    pub auto_cycle: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            filters: true,
            ambient: false,
            music: false,
            auto_cycle: false,
        }
    }
}

/// Configuration for the lamp engine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LampEngineConfig {
    pub brightness: f32,
    pub enabled: bool,
    pub pattern: PatternId,
    pub timings: RampTimings,
    pub ease_on: EaseCurve,
    pub ease_off: EaseCurve,
    pub limits: BrightnessLimits,
    pub shaping: PatternShaping,
    pub filters: FilterChainConfig,
    pub gamma: f32,
    pub pwm_resolution_bits: u8,
    /// Minimum level during notification flashes
    pub notify_floor: f32,
    pub features: Features,
}

impl Default for LampEngineConfig {
    fn default() -> Self {
        Self {
            brightness: defaults::BRIGHTNESS,
            enabled: false,
            pattern: PatternId::Constant,
            timings: RampTimings::default(),
            ease_on: EaseCurve::new(EaseKind::Out, defaults::RAMP_POWER_ON),
            ease_off: EaseCurve::new(EaseKind::Out, defaults::RAMP_POWER_OFF),
            limits: BrightnessLimits::default(),
            shaping: PatternShaping::default(),
            filters: FilterChainConfig::default(),
            gamma: GAMMA_DEFAULT,
            pwm_resolution_bits: DEFAULT_RESOLUTION_BITS,
            notify_floor: defaults::NOTIFY_FLOOR,
            features: Features::default(),
        }
    }
}

impl LampEngineConfig {
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            brightness: sanitize(self.brightness, 0.0, 1.0, defaults::BRIGHTNESS),
            enabled: self.enabled,
            pattern: self.pattern,
            timings: self.timings.sanitized(),
            ease_on: self.ease_on.sanitized(),
            ease_off: self.ease_off.sanitized(),
            limits: self.limits.sanitized(),
            shaping: self.shaping.sanitized(),
            filters: self.filters.sanitized(),
            gamma: sanitize_gamma(self.gamma),
            pwm_resolution_bits: self.pwm_resolution_bits,
            notify_floor: sanitize(self.notify_floor, 0.0, 1.0, defaults::NOTIFY_FLOOR),
            features: self.features,
        }
    }
}
