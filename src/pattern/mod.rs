//! Pattern system with compile-time known pattern variants
//!
//! A pattern maps elapsed time to a normalized brightness in `[0, 1]`.
//! All patterns are stored in an enum to avoid heap allocations.

mod custom;
mod noise;
mod wave;

use embassy_time::Duration;

pub use custom::{CUSTOM_MAX_STEPS, CUSTOM_STEP_MS_DEFAULT, CustomPattern};
pub use noise::{CampfirePattern, CandlePattern, CandleSoftPattern};
pub use wave::{
    BreathingPattern, ConstantPattern, PulsePattern, SparklePattern, StepsPattern, TwinklePattern,
};

const PATTERN_NAME_CONSTANT: &str = "constant";
const PATTERN_NAME_BREATHING: &str = "breathing";
const PATTERN_NAME_PULSE: &str = "pulse";
const PATTERN_NAME_SPARKLE: &str = "sparkle";
const PATTERN_NAME_CANDLE_SOFT: &str = "candle_soft";
const PATTERN_NAME_CANDLE: &str = "candle";
const PATTERN_NAME_CAMPFIRE: &str = "campfire";
const PATTERN_NAME_STEPS: &str = "steps";
const PATTERN_NAME_TWINKLE: &str = "twinkle";
const PATTERN_NAME_CUSTOM: &str = "custom";

const PATTERN_ID_CONSTANT: u8 = 0;
const PATTERN_ID_BREATHING: u8 = 1;
const PATTERN_ID_PULSE: u8 = 2;
const PATTERN_ID_SPARKLE: u8 = 3;
const PATTERN_ID_CANDLE_SOFT: u8 = 4;
const PATTERN_ID_CANDLE: u8 = 5;
const PATTERN_ID_CAMPFIRE: u8 = 6;
const PATTERN_ID_STEPS: u8 = 7;
const PATTERN_ID_TWINKLE: u8 = 8;
const PATTERN_ID_CUSTOM: u8 = 9;

/// Number of registered patterns
pub const PATTERN_COUNT: u8 = 10;

pub trait Pattern {
    /// Brightness for the given elapsed pattern time
    fn evaluate(&self, elapsed: Duration) -> f32;
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PatternId {
    #[default]
    Constant = PATTERN_ID_CONSTANT,
    Breathing = PATTERN_ID_BREATHING,
    Pulse = PATTERN_ID_PULSE,
    Sparkle = PATTERN_ID_SPARKLE,
    CandleSoft = PATTERN_ID_CANDLE_SOFT,
    Candle = PATTERN_ID_CANDLE,
    Campfire = PATTERN_ID_CAMPFIRE,
    Steps = PATTERN_ID_STEPS,
    Twinkle = PATTERN_ID_TWINKLE,
    Custom = PATTERN_ID_CUSTOM,
}

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_CONSTANT => Self::Constant,
            PATTERN_ID_BREATHING => Self::Breathing,
            PATTERN_ID_PULSE => Self::Pulse,
            PATTERN_ID_SPARKLE => Self::Sparkle,
            PATTERN_ID_CANDLE_SOFT => Self::CandleSoft,
            PATTERN_ID_CANDLE => Self::Candle,
            PATTERN_ID_CAMPFIRE => Self::Campfire,
            PATTERN_ID_STEPS => Self::Steps,
            PATTERN_ID_TWINKLE => Self::Twinkle,
            PATTERN_ID_CUSTOM => Self::Custom,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constant => PATTERN_NAME_CONSTANT,
            Self::Breathing => PATTERN_NAME_BREATHING,
            Self::Pulse => PATTERN_NAME_PULSE,
            Self::Sparkle => PATTERN_NAME_SPARKLE,
            Self::CandleSoft => PATTERN_NAME_CANDLE_SOFT,
            Self::Candle => PATTERN_NAME_CANDLE,
            Self::Campfire => PATTERN_NAME_CAMPFIRE,
            Self::Steps => PATTERN_NAME_STEPS,
            Self::Twinkle => PATTERN_NAME_TWINKLE,
            Self::Custom => PATTERN_NAME_CUSTOM,
        }
    }

    /// Parse a pattern name, case-insensitive
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        (0..PATTERN_COUNT)
            .filter_map(Self::from_raw)
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
    }

    /// How long the pattern plays before auto-cycle moves on
    ///
    /// `None` means the pattern never auto-advances.
    pub const fn auto_cycle_duration(self) -> Option<Duration> {
        let ms = match self {
            Self::Constant => 8_000,
            Self::Breathing => 15_000,
            Self::Pulse | Self::Sparkle => 12_000,
            Self::CandleSoft | Self::Candle | Self::Twinkle => 16_000,
            Self::Campfire => 18_000,
            Self::Steps => 14_000,
            Self::Custom => return None,
        };
        Some(Duration::from_millis(ms))
    }

    /// Next pattern in registry order, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_raw((self.as_raw() + 1) % PATTERN_COUNT).unwrap_or_default()
    }

    pub fn to_slot(self, custom: &CustomPattern) -> PatternSlot {
        match self {
            Self::Constant => PatternSlot::Constant(ConstantPattern),
            Self::Breathing => PatternSlot::Breathing(BreathingPattern),
            Self::Pulse => PatternSlot::Pulse(PulsePattern),
            Self::Sparkle => PatternSlot::Sparkle(SparklePattern),
            Self::CandleSoft => PatternSlot::CandleSoft(CandleSoftPattern),
            Self::Candle => PatternSlot::Candle(CandlePattern),
            Self::Campfire => PatternSlot::Campfire(CampfirePattern),
            Self::Steps => PatternSlot::Steps(StepsPattern),
            Self::Twinkle => PatternSlot::Twinkle(TwinklePattern),
            Self::Custom => PatternSlot::Custom(custom.clone()),
        }
    }
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    Constant(ConstantPattern),
    Breathing(BreathingPattern),
    Pulse(PulsePattern),
    Sparkle(SparklePattern),
    CandleSoft(CandleSoftPattern),
    Candle(CandlePattern),
    Campfire(CampfirePattern),
    Steps(StepsPattern),
    Twinkle(TwinklePattern),
    /// User-defined step levels
    Custom(CustomPattern),
}

impl Default for PatternSlot {
    fn default() -> Self {
        Self::Constant(ConstantPattern)
    }
}

impl PatternSlot {
    /// Evaluate the current pattern, always within `[0, 1]`
    pub fn evaluate(&self, elapsed: Duration) -> f32 {
        let value = match self {
            Self::Constant(p) => p.evaluate(elapsed),
            Self::Breathing(p) => p.evaluate(elapsed),
            Self::Pulse(p) => p.evaluate(elapsed),
            Self::Sparkle(p) => p.evaluate(elapsed),
            Self::CandleSoft(p) => p.evaluate(elapsed),
            Self::Candle(p) => p.evaluate(elapsed),
            Self::Campfire(p) => p.evaluate(elapsed),
            Self::Steps(p) => p.evaluate(elapsed),
            Self::Twinkle(p) => p.evaluate(elapsed),
            Self::Custom(p) => p.evaluate(elapsed),
        };
        crate::math::clamp01(value)
    }

    /// Get the pattern ID for external observation
    pub fn id(&self) -> PatternId {
        match self {
            Self::Constant(_) => PatternId::Constant,
            Self::Breathing(_) => PatternId::Breathing,
            Self::Pulse(_) => PatternId::Pulse,
            Self::Sparkle(_) => PatternId::Sparkle,
            Self::CandleSoft(_) => PatternId::CandleSoft,
            Self::Candle(_) => PatternId::Candle,
            Self::Campfire(_) => PatternId::Campfire,
            Self::Steps(_) => PatternId::Steps,
            Self::Twinkle(_) => PatternId::Twinkle,
            Self::Custom(_) => PatternId::Custom,
        }
    }
}

/// Elapsed time in milliseconds, wrapped to `u32` like a hardware tick counter
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn elapsed_ms(elapsed: Duration) -> u32 {
    elapsed.as_millis() as u32
}
