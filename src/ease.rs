//! Easing curves for ramps
//!
//! Every curve maps linear progress `t ∈ [0, 1]` to eased progress in
//! `[0, 1]`, with `ease(0) == 0` and `ease(1) == 1` for all kinds and powers.
//! `wave` and `blink` are fixed multi-segment shapes of `t`, not oscillators.

use crate::math::{clamp01, smoothstep};

const EASE_NAME_LINEAR: &str = "linear";
const EASE_NAME_SMOOTH: &str = "ease";
const EASE_NAME_IN: &str = "ease-in";
const EASE_NAME_OUT: &str = "ease-out";
const EASE_NAME_IN_OUT: &str = "ease-in-out";
const EASE_NAME_FLASH: &str = "flash";
const EASE_NAME_WAVE: &str = "wave";
const EASE_NAME_BLINK: &str = "blink";

const EASE_ID_LINEAR: u8 = 0;
const EASE_ID_SMOOTH: u8 = 1;
const EASE_ID_IN: u8 = 2;
const EASE_ID_OUT: u8 = 3;
const EASE_ID_IN_OUT: u8 = 4;
const EASE_ID_FLASH: u8 = 5;
const EASE_ID_WAVE: u8 = 6;
const EASE_ID_BLINK: u8 = 7;

/// Smallest accepted easing power
pub const MIN_POWER: f32 = 0.01;
/// Largest accepted easing power
pub const MAX_POWER: f32 = 10.0;
/// Power used when a non-finite value is supplied
pub const DEFAULT_POWER: f32 = 2.0;

/// Powers at or below this are degenerate and behave like `1.0`
const DEGENERATE_POWER: f32 = 0.1;

// Wave breakpoints: rise to 1, dip to 0.5, rise to 1
const WAVE_RISE_END: f32 = 0.45;
const WAVE_DIP_END: f32 = 0.75;

// Blink: four short blinks, then a smooth final rise
const BLINK_COUNT: u8 = 4;
const BLINK_WIDTH: f32 = 0.1;

/// Known easing curve kinds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EaseKind {
    Linear = EASE_ID_LINEAR,
    /// Smoothstep, the default "ease"
    #[default]
    Smooth = EASE_ID_SMOOTH,
    In = EASE_ID_IN,
    Out = EASE_ID_OUT,
    InOut = EASE_ID_IN_OUT,
    /// Front-loaded rise
    Flash = EASE_ID_FLASH,
    Wave = EASE_ID_WAVE,
    Blink = EASE_ID_BLINK,
}

impl EaseKind {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EASE_ID_LINEAR => Self::Linear,
            EASE_ID_SMOOTH => Self::Smooth,
            EASE_ID_IN => Self::In,
            EASE_ID_OUT => Self::Out,
            EASE_ID_IN_OUT => Self::InOut,
            EASE_ID_FLASH => Self::Flash,
            EASE_ID_WAVE => Self::Wave,
            EASE_ID_BLINK => Self::Blink,
            _ => return None,
        })
    }

    /// Like [`EaseKind::from_raw`], falling back to smoothstep for unknown ids
    pub fn from_raw_or_default(value: u8) -> Self {
        Self::from_raw(value).unwrap_or_default()
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => EASE_NAME_LINEAR,
            Self::Smooth => EASE_NAME_SMOOTH,
            Self::In => EASE_NAME_IN,
            Self::Out => EASE_NAME_OUT,
            Self::InOut => EASE_NAME_IN_OUT,
            Self::Flash => EASE_NAME_FLASH,
            Self::Wave => EASE_NAME_WAVE,
            Self::Blink => EASE_NAME_BLINK,
        }
    }

    /// Parse a curve name, case-insensitive, accepting dash-less aliases
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let eq = |name: &str| s.eq_ignore_ascii_case(name);
        if eq(EASE_NAME_LINEAR) {
            Some(Self::Linear)
        } else if eq(EASE_NAME_SMOOTH) {
            Some(Self::Smooth)
        } else if eq(EASE_NAME_IN) || eq("easein") {
            Some(Self::In)
        } else if eq(EASE_NAME_OUT) || eq("easeout") {
            Some(Self::Out)
        } else if eq(EASE_NAME_IN_OUT) || eq("easeinout") {
            Some(Self::InOut)
        } else if eq(EASE_NAME_FLASH) {
            Some(Self::Flash)
        } else if eq(EASE_NAME_WAVE) {
            Some(Self::Wave)
        } else if eq(EASE_NAME_BLINK) {
            Some(Self::Blink)
        } else {
            None
        }
    }

    /// Evaluate this curve at `t` with the given power
    pub fn apply(self, t: f32, power: f32) -> f32 {
        ease(t, self, power)
    }

    /// Whether the curve never decreases over `t`
    pub const fn is_monotonic(self) -> bool {
        !matches!(self, Self::Wave | Self::Blink)
    }
}

/// Easing parameters captured into a ramp when it starts
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaseCurve {
    pub kind: EaseKind,
    pub power: f32,
}

impl Default for EaseCurve {
    fn default() -> Self {
        Self::new(EaseKind::Smooth, DEFAULT_POWER)
    }
}

impl EaseCurve {
    /// Create a curve with a sanitized power
    pub fn new(kind: EaseKind, power: f32) -> Self {
        Self {
            kind,
            power: sanitize_power(power),
        }
    }

    pub fn linear() -> Self {
        Self::new(EaseKind::Linear, 1.0)
    }

    /// Evaluate the curve at `t`
    pub fn apply(self, t: f32) -> f32 {
        ease(t, self.kind, self.power)
    }

    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(self.kind, self.power)
    }
}

/// Clamp a power to `[MIN_POWER, MAX_POWER]`, replacing non-finite values
pub fn sanitize_power(power: f32) -> f32 {
    crate::math::sanitize(power, MIN_POWER, MAX_POWER, DEFAULT_POWER)
}

#[inline]
fn effective_power(power: f32) -> f32 {
    if power <= DEGENERATE_POWER {
        1.0
    } else {
        power
    }
}

/// Map linear progress to eased progress
///
/// Input and power are clamped on entry and the result is clamped on exit.
pub fn ease(t: f32, kind: EaseKind, power: f32) -> f32 {
    let t = clamp01(t);
    let power = crate::math::finite_or(power, DEFAULT_POWER).clamp(MIN_POWER, MAX_POWER);
    let eased = match kind {
        EaseKind::Linear => t,
        EaseKind::Smooth => smoothstep(t),
        // ease-in keeps the exponent floored instead of disabling it
        EaseKind::In => libm::powf(t, power.max(DEGENERATE_POWER)),
        EaseKind::Out => 1.0 - libm::powf(1.0 - t, effective_power(power)),
        // ease-in up to the midpoint, mirrored ease-out after it
        EaseKind::InOut => {
            let p = effective_power(power);
            if t < 0.5 {
                0.5 * libm::powf(2.0 * t, p)
            } else {
                1.0 - 0.5 * libm::powf(2.0 * (1.0 - t), p)
            }
        }
        EaseKind::Flash => libm::powf(t, 1.0 / effective_power(power)).min(1.0),
        EaseKind::Wave => wave(t),
        EaseKind::Blink => blink(t, effective_power(power)),
    };
    clamp01(eased)
}

fn wave(t: f32) -> f32 {
    if t < WAVE_RISE_END {
        smoothstep(t / WAVE_RISE_END)
    } else if t < WAVE_DIP_END {
        1.0 - 0.5 * smoothstep((t - WAVE_RISE_END) / (WAVE_DIP_END - WAVE_RISE_END))
    } else {
        0.5 + 0.5 * smoothstep((t - WAVE_DIP_END) / (1.0 - WAVE_DIP_END))
    }
}

fn blink(t: f32, power: f32) -> f32 {
    let blinks_end = BLINK_WIDTH * f32::from(BLINK_COUNT);
    if t < blinks_end {
        let local = (t % BLINK_WIDTH) / BLINK_WIDTH;
        // 0 -> 1 -> 0 within each blink
        let bump = 1.0 - libm::fabsf(2.0 * local - 1.0);
        return smoothstep(bump);
    }
    let rise = (t - blinks_end) / (1.0 - blinks_end);
    libm::powf(clamp01(rise), 1.0 / power)
}
