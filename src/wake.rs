//! Wake (sunrise) and sleep fades of the master brightness

use embassy_time::Duration;

use crate::math::clamp01;

/// Shortest accepted wake or sleep fade
pub const MIN_FADE: Duration = Duration::from_millis(5_000);
/// Master level a wake fade starts from
pub const WAKE_START_LEVEL: f32 = 0.02;
/// Wake target when no override is given and the master is lower
pub const WAKE_MIN_TARGET: f32 = 0.65;

/// Active long fade, at most one at a time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Fade {
    #[default]
    Idle,
    Wake {
        target: f32,
        /// A touch cancels the wake and turns the lamp off
        soft_cancel: bool,
    },
    Sleep {
        /// Master level before the fade, restored on the next enable
        start_level: f32,
    },
}

impl Fade {
    pub const fn is_wake(&self) -> bool {
        matches!(self, Self::Wake { .. })
    }

    pub const fn is_sleep(&self) -> bool {
        matches!(self, Self::Sleep { .. })
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Clamp a requested fade duration to [`MIN_FADE`]
pub fn fade_duration(requested: Duration) -> Duration {
    if requested < MIN_FADE {
        MIN_FADE
    } else {
        requested
    }
}

/// Target level for a wake fade
pub fn wake_target(master: f32, target_override: Option<f32>) -> f32 {
    match target_override {
        Some(level) => clamp01(level),
        None => clamp01(master.max(WAKE_MIN_TARGET)),
    }
}
