use embassy_time::Duration;
use heapless::Vec;

use super::{Pattern, elapsed_ms};
use crate::math::clamp01;

/// Maximum number of user steps
pub const CUSTOM_MAX_STEPS: usize = 32;
pub const CUSTOM_STEP_MS_DEFAULT: u32 = 800;
/// Level shown while no steps are defined
const EMPTY_LEVEL: f32 = 0.8;
const STEP_MS_MIN: u32 = 10;

/// User-defined sequence of levels, each held for `step_ms`
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPattern {
    steps: Vec<f32, CUSTOM_MAX_STEPS>,
    step_ms: u32,
}

impl Default for CustomPattern {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            step_ms: CUSTOM_STEP_MS_DEFAULT,
        }
    }
}

impl CustomPattern {
    /// Build from levels; extra entries beyond the capacity are dropped
    pub fn new(levels: &[f32], step_ms: u32) -> Self {
        let mut pattern = Self {
            steps: Vec::new(),
            step_ms: step_ms.max(STEP_MS_MIN),
        };
        if levels.len() > CUSTOM_MAX_STEPS {
            log::warn!(
                "custom pattern truncated from {} to {} steps",
                levels.len(),
                CUSTOM_MAX_STEPS
            );
        }
        for level in levels.iter().take(CUSTOM_MAX_STEPS) {
            let _ = pattern.steps.push(clamp01(*level));
        }
        pattern
    }

    pub fn steps(&self) -> &[f32] {
        &self.steps
    }

    pub const fn step_ms(&self) -> u32 {
        self.step_ms
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Pattern for CustomPattern {
    fn evaluate(&self, elapsed: Duration) -> f32 {
        if self.steps.is_empty() {
            return EMPTY_LEVEL;
        }
        let idx = (elapsed_ms(elapsed) / self.step_ms.max(1)) as usize % self.steps.len();
        self.steps[idx]
    }
}
