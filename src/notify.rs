//! Notification blink overlay
//!
//! A sequence of stage durations alternates flash (even index) and rest
//! (odd index). The overlay yields a multiplicative gate for the composer
//! until the last stage ends.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::math::smoothstep;

/// Maximum number of stages in a sequence
pub const NOTIFY_MAX_STAGES: usize = 32;
/// Sequence used when none (or only zero durations) is given
pub const DEFAULT_SEQUENCE: [u32; 4] = [120, 60, 120, 200];
/// Master level above which flashes go dark instead of bright
pub const INVERT_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySequence {
    stages: Vec<u32, NOTIFY_MAX_STAGES>,
    fade_ms: u32,
}

impl Default for NotifySequence {
    fn default() -> Self {
        Self::new(&DEFAULT_SEQUENCE, 0)
    }
}

impl NotifySequence {
    /// Build from stage durations in ms
    ///
    /// Zero entries are dropped and extra entries beyond the capacity are
    /// ignored. An empty result falls back to [`DEFAULT_SEQUENCE`].
    pub fn new(stages_ms: &[u32], fade_ms: u32) -> Self {
        let mut stages = Vec::new();
        for &ms in stages_ms.iter().filter(|&&ms| ms > 0) {
            if stages.push(ms).is_err() {
                log::warn!("notify sequence truncated to {} stages", NOTIFY_MAX_STAGES);
                break;
            }
        }
        if stages.is_empty() {
            for &ms in &DEFAULT_SEQUENCE {
                let _ = stages.push(ms);
            }
        }
        Self { stages, fade_ms }
    }

    pub fn stages(&self) -> &[u32] {
        &self.stages
    }

    /// Crossfade time at each stage edge, `0` for hard steps
    pub const fn fade_ms(&self) -> u32 {
        self.fade_ms
    }

    pub fn total(&self) -> Duration {
        Duration::from_millis(self.stages.iter().map(|&ms| u64::from(ms)).sum())
    }
}

/// Where an overlay currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotifyProgress {
    /// Running with the given gate (0-1)
    Active(f32),
    Finished,
}

#[derive(Debug, Clone)]
pub struct NotifyOverlay {
    sequence: NotifySequence,
    started: Instant,
    inverted: bool,
}

impl NotifyOverlay {
    pub fn new(sequence: NotifySequence, inverted: bool, now: Instant) -> Self {
        Self {
            sequence,
            started: now,
            inverted,
        }
    }

    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub const fn sequence(&self) -> &NotifySequence {
        &self.sequence
    }

    fn stage_level(&self, index: usize) -> f32 {
        let flash = index % 2 == 0;
        if flash != self.inverted { 1.0 } else { 0.0 }
    }

    /// Gate value at `now`, or `Finished` after the last stage
    pub fn progress(&self, now: Instant) -> NotifyProgress {
        let mut elapsed = now
            .checked_duration_since(self.started)
            .map_or(0, |d| d.as_millis());

        for (index, &stage_ms) in self.sequence.stages.iter().enumerate() {
            let stage_ms = u64::from(stage_ms);
            if elapsed >= stage_ms {
                elapsed -= stage_ms;
                continue;
            }
            let level = self.stage_level(index);
            let fade_ms = u64::from(self.sequence.fade_ms).min(stage_ms / 2);
            if fade_ms == 0 || elapsed >= fade_ms {
                return NotifyProgress::Active(level);
            }
            // Crossfade in from the opposite level
            let from = 1.0 - level;
            let t = smoothstep(elapsed as f32 / fade_ms as f32);
            return NotifyProgress::Active(from + (level - from) * t);
        }
        NotifyProgress::Finished
    }
}
