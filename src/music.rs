//! Audio-reactive brightness modulation from a raw microphone ADC

use embassy_time::{Duration, Instant};

use crate::math::{clamp01, sanitize};

/// Minimum spacing between accepted samples
pub const MUSIC_SAMPLE_INTERVAL: Duration = Duration::from_millis(25);

const ADC_MAX: f32 = 4095.0;
const DC_ALPHA: f32 = 0.01;
const ENV_ALPHA: f32 = 0.25;
const ENV_BOOST: f32 = 1.5;

const DIRECT_BASE: f32 = 0.25;
const DIRECT_GAIN: f32 = 2.2;
const DIRECT_MAX: f32 = 1.5;
const DIRECT_KEEP: f32 = 0.6;

const BEAT_KICK: f32 = 0.8;
const BEAT_FLOOR: f32 = 0.15;
const BEAT_INTERVAL_INIT_MS: f32 = 600.0;
const BEAT_INTERVAL_MIN_MS: f32 = 200.0;
const BEAT_INTERVAL_MAX_MS: f32 = 2000.0;
const BEAT_DECAY_MIN_MS: f32 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MusicMode {
    /// Brightness follows the envelope
    #[default]
    Direct,
    /// Kicks on beats and decays in tempo
    Beat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MusicConfig {
    pub mode: MusicMode,
    pub gain: f32,
    /// Direct-mode blend toward the raw envelope (0-1)
    pub smoothing: f32,
    /// Beat detection threshold on the filtered envelope
    pub threshold: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            mode: MusicMode::Direct,
            gain: 1.0,
            smoothing: 0.4,
            threshold: 0.4,
        }
    }
}

impl MusicConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            mode: self.mode,
            gain: sanitize(self.gain, 0.0, 10.0, 1.0),
            smoothing: sanitize(self.smoothing, 0.0, 1.0, 0.4),
            threshold: sanitize(self.threshold, 0.0, 1.0, 0.4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MusicModulator {
    config: MusicConfig,
    dc: Option<f32>,
    env: f32,
    filtered: f32,
    scale: f32,
    beat_env: f32,
    beat_interval_ms: f32,
    last_beat: Option<Instant>,
    last_sample: Option<Instant>,
}

impl MusicModulator {
    pub fn new(config: MusicConfig) -> Self {
        Self {
            config: config.sanitized(),
            dc: None,
            env: 0.0,
            filtered: 0.0,
            scale: 1.0,
            beat_env: 0.0,
            beat_interval_ms: BEAT_INTERVAL_INIT_MS,
            last_beat: None,
            last_sample: None,
        }
    }

    pub const fn config(&self) -> &MusicConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MusicConfig) {
        let config = config.sanitized();
        if config.mode != self.config.mode {
            self.reset();
        }
        self.config = config;
    }

    /// Current modulation scale in `[0, 1]`
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Envelope after gain, in `[0, 1]`
    pub const fn level(&self) -> f32 {
        self.filtered
    }

    /// Smoothed beat interval in ms
    pub const fn beat_interval_ms(&self) -> f32 {
        self.beat_interval_ms
    }

    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::new(config);
    }

    /// Feed a raw sample; returns `false` when it arrived too early and was
    /// ignored
    pub fn sample(&mut self, raw: u16, now: Instant) -> bool {
        let dt = match self.last_sample {
            Some(last) => match now.checked_duration_since(last) {
                Some(dt) if dt >= MUSIC_SAMPLE_INTERVAL => dt,
                _ => return false,
            },
            None => MUSIC_SAMPLE_INTERVAL,
        };
        self.last_sample = Some(now);

        let value = clamp01(f32::from(raw) / ADC_MAX);
        let dc = self.dc.get_or_insert(value);
        *dc += (value - *dc) * DC_ALPHA;
        let delta = libm::fabsf(value - *dc);
        self.env += (delta - self.env) * ENV_ALPHA;
        self.filtered = clamp01(self.env * self.config.gain * ENV_BOOST);

        match self.config.mode {
            MusicMode::Direct => {
                let target = (DIRECT_BASE + DIRECT_GAIN * self.filtered).min(DIRECT_MAX);
                self.scale = DIRECT_KEEP * self.scale + (1.0 - DIRECT_KEEP) * target;
                self.scale = clamp01(self.scale);
                let s = self.config.smoothing;
                if s > 0.0 {
                    self.scale = (1.0 - s) * self.scale + s * self.filtered;
                }
            }
            MusicMode::Beat => {
                self.step_beat(dt, now);
                self.scale = clamp01(self.scale);
            }
        }
        true
    }

    /// `dt` is the time since the previous accepted sample
    fn step_beat(&mut self, dt: Duration, now: Instant) {
        let threshold = self.config.threshold;
        let rising = self.filtered > threshold && self.beat_env <= threshold;
        self.beat_env = self.filtered;

        if rising {
            if let Some(interval) = self
                .last_beat
                .and_then(|last| now.checked_duration_since(last))
            {
                let interval = interval.as_millis() as f32;
                if interval > BEAT_INTERVAL_MIN_MS && interval < BEAT_INTERVAL_MAX_MS {
                    self.beat_interval_ms = 0.8 * self.beat_interval_ms + 0.2 * interval;
                }
            }
            self.last_beat = Some(now);
            self.scale = BEAT_KICK;
        } else {
            let decay_ms = (self.beat_interval_ms * 0.6).max(BEAT_DECAY_MIN_MS);
            let k = libm::expf(-(dt.as_millis() as f32) / decay_ms);
            self.scale = BEAT_FLOOR + (self.scale - BEAT_FLOOR) * k;
        }
    }
}
