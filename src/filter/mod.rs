//! Signal shaping chain for the combined brightness value
//!
//! Stages run in a fixed order and are toggled independently. Each stage is a
//! stateful `f32 -> f32` transform; some overshoot `1.0` on purpose, the chain
//! output is clamped to `[0, CHAIN_MAX]` and the final clamp happens at the
//! PWM write.

use embassy_time::Instant;

mod delay;
mod dynamics;
mod modulation;
mod shaping;
mod smoothing;

pub use delay::{DelayConfig, DelayFilter};
pub use dynamics::{CompressorConfig, CompressorFilter};
pub use modulation::{SparkleConfig, SparkleFilter, TremoloConfig, TremoloFilter, TremoloWave};
pub use shaping::{ClipCurve, FoldConfig, SoftClipConfig, SoftClipFilter, WavefolderFilter};
pub use smoothing::{EnvelopeConfig, EnvelopeFilter, IirConfig, IirFilter};

/// Upper bound of the chain output
pub const CHAIN_MAX: f32 = 1.5;

pub trait Filter {
    /// Process one sample
    fn apply(&mut self, input: f32, now: Instant) -> f32;

    /// Drop internal state
    fn reset(&mut self) {}
}

/// Milliseconds since `last`, zero on the first call or if time went backwards
pub(crate) fn elapsed_ms(last: Option<Instant>, now: Instant) -> f32 {
    last.and_then(|last| now.checked_duration_since(last))
        .map_or(0.0, |dt| dt.as_millis() as f32)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterChainConfig {
    pub iir: IirConfig,
    pub clip: SoftClipConfig,
    pub tremolo: TremoloConfig,
    pub sparkle: SparkleConfig,
    pub compressor: CompressorConfig,
    pub envelope: EnvelopeConfig,
    pub fold: FoldConfig,
    pub delay: DelayConfig,
}

impl FilterChainConfig {
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            iir: self.iir.sanitized(),
            clip: self.clip.sanitized(),
            tremolo: self.tremolo.sanitized(),
            sparkle: self.sparkle.sanitized(),
            compressor: self.compressor.sanitized(),
            envelope: self.envelope.sanitized(),
            fold: self.fold.sanitized(),
            delay: self.delay.sanitized(),
        }
    }

    /// Whether any stage is enabled
    pub const fn any_enabled(&self) -> bool {
        self.iir.enabled
            || self.clip.enabled
            || self.tremolo.enabled
            || self.sparkle.enabled
            || self.compressor.enabled
            || self.envelope.enabled
            || self.fold.enabled
            || self.delay.enabled
    }
}

/// Filter chain - applies post-processing to the combined level
///
/// Processing order: IIR, soft clip, tremolo, sparkle, compressor,
/// envelope follower, wavefolder, delay.
#[derive(Debug, Clone)]
pub struct FilterChain {
    config: FilterChainConfig,
    iir: IirFilter,
    clip: SoftClipFilter,
    tremolo: TremoloFilter,
    sparkle: SparkleFilter,
    compressor: CompressorFilter,
    envelope: EnvelopeFilter,
    fold: WavefolderFilter,
    delay: DelayFilter,
}

impl FilterChain {
    pub fn new(config: &FilterChainConfig) -> Self {
        let config = config.sanitized();
        Self {
            config,
            iir: IirFilter::new(&config.iir),
            clip: SoftClipFilter::new(&config.clip),
            tremolo: TremoloFilter::new(&config.tremolo),
            sparkle: SparkleFilter::new(&config.sparkle),
            compressor: CompressorFilter::new(&config.compressor),
            envelope: EnvelopeFilter::new(&config.envelope),
            fold: WavefolderFilter::new(&config.fold),
            delay: DelayFilter::new(&config.delay),
        }
    }

    pub const fn config(&self) -> &FilterChainConfig {
        &self.config
    }

    /// Replace the configuration
    ///
    /// Stages whose settings changed are rebuilt with fresh state; untouched
    /// stages keep running.
    pub fn set_config(&mut self, config: &FilterChainConfig) {
        let next = config.sanitized();
        if next.iir != self.config.iir {
            self.iir = IirFilter::new(&next.iir);
        }
        if next.clip != self.config.clip {
            self.clip = SoftClipFilter::new(&next.clip);
        }
        if next.tremolo != self.config.tremolo {
            self.tremolo = TremoloFilter::new(&next.tremolo);
        }
        if next.sparkle != self.config.sparkle {
            self.sparkle = SparkleFilter::new(&next.sparkle);
        }
        if next.compressor != self.config.compressor {
            self.compressor = CompressorFilter::new(&next.compressor);
        }
        if next.envelope != self.config.envelope {
            self.envelope = EnvelopeFilter::new(&next.envelope);
        }
        if next.fold != self.config.fold {
            self.fold = WavefolderFilter::new(&next.fold);
        }
        if next.delay != self.config.delay {
            self.delay = DelayFilter::new(&next.delay);
        }
        self.config = next;
    }

    /// Run one sample through every enabled stage
    pub fn apply(&mut self, input: f32, now: Instant) -> f32 {
        let mut out = crate::math::finite_or(input, 0.0);
        if self.config.iir.enabled {
            out = self.iir.apply(out, now);
        }
        if self.config.clip.enabled {
            out = self.clip.apply(out, now);
        }
        if self.config.tremolo.enabled {
            out = self.tremolo.apply(out, now);
        }
        if self.config.sparkle.enabled {
            out = self.sparkle.apply(out, now);
        }
        if self.config.compressor.enabled {
            out = self.compressor.apply(out, now);
        }
        if self.config.envelope.enabled {
            out = self.envelope.apply(out, now);
        }
        if self.config.fold.enabled {
            out = self.fold.apply(out, now);
        }
        if self.config.delay.enabled {
            out = self.delay.apply(out, now);
        }
        crate::math::finite_or(out, 0.0).clamp(0.0, CHAIN_MAX)
    }

    /// Drop the state of every stage
    pub fn reset(&mut self) {
        self.iir.reset();
        self.clip.reset();
        self.tremolo.reset();
        self.sparkle.reset();
        self.compressor.reset();
        self.envelope.reset();
        self.fold.reset();
        self.delay.reset();
    }
}
