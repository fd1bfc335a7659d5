//! Intent processing module
//!
//! Collaborators (switch, touch, command router, sensors) do not call the
//! engine directly from their own context. They queue [`LampIntent`]s, and
//! the control loop applies them in order before composing the tick.

use embassy_time::{Duration, Instant};

use crate::PwmOutput;
use crate::ambient::AmbientReading;
use crate::channel::{Channel, Receiver, Sender};
use crate::config::{BrightnessLimits, Features, RampTimings};
use crate::ease::EaseCurve;
use crate::engine::LampEngine;
use crate::events::LampEvents;
use crate::filter::FilterChainConfig;
use crate::input::TouchAction;
use crate::notify::NotifySequence;
use crate::pattern::{CustomPattern, PatternId};
use crate::ramp::RampChannel;

/// Request to change engine settings
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIntent {
    EaseOn(EaseCurve),
    EaseOff(EaseCurve),
    Timings(RampTimings),
    Limits(BrightnessLimits),
    Margins { low: f32, high: f32 },
    Invert(bool),
    SpeedScale(f32),
    PatternFade { enabled: bool, strength: f32 },
    Gamma(f32),
    Filters(FilterChainConfig),
    NotifyFloor(f32),
    Features(Features),
}

/// Request to change the lamp
#[derive(Debug, Clone, PartialEq)]
pub enum LampIntent {
    Power {
        enable: bool,
        reason: &'static str,
    },
    Toggle,
    ForceOff,
    BrightnessPercent {
        percent: f32,
        persist: bool,
        announce: bool,
    },
    Ramp {
        target: f32,
        duration: Duration,
        channel: RampChannel,
        curve: EaseCurve,
    },
    Pattern(PatternId),
    CustomPattern(CustomPattern),
    AutoCycle(bool),
    Notify(NotifySequence),
    StopNotify,
    Wake {
        duration: Duration,
        target: Option<f32>,
        soft_cancel: bool,
    },
    CancelWake,
    Sleep(Duration),
    CancelSleep,
    Config(ConfigIntent),
    Ambient(AmbientReading),
    MusicScale(f32),
    Touch(TouchAction),
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, LampIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, LampIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<LampIntent, SIZE>;

/// Drains queued intents into the engine
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply every pending intent in send order (non-blocking)
    ///
    /// Returns the number of intents applied.
    pub fn process_pending<D: PwmOutput, E: LampEvents>(
        &mut self,
        engine: &mut LampEngine<D, E>,
        now: Instant,
    ) -> usize {
        let mut applied = 0;
        for intent in self.intents.drain() {
            Self::apply(engine, intent, now);
            applied += 1;
        }
        applied
    }

    /// Apply one intent
    pub fn apply<D: PwmOutput, E: LampEvents>(
        engine: &mut LampEngine<D, E>,
        intent: LampIntent,
        now: Instant,
    ) {
        match intent {
            LampIntent::Power { enable, reason } => engine.set_lamp_enabled(enable, reason, now),
            LampIntent::Toggle => engine.toggle("toggle", now),
            LampIntent::ForceOff => engine.force_lamp_off("force off"),
            LampIntent::BrightnessPercent {
                percent,
                persist,
                announce,
            } => {
                engine.set_brightness_percent(percent, persist, announce, now);
            }
            LampIntent::Ramp {
                target,
                duration,
                channel,
                curve,
            } => {
                engine.start_brightness_ramp(target, duration, channel, curve, now);
            }
            LampIntent::Pattern(id) => engine.set_pattern(id, now),
            LampIntent::CustomPattern(pattern) => engine.set_custom_pattern(pattern),
            LampIntent::AutoCycle(enabled) => engine.set_auto_cycle(enabled, now),
            LampIntent::Notify(sequence) => engine.start_notify(sequence, now),
            LampIntent::StopNotify => engine.stop_notify(),
            LampIntent::Wake {
                duration,
                target,
                soft_cancel,
            } => engine.start_wake(duration, target, soft_cancel, now),
            LampIntent::CancelWake => engine.cancel_wake(),
            LampIntent::Sleep(duration) => engine.start_sleep(duration, now),
            LampIntent::CancelSleep => engine.cancel_sleep(),
            LampIntent::Config(config) => Self::apply_config(engine, config, now),
            LampIntent::Ambient(reading) => engine.set_ambient(reading),
            LampIntent::MusicScale(scale) => engine.set_music_scale(scale),
            LampIntent::Touch(action) => engine.handle_touch(action, now),
        }
    }

    fn apply_config<D: PwmOutput, E: LampEvents>(
        engine: &mut LampEngine<D, E>,
        intent: ConfigIntent,
        now: Instant,
    ) {
        match intent {
            ConfigIntent::EaseOn(curve) => engine.set_ease_on(curve),
            ConfigIntent::EaseOff(curve) => engine.set_ease_off(curve),
            ConfigIntent::Timings(timings) => engine.set_ramp_timings(timings),
            ConfigIntent::Limits(limits) => engine.set_limits(limits),
            ConfigIntent::Margins { low, high } => engine.set_margins(low, high),
            ConfigIntent::Invert(invert) => engine.set_invert(invert),
            ConfigIntent::SpeedScale(speed) => engine.set_speed_scale(speed),
            ConfigIntent::PatternFade { enabled, strength } => {
                engine.set_pattern_fade(enabled, strength);
            }
            ConfigIntent::Gamma(gamma) => engine.set_gamma(gamma),
            ConfigIntent::Filters(filters) => engine.set_filters(&filters),
            ConfigIntent::NotifyFloor(floor) => engine.set_notify_floor(floor),
            ConfigIntent::Features(features) => engine.set_features(features, now),
        }
    }
}
