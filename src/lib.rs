#![no_std]

pub mod ambient;
pub mod channel;
pub mod composer;
pub mod config;
pub mod ease;
pub mod engine;
pub mod events;
pub mod filter;
pub mod gamma;
pub mod input;
pub mod intent;
pub mod lamp;
pub mod math;
pub mod music;
pub mod notify;
pub mod pattern;
pub mod ramp;
pub mod scheduler;
pub mod wake;

pub use ambient::{AmbientConfig, AmbientLight, AmbientReading};
pub use composer::{Composer, CompositionInputs};
pub use config::{BrightnessLimits, Features, LampEngineConfig, PatternShaping, RampTimings};
pub use ease::{EaseCurve, EaseKind, ease};
pub use engine::LampEngine;
pub use events::LampEvents;
pub use filter::{FilterChain, FilterChainConfig};
pub use gamma::{PWM_OFF, PwmCurve};
pub use input::{ToggleSwitch, TouchAction, TouchConfig, TouchDimmer};
pub use intent::{
    ConfigIntent, IntentChannel, IntentProcessor, IntentReceiver, IntentSender, LampIntent,
};
pub use lamp::LampState;
pub use music::{MusicConfig, MusicMode, MusicModulator};
pub use notify::{NotifyOverlay, NotifySequence};
pub use pattern::{CustomPattern, PatternId, PatternSlot};
pub use ramp::{BrightnessChannel, RampChannel, RampStart};
pub use scheduler::{ControlLoop, TickResult};
pub use wake::Fade;

pub use embassy_time::{Duration, Instant};

/// Abstract PWM driver trait
///
/// Implement this trait to support different hardware platforms.
/// The lamp engine is generic over this trait.
pub trait PwmOutput {
    /// Write a raw duty code, `0` is fully off
    fn write_duty(&mut self, duty: u32);
}

/// Route `log` output to the ESP32 console
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
