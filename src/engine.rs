//! Lamp engine
//!
//! Owns both brightness channels, the power state machine and the composer,
//! and drives the PWM output once per control tick.

use core::mem;

use embassy_time::{Duration, Instant};

use crate::PwmOutput;
use crate::ambient::AmbientReading;
use crate::composer::{Composer, CompositionInputs};
use crate::config::{
    BrightnessLimits, Features, LampEngineConfig, PatternShaping, RampTimings, defaults,
};
use crate::ease::EaseCurve;
use crate::events::LampEvents;
use crate::filter::FilterChainConfig;
use crate::gamma::{PWM_OFF, PwmCurve};
use crate::input::TouchAction;
use crate::lamp::{LampPower, LampState, PowerTransition};
use crate::math::{clamp01, sanitize, scale_duration};
use crate::notify::{INVERT_THRESHOLD, NotifyOverlay, NotifyProgress, NotifySequence};
use crate::pattern::{CustomPattern, PatternId, PatternSlot};
use crate::ramp::{
    BrightnessChannel, RampChannel, RampStart, clamp_ambient_multiplier, effective_duration,
};
use crate::wake::{Fade, WAKE_START_LEVEL, fade_duration, wake_target};

/// Upper bound of the audio modulation scale
const MUSIC_SCALE_MAX: f32 = 1.5;

#[derive(Debug, Clone)]
struct ActiveNotify {
    overlay: NotifyOverlay,
    /// Lamp was not effectively on when the first overlay started
    restore_off: bool,
}

pub struct LampEngine<D: PwmOutput, E: LampEvents = ()> {
    output: D,
    events: E,
    config: LampEngineConfig,

    master: BrightnessChannel,
    gate: BrightnessChannel,
    power: LampPower,
    last_on_brightness: f32,

    curve: PwmCurve,
    last_raw: u32,
    last_level: f32,

    composer: Composer,
    pattern: PatternSlot,
    custom: CustomPattern,
    pattern_since: Instant,
    pattern_clock: Duration,
    last_tick: Option<Instant>,

    notify: Option<ActiveNotify>,
    fade: Fade,
    /// Swallow the rest of a touch gesture that cancelled a soft wake
    touch_swallowed: bool,

    ambient: AmbientReading,
    music_scale: f32,
}

impl<D: PwmOutput> LampEngine<D, ()> {
    /// Create an engine without an event observer
    pub fn new(output: D, config: &LampEngineConfig, now: Instant) -> Self {
        Self::with_events(output, (), config, now)
    }
}

impl<D: PwmOutput, E: LampEvents> LampEngine<D, E> {
    /// Create an engine
    ///
    /// The output is written dark immediately. With `config.enabled` set the
    /// lamp then fades in like a regular enable.
    pub fn with_events(output: D, events: E, config: &LampEngineConfig, now: Instant) -> Self {
        let config = config.sanitized();
        let mut composer = Composer::new(config.shaping, config.timings.base(), &config.filters);
        composer.set_notify_floor(config.notify_floor);
        composer.set_filters_enabled(config.features.filters);

        let mut engine = Self {
            output,
            events,
            master: BrightnessChannel::new(config.brightness),
            gate: BrightnessChannel::new(0.0),
            power: LampPower::new(false),
            last_on_brightness: config.brightness,
            curve: PwmCurve::new(config.pwm_resolution_bits, config.gamma),
            last_raw: PWM_OFF,
            last_level: 0.0,
            composer,
            pattern: config.pattern.to_slot(&CustomPattern::default()),
            custom: CustomPattern::default(),
            pattern_since: now,
            pattern_clock: Duration::from_ticks(0),
            last_tick: None,
            notify: None,
            fade: Fade::Idle,
            touch_swallowed: false,
            ambient: AmbientReading::NEUTRAL,
            music_scale: 1.0,
            config,
        };
        engine.write_off();
        if engine.config.enabled {
            engine.set_lamp_enabled(true, "boot", now);
        }
        engine
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    /// Gamma-correct and write one PWM frame
    ///
    /// Any input, including NaN and out-of-range values, is clamped to
    /// `[0, 1]` first.
    pub fn apply_output_level(&mut self, level: f32) {
        let level = clamp01(level);
        let raw = self.curve.duty(level);
        self.output.write_duty(raw);
        self.last_raw = raw;
        self.last_level = level;
    }

    /// Write the literal off code, bypassing gamma
    fn write_off(&mut self) {
        self.output.write_duty(PWM_OFF);
        self.last_raw = PWM_OFF;
        self.last_level = 0.0;
    }

    // ---------------------------------------------------------------------
    // Ramps
    // ---------------------------------------------------------------------

    /// Ramp duration multiplier from ambient darkness (1 when disabled)
    fn ramp_multiplier(&self) -> f32 {
        if self.config.features.ambient {
            self.ambient.ramp_multiplier
        } else {
            1.0
        }
    }

    /// Start an eased ramp on one channel
    ///
    /// The duration is stretched by the ambient multiplier. A manual master
    /// ramp cancels any wake or sleep fade.
    pub fn start_brightness_ramp(
        &mut self,
        target: f32,
        duration: Duration,
        channel: RampChannel,
        curve: EaseCurve,
        now: Instant,
    ) -> RampStart {
        let duration = effective_duration(duration, self.ramp_multiplier());
        let result = match channel {
            RampChannel::Master => {
                self.fade = Fade::Idle;
                let target = sanitize(target, 0.0, 1.0, self.master.current());
                self.master.start(target, duration, curve, now)
            }
            RampChannel::Output => {
                let target = sanitize(target, 0.0, 1.0, self.gate.current());
                // a rising gate cancels a pending off
                if target > 0.0
                    && self.power.is_off_pending()
                    && self.power.request(true) == PowerTransition::Rearm
                {
                    log::info!("lamp {} (output ramp)", self.power.state().as_str());
                    self.events.lamp_state_changed(self.power.state(), "output ramp");
                }
                let result = self.gate.start(target, duration, curve, now);
                if result == RampStart::Instant {
                    self.finish_off_if_dark("instant");
                }
                result
            }
        };
        log::debug!(
            "ramp {:?} -> {} over {} ms ({:?})",
            channel,
            target,
            duration.as_millis(),
            result
        );
        result
    }

    /// Advance both channels; completes pending off transitions and fades
    pub fn tick_ramp(&mut self, now: Instant) {
        if let Some(level) = self.master.tick(now) {
            log::debug!("master ramp complete at {}", level);
        }
        if self.gate.tick(now).is_some() {
            self.finish_off_if_dark("ramp complete");
        }
        self.complete_fade();
    }

    fn finish_off_if_dark(&mut self, reason: &str) {
        if self.gate.current() <= 0.0 && self.power.finish_off() {
            self.write_off();
            self.composer.reset();
            log::info!("lamp off ({})", reason);
            self.events.lamp_state_changed(LampState::Off, reason);
        }
    }

    /// Snap the master back to `level` and drop its ramp
    fn freeze_master(&mut self) {
        let level = self.master.current();
        self.master.set(level);
    }

    // ---------------------------------------------------------------------
    // Power
    // ---------------------------------------------------------------------

    /// Master level restored on enable
    fn enable_target(&self) -> f32 {
        let limits = &self.config.limits;
        let fallback = if self.last_on_brightness > limits.min {
            self.last_on_brightness
        } else {
            defaults::BRIGHTNESS
        };
        let master = self.master.current();
        limits.clamp(if master > limits.min { master } else { fallback })
    }

    fn remember_last_on(&mut self) {
        let master = self.master.current();
        if master > self.config.limits.min {
            self.last_on_brightness = master;
        } else if self.last_on_brightness < self.config.limits.min {
            self.last_on_brightness = defaults::BRIGHTNESS;
        }
    }

    /// Request the lamp on or off
    ///
    /// Turning on snaps the master to the restore level and fades the output
    /// gate in from dark. Turning off fades the gate out and keeps the master
    /// for the next enable. Enabling while turning off re-arms the gate from
    /// its current value.
    pub fn set_lamp_enabled(&mut self, enable: bool, reason: &str, now: Instant) {
        if !enable {
            self.cancel_wake();
            self.cancel_sleep();
        }
        let multiplier = self.ramp_multiplier();
        match self.power.request(enable) {
            PowerTransition::None => return,
            PowerTransition::TurnOn => {
                let target = self.enable_target();
                self.master.set(target);
                self.last_on_brightness = target;
                self.gate.set(0.0);
                self.composer.reset();
                let duration = effective_duration(self.config.timings.on(), multiplier);
                self.gate.start(1.0, duration, self.config.ease_on, now);
            }
            PowerTransition::Rearm => {
                let duration = effective_duration(self.config.timings.on(), multiplier);
                self.gate.start(1.0, duration, self.config.ease_on, now);
            }
            PowerTransition::TurnOff => {
                self.remember_last_on();
                let duration = effective_duration(self.config.timings.off(), multiplier);
                if self.gate.start(0.0, duration, self.config.ease_off, now) == RampStart::Instant
                {
                    self.finish_off_if_dark(reason);
                    return;
                }
            }
        }
        let state = self.power.state();
        log::info!("lamp {} ({})", state.as_str(), reason);
        self.events.lamp_state_changed(state, reason);
    }

    /// Flip between on and off; a lamp turning off counts as off
    pub fn toggle(&mut self, reason: &str, now: Instant) {
        let enable = !self.power.is_effectively_on();
        self.set_lamp_enabled(enable, reason, now);
    }

    /// Drop to off immediately with an exact zero write
    pub fn force_lamp_off(&mut self, reason: &str) {
        let was_enabled = self.power.is_enabled();
        self.cancel_wake();
        self.cancel_sleep();
        self.notify = None;
        if was_enabled {
            self.remember_last_on();
        }
        self.power.force_off();
        self.gate.set(0.0);
        self.composer.reset();
        self.write_off();
        if was_enabled {
            log::info!("lamp off, forced ({})", reason);
            self.events.lamp_state_changed(LampState::Off, reason);
        }
    }

    // ---------------------------------------------------------------------
    // Brightness
    // ---------------------------------------------------------------------

    /// Ramp the master brightness to a user percentage
    ///
    /// The level is clamped to the user window. Upward changes use the on
    /// timing and curve, downward changes the off timing and curve.
    pub fn set_brightness_percent(
        &mut self,
        percent: f32,
        persist: bool,
        announce: bool,
        now: Instant,
    ) -> RampStart {
        let fallback = self.master.target() * 100.0;
        let level = sanitize(percent, 0.0, 100.0, fallback) / 100.0;
        let target = self.config.limits.clamp(level);
        let (duration, curve) = if target >= self.master.current() {
            (self.config.timings.on(), self.config.ease_on)
        } else {
            (self.config.timings.off(), self.config.ease_off)
        };
        let result = self.start_brightness_ramp(target, duration, RampChannel::Master, curve, now);
        self.last_on_brightness = target;
        if announce {
            log::info!("brightness {}%", target * 100.0);
            self.events.brightness_changed(target);
        }
        if persist {
            self.events.persist_requested();
        }
        result
    }

    // ---------------------------------------------------------------------
    // Notification overlay
    // ---------------------------------------------------------------------

    /// Start (or restart) a notification blink sequence
    ///
    /// Restarting keeps the restore rule captured by the first overlay.
    pub fn start_notify(&mut self, sequence: NotifySequence, now: Instant) {
        let inverted = self.master.current() > INVERT_THRESHOLD;
        let restore_off = self
            .notify
            .as_ref()
            .map_or(!self.power.is_effectively_on(), |active| active.restore_off);
        log::info!(
            "notify {:?}{}",
            sequence.stages(),
            if inverted { " inverted" } else { "" }
        );
        self.notify = Some(ActiveNotify {
            overlay: NotifyOverlay::new(sequence, inverted, now),
            restore_off,
        });
    }

    /// End the overlay early
    pub fn stop_notify(&mut self) {
        if let Some(active) = self.notify.take() {
            self.end_notify(&active, "notify stop");
        }
    }

    fn end_notify(&mut self, active: &ActiveNotify, reason: &str) {
        if active.restore_off && !self.power.is_effectively_on() {
            self.force_lamp_off(reason);
        }
        self.composer.reset();
        self.events.notify_finished();
    }

    /// Current overlay gate, finishing the overlay when its sequence is over
    fn notify_gate(&mut self, now: Instant) -> Option<f32> {
        let progress = self.notify.as_ref()?.overlay.progress(now);
        match progress {
            NotifyProgress::Active(gate) => Some(gate),
            NotifyProgress::Finished => {
                if let Some(active) = self.notify.take() {
                    self.end_notify(&active, "notify done");
                }
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Wake and sleep
    // ---------------------------------------------------------------------

    /// Sunrise fade of the master brightness
    ///
    /// Enables the lamp and ramps the master linearly from a dim start level.
    /// Cancels a running sleep fade.
    pub fn start_wake(
        &mut self,
        duration: Duration,
        target_override: Option<f32>,
        soft_cancel: bool,
        now: Instant,
    ) {
        let duration = fade_duration(duration);
        let target = wake_target(self.master.current(), target_override);
        self.fade = Fade::Idle;
        self.set_lamp_enabled(true, "wake", now);
        self.master.set(WAKE_START_LEVEL);
        self.master.start(target, duration, EaseCurve::linear(), now);
        self.fade = Fade::Wake {
            target,
            soft_cancel,
        };
        log::info!("wake to {} over {} ms", target, duration.as_millis());
    }

    /// Stop a wake fade, keeping the current level
    pub fn cancel_wake(&mut self) {
        if self.fade.is_wake() {
            self.fade = Fade::Idle;
            self.freeze_master();
            log::info!("wake cancelled");
        }
    }

    /// Cancel a soft wake and turn the lamp off
    ///
    /// Returns `false` when no soft wake was running.
    pub fn soft_cancel_wake(&mut self, now: Instant) -> bool {
        if !matches!(
            self.fade,
            Fade::Wake {
                soft_cancel: true,
                ..
            }
        ) {
            return false;
        }
        self.cancel_wake();
        self.set_lamp_enabled(false, "wake soft cancel", now);
        true
    }

    /// Fade the master to zero, then turn the lamp off
    ///
    /// Cancels a running wake fade.
    pub fn start_sleep(&mut self, duration: Duration, now: Instant) {
        let duration = fade_duration(duration);
        self.fade = Fade::Idle;
        self.set_lamp_enabled(true, "sleep", now);
        let start_level = self.master.current();
        self.master.start(0.0, duration, EaseCurve::linear(), now);
        self.fade = Fade::Sleep { start_level };
        log::info!("sleep from {} over {} ms", start_level, duration.as_millis());
    }

    /// Stop a sleep fade, keeping the current level
    pub fn cancel_sleep(&mut self) {
        if self.fade.is_sleep() {
            self.fade = Fade::Idle;
            self.freeze_master();
            log::info!("sleep cancelled");
        }
    }

    fn complete_fade(&mut self) {
        if !self.fade.is_active() || self.master.is_ramping() {
            return;
        }
        match mem::take(&mut self.fade) {
            Fade::Wake { target, .. } => {
                log::info!("wake complete at {}", target);
                self.last_on_brightness = target;
                self.events.brightness_changed(target);
            }
            Fade::Sleep { start_level } => {
                self.force_lamp_off("sleep complete");
                if start_level > 0.0 {
                    self.last_on_brightness = start_level;
                }
            }
            Fade::Idle => {}
        }
    }

    // ---------------------------------------------------------------------
    // Patterns
    // ---------------------------------------------------------------------

    /// Switch pattern and restart its clock
    pub fn set_pattern(&mut self, id: PatternId, now: Instant) {
        self.pattern = id.to_slot(&self.custom);
        self.pattern_since = now;
        self.pattern_clock = Duration::from_ticks(0);
        self.config.pattern = id;
        log::info!("pattern {}", id.as_str());
    }

    /// Replace the user step pattern
    pub fn set_custom_pattern(&mut self, pattern: CustomPattern) {
        self.custom = pattern;
        if self.pattern.id() == PatternId::Custom {
            self.pattern = PatternSlot::Custom(self.custom.clone());
        }
    }

    pub fn set_auto_cycle(&mut self, enabled: bool, now: Instant) {
        self.config.features.auto_cycle = enabled;
        self.pattern_since = now;
    }

    fn advance_auto_cycle(&mut self, now: Instant) {
        if !self.config.features.auto_cycle {
            return;
        }
        let Some(duration) = self.pattern.id().auto_cycle_duration() else {
            return;
        };
        let due = now
            .checked_duration_since(self.pattern_since)
            .is_some_and(|elapsed| elapsed >= duration);
        if due {
            let next = self.pattern.id().next();
            self.set_pattern(next, now);
        }
    }

    fn advance_pattern_clock(&mut self, now: Instant) {
        if let Some(dt) = self
            .last_tick
            .and_then(|last| now.checked_duration_since(last))
        {
            self.pattern_clock += scale_duration(dt, self.config.shaping.speed_scale);
        }
        self.last_tick = Some(now);
    }

    // ---------------------------------------------------------------------
    // Control tick
    // ---------------------------------------------------------------------

    /// Run one full control step: ramps, fades, overlays, compose, write
    ///
    /// When the lamp is off with no overlay or fade pending, the output is
    /// written as the exact off code every tick.
    pub fn tick(&mut self, now: Instant) {
        self.advance_pattern_clock(now);
        self.advance_auto_cycle(now);
        self.tick_ramp(now);
        let notify_gate = self.notify_gate(now);

        let idle_off = self.power.state() == LampState::Off && notify_gate.is_none();
        if idle_off && !self.fade.is_active() {
            self.composer.reset();
            self.write_off();
            return;
        }

        let features = self.config.features;
        let inputs = CompositionInputs {
            pattern: self.pattern.evaluate(self.pattern_clock),
            master: self.master.current(),
            ambient_scale: if features.ambient {
                self.ambient.scale
            } else {
                1.0
            },
            output_scale: if notify_gate.is_some() {
                1.0
            } else {
                self.gate.current()
            },
            music_scale: features.music.then_some(self.music_scale),
            notify_gate,
            enabled: self.power.is_enabled() || notify_gate.is_some(),
        };
        let level = self.composer.compose(&inputs, now);
        self.apply_output_level(level);
    }

    // ---------------------------------------------------------------------
    // Inputs
    // ---------------------------------------------------------------------

    /// Latest ambient reading; ignored while the feature is off
    pub fn set_ambient(&mut self, reading: AmbientReading) {
        self.ambient = AmbientReading {
            scale: sanitize(reading.scale, 0.0, 1.0, 1.0),
            ramp_multiplier: clamp_ambient_multiplier(reading.ramp_multiplier),
        };
    }

    /// Latest audio modulation scale; ignored while the feature is off
    pub fn set_music_scale(&mut self, scale: f32) {
        self.music_scale = sanitize(scale, 0.0, MUSIC_SCALE_MAX, 1.0);
    }

    /// Apply a decoded touch gesture
    pub fn handle_touch(&mut self, action: TouchAction, now: Instant) {
        match action {
            TouchAction::Pressed => {
                self.touch_swallowed = self.soft_cancel_wake(now);
            }
            TouchAction::Toggle => {
                if !mem::take(&mut self.touch_swallowed) {
                    self.toggle("touch", now);
                }
            }
            TouchAction::Dim(level) => {
                if self.touch_swallowed {
                    return;
                }
                self.cancel_wake();
                self.cancel_sleep();
                let level = clamp01(level);
                self.master.set(level);
                self.last_on_brightness = level;
            }
            TouchAction::Persist => {
                if !mem::take(&mut self.touch_swallowed) {
                    let level = self.master.current();
                    log::info!("brightness {}% (touch)", level * 100.0);
                    self.events.brightness_changed(level);
                    self.events.persist_requested();
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Replace the whole configuration
    ///
    /// `brightness` and `enabled` only seed a new engine and are ignored
    /// here; the running state is kept.
    pub fn apply_config(&mut self, config: &LampEngineConfig, now: Instant) {
        let config = config.sanitized();
        let pattern_changed = config.pattern != self.config.pattern;
        self.curve = PwmCurve::new(config.pwm_resolution_bits, config.gamma);
        self.composer.set_shaping(config.shaping);
        self.composer.set_base(config.timings.base());
        self.composer.set_filters(&config.filters);
        self.composer.set_filters_enabled(config.features.filters);
        self.composer.set_notify_floor(config.notify_floor);
        self.config = LampEngineConfig {
            brightness: self.config.brightness,
            enabled: self.config.enabled,
            ..config
        };
        if pattern_changed {
            self.set_pattern(self.config.pattern, now);
        }
    }

    /// Curve for fade-in and upward brightness changes
    pub fn set_ease_on(&mut self, curve: EaseCurve) {
        self.config.ease_on = curve.sanitized();
    }

    /// Curve for fade-out and downward brightness changes
    pub fn set_ease_off(&mut self, curve: EaseCurve) {
        self.config.ease_off = curve.sanitized();
    }

    /// On/off ramp durations and the pattern smoothing base
    pub fn set_ramp_timings(&mut self, timings: RampTimings) {
        self.config.timings = timings.sanitized();
        self.composer.set_base(self.config.timings.base());
    }

    /// User brightness window; applies to the next brightness request
    pub fn set_limits(&mut self, limits: BrightnessLimits) {
        self.config.limits = limits.sanitized();
    }

    /// Remap the pattern output into `[low, high]`
    pub fn set_margins(&mut self, low: f32, high: f32) {
        self.update_shaping(|shaping| {
            shaping.margin_low = low;
            shaping.margin_high = high;
        });
    }

    /// Flip the pattern output within the margins
    pub fn set_invert(&mut self, invert: bool) {
        self.update_shaping(|shaping| shaping.invert = invert);
    }

    /// Pattern playback speed; 1.0 is nominal
    pub fn set_speed_scale(&mut self, speed: f32) {
        self.update_shaping(|shaping| shaping.speed_scale = speed);
    }

    /// Low-pass the composed value with `base ramp * strength` as time constant
    pub fn set_pattern_fade(&mut self, enabled: bool, strength: f32) {
        self.update_shaping(|shaping| {
            shaping.fade_enabled = enabled;
            shaping.fade_strength = strength;
        });
    }

    fn update_shaping(&mut self, update: impl FnOnce(&mut PatternShaping)) {
        let mut shaping = self.config.shaping;
        update(&mut shaping);
        self.config.shaping = shaping.sanitized();
        self.composer.set_shaping(self.config.shaping);
    }

    /// Gamma exponent for the PWM curve
    pub fn set_gamma(&mut self, gamma: f32) {
        self.curve.set_gamma(gamma);
        self.config.gamma = self.curve.gamma();
    }

    /// Replace the filter chain settings; untouched stages keep their state
    pub fn set_filters(&mut self, filters: &FilterChainConfig) {
        self.composer.set_filters(filters);
        self.config.filters = *self.composer.filters();
    }

    /// Minimum level for notification flashes
    pub fn set_notify_floor(&mut self, floor: f32) {
        self.config.notify_floor = sanitize(floor, 0.0, 1.0, defaults::NOTIFY_FLOOR);
        self.composer.set_notify_floor(self.config.notify_floor);
    }

    /// Runtime capability switches
    pub fn set_features(&mut self, features: Features, now: Instant) {
        if features.auto_cycle != self.config.features.auto_cycle {
            self.pattern_since = now;
        }
        self.composer.set_filters_enabled(features.filters);
        self.config.features = features;
    }

    // ---------------------------------------------------------------------
    // Telemetry
    // ---------------------------------------------------------------------

    pub const fn config(&self) -> &LampEngineConfig {
        &self.config
    }

    /// Configuration with the live brightness and power state, for saving
    pub fn snapshot_config(&self) -> LampEngineConfig {
        let brightness = if self.power.is_effectively_on() {
            self.master.target()
        } else {
            self.last_on_brightness
        };
        LampEngineConfig {
            brightness,
            enabled: self.power.is_effectively_on(),
            ..self.config.clone()
        }
    }

    pub const fn master_brightness(&self) -> f32 {
        self.master.current()
    }

    pub const fn output_scale(&self) -> f32 {
        self.gate.current()
    }

    pub const fn last_on_brightness(&self) -> f32 {
        self.last_on_brightness
    }

    pub const fn lamp_state(&self) -> LampState {
        self.power.state()
    }

    pub const fn is_enabled(&self) -> bool {
        self.power.is_enabled()
    }

    /// Last duty code written to the output
    pub const fn last_raw(&self) -> u32 {
        self.last_raw
    }

    /// Last normalized level written (after clamping)
    pub const fn last_level(&self) -> f32 {
        self.last_level
    }

    /// Any channel ramping
    pub const fn is_ramping(&self) -> bool {
        self.master.is_ramping() || self.gate.is_ramping()
    }

    pub const fn is_master_ramping(&self) -> bool {
        self.master.is_ramping()
    }

    pub const fn is_output_ramping(&self) -> bool {
        self.gate.is_ramping()
    }

    pub fn pattern(&self) -> PatternId {
        self.pattern.id()
    }

    pub const fn custom_pattern(&self) -> &CustomPattern {
        &self.custom
    }

    pub const fn is_notifying(&self) -> bool {
        self.notify.is_some()
    }

    pub const fn fade(&self) -> Fade {
        self.fade
    }

    pub const fn ambient(&self) -> AmbientReading {
        self.ambient
    }

    pub const fn music_scale(&self) -> f32 {
        self.music_scale
    }

    pub const fn output(&self) -> &D {
        &self.output
    }

    pub const fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }
}
