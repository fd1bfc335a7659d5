//! Lamp enable state machine
//!
//! The state is derived from two flags: `enabled` and `off_pending`.
//! `TurningOff` only exists while the output gate ramps to zero; the engine
//! calls [`LampPower::finish_off`] when that ramp completes.

/// Derived lamp power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampState {
    Off,
    On,
    TurningOff,
}

impl LampState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::TurningOff => "turning_off",
        }
    }
}

/// What the engine must do in response to a power request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTransition {
    /// Already in the requested state
    None,
    /// Off -> On: gate restarts from dark and ramps to full
    TurnOn,
    /// TurningOff -> On: gate ramps back to full from where it is
    Rearm,
    /// On -> TurningOff: gate ramps to zero
    TurnOff,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LampPower {
    enabled: bool,
    off_pending: bool,
}

impl LampPower {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            off_pending: false,
        }
    }

    pub const fn state(&self) -> LampState {
        match (self.enabled, self.off_pending) {
            (false, _) => LampState::Off,
            (true, false) => LampState::On,
            (true, true) => LampState::TurningOff,
        }
    }

    /// Enabled flag; stays set while turning off
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn is_off_pending(&self) -> bool {
        self.off_pending
    }

    /// On and not fading out
    pub const fn is_effectively_on(&self) -> bool {
        self.enabled && !self.off_pending
    }

    /// Apply a power request and report the required transition
    pub fn request(&mut self, enable: bool) -> PowerTransition {
        match (enable, self.state()) {
            (true, LampState::On) | (false, LampState::Off | LampState::TurningOff) => {
                PowerTransition::None
            }
            (true, LampState::Off) => {
                self.enabled = true;
                self.off_pending = false;
                PowerTransition::TurnOn
            }
            (true, LampState::TurningOff) => {
                self.off_pending = false;
                PowerTransition::Rearm
            }
            (false, LampState::On) => {
                self.off_pending = true;
                PowerTransition::TurnOff
            }
        }
    }

    /// Complete a pending off transition
    ///
    /// Returns `true` if the lamp was turning off and is now off.
    pub fn finish_off(&mut self) -> bool {
        if !self.off_pending {
            return false;
        }
        self.enabled = false;
        self.off_pending = false;
        true
    }

    /// Drop straight to off regardless of the current state
    pub fn force_off(&mut self) {
        self.enabled = false;
        self.off_pending = false;
    }
}
