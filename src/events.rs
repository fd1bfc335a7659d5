use crate::lamp::LampState;

/// Observer for engine side effects
///
/// Announcements and persistence live outside the engine; implement this to
/// hook them up. Every method defaults to a no-op, and `()` ignores all
/// events.
pub trait LampEvents {
    /// Power state changed; `reason` is opaque telemetry text
    fn lamp_state_changed(&mut self, _state: LampState, _reason: &str) {}

    /// Master brightness target changed and should be announced
    fn brightness_changed(&mut self, _level: f32) {}

    /// Settings changed and should be saved
    fn persist_requested(&mut self) {}

    /// A notification overlay ended
    fn notify_finished(&mut self) {}
}

impl LampEvents for () {}
