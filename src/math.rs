//! Small float helpers shared across the engine.
//!
//! Everything here is total: non-finite input never escapes as non-finite
//! output.

use embassy_time::Duration;

/// Clamp a value to `[0, 1]`, mapping NaN to `0`
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Replace non-finite values with `default`
#[inline]
pub fn finite_or(value: f32, default: f32) -> f32 {
    if value.is_finite() { value } else { default }
}

/// Clamp into `[min, max]`, replacing non-finite input with `default`
#[inline]
pub fn sanitize(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("non-finite value replaced by default {}", default);
        return default;
    }
    value.clamp(min, max)
}

/// Classic smoothstep `t²(3−2t)` on a clamped `t`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Calculate progress (0.0-1.0) based on elapsed time and duration
///
/// A zero duration counts as already complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_millis();
    if total == 0 {
        return 1.0;
    }
    let elapsed = elapsed.as_millis();
    if elapsed >= total {
        return 1.0;
    }
    elapsed as f32 / total as f32
}

/// Exponential smoothing coefficient for a time step and time constant.
///
/// Returns `1.0` (no smoothing) for a time constant below one millisecond.
#[inline]
pub fn smoothing_alpha(dt_ms: f32, tau_ms: f32) -> f32 {
    if tau_ms.is_nan() || tau_ms < 1.0 {
        return 1.0;
    }
    clamp01(1.0 - libm::expf(-dt_ms / tau_ms))
}

/// Scale a duration by a float factor, saturating on overflow
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_duration(duration: Duration, factor: f32) -> Duration {
    let factor = finite_or(factor, 1.0).max(0.0);
    let scaled = duration.as_millis() as f32 * factor;
    if scaled >= u64::MAX as f32 {
        return Duration::from_millis(u64::MAX);
    }
    Duration::from_millis(libm::roundf(scaled) as u64)
}
