mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_lamp_engine::ramp::{MIN_RAMP_DURATION, clamp_ambient_multiplier, effective_duration};
    use myrtio_lamp_engine::{BrightnessChannel, EaseCurve, EaseKind, RampStart};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_linear_ramp() {
        let mut channel = BrightnessChannel::new(0.2);
        let result = channel.start(0.8, Duration::from_millis(300), EaseCurve::linear(), at(0));
        assert_eq!(result, RampStart::Animated);
        assert_eq!(channel.is_ramping(), true);
        assert_eq!(channel.target(), 0.8);

        assert_eq!(channel.tick(at(150)), None);
        assert!((channel.current() - 0.5).abs() < 1e-5);

        assert_eq!(channel.tick(at(300)), Some(0.8));
        assert_eq!(channel.current(), 0.8);
        assert_eq!(channel.is_ramping(), false);
        assert_eq!(channel.tick(at(400)), None);
    }

    #[test]
    fn test_same_value_applies_instantly() {
        let mut channel = BrightnessChannel::new(0.4);
        let result = channel.start(0.4, Duration::from_millis(500), EaseCurve::default(), at(0));
        assert_eq!(result, RampStart::Instant);
        assert_eq!(channel.is_ramping(), false);
        assert_eq!(channel.current(), 0.4);
    }

    #[test]
    fn test_zero_duration_applies_instantly() {
        let mut channel = BrightnessChannel::new(0.0);
        let result = channel.start(1.0, Duration::from_millis(0), EaseCurve::default(), at(0));
        assert_eq!(result, RampStart::Instant);
        assert_eq!(channel.current(), 1.0);
        assert_eq!(channel.is_ramping(), false);
    }

    #[test]
    fn test_new_ramp_supersedes_from_current_value() {
        let mut channel = BrightnessChannel::new(0.0);
        channel.start(1.0, Duration::from_millis(1000), EaseCurve::linear(), at(0));
        channel.tick(at(500));
        let midway = channel.current();
        assert!((midway - 0.5).abs() < 1e-5);

        channel.start(0.0, Duration::from_millis(1000), EaseCurve::linear(), at(500));
        channel.tick(at(500));
        assert_eq!(channel.current(), midway);
        channel.tick(at(1000));
        assert!((channel.current() - 0.25).abs() < 1e-5);
        channel.tick(at(1500));
        assert_eq!(channel.current(), 0.0);
    }

    #[test]
    fn test_target_is_clamped() {
        let mut channel = BrightnessChannel::new(f32::NAN);
        assert_eq!(channel.current(), 0.0);
        channel.start(2.0, Duration::from_millis(100), EaseCurve::default(), at(0));
        assert_eq!(channel.target(), 1.0);
        channel.tick(at(100));
        assert_eq!(channel.current(), 1.0);
    }

    #[test]
    fn test_clock_going_backwards_holds_start() {
        let mut channel = BrightnessChannel::new(0.2);
        channel.start(0.8, Duration::from_millis(100), EaseCurve::linear(), at(1000));
        channel.tick(at(900));
        assert_eq!(channel.current(), 0.2);
        assert_eq!(channel.is_ramping(), true);
    }

    #[test]
    fn test_eased_ramp_uses_captured_curve() {
        let mut channel = BrightnessChannel::new(0.0);
        channel.start(
            1.0,
            Duration::from_millis(100),
            EaseCurve::new(EaseKind::In, 2.0),
            at(0),
        );
        channel.tick(at(50));
        assert!((channel.current() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_effective_duration() {
        let ms = Duration::from_millis;
        assert_eq!(effective_duration(ms(0), 5.0), ms(0));
        assert_eq!(effective_duration(ms(100), 1.0), ms(100));
        assert_eq!(effective_duration(ms(100), 2.0), ms(200));
        // multiplier is clamped to [0.1, 8]
        assert_eq!(effective_duration(ms(100), 20.0), ms(800));
        assert_eq!(effective_duration(ms(1000), 0.01), ms(100));
        assert_eq!(effective_duration(ms(100), f32::NAN), ms(100));
        // never shorter than the minimum animated ramp
        assert_eq!(effective_duration(ms(5), 1.0), MIN_RAMP_DURATION);
    }

    #[test]
    fn test_clamp_ambient_multiplier() {
        assert_eq!(clamp_ambient_multiplier(0.0), 0.1);
        assert_eq!(clamp_ambient_multiplier(100.0), 8.0);
        assert_eq!(clamp_ambient_multiplier(f32::INFINITY), 8.0);
        assert_eq!(clamp_ambient_multiplier(f32::NAN), 1.0);
        assert_eq!(clamp_ambient_multiplier(3.0), 3.0);
    }
}
