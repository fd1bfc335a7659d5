mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_lamp_engine::{
        BrightnessChannel, Composer, CompositionInputs, EaseCurve, EaseKind, FilterChainConfig,
        LampEngine, LampEngineConfig, LampState, PWM_OFF, PatternShaping, PwmCurve, PwmOutput,
        ease,
    };
    use proptest::prelude::*;

    #[derive(Default)]
    struct MockPwm {
        last: Option<u32>,
    }

    impl PwmOutput for MockPwm {
        fn write_duty(&mut self, duty: u32) {
            self.last = Some(duty);
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn kind() -> impl Strategy<Value = EaseKind> {
        (0u8..8).prop_map(EaseKind::from_raw_or_default)
    }

    proptest! {
        #[test]
        fn test_output_level_is_always_in_range(level in any::<f32>()) {
            let mut engine = LampEngine::new(MockPwm::default(), &LampEngineConfig::default(), at(0));
            engine.apply_output_level(level);
            prop_assert!((0.0..=1.0).contains(&engine.last_level()));
            prop_assert!(engine.last_raw() <= 4095);
            prop_assert_eq!(engine.output().last, Some(engine.last_raw()));
        }

        #[test]
        fn test_duty_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0, gamma in 0.5f32..=4.0) {
            let curve = PwmCurve::new(12, gamma);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.duty(low) <= curve.duty(high));
        }

        #[test]
        fn test_ease_endpoints_hold(kind in kind(), power in any::<f32>()) {
            prop_assert_eq!(ease(0.0, kind, power), 0.0);
            prop_assert_eq!(ease(1.0, kind, power), 1.0);
        }

        #[test]
        fn test_ease_stays_in_range(kind in kind(), t in any::<f32>(), power in any::<f32>()) {
            let value = ease(t, kind, power);
            prop_assert!((0.0..=1.0).contains(&value));
        }

        #[test]
        fn test_ramp_lands_exactly_on_target(
            source in 0.0f32..=1.0,
            target in 0.0f32..=1.0,
            duration_ms in 1u64..5_000,
            start_ms in 0u64..10_000,
            kind in kind(),
            power in 0.01f32..=10.0,
        ) {
            let mut channel = BrightnessChannel::new(source);
            let curve = EaseCurve::new(kind, power);
            channel.start(target, Duration::from_millis(duration_ms), curve, at(start_ms));

            channel.tick(at(start_ms + duration_ms / 2));
            let (low, high) = if source <= target { (source, target) } else { (target, source) };
            prop_assert!(channel.current() >= low - 1e-5 && channel.current() <= high + 1e-5);

            channel.tick(at(start_ms + duration_ms));
            prop_assert_eq!(channel.current(), target);
            prop_assert!(!channel.is_ramping());
        }

        #[test]
        fn test_disabled_lamp_always_ends_dark(
            on_for in 0u64..3_000,
            extra in 0u64..1_000,
            percent in 0.0f32..=100.0,
        ) {
            let config = LampEngineConfig::default();
            let mut engine = LampEngine::new(MockPwm::default(), &config, at(0));
            engine.set_lamp_enabled(true, "test", at(0));
            engine.set_brightness_percent(percent, false, false, at(0));
            engine.tick(at(on_for));

            engine.set_lamp_enabled(false, "test", at(on_for));
            let off_at = on_for + u64::from(config.timings.off_ms) + extra;
            engine.tick(at(off_at));
            prop_assert_eq!(engine.lamp_state(), LampState::Off);
            prop_assert_eq!(engine.last_raw(), PWM_OFF);
            prop_assert_eq!(engine.output().last, Some(PWM_OFF));
        }

        #[test]
        fn test_compose_stays_in_range(
            pattern in any::<f32>(),
            master in any::<f32>(),
            ambient_scale in any::<f32>(),
            output_scale in any::<f32>(),
            music in proptest::option::of(any::<f32>()),
            notify in proptest::option::of(any::<f32>()),
            enabled in any::<bool>(),
        ) {
            let mut composer = Composer::new(
                PatternShaping::default(),
                Duration::from_millis(400),
                &FilterChainConfig::default(),
            );
            let inputs = CompositionInputs {
                pattern,
                master,
                ambient_scale,
                output_scale,
                music_scale: music,
                notify_gate: notify,
                enabled,
            };
            let level = composer.compose(&inputs, at(0));
            prop_assert!((0.0..=1.0).contains(&level));
        }
    }
}
