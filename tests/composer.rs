mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_lamp_engine::{Composer, CompositionInputs, FilterChainConfig, PatternShaping};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn composer(shaping: PatternShaping) -> Composer {
        Composer::new(
            shaping,
            Duration::from_millis(400),
            &FilterChainConfig::default(),
        )
    }

    fn lit(pattern: f32, master: f32) -> CompositionInputs {
        CompositionInputs {
            pattern,
            master,
            output_scale: 1.0,
            enabled: true,
            ..CompositionInputs::default()
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_margin_remap_and_invert() {
        let mut shaping = PatternShaping {
            margin_low: 0.2,
            margin_high: 0.8,
            ..PatternShaping::default()
        };
        let plain = composer(shaping);
        assert!(approx(plain.shape_pattern(1.0), 0.8));
        assert!(approx(plain.shape_pattern(0.0), 0.2));
        assert!(approx(plain.shape_pattern(0.5), 0.5));

        shaping.invert = true;
        let inverted = composer(shaping);
        assert!(approx(inverted.shape_pattern(1.0), 0.2));
        assert!(approx(inverted.shape_pattern(0.0), 0.8));
    }

    #[test]
    fn test_disabled_composes_to_zero() {
        let mut composer = composer(PatternShaping::default());
        let inputs = CompositionInputs {
            enabled: false,
            ..lit(1.0, 1.0)
        };
        assert_eq!(composer.compose(&inputs, at(0)), 0.0);
    }

    #[test]
    fn test_contributors_multiply() {
        let mut composer = composer(PatternShaping::default());
        let inputs = CompositionInputs {
            ambient_scale: 0.5,
            ..lit(0.5, 0.8)
        };
        assert!(approx(composer.compose(&inputs, at(0)), 0.2));

        let gated = CompositionInputs {
            output_scale: 0.25,
            ..lit(1.0, 1.0)
        };
        assert!(approx(composer.compose(&gated, at(10)), 0.25));
    }

    #[test]
    fn test_music_boost_is_clamped() {
        let mut composer = composer(PatternShaping::default());
        let inputs = CompositionInputs {
            music_scale: Some(1.5),
            ..lit(1.0, 0.5)
        };
        assert!(approx(composer.compose(&inputs, at(0)), 0.75));

        let boosted = CompositionInputs {
            music_scale: Some(1.5),
            ..lit(1.0, 1.0)
        };
        assert_eq!(composer.compose(&boosted, at(10)), 1.0);
    }

    #[test]
    fn test_notify_gate_and_floor() {
        let mut composer = composer(PatternShaping::default());
        let dark = CompositionInputs {
            notify_gate: Some(0.0),
            ..lit(1.0, 0.6)
        };
        assert_eq!(composer.compose(&dark, at(0)), 0.0);

        composer.set_notify_floor(0.3);
        let flash = CompositionInputs {
            notify_gate: Some(1.0),
            ..lit(1.0, 0.1)
        };
        assert!(approx(composer.compose(&flash, at(10)), 0.3));
        let bright = CompositionInputs {
            notify_gate: Some(1.0),
            ..lit(1.0, 0.6)
        };
        assert!(approx(composer.compose(&bright, at(20)), 0.6));
    }

    #[test]
    fn test_pattern_fade_smooths_steps() {
        let mut composer = composer(PatternShaping {
            fade_enabled: true,
            fade_strength: 1.0,
            ..PatternShaping::default()
        });
        assert_eq!(composer.compose(&lit(1.0, 0.0), at(0)), 0.0);
        let expected = 1.0 - libm::expf(-1.0);
        assert!(approx(composer.compose(&lit(1.0, 1.0), at(400)), expected));

        composer.reset();
        assert_eq!(composer.compose(&lit(1.0, 1.0), at(410)), 1.0);
    }

    #[test]
    fn test_non_finite_inputs_are_safe() {
        let mut composer = composer(PatternShaping::default());
        let inputs = CompositionInputs {
            pattern: f32::NAN,
            master: f32::INFINITY,
            ambient_scale: f32::NAN,
            output_scale: 1.0,
            music_scale: Some(f32::NAN),
            notify_gate: Some(f32::NEG_INFINITY),
            enabled: true,
        };
        let level = composer.compose(&inputs, at(0));
        assert!((0.0..=1.0).contains(&level));
    }

    #[test]
    fn test_filters_can_be_switched_off() {
        let mut config = FilterChainConfig::default();
        config.tremolo.enabled = true;
        config.tremolo.depth = 1.0;
        config.tremolo.rate_hz = 1.0;
        let mut composer = Composer::new(
            PatternShaping::default(),
            Duration::from_millis(400),
            &config,
        );
        // tremolo starts at the midpoint of its swing
        assert!(approx(composer.compose(&lit(1.0, 1.0), at(0)), 0.5));

        composer.set_filters_enabled(false);
        assert_eq!(composer.compose(&lit(1.0, 1.0), at(10)), 1.0);
    }
}
