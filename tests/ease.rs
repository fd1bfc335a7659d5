mod tests {
    use myrtio_lamp_engine::ease::{DEFAULT_POWER, MAX_POWER, MIN_POWER};
    use myrtio_lamp_engine::{EaseCurve, EaseKind, ease};

    const KINDS: [EaseKind; 8] = [
        EaseKind::Linear,
        EaseKind::Smooth,
        EaseKind::In,
        EaseKind::Out,
        EaseKind::InOut,
        EaseKind::Flash,
        EaseKind::Wave,
        EaseKind::Blink,
    ];

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ease_endpoints_for_all_kinds() {
        for kind in KINDS {
            for power in [0.01, 0.05, 0.5, 1.0, 2.0, 7.0, 10.0, f32::NAN, f32::INFINITY] {
                assert_eq!(ease(0.0, kind, power), 0.0, "{:?} p={}", kind, power);
                assert_eq!(ease(1.0, kind, power), 1.0, "{:?} p={}", kind, power);
            }
        }
    }

    #[test]
    fn test_ease_clamps_progress() {
        for kind in KINDS {
            assert_eq!(ease(-3.0, kind, 2.0), 0.0);
            assert_eq!(ease(4.0, kind, 2.0), 1.0);
            assert_eq!(ease(f32::NAN, kind, 2.0), 0.0);
        }
    }

    #[test]
    fn test_ease_midpoints() {
        assert!(approx(ease(0.5, EaseKind::Linear, 2.0), 0.5));
        assert!(approx(ease(0.5, EaseKind::Smooth, 2.0), 0.5));
        assert!(approx(ease(0.5, EaseKind::In, 2.0), 0.25));
        assert!(approx(ease(0.5, EaseKind::Out, 2.0), 0.75));
        assert!(approx(ease(0.25, EaseKind::Flash, 2.0), 0.5));
        assert!(approx(ease(0.5, EaseKind::InOut, 1.0), 0.5));
    }

    #[test]
    fn test_ease_in_out_splits_at_midpoint() {
        assert!(approx(ease(0.25, EaseKind::InOut, 2.0), 0.125));
        assert!(approx(ease(0.5, EaseKind::InOut, 2.0), 0.5));
        assert!(approx(ease(0.75, EaseKind::InOut, 2.0), 0.875));
        // halves mirror each other
        for power in [0.5, 2.0, 7.0] {
            let low = ease(0.2, EaseKind::InOut, power);
            let high = ease(0.8, EaseKind::InOut, power);
            assert!(approx(low + high, 1.0));
        }
    }

    #[test]
    fn test_degenerate_power() {
        // Out treats tiny powers as linear
        assert!(approx(ease(0.5, EaseKind::Out, 0.05), 0.5));
        // In keeps a floored exponent
        assert!(approx(ease(0.5, EaseKind::In, 0.05), libm::powf(0.5, 0.1)));
    }

    #[test]
    fn test_wave_breakpoints() {
        assert!(approx(ease(0.45, EaseKind::Wave, 2.0), 1.0));
        assert!(approx(ease(0.75, EaseKind::Wave, 2.0), 0.5));
        assert!(ease(0.2, EaseKind::Wave, 2.0) > 0.0);
    }

    #[test]
    fn test_blink_segments() {
        // middle of the first blink is lit, the gap after four blinks is dark
        assert!(ease(0.05, EaseKind::Blink, 2.0) > 0.99);
        assert!(ease(0.401, EaseKind::Blink, 2.0) < 0.2);
        assert!(ease(0.9, EaseKind::Blink, 2.0) > 0.8);
    }

    #[test]
    fn test_monotonic_kinds_never_decrease() {
        for kind in KINDS.into_iter().filter(|k| k.is_monotonic()) {
            for power in [1.0, 2.0, 7.0] {
                let mut prev = 0.0;
                for step in 0..=200 {
                    let value = ease(step as f32 / 200.0, kind, power);
                    assert!(value + 1e-6 >= prev, "{:?} p={} step={}", kind, power, step);
                    prev = value;
                }
            }
        }
    }

    #[test]
    fn test_ease_kind_parse() {
        assert_eq!(EaseKind::parse_from_str("Ease-Out"), Some(EaseKind::Out));
        assert_eq!(EaseKind::parse_from_str("easeinout"), Some(EaseKind::InOut));
        assert_eq!(EaseKind::parse_from_str(" blink "), Some(EaseKind::Blink));
        assert_eq!(EaseKind::parse_from_str("bogus"), None);
    }

    #[test]
    fn test_ease_kind_raw_ids() {
        for kind in KINDS {
            assert_eq!(EaseKind::from_raw(kind.as_raw()), Some(kind));
            assert_eq!(EaseKind::parse_from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EaseKind::from_raw(8), None);
        assert_eq!(EaseKind::from_raw_or_default(99), EaseKind::Smooth);
    }

    #[test]
    fn test_ease_curve_sanitizes_power() {
        assert_eq!(EaseCurve::new(EaseKind::In, 100.0).power, MAX_POWER);
        assert_eq!(EaseCurve::new(EaseKind::In, 0.0).power, MIN_POWER);
        assert_eq!(EaseCurve::new(EaseKind::In, f32::NAN).power, DEFAULT_POWER);
        assert_eq!(EaseCurve::default().kind, EaseKind::Smooth);
    }
}
