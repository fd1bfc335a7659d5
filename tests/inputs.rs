mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_lamp_engine::input::{DIM_MAX, DIM_MIN};
    use myrtio_lamp_engine::{ToggleSwitch, TouchAction, TouchConfig, TouchDimmer};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn dim_level(action: Option<TouchAction>) -> f32 {
        match action {
            Some(TouchAction::Dim(level)) => level,
            other => panic!("expected a dim step, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_debounce() {
        let mut switch = ToggleSwitch::new(false, at(0));
        assert_eq!(switch.update(true, at(10)), None);
        assert_eq!(switch.update(true, at(30)), None);
        assert_eq!(switch.update(true, at(35)), Some(true));
        assert_eq!(switch.level(), true);
        assert_eq!(switch.update(true, at(100)), None);
    }

    #[test]
    fn test_switch_ignores_bounce() {
        let mut switch = ToggleSwitch::new(true, at(0));
        assert_eq!(switch.update(false, at(200)), None);
        assert_eq!(switch.update(true, at(210)), None);
        assert_eq!(switch.update(true, at(300)), None);
        assert_eq!(switch.level(), true);

        assert_eq!(switch.update(false, at(400)), None);
        assert_eq!(switch.update(false, at(425)), Some(false));
    }

    #[test]
    fn test_short_tap_toggles() {
        let mut touch = TouchDimmer::new(TouchConfig::default());
        assert_eq!(touch.update(true, true, 0.3, at(0)), Some(TouchAction::Pressed));
        assert_eq!(touch.is_touched(), true);
        assert_eq!(touch.update(true, true, 0.3, at(500)), None);
        assert_eq!(touch.update(false, true, 0.3, at(600)), Some(TouchAction::Toggle));
        assert_eq!(touch.is_touched(), false);
        assert_eq!(touch.update(false, true, 0.3, at(700)), None);
    }

    #[test]
    fn test_long_hold_on_dark_lamp_does_nothing() {
        let mut touch = TouchDimmer::new(TouchConfig::default());
        touch.update(true, false, 0.3, at(0));
        assert_eq!(touch.update(true, false, 0.3, at(1_500)), None);
        assert_eq!(touch.update(false, false, 0.3, at(1_600)), None);
    }

    #[test]
    fn test_hold_dims_and_release_persists() {
        let mut touch = TouchDimmer::new(TouchConfig::default());
        touch.update(true, true, 0.3, at(0));
        assert_eq!(touch.update(true, true, 0.3, at(999)), None);

        let first = dim_level(touch.update(true, true, 0.3, at(1_000)));
        assert!((first - 0.305).abs() < 1e-5);
        assert_eq!(touch.update(true, true, first, at(1_010)), None);
        let second = dim_level(touch.update(true, true, first, at(1_025)));
        assert!((second - 0.31).abs() < 1e-5);

        assert_eq!(touch.update(false, true, second, at(1_100)), Some(TouchAction::Persist));
    }

    #[test]
    fn test_bright_lamp_dims_down() {
        let mut touch = TouchDimmer::new(TouchConfig::default());
        touch.update(true, true, 0.8, at(0));
        let level = dim_level(touch.update(true, true, 0.8, at(1_000)));
        assert!(level < 0.8);
    }

    #[test]
    fn test_dimming_bounces_at_limits() {
        let config = TouchConfig {
            hold: Duration::from_millis(0),
            step: 0.2,
        };
        let mut touch = TouchDimmer::new(config);
        touch.update(true, true, 0.4, at(0));
        assert_eq!(touch.update(true, true, 0.4, at(0)), None);

        let levels: Vec<f32> = (1..=6)
            .map(|step| dim_level(touch.update(true, true, 0.5, at(step * 25))))
            .collect();
        let expected = [0.6, 0.8, DIM_MAX, 0.75, 0.55, 0.35];
        for (level, expected) in levels.iter().zip(expected) {
            assert!((level - expected).abs() < 1e-5, "{:?}", levels);
        }
        assert!(levels.iter().all(|l| (DIM_MIN..=DIM_MAX).contains(l)));
    }
}
