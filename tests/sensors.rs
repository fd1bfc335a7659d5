mod tests {
    use embassy_time::Instant;
    use myrtio_lamp_engine::ambient::ADC_MAX;
    use myrtio_lamp_engine::{
        AmbientConfig, AmbientLight, AmbientReading, MusicConfig, MusicMode, MusicModulator,
    };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_ambient_starts_neutral() {
        let ambient = AmbientLight::new(AmbientConfig::default());
        assert_eq!(ambient.reading(), AmbientReading::NEUTRAL);
    }

    #[test]
    fn test_ambient_rate_limit() {
        let mut ambient = AmbientLight::new(AmbientConfig::default());
        assert_eq!(ambient.sample(ADC_MAX, at(0)), true);
        assert_eq!(ambient.sample(ADC_MAX, at(100)), false);
        assert_eq!(ambient.sample(ADC_MAX, at(200)), true);
    }

    #[test]
    fn test_dark_room_lowers_scale_gradually() {
        let mut ambient = AmbientLight::new(AmbientConfig::default());
        let mut prev = ambient.reading().scale;
        for step in 0..300u64 {
            ambient.sample(0, at(step * 200));
            let scale = ambient.reading().scale;
            assert!(scale <= prev);
            assert!(prev - scale <= 0.02 + 1e-6);
            prev = scale;
        }
        assert!(prev < 0.25);
        assert!(prev >= 0.2);
        // no ramp stretching by default
        assert_eq!(ambient.reading().ramp_multiplier, 1.0);
    }

    #[test]
    fn test_dark_room_stretches_ramps() {
        let mut ambient = AmbientLight::new(AmbientConfig {
            ramp_factor: 2.0,
            ..AmbientConfig::default()
        });
        for step in 0..400u64 {
            ambient.sample(0, at(step * 200));
        }
        let multiplier = ambient.reading().ramp_multiplier;
        assert!(multiplier > 2.5);
        assert!(multiplier <= 3.0);
    }

    #[test]
    fn test_ambient_config_sanitized() {
        let config = AmbientConfig {
            gain: f32::NAN,
            clamp_min: 0.6,
            clamp_max: 0.3,
            ramp_factor: 100.0,
        }
        .sanitized();
        assert_eq!(config.gain, 1.0);
        assert_eq!(config.clamp_max, 0.6);
        assert_eq!(config.ramp_factor, 8.0);
    }

    #[test]
    fn test_music_rate_limit() {
        let mut music = MusicModulator::new(MusicConfig::default());
        assert_eq!(music.scale(), 1.0);
        assert_eq!(music.sample(2048, at(0)), true);
        assert_eq!(music.sample(2048, at(10)), false);
        assert_eq!(music.sample(2048, at(25)), true);
    }

    #[test]
    fn test_music_silence_settles_low() {
        let mut music = MusicModulator::new(MusicConfig::default());
        for step in 0..200u64 {
            music.sample(2048, at(step * 25));
        }
        assert!(music.scale() < 0.15);
        assert!(music.scale() >= 0.0);
        assert_eq!(music.level(), 0.0);
    }

    #[test]
    fn test_music_loud_signal_raises_scale() {
        let mut music = MusicModulator::new(MusicConfig::default());
        for step in 0..200u64 {
            let raw = if step % 2 == 0 { 0 } else { ADC_MAX };
            music.sample(raw, at(step * 25));
        }
        assert!(music.scale() > 0.5);
        assert!(music.scale() <= 1.0);
    }

    #[test]
    fn test_beat_mode_kicks_and_decays() {
        let mut music = MusicModulator::new(MusicConfig::default());
        music.set_config(MusicConfig {
            mode: MusicMode::Beat,
            ..MusicConfig::default()
        });
        assert_eq!(music.config().mode, MusicMode::Beat);

        let mut now = 0;
        for _ in 0..400 {
            music.sample(0, at(now));
            now += 25;
        }
        assert!((music.scale() - 0.15).abs() < 0.05);

        let mut peak: f32 = 0.0;
        for _ in 0..4 {
            music.sample(ADC_MAX, at(now));
            peak = peak.max(music.scale());
            now += 25;
        }
        assert!((peak - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_beat_decay_follows_real_sample_spacing() {
        let beat = MusicConfig {
            mode: MusicMode::Beat,
            ..MusicConfig::default()
        };
        let mut on_time = MusicModulator::new(beat);
        let mut late = MusicModulator::new(beat);

        let mut now = 0;
        for _ in 0..400 {
            on_time.sample(0, at(now));
            late.sample(0, at(now));
            now += 25;
        }
        for _ in 0..4 {
            on_time.sample(ADC_MAX, at(now));
            late.sample(ADC_MAX, at(now));
            if late.scale() > 0.79 {
                break;
            }
            now += 25;
        }
        assert!((late.scale() - 0.8).abs() < 1e-5);

        on_time.sample(ADC_MAX, at(now + 25));
        late.sample(ADC_MAX, at(now + 1_000));
        assert!(on_time.scale() > 0.7);
        assert!(late.scale() < 0.3);
        assert!(late.scale() >= 0.15);
    }
}
