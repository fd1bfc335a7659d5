mod tests {
    use embassy_time::Instant;
    use myrtio_lamp_engine::filter::{
        CHAIN_MAX, ClipCurve, CompressorConfig, CompressorFilter, DelayConfig, DelayFilter,
        EnvelopeConfig, EnvelopeFilter, Filter, FilterChain, FilterChainConfig, FoldConfig,
        IirConfig, IirFilter, SoftClipConfig, SoftClipFilter, SparkleConfig, SparkleFilter,
        TremoloConfig, TremoloFilter, TremoloWave, WavefolderFilter,
    };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_default_chain_is_disabled() {
        assert_eq!(FilterChainConfig::default().any_enabled(), false);
    }

    #[test]
    fn test_iir_seeds_with_first_sample() {
        let mut iir = IirFilter::new(&IirConfig {
            enabled: true,
            alpha: 0.5,
        });
        assert_eq!(iir.apply(1.0, at(0)), 1.0);
        assert_eq!(iir.apply(0.0, at(10)), 0.5);
        assert_eq!(iir.apply(0.0, at(20)), 0.25);
        iir.reset();
        assert_eq!(iir.apply(0.0, at(30)), 0.0);
    }

    #[test]
    fn test_soft_clip() {
        let mut dry = SoftClipFilter::new(&SoftClipConfig {
            enabled: true,
            amount: 0.0,
            curve: ClipCurve::Tanh,
        });
        assert_eq!(dry.apply(0.7, at(0)), 0.7);

        let mut full = SoftClipFilter::new(&SoftClipConfig {
            enabled: true,
            amount: 1.0,
            curve: ClipCurve::Tanh,
        });
        assert!(approx(full.apply(1.0, at(0)), libm::tanhf(5.0)));
        assert!(full.apply(1.5, at(0)) < 1.0);
        assert_eq!(full.apply(0.0, at(0)), 0.0);

        let mut softsign = SoftClipFilter::new(&SoftClipConfig {
            enabled: true,
            amount: 1.0,
            curve: ClipCurve::SoftSign,
        });
        assert!(approx(softsign.apply(1.0, at(0)), 5.0 / 6.0));
    }

    #[test]
    fn test_tremolo_sine() {
        let mut tremolo = TremoloFilter::new(&TremoloConfig {
            enabled: true,
            rate_hz: 1.0,
            depth: 1.0,
            wave: TremoloWave::Sine,
        });
        assert!(approx(tremolo.apply(1.0, at(1_000)), 0.5));
        assert!(approx(tremolo.apply(1.0, at(1_250)), 1.0));
        assert!(approx(tremolo.apply(1.0, at(1_750)), 0.0));
    }

    #[test]
    fn test_tremolo_without_depth_passes_through() {
        let mut tremolo = TremoloFilter::new(&TremoloConfig {
            enabled: true,
            depth: 0.0,
            ..TremoloConfig::default()
        });
        for step in 0..20 {
            assert_eq!(tremolo.apply(0.6, at(step * 37)), 0.6);
        }
    }

    #[test]
    fn test_sparkle_is_bounded_and_deterministic() {
        let config = SparkleConfig {
            enabled: true,
            density: 20.0,
            intensity: 0.5,
            decay_ms: 100,
        };
        let mut a = SparkleFilter::new(&config);
        let mut b = SparkleFilter::new(&config);
        let mut sparked = false;
        for step in 0..500 {
            let out = a.apply(0.5, at(step * 10));
            assert_eq!(out, b.apply(0.5, at(step * 10)));
            assert!((0.5..=1.0).contains(&out));
            sparked |= out > 0.5;
        }
        assert!(sparked);
    }

    #[test]
    fn test_sparkle_without_decay_does_not_accumulate() {
        let mut sparkle = SparkleFilter::new(&SparkleConfig {
            enabled: true,
            density: 50.0,
            intensity: 0.25,
            decay_ms: 0,
        });
        let mut sparks = 0;
        let mut rests = 0;
        for step in 0..120 {
            let out = sparkle.apply(0.5, at(step * 10));
            assert!(out <= 0.625 + 1e-6);
            if out > 0.5 {
                sparks += 1;
            } else {
                rests += 1;
            }
        }
        assert!(sparks > 0);
        assert!(rests > 1);
    }

    #[test]
    fn test_compressor() {
        let config = CompressorConfig {
            enabled: true,
            threshold: 0.5,
            ratio: 2.0,
            ..CompressorConfig::default()
        };
        let mut loud = CompressorFilter::new(&config);
        assert!(approx(loud.apply(1.0, at(0)), 0.75));

        let mut quiet = CompressorFilter::new(&config);
        assert_eq!(quiet.apply(0.3, at(0)), 0.3);
    }

    #[test]
    fn test_envelope_follower() {
        let mut envelope = EnvelopeFilter::new(&EnvelopeConfig {
            enabled: true,
            attack_ms: 30,
            release_ms: 120,
        });
        assert_eq!(envelope.apply(0.5, at(0)), 0.5);
        let expected = 0.5 + 0.5 * (1.0 - libm::expf(-1.0));
        assert!(approx(envelope.apply(1.0, at(30)), expected));
    }

    #[test]
    fn test_wavefolder() {
        let mut fold = WavefolderFilter::new(&FoldConfig {
            enabled: true,
            amount: 1.0,
        });
        assert!(approx(fold.apply(0.25, at(0)), 1.0));
        assert!(approx(fold.apply(0.5, at(0)), 0.0));
    }

    #[test]
    fn test_delay_echoes_input() {
        let mut delay = DelayFilter::new(&DelayConfig {
            enabled: true,
            delay_ms: 100,
            feedback: 0.0,
            mix: 0.5,
        });
        assert_eq!(delay.apply(1.0, at(0)), 0.5);
        assert_eq!(delay.apply(0.0, at(50)), 0.0);
        assert_eq!(delay.apply(0.0, at(100)), 0.5);
        assert_eq!(delay.apply(0.0, at(150)), 0.0);
    }

    #[test]
    fn test_delay_holds_constant_input_at_fast_tick() {
        let mut delay = DelayFilter::new(&DelayConfig {
            enabled: true,
            delay_ms: 1_000,
            feedback: 0.0,
            mix: 0.5,
        });
        let mut out = 0.0;
        for step in 0..1_000 {
            out = delay.apply(1.0, at(step * 5));
        }
        assert!(approx(out, 1.0));

        let mut fast = DelayFilter::new(&DelayConfig {
            enabled: true,
            delay_ms: 1_000,
            feedback: 0.0,
            mix: 0.5,
        });
        for step in 0..3_000 {
            out = fast.apply(1.0, at(step));
        }
        assert!(approx(out, 1.0));
    }

    #[test]
    fn test_delay_echo_at_one_ms_tick() {
        let mut delay = DelayFilter::new(&DelayConfig {
            enabled: true,
            delay_ms: 100,
            feedback: 0.0,
            mix: 1.0,
        });
        assert_eq!(delay.apply(1.0, at(0)), 0.0);
        for step in 1..100 {
            assert_eq!(delay.apply(0.0, at(step)), 0.0);
        }
        assert_eq!(delay.apply(0.0, at(100)), 1.0);
        assert_eq!(delay.apply(0.0, at(101)), 0.0);
    }

    #[test]
    fn test_delay_config_sanitized() {
        let config = DelayConfig {
            enabled: true,
            delay_ms: 5_000,
            feedback: 2.0,
            mix: f32::NAN,
        }
        .sanitized();
        assert_eq!(config.delay_ms, 1_000);
        assert_eq!(config.feedback, 0.95);
        assert_eq!(config.mix, DelayConfig::default().mix);
    }

    #[test]
    fn test_chain_output_is_bounded() {
        let mut config = FilterChainConfig::default();
        config.tremolo.enabled = true;
        config.tremolo.depth = 0.0;
        let mut chain = FilterChain::new(&config);
        assert_eq!(chain.apply(5.0, at(0)), CHAIN_MAX);
        assert_eq!(chain.apply(-1.0, at(10)), 0.0);
        assert_eq!(chain.apply(f32::NAN, at(20)), 0.0);
    }

    #[test]
    fn test_chain_keeps_state_of_untouched_stages() {
        let mut config = FilterChainConfig::default();
        config.iir = IirConfig {
            enabled: true,
            alpha: 0.5,
        };
        let mut chain = FilterChain::new(&config);
        chain.apply(1.0, at(0));
        assert_eq!(chain.apply(0.0, at(10)), 0.5);

        config.tremolo.rate_hz = 3.0;
        chain.set_config(&config);
        assert_eq!(chain.apply(0.0, at(20)), 0.25);

        config.iir.alpha = 0.25;
        chain.set_config(&config);
        assert_eq!(chain.apply(0.0, at(30)), 0.0);
    }
}
