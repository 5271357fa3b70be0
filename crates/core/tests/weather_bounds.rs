//! Range guarantees of the weather field over many random probes

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wildfire_core::weather::HumidityMode;
use wildfire_core::{WeatherConfig, WeatherField};

const PROBES: usize = 10_000;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn noisy_humidity() -> WeatherConfig {
    WeatherConfig {
        humidity: HumidityMode::Noise {
            min: 5.0,
            max: 95.0,
        },
        ..WeatherConfig::default()
    }
}

#[test]
fn test_local_weather_stays_in_range() {
    for config in [WeatherConfig::default(), noisy_humidity()] {
        let field = WeatherField::new(100, 100, 8, config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..PROBES {
            let x = rng.random_range(-50.0..150.0);
            let y = rng.random_range(-50.0..150.0);
            let t = rng.random_range(0.0..100_000.0);
            let w = field.local_weather_at(x, y, Some(t));

            assert!(
                (0.0..=100.0).contains(&w.humidity.value()),
                "humidity {} at ({x}, {y}, {t})",
                w.humidity
            );
            assert!(
                (60.0..=100.0).contains(&w.temperature.value()),
                "temperature {} at ({x}, {y}, {t})",
                w.temperature
            );
            assert!((0.0..=40.0).contains(&w.wind_speed.value()));
            assert!(field.weather_influence(&w) >= 0.0);
        }
    }
}

#[test]
fn test_raw_sample_in_unit_interval() {
    let field = WeatherField::new(64, 64, 3, WeatherConfig::default()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..PROBES {
        let scale = rng.random_range(0.5..200.0);
        let time_scale = rng.random_range(1.0..2000.0);
        let x = rng.random_range(0.0..64.0);
        let y = rng.random_range(0.0..64.0);
        let t = rng.random_range(0.0..50_000.0);
        let v = field.sample(scale, time_scale, x, y, Some(t));
        assert!((0.0..=1.0).contains(&v), "sample {v} out of range");
    }
}

#[test]
fn test_global_risk_bounded_over_time() {
    for config in [WeatherConfig::default(), noisy_humidity()] {
        let mut field = WeatherField::new(48, 32, 21, config).unwrap();
        for _ in 0..500 {
            field.tick(37.0);
            let risk = field.global_risk();
            assert!((0.0..=1.0).contains(&risk), "risk {risk}");
        }
    }
}

#[test]
fn test_caching_never_changes_results() {
    let cached = WeatherField::new(32, 32, 77, WeatherConfig::default()).unwrap();
    let uncached = WeatherField::new(
        32,
        32,
        77,
        WeatherConfig {
            caching: false,
            ..WeatherConfig::default()
        },
    )
    .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(77);
    for _ in 0..2_000 {
        let x = f32::from(rng.random_range(0u8..32));
        let y = f32::from(rng.random_range(0u8..32));
        // Probe twice so the second cached lookup is a hit
        let first = cached.local_weather(x, y);
        let second = cached.local_weather(x, y);
        let plain = uncached.local_weather(x, y);
        assert_eq!(first, second);
        assert_eq!(first, plain);
    }
    assert!(cached.cached_samples() > 0);
    assert_eq!(uncached.cached_samples(), 0);
}

#[test]
fn test_danger_map_matches_per_tile_influence() {
    let field = WeatherField::new(12, 9, 5, noisy_humidity()).unwrap();
    let map = field.danger_map();
    assert_eq!(map.len(), 12 * 9);
    for (i, danger) in map.iter().enumerate() {
        let (x, y) = ((i % 12) as f32, (i / 12) as f32);
        let expected = field.weather_influence(&field.local_weather(x, y));
        assert_eq!(*danger, expected);
    }
}

#[test]
fn test_extreme_times_and_scales_do_not_panic() {
    let mut field = WeatherField::new(16, 16, 9, WeatherConfig::default()).unwrap();
    for t in [1.0e10, 1.0e12, f32::MAX, f32::INFINITY] {
        let w = field.local_weather_at(1.0, 1.0, Some(t));
        assert!((60.0..=100.0).contains(&w.temperature.value()), "t={t}");
        assert!((0.0..=40.0).contains(&w.wind_speed.value()), "t={t}");
    }
    for (field_scale, time_scale) in [(0.0, 1.0), (1.0, 0.0), (0.0, 0.0)] {
        for (x, y) in [(0.0, 0.0), (1.0, 1.0)] {
            let v = field.sample(field_scale, time_scale, x, y, None);
            assert!((0.0..=1.0).contains(&v), "{v} at scales {field_scale}/{time_scale}");
        }
    }

    // Clock far past the point where time / time_scale leaves i32 range
    field.tick(3.0e12);
    let w = field.local_weather(8.0, 8.0);
    assert!((60.0..=100.0).contains(&w.temperature.value()));
    assert!((0.0..=1.0).contains(&field.global_risk()));
}
