use feedback_core::*;
use glam::Vec3;

fn estimator() -> IntensityEstimator {
    IntensityEstimator::new(IntensityParams {
        min_speed: 0.03,
        max_speed: 0.8,
        smoothing_tau_sec: 0.1,
    })
}

#[test]
fn intensity_stays_in_unit_interval_for_any_input() {
    let mut est = estimator();
    let speeds = [
        0.0,
        0.01,
        0.5,
        3.0,
        1e6,
        -2.0,
        f32::NAN,
        f32::INFINITY,
        0.2,
    ];
    let dts = [1.0 / 90.0, 0.5, 1e-7, 10.0];
    for _ in 0..50 {
        for &s in &speeds {
            for &dt in &dts {
                let sample = est.update(s, dt);
                assert!(
                    (0.0..=1.0).contains(&sample.intensity),
                    "intensity {} out of range for speed {s} dt {dt}",
                    sample.intensity
                );
                assert!(sample.smoothed_speed.is_finite());
            }
        }
    }
}

#[test]
fn intensity_settles_to_zero_below_min_speed() {
    let mut est = estimator();
    for _ in 0..90 {
        est.update(0.6, 1.0 / 90.0);
    }
    assert!(est.intensity() > 0.5);

    let mut last = est.update(0.01, 1.0 / 90.0);
    for _ in 0..180 {
        last = est.update(0.01, 1.0 / 90.0);
    }
    assert_eq!(last.intensity, 0.0);
    assert!(!last.active, "continuous synthesis should be told to stop");
}

#[test]
fn ramp_to_one_meter_per_second_clamps_at_full_intensity() {
    let mut est = estimator();
    let dt = 1.0 / 90.0;
    let ramp_ticks = 180;
    let mut prev = 0.0;
    for i in 0..ramp_ticks {
        let raw = i as f32 / ramp_ticks as f32;
        let s = est.update(raw, dt);
        assert!(s.smoothed_speed + 1e-6 >= prev, "smoothed speed fell during a rising ramp");
        prev = s.smoothed_speed;
    }
    let mut last = est.update(1.0, dt);
    for _ in 0..90 {
        last = est.update(1.0, dt);
    }
    assert_eq!(last.intensity, 1.0);
    assert!(last.smoothed_speed > 0.8);
}

#[test]
fn large_dt_jumps_straight_to_the_raw_speed() {
    let mut est = estimator();
    let s = est.update(0.4, 100.0);
    assert!((s.smoothed_speed - 0.4).abs() < 1e-4);
    let expected = (0.4 - 0.03) / (0.8 - 0.03);
    assert!((s.intensity - expected).abs() < 1e-3);
}

#[test]
fn reset_clears_state() {
    let mut est = estimator();
    est.update(0.7, 1.0);
    est.reset();
    assert_eq!(est.smoothed_speed(), 0.0);
    assert_eq!(est.intensity(), 0.0);
}

#[test]
fn inverted_speed_band_is_corrected() {
    let est = IntensityEstimator::new(IntensityParams {
        min_speed: 0.5,
        max_speed: 0.2,
        smoothing_tau_sec: -1.0,
    });
    let p = est.params();
    assert!(p.max_speed >= p.min_speed + 1e-4);
    assert!(p.smoothing_tau_sec > 0.0);
}

#[test]
fn speed_between_guards_zero_dt() {
    let s = speed_between(Vec3::ZERO, Vec3::new(0.001, 0.0, 0.0), 0.0);
    assert!(s.is_finite());
    assert!((s - 10.0).abs() < 1e-3);
    let v = speed_between(Vec3::ZERO, Vec3::new(0.0, 0.3, 0.4), 0.5);
    assert!((v - 1.0).abs() < 1e-5);
}
