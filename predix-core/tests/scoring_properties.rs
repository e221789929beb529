//! Property tests for the scoring engine
//!
//! Covers the invariants every prediction has to satisfy regardless of
//! input: bounded outputs, status monotone in the score, determinism, and the
//! classifier's band precedence.

mod common;

use common::{scenarios, valid_snapshot, wide_snapshot};
use predix_core::{
    classify_sensor, health_score, predict_system_health, HealthStatus, SensorKind, SensorSnapshot,
    SensorStatus, SnapshotValidator,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn scenarios_match_expected_status() {
    for scenario in scenarios() {
        let prediction = predict_system_health(&scenario.snapshot);
        assert_eq!(
            prediction.health_status, scenario.expected,
            "scenario {} produced {:?}",
            scenario.name, prediction.health_status
        );
    }
}

#[test]
fn overheating_names_temperature() {
    let prediction = predict_system_health(&SensorSnapshot::new(90.0, 2.0, 125.0, 2000));
    assert_eq!(prediction.root_cause, "High temperature detected");
    assert_eq!(prediction.failure_risk, 30);
    assert!(prediction.anomaly_detected);
}

proptest! {
    #[test]
    fn outputs_stay_in_bounds(snapshot in wide_snapshot()) {
        let prediction = predict_system_health(&snapshot);

        prop_assert!(prediction.failure_risk <= 100);
        prop_assert!(prediction.remaining_useful_life >= 50);
        prop_assert!((0.0..=1.0).contains(&prediction.anomaly_probability));
        prop_assert!((0.1..=1.0).contains(&prediction.confidence));
        prop_assert!(!prediction.root_cause.is_empty());
    }

    #[test]
    fn status_follows_score(snapshot in wide_snapshot()) {
        let score = health_score(&snapshot).value;
        let status = predict_system_health(&snapshot).health_status;

        if score < 40.0 {
            prop_assert_eq!(status, HealthStatus::Critical);
        } else if score < 70.0 {
            prop_assert_eq!(status, HealthStatus::Warning);
        } else {
            prop_assert_eq!(status, HealthStatus::Healthy);
        }
    }

    #[test]
    fn anomaly_flag_tracks_risk(snapshot in wide_snapshot()) {
        let prediction = predict_system_health(&snapshot);
        let risk = (100.0 - health_score(&snapshot).value).clamp(0.0, 100.0);
        prop_assert_eq!(prediction.anomaly_detected, risk > 20.0);
    }

    #[test]
    fn prediction_is_deterministic(snapshot in wide_snapshot()) {
        prop_assert_eq!(predict_system_health(&snapshot), predict_system_health(&snapshot));
    }

    #[test]
    fn in_limit_snapshots_validate(snapshot in valid_snapshot()) {
        prop_assert!(SnapshotValidator::default().validate(&snapshot).is_ok());
    }

    #[test]
    fn at_or_above_critical_floor_is_critical(offset in 0.0f32..1000.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in SensorKind::ALL {
            let ranges = kind.ranges();
            let prediction = classify_sensor(kind, ranges.critical.low + offset, &ranges, &mut rng);
            prop_assert_eq!(prediction.status, SensorStatus::Critical);
            prop_assert!((50..250).contains(&prediction.estimated_remaining_life));
        }
    }

    #[test]
    fn optimal_band_is_normal(fraction in 0.0f32..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in SensorKind::ALL {
            let ranges = kind.ranges();
            let value = ranges.optimal.low + (ranges.optimal.high - ranges.optimal.low) * fraction;
            let prediction = classify_sensor(kind, value, &ranges, &mut rng);
            prop_assert_eq!(prediction.status, SensorStatus::Normal);
            prop_assert_eq!(prediction.confidence, 0.95);
        }
    }
}
