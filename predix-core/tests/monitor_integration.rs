//! Integration tests for a monitoring session across many refresh cycles

mod common;

use predix_core::{
    constants::{ALERT_DEDUP_WINDOW_MS, MAX_ALERTS},
    time::FixedTime,
    HealthStatus, Monitor, PredictionSource, Predictor, SensorSnapshot, Severity, SystemPrediction, TimeSource,
};
use rand::{rngs::StdRng, SeedableRng};

/// Remote service that fails every other call
struct Flaky {
    calls: u32,
}

impl Predictor for Flaky {
    type Error = String;

    fn predict(&mut self, snapshot: &SensorSnapshot) -> Result<SystemPrediction, Self::Error> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            Err(format!("timeout on call {}", self.calls))
        } else {
            let mut prediction = predix_core::predict_system_health(snapshot);
            prediction.confidence = 0.99;
            Ok(prediction)
        }
    }
}

#[test]
fn alternating_remote_failures_fall_back() {
    let mut monitor = Monitor::new();
    let mut remote = Flaky { calls: 0 };
    let mut rng = StdRng::seed_from_u64(17);
    let mut clock = FixedTime::new(1_700_000_000_000);

    let mut sources = Vec::new();
    for _ in 0..4 {
        sources.push(monitor.evaluate(Some(&mut remote), clock.now(), &mut rng).source);
        clock.advance_secs(30);
    }

    assert_eq!(
        sources,
        [
            PredictionSource::Remote,
            PredictionSource::Local,
            PredictionSource::Remote,
            PredictionSource::Local
        ]
    );
    assert_eq!(monitor.stats().readings_analysed, 4);
}

#[test]
fn sustained_anomaly_realerts_after_window() {
    let mut monitor = Monitor::new();
    let mut rng = StdRng::seed_from_u64(23);
    let mut clock = FixedTime::new(1_700_000_000_000);
    monitor.simulate_anomaly();

    // Ten refreshes 30 s apart fit inside one dedup window
    let mut raised = 0;
    for _ in 0..10 {
        raised += monitor.evaluate_local(clock.now(), &mut rng).alerts_raised;
        clock.advance_secs(30);
    }
    assert_eq!(raised, 5);

    clock.set(1_700_000_000_000 + ALERT_DEDUP_WINDOW_MS + 1);
    assert_eq!(monitor.evaluate_local(clock.now(), &mut rng).alerts_raised, 5);
    assert_eq!(monitor.alerts().len(), MAX_ALERTS);
}

#[test]
fn refresh_cycle_with_system_checks() {
    let mut monitor = Monitor::new();
    let mut rng = StdRng::seed_from_u64(29);
    let mut clock = FixedTime::new(1_000);

    for scenario in common::scenarios() {
        monitor.set_snapshot(scenario.snapshot).unwrap();
        monitor.evaluate_local(clock.now(), &mut rng);
        monitor.record_system_check(clock.now());

        assert_eq!(monitor.latest().map(|p| p.health_status), Some(scenario.expected));
        let check = monitor.alerts().latest().unwrap();
        assert_eq!(check.title, format!("System Health: {}", scenario.expected));
        let expected_severity = match scenario.expected {
            HealthStatus::Critical => Severity::Critical,
            HealthStatus::Warning => Severity::Warning,
            HealthStatus::Healthy => Severity::Info,
        };
        assert_eq!(check.severity, expected_severity);

        clock.advance_secs(30);
    }

    assert!(monitor.alerts().len() <= MAX_ALERTS);
    assert!(monitor.stats().anomalies_detected >= 4);
}
