//! Basic Health Scoring Example
//!
//! Scores the nominal and anomaly presets, prints the per-sensor breakdown
//! and shows which alerts a refresh would raise.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_scoring
//! ```

use predix_core::{
    classify_snapshot, predict_system_health, time::FixedTime, Monitor, SensorSnapshot, SnapshotValidator,
    TimeSource,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    println!("Predix Health Scoring Example");
    println!("=============================\n");

    let mut rng = StdRng::seed_from_u64(42);

    for (label, snapshot) in [
        ("Nominal", SensorSnapshot::nominal()),
        ("Anomaly", SensorSnapshot::anomalous()),
        ("Warm bearing", SensorSnapshot::new(72.0, 2.0, 125.0, 2000)),
    ] {
        let prediction = predict_system_health(&snapshot);
        println!("{} {:?}", label, snapshot);
        println!(
            "  status: {}  risk: {}%  RUL: {} h  anomaly: {}",
            prediction.health_status,
            prediction.failure_risk,
            prediction.remaining_useful_life,
            prediction.anomaly_detected
        );
        println!("  root cause: {}", prediction.root_cause);
        println!("  recommendation: {}", prediction.recommendation);

        for sensor in classify_snapshot(&snapshot, &mut rng).iter() {
            println!(
                "    {:<12} {:>8.1} {:<4} {:?} ({:?} risk, ~{} h)",
                sensor.sensor.name(),
                sensor.value,
                sensor.sensor.unit(),
                sensor.status,
                sensor.risk_level,
                sensor.estimated_remaining_life
            );
        }
        println!();
    }

    // Out-of-limit input is rejected before it reaches the session
    let validator = SnapshotValidator::default();
    match validator.validate(&SensorSnapshot::new(250.0, 2.5, 125.0, 2000)) {
        Ok(()) => println!("accepted"),
        Err(e) => println!("Rejected input: {}\n", e),
    }

    // Two refreshes 30 s apart: the second raises no duplicate alerts
    let mut monitor = Monitor::new();
    let mut clock = FixedTime::new(1_700_000_000_000);
    monitor.simulate_anomaly();

    for _ in 0..2 {
        let evaluation = monitor.evaluate_local(clock.now(), &mut rng);
        println!("Refresh via {:?}: {} new alerts", evaluation.source, evaluation.alerts_raised);
        clock.advance_secs(30);
    }

    monitor.record_system_check(clock.now());
    println!("\nAlert log ({} badge):", monitor.alerts().badge_count());
    for alert in monitor.alerts().iter() {
        println!("  {}", alert);
    }
}
