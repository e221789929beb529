//! Shared fixtures for predix-core integration tests
//!
//! - Named snapshot scenarios with their expected system status
//! - proptest strategies for in-range and arbitrary snapshots

#![allow(dead_code)]

use predix_core::{HealthStatus, SensorSnapshot};
use proptest::prelude::*;

/// A named snapshot and the status it must produce
pub struct Scenario {
    pub name: &'static str,
    pub snapshot: SensorSnapshot,
    pub expected: HealthStatus,
}

/// Hand-picked snapshots covering each status and every root cause
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "nominal",
            snapshot: SensorSnapshot::nominal(),
            expected: HealthStatus::Healthy,
        },
        Scenario {
            name: "anomaly_preset",
            snapshot: SensorSnapshot::anomalous(),
            expected: HealthStatus::Critical,
        },
        Scenario {
            name: "warm_bearing",
            snapshot: SensorSnapshot::new(72.0, 2.0, 125.0, 2000),
            expected: HealthStatus::Healthy,
        },
        Scenario {
            name: "overheating_with_vibration",
            snapshot: SensorSnapshot::new(90.0, 7.0, 125.0, 2000),
            expected: HealthStatus::Warning,
        },
        Scenario {
            name: "loose_mounting",
            snapshot: SensorSnapshot::new(55.0, 12.0, 125.0, 2000),
            expected: HealthStatus::Healthy,
        },
        Scenario {
            name: "hot_and_shaking",
            snapshot: SensorSnapshot::new(95.0, 11.0, 200.0, 2000),
            expected: HealthStatus::Critical,
        },
        Scenario {
            name: "stalling",
            snapshot: SensorSnapshot::new(30.0, 9.0, 125.0, 500),
            expected: HealthStatus::Warning,
        },
    ]
}

/// Snapshots inside the accepted input limits
pub fn valid_snapshot() -> impl Strategy<Value = SensorSnapshot> {
    (0.0f32..=200.0, 0.0f32..=20.0, 0.0f32..=500.0, 0u32..=5000)
        .prop_map(|(t, v, p, r)| SensorSnapshot::new(t, v, p, r))
}

/// Snapshots anywhere in a wide finite range, including out-of-limit values
pub fn wide_snapshot() -> impl Strategy<Value = SensorSnapshot> {
    (-500.0f32..1000.0, -50.0f32..100.0, -500.0f32..2000.0, any::<u32>())
        .prop_map(|(t, v, p, r)| SensorSnapshot::new(t, v, p, r))
}
