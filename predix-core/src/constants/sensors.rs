//! Sensor Classification Bands and Input Limits
//!
//! Bands are inclusive on both ends. They overlap on purpose: a reading at a
//! shared edge (e.g. 75 °C) is resolved by the classifier's precedence order,
//! critical first.

// ===== TEMPERATURE (°C) =====

/// Optimal operating band.
pub const TEMP_OPTIMAL: (f32, f32) = (40.0, 70.0);
/// Warning band; only counts outside the optimal band.
pub const TEMP_WARNING: (f32, f32) = (35.0, 75.0);
/// Critical band; anything at or above the lower edge is critical.
pub const TEMP_CRITICAL: (f32, f32) = (75.0, 100.0);
/// Absolute limits accepted from operator input.
pub const TEMP_LIMITS: (f32, f32) = (0.0, 200.0);

// ===== VIBRATION (mm/s) =====

/// Optimal operating band.
pub const VIBRATION_OPTIMAL: (f32, f32) = (0.0, 3.0);
/// Warning band; only counts outside the optimal band.
pub const VIBRATION_WARNING: (f32, f32) = (3.0, 5.0);
/// Critical band.
pub const VIBRATION_CRITICAL: (f32, f32) = (5.0, 10.0);
/// Absolute limits accepted from operator input.
pub const VIBRATION_LIMITS: (f32, f32) = (0.0, 20.0);

// ===== PRESSURE (PSI) =====

/// Optimal operating band.
pub const PRESSURE_OPTIMAL: (f32, f32) = (100.0, 150.0);
/// Warning band; only counts outside the optimal band.
pub const PRESSURE_WARNING: (f32, f32) = (90.0, 160.0);
/// Critical band.
pub const PRESSURE_CRITICAL: (f32, f32) = (160.0, 200.0);
/// Absolute limits accepted from operator input.
pub const PRESSURE_LIMITS: (f32, f32) = (0.0, 500.0);

// ===== RPM =====

/// Optimal operating band.
pub const RPM_OPTIMAL: (f32, f32) = (1800.0, 2200.0);
/// Warning band; only counts outside the optimal band.
pub const RPM_WARNING: (f32, f32) = (1700.0, 2300.0);
/// Critical band.
pub const RPM_CRITICAL: (f32, f32) = (2300.0, 2500.0);
/// Absolute limits accepted from operator input.
pub const RPM_LIMITS: (f32, f32) = (0.0, 5000.0);

// ===== PRESET SNAPSHOTS =====

/// Nominal readings restored by a sensor reset: (°C, mm/s, PSI, rpm).
pub const NOMINAL_SNAPSHOT: (f32, f32, f32, u32) = (50.0, 2.5, 125.0, 2000);

/// Readings loaded by the anomaly simulation: (°C, mm/s, PSI, rpm).
pub const ANOMALY_SNAPSHOT: (f32, f32, f32, u32) = (85.0, 8.5, 180.0, 3200);

// ===== PER-SENSOR CONFIDENCE =====

/// Classifier confidence for a critical reading.
pub const CONFIDENCE_CRITICAL: f32 = 0.85;
/// Classifier confidence for a warning reading.
pub const CONFIDENCE_WARNING: f32 = 0.75;
/// Classifier confidence for a normal reading.
pub const CONFIDENCE_NORMAL: f32 = 0.95;

// ===== REMAINING USEFUL LIFE (hours) =====

/// Sampling range for critical readings, upper bound exclusive.
pub const RUL_CRITICAL_HOURS: (u32, u32) = (50, 250);
/// Sampling range for warning readings, upper bound exclusive.
pub const RUL_WARNING_HOURS: (u32, u32) = (200, 700);
/// Sampling range for normal readings, upper bound exclusive.
pub const RUL_NORMAL_HOURS: (u32, u32) = (500, 1500);
