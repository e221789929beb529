//! Health Score Penalties
//!
//! The system predictor starts at [`INITIAL_HEALTH_SCORE`] and subtracts one
//! capped penalty per deviating sensor. Deviation cutoffs are deliberately
//! not the classifier bands: the predictor only looks at the optimal band
//! edges.
//!
//! Penalty = min(cap, (distance past cutoff) × slope)

/// Score before any penalty is applied.
pub const INITIAL_HEALTH_SCORE: f32 = 100.0;

/// Scores below this are Warning or worse.
pub const WARNING_SCORE_THRESHOLD: f32 = 70.0;

/// Scores below this are Critical.
pub const CRITICAL_SCORE_THRESHOLD: f32 = 40.0;

/// Failure risk above this (percent, unrounded) flags an anomaly.
pub const ANOMALY_RISK_THRESHOLD: f32 = 20.0;

/// Lowest remaining useful life reported by the system predictor (hours).
pub const MIN_SYSTEM_RUL_HOURS: u32 = 50;

/// Hours of remaining life per health score point.
pub const RUL_HOURS_PER_SCORE_POINT: f32 = 10.0;

/// Lowest confidence reported by the system predictor.
pub const MIN_SYSTEM_CONFIDENCE: f32 = 0.1;

// ===== TEMPERATURE =====

/// Above this the high-temperature penalty applies (°C).
pub const TEMP_HIGH_CUTOFF: f32 = 70.0;
/// Points per °C above the cutoff.
pub const TEMP_HIGH_SLOPE: f32 = 2.0;
/// Maximum high-temperature penalty.
pub const TEMP_HIGH_CAP: f32 = 30.0;
/// Below this the low-temperature penalty applies (°C).
pub const TEMP_LOW_CUTOFF: f32 = 40.0;
/// Points per °C below the cutoff.
pub const TEMP_LOW_SLOPE: f32 = 1.0;
/// Maximum low-temperature penalty.
pub const TEMP_LOW_CAP: f32 = 20.0;

// ===== VIBRATION =====

/// Above this the vibration penalty applies (mm/s).
pub const VIBRATION_HIGH_CUTOFF: f32 = 5.0;
/// Points per mm/s above the cutoff.
pub const VIBRATION_HIGH_SLOPE: f32 = 5.0;
/// Maximum vibration penalty.
pub const VIBRATION_HIGH_CAP: f32 = 25.0;

// ===== PRESSURE =====

/// Above this the high-pressure penalty applies (PSI).
pub const PRESSURE_HIGH_CUTOFF: f32 = 150.0;
/// Points per PSI above the cutoff.
pub const PRESSURE_HIGH_SLOPE: f32 = 0.2;
/// Maximum high-pressure penalty.
pub const PRESSURE_HIGH_CAP: f32 = 20.0;
/// Below this the low-pressure penalty applies (PSI).
///
/// The low-pressure penalty is computed from `value - cutoff`, which is
/// negative, so it raises the score instead of lowering it.
pub const PRESSURE_LOW_CUTOFF: f32 = 100.0;
/// Slope applied to `value - cutoff`.
pub const PRESSURE_LOW_SLOPE: f32 = 0.3;
/// Maximum low-pressure penalty.
pub const PRESSURE_LOW_CAP: f32 = 15.0;

// ===== RPM =====

/// Above this the overspeed penalty applies.
pub const RPM_HIGH_CUTOFF: f32 = 2200.0;
/// Points per rpm above the cutoff.
pub const RPM_HIGH_SLOPE: f32 = 0.01;
/// Maximum overspeed penalty.
pub const RPM_HIGH_CAP: f32 = 20.0;
/// Below this the underspeed penalty applies.
pub const RPM_LOW_CUTOFF: f32 = 1800.0;
/// Points per rpm below the cutoff.
pub const RPM_LOW_SLOPE: f32 = 0.02;
/// Maximum underspeed penalty.
pub const RPM_LOW_CAP: f32 = 15.0;

// ===== ROOT CAUSE DETAILS =====
//
// Thresholds for the per-sensor breakdown. Comparisons are strict.

/// Above this temperature is a critical cause (°C).
pub const DETAIL_TEMP_CRITICAL: f32 = 75.0;
/// Above this temperature is a warning cause (°C).
pub const DETAIL_TEMP_HIGH: f32 = 70.0;
/// Below this temperature is a warning cause (°C).
pub const DETAIL_TEMP_LOW: f32 = 35.0;
/// Above this pressure is a critical cause (PSI).
pub const DETAIL_PRESSURE_CRITICAL: f32 = 170.0;
/// Above this pressure is a warning cause (PSI).
pub const DETAIL_PRESSURE_HIGH: f32 = 150.0;
/// Below this pressure is a warning cause (PSI).
pub const DETAIL_PRESSURE_LOW: f32 = 90.0;
/// Above this vibration is a critical cause (mm/s).
pub const DETAIL_VIBRATION_CRITICAL: f32 = 7.0;
/// Above this vibration is a warning cause (mm/s).
pub const DETAIL_VIBRATION_HIGH: f32 = 5.0;
/// Above this speed is a critical cause.
pub const DETAIL_RPM_CRITICAL: u32 = 2400;
/// Above this speed is a warning cause.
pub const DETAIL_RPM_HIGH: u32 = 2200;
/// Below this speed is a warning cause.
pub const DETAIL_RPM_LOW: u32 = 1700;
