//! Remaining useful life sampling for per-sensor predictions
//!
//! The per-sensor estimate is a uniform draw from a status-dependent band,
//! not a physical model. The random source is always supplied by the caller
//! so tests can seed it and assert exact bounds:
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use predix_core::{rul::sample_remaining_life, SensorStatus};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let hours = sample_remaining_life(SensorStatus::Critical, &mut rng);
//! assert!((50..250).contains(&hours));
//! ```

use rand::Rng;

use crate::classifier::SensorStatus;
use crate::constants::sensors::{RUL_CRITICAL_HOURS, RUL_NORMAL_HOURS, RUL_WARNING_HOURS};

/// Sampling band `[low, high)` in hours for a status
pub const fn rul_band(status: SensorStatus) -> (u32, u32) {
    match status {
        SensorStatus::Critical => RUL_CRITICAL_HOURS,
        SensorStatus::Warning => RUL_WARNING_HOURS,
        SensorStatus::Normal => RUL_NORMAL_HOURS,
    }
}

/// Draw a remaining-life estimate in whole hours
///
/// The lower edge of the band doubles as a hard floor.
pub fn sample_remaining_life<R: Rng + ?Sized>(status: SensorStatus, rng: &mut R) -> u32 {
    let (floor, ceiling) = rul_band(status);
    rng.gen_range(floor..ceiling).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn samples_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let critical = sample_remaining_life(SensorStatus::Critical, &mut rng);
            assert!((50..250).contains(&critical));

            let warning = sample_remaining_life(SensorStatus::Warning, &mut rng);
            assert!((200..700).contains(&warning));

            let normal = sample_remaining_life(SensorStatus::Normal, &mut rng);
            assert!((500..1500).contains(&normal));
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);

        for _ in 0..20 {
            assert_eq!(
                sample_remaining_life(SensorStatus::Warning, &mut a),
                sample_remaining_life(SensorStatus::Warning, &mut b),
            );
        }
    }

    #[test]
    fn zero_source_hits_the_floor() {
        // A source that only yields zero bits draws the lowest value
        let mut rng = StepRng::new(0, 0);
        assert_eq!(sample_remaining_life(SensorStatus::Critical, &mut rng), 50);
        assert_eq!(sample_remaining_life(SensorStatus::Warning, &mut rng), 200);
        assert_eq!(sample_remaining_life(SensorStatus::Normal, &mut rng), 500);
    }
}
