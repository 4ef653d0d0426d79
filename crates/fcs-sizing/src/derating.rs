//! Site derating of fuel-cell output for heat and altitude.

use crate::constants::{
    ALTITUDE_DERATE_PER_100M, ALTITUDE_THRESHOLD_M, MIN_DERATING_FACTOR,
    REFERENCE_TEMPERATURE_C, TEMPERATURE_DERATE_PER_C,
};

/// Linear derating curve with a floor.
///
/// Capacity drops by `per_degree` for every °C above `reference_temperature_c`
/// and by `per_100m` for every 100 m above `altitude_threshold_m`. Both
/// penalties add, and the result never falls below `floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeratingCurve {
    pub reference_temperature_c: f64,
    pub per_degree: f64,
    pub altitude_threshold_m: f64,
    pub per_100m: f64,
    pub floor: f64,
}

impl Default for DeratingCurve {
    fn default() -> Self {
        Self {
            reference_temperature_c: REFERENCE_TEMPERATURE_C,
            per_degree: TEMPERATURE_DERATE_PER_C,
            altitude_threshold_m: ALTITUDE_THRESHOLD_M,
            per_100m: ALTITUDE_DERATE_PER_100M,
            floor: MIN_DERATING_FACTOR,
        }
    }
}

impl DeratingCurve {
    /// Fraction of nameplate output available at the site, in `[floor, 1]`.
    pub fn factor(&self, max_temperature_c: f64, altitude_m: f64) -> f64 {
        let mut factor = 1.0;

        if max_temperature_c > self.reference_temperature_c {
            factor -= (max_temperature_c - self.reference_temperature_c) * self.per_degree;
        }
        if altitude_m > self.altitude_threshold_m {
            factor -= (altitude_m - self.altitude_threshold_m) / 100.0 * self.per_100m;
        }

        factor.max(self.floor)
    }
}
