//! DC cable cross-section.

use fcs_core::units::{Current, as_amps, kw, volts};

use crate::constants::CABLE_CURRENT_DENSITY_A_PER_MM2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableSizing {
    pub current_a: f64,
    pub cross_section_mm2: f64,
}

impl CableSizing {
    pub fn compute(load_kw: f64, system_voltage: f64) -> Self {
        let current: Current = kw(load_kw) / volts(system_voltage);
        let current_a = as_amps(current);
        Self {
            current_a,
            cross_section_mm2: current_a / CABLE_CURRENT_DENSITY_A_PER_MM2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_kw_at_48v() {
        let c = CableSizing::compute(5.0, 48.0);
        assert!((c.current_a - 104.1667).abs() < 1e-3);
        assert!((c.cross_section_mm2 - 26.0417).abs() < 1e-3);
    }
}
