//! Battery bank sizing.

use fcs_core::ceil_count;
use fcs_core::units::{Charge, Energy, as_amp_hours, as_kwh, hours, kw, volts};

use crate::constants::BATTERY_BLOCK_AH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryBank {
    pub capacity_kwh: f64,
    pub capacity_ah: f64,
    /// Parallel strings of 150 Ah blocks.
    pub strings: u32,
}

impl BatteryBank {
    /// Size a bank to carry `load_kw` for `bank_hours` within the usable depth of discharge.
    pub fn size(load_kw: f64, bank_hours: f64, depth_of_discharge: f64, system_voltage: f64) -> Self {
        let usable: Energy = kw(load_kw) * hours(bank_hours);
        let installed: Energy = usable / depth_of_discharge;
        let charge: Charge = installed / volts(system_voltage);

        let capacity_ah = as_amp_hours(charge);
        Self {
            capacity_kwh: as_kwh(installed),
            capacity_ah,
            strings: ceil_count(capacity_ah / BATTERY_BLOCK_AH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_hour_bank() {
        let bank = BatteryBank::size(5.0, 8.0, 0.8, 48.0);
        assert!((bank.capacity_kwh - 50.0).abs() < 1e-9);
        assert!((bank.capacity_ah - 1041.6667).abs() < 1e-3);
        assert_eq!(bank.strings, 7);
    }

    #[test]
    fn empty_bank() {
        let bank = BatteryBank::size(5.0, 0.0, 0.8, 48.0);
        assert_eq!(bank.capacity_kwh, 0.0);
        assert_eq!(bank.strings, 0);
    }
}
