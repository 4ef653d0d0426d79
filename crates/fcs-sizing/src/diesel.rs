//! Diesel generator baseline the fuel cell is compared against.

use fcs_core::units::constants::{DAYS_PER_YEAR, HOURS_PER_DAY};
use fcs_schema::SizingInputs;

use crate::constants::{
    DG_IDLE_FUEL_L_PER_KW, DG_LOAD_FUEL_L_PER_KW, DG_MAINTENANCE_PER_HOUR, DG_POWER_FACTOR,
    DIESEL_CO2_KG_PER_L,
};

/// Running cost and emissions of the incumbent generator.
///
/// Costs assume continuous duty. Theft inflates the fuel bought and burned
/// on paper, so both cost and emissions use the theft-adjusted figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieselBaseline {
    pub capacity_kw: f64,
    pub load_factor_pct: f64,
    pub fuel_l_per_h: f64,
    pub fuel_with_theft_l_per_h: f64,
    pub fuel_cost_daily: f64,
    pub maintenance_daily: f64,
    pub daily_cost: f64,
    pub annual_cost: f64,
    pub co2_kg_per_year: f64,
}

impl DieselBaseline {
    pub fn compute(inputs: &SizingInputs) -> Self {
        let capacity_kw = inputs.dg_capacity_kva * DG_POWER_FACTOR;
        let load_factor_pct = inputs.load_kw / capacity_kw * 100.0;

        let fuel_l_per_h =
            DG_IDLE_FUEL_L_PER_KW * capacity_kw + DG_LOAD_FUEL_L_PER_KW * inputs.load_kw;
        let fuel_with_theft_l_per_h = fuel_l_per_h * (1.0 + inputs.pilferage_factor / 100.0);

        let fuel_cost_daily = fuel_with_theft_l_per_h * HOURS_PER_DAY * inputs.diesel_price;
        let maintenance_daily = DG_MAINTENANCE_PER_HOUR * HOURS_PER_DAY;
        let daily_cost = fuel_cost_daily + maintenance_daily;

        Self {
            capacity_kw,
            load_factor_pct,
            fuel_l_per_h,
            fuel_with_theft_l_per_h,
            fuel_cost_daily,
            maintenance_daily,
            daily_cost,
            annual_cost: daily_cost * DAYS_PER_YEAR,
            co2_kg_per_year: fuel_with_theft_l_per_h
                * HOURS_PER_DAY
                * DAYS_PER_YEAR
                * DIESEL_CO2_KG_PER_L,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcs_schema::CalculationDefaults;

    #[test]
    fn default_generator_at_five_kw() {
        let inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
        let dg = DieselBaseline::compute(&inputs);

        assert!((dg.capacity_kw - 16.0).abs() < 1e-12);
        assert!((dg.load_factor_pct - 31.25).abs() < 1e-9);
        assert!((dg.fuel_l_per_h - 2.32).abs() < 1e-9);
        assert!((dg.fuel_with_theft_l_per_h - 2.552).abs() < 1e-9);
        assert!((dg.daily_cost - 73.248).abs() < 1e-9);
        assert!((dg.annual_cost - 26735.52).abs() < 1e-6);
        assert!((dg.co2_kg_per_year - 59912.7936).abs() < 1e-4);
    }

    #[test]
    fn no_pilferage() {
        let mut inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
        inputs.pilferage_factor = 0.0;
        let dg = DieselBaseline::compute(&inputs);
        assert_eq!(dg.fuel_l_per_h, dg.fuel_with_theft_l_per_h);
    }
}
