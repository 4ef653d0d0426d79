//! Fuel-cell operating cost, savings against diesel, and payback.

use std::fmt;

use fcs_core::units::constants::{DAYS_PER_YEAR, HOURS_PER_DAY};
use fcs_schema::SizingInputs;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FC_MAINTENANCE_PER_HOUR, PAYBACK_EXCELLENT_YEARS, PAYBACK_GOOD_YEARS, TCO_HORIZON_YEARS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelCellCost {
    pub fuel_cost_daily: f64,
    /// Fuel cost including delivery surcharge.
    pub delivered_fuel_cost_daily: f64,
    pub maintenance_daily: f64,
    pub daily_cost: f64,
    pub annual_cost: f64,
}

impl FuelCellCost {
    pub fn compute(hourly_fuel_kg: f64, inputs: &SizingInputs) -> Self {
        let fuel_cost_daily = hourly_fuel_kg * HOURS_PER_DAY * inputs.h2_price;
        let delivered_fuel_cost_daily = fuel_cost_daily * (1.0 + inputs.logistics_cost_pct / 100.0);
        let maintenance_daily = FC_MAINTENANCE_PER_HOUR * HOURS_PER_DAY;
        let daily_cost = delivered_fuel_cost_daily + maintenance_daily;

        Self {
            fuel_cost_daily,
            delivered_fuel_cost_daily,
            maintenance_daily,
            daily_cost,
            annual_cost: daily_cost * DAYS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaybackStatus {
    Excellent,
    Good,
    Marginal,
    BreakEven,
    DieselFavorable,
}

impl PaybackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaybackStatus::Excellent => "excellent",
            PaybackStatus::Good => "good",
            PaybackStatus::Marginal => "marginal",
            PaybackStatus::BreakEven => "break-even",
            PaybackStatus::DieselFavorable => "diesel-favorable",
        }
    }

    fn classify(payback_years: Option<f64>, annual_savings: f64) -> Self {
        match payback_years {
            Some(y) if y <= PAYBACK_EXCELLENT_YEARS => PaybackStatus::Excellent,
            Some(y) if y <= PAYBACK_GOOD_YEARS => PaybackStatus::Good,
            Some(_) => PaybackStatus::Marginal,
            None if annual_savings == 0.0 => PaybackStatus::BreakEven,
            None => PaybackStatus::DieselFavorable,
        }
    }
}

impl fmt::Display for PaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financials {
    pub daily_savings: f64,
    pub annual_savings: f64,
    pub fc_capex: f64,
    pub dg_capex: f64,
    /// Years for operating savings to repay the extra CAPEX; `None` unless savings are positive.
    pub payback_years: Option<f64>,
    pub status: PaybackStatus,
    pub dg_tco: f64,
    pub fc_tco: f64,
}

impl Financials {
    pub fn compute(dg_daily_cost: f64, fc_daily_cost: f64, fc_capex: f64, dg_capex: f64) -> Self {
        let daily_savings = dg_daily_cost - fc_daily_cost;
        let annual_savings = daily_savings * DAYS_PER_YEAR;

        let payback_years = if annual_savings > 0.0 {
            Some((fc_capex - dg_capex) / annual_savings)
        } else {
            None
        };
        let status = PaybackStatus::classify(payback_years, annual_savings);

        Self {
            daily_savings,
            annual_savings,
            fc_capex,
            dg_capex,
            payback_years,
            status,
            dg_tco: dg_daily_cost * DAYS_PER_YEAR * TCO_HORIZON_YEARS + dg_capex,
            fc_tco: fc_daily_cost * DAYS_PER_YEAR * TCO_HORIZON_YEARS + fc_capex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcs_schema::CalculationDefaults;

    #[test]
    fn delivered_hydrogen_cost() {
        let inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
        let cost = FuelCellCost::compute(5.0 / 0.5 / 33.3, &inputs);
        assert!((cost.fuel_cost_daily - 108.108108).abs() < 1e-5);
        assert!((cost.delivered_fuel_cost_daily - 118.918919).abs() < 1e-5);
        assert!((cost.daily_cost - 120.118919).abs() < 1e-5);
    }

    #[test]
    fn payback_tiers() {
        let f = Financials::compute(100.0, 50.0, 35_000.0, 5_000.0);
        assert!((f.annual_savings - 18_250.0).abs() < 1e-9);
        assert!((f.payback_years.unwrap() - 30_000.0 / 18_250.0).abs() < 1e-12);
        assert_eq!(f.status, PaybackStatus::Excellent);

        let f = Financials::compute(60.0, 50.0, 35_000.0, 5_000.0);
        assert_eq!(f.status, PaybackStatus::Good);

        let f = Financials::compute(52.0, 50.0, 35_000.0, 5_000.0);
        assert_eq!(f.status, PaybackStatus::Marginal);
    }

    #[test]
    fn no_savings_no_payback() {
        let f = Financials::compute(50.0, 50.0, 35_000.0, 5_000.0);
        assert_eq!(f.payback_years, None);
        assert_eq!(f.status, PaybackStatus::BreakEven);

        let f = Financials::compute(40.0, 50.0, 35_000.0, 5_000.0);
        assert_eq!(f.payback_years, None);
        assert_eq!(f.status, PaybackStatus::DieselFavorable);
    }

    #[test]
    fn cheaper_fuel_cell_capex_pays_back_immediately() {
        let f = Financials::compute(100.0, 50.0, 4_000.0, 5_000.0);
        assert!(f.payback_years.unwrap() < 0.0);
        assert_eq!(f.status, PaybackStatus::Excellent);
    }

    #[test]
    fn ten_year_tco() {
        let f = Financials::compute(10.0, 5.0, 1_000.0, 500.0);
        assert!((f.dg_tco - 37_000.0).abs() < 1e-9);
        assert!((f.fc_tco - 19_250.0).abs() < 1e-9);
    }

    #[test]
    fn status_wire_names() {
        let v = serde_json::to_value(PaybackStatus::DieselFavorable).unwrap();
        assert_eq!(v, "diesel-favorable");
        assert_eq!(PaybackStatus::BreakEven.to_string(), "break-even");
    }
}
