//! The fixed-shape sizing report returned by the engine.

use fcs_core::round_to;
use serde::{Deserialize, Serialize};

use crate::economics::PaybackStatus;

/// Complete technical and financial result of one sizing run.
///
/// Units: power in kW, fuel in kg, diesel in L, money in the caller's
/// currency, emissions in kg CO2 per year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingReport {
    pub derating_factor: f64,
    pub gross_power_required: f64,
    pub parasitic_loss_kw: f64,
    pub net_output_kw: f64,
    pub fuel_consumption_hourly: f64,
    pub fuel_consumption_daily: f64,

    pub battery_bank_hours: f64,
    pub battery_capacity_kwh: f64,
    pub battery_capacity_ah: f64,
    pub battery_strings: u32,
    pub cable_current_a: f64,
    pub cable_size_mm2: f64,

    pub dg_load_factor: f64,
    pub dg_fuel_consumption_hourly: f64,
    pub dg_fuel_with_theft: f64,
    pub dg_daily_cost: f64,
    pub dg_annual_cost: f64,
    pub fc_daily_cost: f64,
    pub fc_annual_cost: f64,
    pub daily_savings: f64,
    pub annual_savings: f64,
    pub payback_years: Option<f64>,
    pub payback_status: PaybackStatus,
    pub co2_savings: f64,

    #[serde(rename = "totalH2Required")]
    pub total_h2_required: f64,
    pub cylinders_required: u32,
    pub bundles_required: u32,

    pub fc_rated_power: f64,
    pub fc_derated_power: f64,
    pub total_rated_power: f64,
    pub total_derated_power: f64,
    pub required_stack_count: u32,
    pub needs_multiple_stacks: bool,
    pub is_undersized: bool,
    pub capacity_shortfall: f64,
    pub capacity_margin: Option<f64>,
    pub fc_capex: f64,

    #[serde(rename = "dgTco10yr")]
    pub dg_tco_10yr: f64,
    #[serde(rename = "fcTco10yr")]
    pub fc_tco_10yr: f64,
}

impl SizingReport {
    /// Presentation view with display precision applied per field.
    pub fn rounded(&self) -> Self {
        let r = |v: f64, d: i32| round_to(v, d);
        Self {
            derating_factor: self.derating_factor,
            gross_power_required: r(self.gross_power_required, 2),
            parasitic_loss_kw: r(self.parasitic_loss_kw, 2),
            net_output_kw: r(self.net_output_kw, 2),
            fuel_consumption_hourly: r(self.fuel_consumption_hourly, 3),
            fuel_consumption_daily: r(self.fuel_consumption_daily, 2),
            battery_bank_hours: self.battery_bank_hours,
            battery_capacity_kwh: r(self.battery_capacity_kwh, 1),
            battery_capacity_ah: r(self.battery_capacity_ah, 1),
            battery_strings: self.battery_strings,
            cable_current_a: r(self.cable_current_a, 1),
            cable_size_mm2: r(self.cable_size_mm2, 1),
            dg_load_factor: r(self.dg_load_factor, 0),
            dg_fuel_consumption_hourly: r(self.dg_fuel_consumption_hourly, 2),
            dg_fuel_with_theft: r(self.dg_fuel_with_theft, 2),
            dg_daily_cost: r(self.dg_daily_cost, 2),
            dg_annual_cost: r(self.dg_annual_cost, 0),
            fc_daily_cost: r(self.fc_daily_cost, 2),
            fc_annual_cost: r(self.fc_annual_cost, 0),
            daily_savings: r(self.daily_savings, 2),
            annual_savings: r(self.annual_savings, 0),
            payback_years: self.payback_years.map(|y| r(y, 1)),
            payback_status: self.payback_status,
            co2_savings: r(self.co2_savings, 0),
            total_h2_required: r(self.total_h2_required, 1),
            cylinders_required: self.cylinders_required,
            bundles_required: self.bundles_required,
            fc_rated_power: self.fc_rated_power,
            fc_derated_power: r(self.fc_derated_power, 2),
            total_rated_power: r(self.total_rated_power, 2),
            total_derated_power: r(self.total_derated_power, 2),
            required_stack_count: self.required_stack_count,
            needs_multiple_stacks: self.needs_multiple_stacks,
            is_undersized: self.is_undersized,
            capacity_shortfall: r(self.capacity_shortfall, 2),
            capacity_margin: self.capacity_margin.map(|m| r(m, 0)),
            fc_capex: r(self.fc_capex, 0),
            dg_tco_10yr: r(self.dg_tco_10yr, 0),
            fc_tco_10yr: r(self.fc_tco_10yr, 0),
        }
    }

    /// Every numeric field, labelled, for finiteness checks and flat exports.
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("deratingFactor", self.derating_factor),
            ("grossPowerRequired", self.gross_power_required),
            ("parasiticLossKw", self.parasitic_loss_kw),
            ("netOutputKw", self.net_output_kw),
            ("fuelConsumptionHourly", self.fuel_consumption_hourly),
            ("fuelConsumptionDaily", self.fuel_consumption_daily),
            ("batteryBankHours", self.battery_bank_hours),
            ("batteryCapacityKwh", self.battery_capacity_kwh),
            ("batteryCapacityAh", self.battery_capacity_ah),
            ("cableCurrentA", self.cable_current_a),
            ("cableSizeMm2", self.cable_size_mm2),
            ("dgLoadFactor", self.dg_load_factor),
            ("dgFuelConsumptionHourly", self.dg_fuel_consumption_hourly),
            ("dgFuelWithTheft", self.dg_fuel_with_theft),
            ("dgDailyCost", self.dg_daily_cost),
            ("dgAnnualCost", self.dg_annual_cost),
            ("fcDailyCost", self.fc_daily_cost),
            ("fcAnnualCost", self.fc_annual_cost),
            ("dailySavings", self.daily_savings),
            ("annualSavings", self.annual_savings),
            ("co2Savings", self.co2_savings),
            ("totalH2Required", self.total_h2_required),
            ("fcRatedPower", self.fc_rated_power),
            ("fcDeratedPower", self.fc_derated_power),
            ("totalRatedPower", self.total_rated_power),
            ("totalDeratedPower", self.total_derated_power),
            ("capacityShortfall", self.capacity_shortfall),
            ("fcCapex", self.fc_capex),
            ("dgTco10yr", self.dg_tco_10yr),
            ("fcTco10yr", self.fc_tco_10yr),
        ];
        if let Some(y) = self.payback_years {
            fields.push(("paybackYears", y));
        }
        if let Some(m) = self.capacity_margin {
            fields.push(("capacityMargin", m));
        }
        fields
    }
}
