//! Single-pass sizing calculation.

use fcs_core::ensure_finite;
use fcs_schema::{FuelCellSpec, SizingInputs, validate_fuel_cell, validate_inputs};
use tracing::debug;

use crate::battery::BatteryBank;
use crate::cable::CableSizing;
use crate::derating::DeratingCurve;
use crate::diesel::DieselBaseline;
use crate::economics::{Financials, FuelCellCost};
use crate::error::SizingResult;
use crate::fuel::{FuelDemand, RefuelingPlan};
use crate::power::StackSizing;
use crate::report::SizingReport;

/// Site-only results that need no fuel-cell model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageSizing {
    pub derating_factor: f64,
    pub battery: BatteryBank,
    pub cable: CableSizing,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SizingEngine {
    derating: DeratingCurve,
}

impl SizingEngine {
    pub fn new(derating: DeratingCurve) -> Self {
        Self { derating }
    }

    pub fn derating(&self) -> &DeratingCurve {
        &self.derating
    }

    /// Derating, battery bank and cable for a site.
    pub fn size_storage(&self, inputs: &SizingInputs) -> SizingResult<StorageSizing> {
        validate_inputs(inputs)?;

        let derating_factor = self.derating.factor(inputs.max_temperature, inputs.altitude);
        let battery = BatteryBank::size(
            inputs.load_kw,
            inputs.battery_bank_hours(),
            inputs.battery_dod,
            inputs.system_voltage,
        );
        let cable = CableSizing::compute(inputs.load_kw, inputs.system_voltage);

        Ok(StorageSizing {
            derating_factor,
            battery,
            cable,
        })
    }

    /// Full technical and financial report for one fuel-cell model at one site.
    pub fn calculate(&self, inputs: &SizingInputs, fuel_cell: &FuelCellSpec) -> SizingResult<SizingReport> {
        validate_fuel_cell(fuel_cell)?;
        let storage = self.size_storage(inputs)?;
        let derating = storage.derating_factor;

        let stacks = StackSizing::compute(inputs.load_kw, derating, fuel_cell)?;
        debug!(
            derating,
            gross_kw = stacks.gross_power_kw,
            stacks = stacks.stack_count,
            "power budget"
        );

        let fuel = FuelDemand::compute(stacks.gross_power_kw, fuel_cell)?;
        let refuel = RefuelingPlan::compute(fuel.hourly_kg, inputs.refueling_cycle_days);
        debug!(hourly_kg = fuel.hourly_kg, cylinders = refuel.cylinders, "fuel demand");

        let diesel = DieselBaseline::compute(inputs);
        let fc_cost = FuelCellCost::compute(fuel.hourly_kg, inputs);
        let fc_capex = fuel_cell.capex_per_kw * stacks.total_rated_kw;
        let financials = Financials::compute(diesel.daily_cost, fc_cost.daily_cost, fc_capex, inputs.dg_capex);
        debug!(
            dg_daily = diesel.daily_cost,
            fc_daily = fc_cost.daily_cost,
            status = %financials.status,
            "economics"
        );

        let report = SizingReport {
            derating_factor: derating,
            gross_power_required: stacks.gross_power_kw,
            parasitic_loss_kw: stacks.parasitic_loss_kw,
            net_output_kw: stacks.net_output_kw,
            fuel_consumption_hourly: fuel.hourly_kg,
            fuel_consumption_daily: fuel.daily_kg,
            battery_bank_hours: inputs.battery_bank_hours(),
            battery_capacity_kwh: storage.battery.capacity_kwh,
            battery_capacity_ah: storage.battery.capacity_ah,
            battery_strings: storage.battery.strings,
            cable_current_a: storage.cable.current_a,
            cable_size_mm2: storage.cable.cross_section_mm2,
            dg_load_factor: diesel.load_factor_pct,
            dg_fuel_consumption_hourly: diesel.fuel_l_per_h,
            dg_fuel_with_theft: diesel.fuel_with_theft_l_per_h,
            dg_daily_cost: diesel.daily_cost,
            dg_annual_cost: diesel.annual_cost,
            fc_daily_cost: fc_cost.daily_cost,
            fc_annual_cost: fc_cost.annual_cost,
            daily_savings: financials.daily_savings,
            annual_savings: financials.annual_savings,
            payback_years: financials.payback_years,
            payback_status: financials.status,
            co2_savings: diesel.co2_kg_per_year,
            total_h2_required: refuel.total_kg,
            cylinders_required: refuel.cylinders,
            bundles_required: refuel.bundles,
            fc_rated_power: fuel_cell.rated_power_kw,
            fc_derated_power: stacks.unit_derated_kw,
            total_rated_power: stacks.total_rated_kw,
            total_derated_power: stacks.total_derated_kw,
            required_stack_count: stacks.stack_count,
            needs_multiple_stacks: stacks.needs_multiple_stacks(),
            is_undersized: stacks.is_undersized(),
            capacity_shortfall: stacks.shortfall_kw,
            capacity_margin: stacks.margin_pct,
            fc_capex,
            dg_tco_10yr: financials.dg_tco,
            fc_tco_10yr: financials.fc_tco,
        };

        for (what, value) in report.numeric_fields() {
            ensure_finite(value, what)?;
        }
        Ok(report)
    }
}

/// Size `fuel_cell` for the site described by `inputs` with the standard derating curve.
pub fn calculate(inputs: &SizingInputs, fuel_cell: &FuelCellSpec) -> SizingResult<SizingReport> {
    SizingEngine::default().calculate(inputs, fuel_cell)
}
