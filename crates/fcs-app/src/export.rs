//! Flat `Category, Parameter, Value, Unit` report export.

use fcs_core::ProjectId;
use fcs_schema::{FuelCell, Project};
use fcs_sizing::{SizingEngine, SizingReport};
use fcs_store::Storage;

use crate::catalog_service;
use crate::error::AppResult;
use crate::project_service;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub category: &'static str,
    pub parameter: &'static str,
    pub value: String,
    pub unit: &'static str,
}

fn row(category: &'static str, parameter: &'static str, value: impl ToString, unit: &'static str) -> ReportRow {
    ReportRow {
        category,
        parameter,
        value: value.to_string(),
        unit,
    }
}

fn or_na(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Rows for a project, its fuel cell, and (when a fuel cell is selected) the rounded report.
pub fn project_report_rows(
    project: &Project,
    fuel_cell: Option<&FuelCell>,
    report: Option<&SizingReport>,
) -> Vec<ReportRow> {
    const SITE: &str = "Site Parameters";
    const FC: &str = "Fuel Cell";
    const RESULTS: &str = "Results";
    const FINANCIAL: &str = "Financial";

    let record = &project.record;
    let inputs = &record.inputs;
    let outputs = &record.outputs;

    let mut rows = vec![
        row(SITE, "Project Name", &record.name, ""),
        row(SITE, "Load Requirement", inputs.load_kw, "kW"),
        row(SITE, "Autonomy", inputs.autonomy_hours, "hours"),
        row(SITE, "System Voltage", inputs.system_voltage, "VDC"),
        row(SITE, "Temperature", inputs.max_temperature, "C"),
        row(SITE, "Altitude", inputs.altitude, "m"),
    ];

    if let Some(fc) = fuel_cell {
        rows.extend([
            row(FC, "Manufacturer", &fc.spec.manufacturer, ""),
            row(FC, "Model", &fc.spec.model, ""),
            row(FC, "Technology", fc.spec.technology, ""),
            row(FC, "Rated Power", fc.spec.rated_power_kw, "kW"),
            row(FC, "Efficiency", fc.spec.efficiency, "%"),
        ]);
    }

    rows.extend([
        row(RESULTS, "Derating Factor", outputs.derating_factor, ""),
        row(RESULTS, "Battery Capacity", outputs.battery_capacity_kwh, "kWh"),
        row(RESULTS, "Battery Capacity", outputs.battery_capacity_ah, "Ah"),
        row(RESULTS, "Battery Strings", outputs.battery_strings, ""),
        row(RESULTS, "Cable Size", outputs.cable_size_mm2, "mm2"),
    ]);

    if let Some(r) = report {
        rows.extend([
            row(RESULTS, "Fuel Cell Stacks", r.required_stack_count, ""),
            row(RESULTS, "Daily Fuel Consumption", r.fuel_consumption_daily, "kg"),
            row(RESULTS, "H2 Cylinders Required", r.cylinders_required, ""),
            row(RESULTS, "H2 Bundles Required", r.bundles_required, ""),
            row(FINANCIAL, "Diesel Generator Daily Cost", r.dg_daily_cost, "USD"),
            row(FINANCIAL, "Fuel Cell Daily Cost", r.fc_daily_cost, "USD"),
            row(FINANCIAL, "Daily Savings", r.daily_savings, "USD"),
            row(FINANCIAL, "Annual Savings", r.annual_savings, "USD"),
            row(FINANCIAL, "Payback Period", or_na(r.payback_years), "years"),
            row(FINANCIAL, "Payback Status", r.payback_status, ""),
            row(FINANCIAL, "CO2 Savings", r.co2_savings, "kg/year"),
            row(FINANCIAL, "Fuel Cell CAPEX", r.fc_capex, "USD"),
            row(FINANCIAL, "Diesel 10-Year TCO", r.dg_tco_10yr, "USD"),
            row(FINANCIAL, "Fuel Cell 10-Year TCO", r.fc_tco_10yr, "USD"),
        ]);
    }

    rows
}

/// Quote a CSV field when it contains a separator, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn rows_to_csv(rows: &[ReportRow]) -> String {
    let mut csv = String::from("Category,Parameter,Value,Unit\n");
    for r in rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(r.category),
            csv_field(r.parameter),
            csv_field(&r.value),
            csv_field(r.unit)
        ));
    }
    csv
}

/// CSV report for a stored project, recomputing the full report from its inputs.
pub fn export_project_csv(store: &dyn Storage, id: ProjectId) -> AppResult<String> {
    let project = project_service::get_project(store, id)?;
    let fuel_cell = project
        .record
        .selected_fuel_cell_id
        .map(|fc_id| catalog_service::get_fuel_cell(store, fc_id))
        .transpose()?;
    let report = fuel_cell
        .as_ref()
        .map(|fc| {
            SizingEngine::default()
                .calculate(&project.record.inputs, &fc.spec)
                .map(|r| r.rounded())
        })
        .transpose()?;

    let rows = project_report_rows(&project, fuel_cell.as_ref(), report.as_ref());
    Ok(rows_to_csv(&rows))
}
