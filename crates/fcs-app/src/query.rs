//! Aggregate views over saved projects.

use fcs_schema::Project;
use fcs_store::Storage;
use serde::Serialize;

use crate::error::AppResult;

/// Totals across every saved project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub project_count: usize,
    /// Projects that have a fuel cell selected.
    pub sized_project_count: usize,
    pub total_load_kw: f64,
    pub total_battery_kwh: f64,
    pub total_annual_savings: f64,
    #[serde(rename = "totalCo2Savings")]
    pub total_co2_savings: f64,
    /// Mean over projects that pay back.
    pub average_payback_years: Option<f64>,
}

pub fn summarize_portfolio(projects: &[Project]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        project_count: projects.len(),
        ..Default::default()
    };

    let mut payback_sum = 0.0;
    let mut payback_count = 0usize;
    for project in projects {
        let outputs = &project.record.outputs;
        summary.total_load_kw += project.record.inputs.load_kw;
        summary.total_battery_kwh += outputs.battery_capacity_kwh;
        if project.record.selected_fuel_cell_id.is_some() {
            summary.sized_project_count += 1;
        }
        summary.total_annual_savings += outputs.annual_savings.unwrap_or(0.0);
        summary.total_co2_savings += outputs.co2_savings.unwrap_or(0.0);
        if let Some(years) = outputs.payback_years {
            payback_sum += years;
            payback_count += 1;
        }
    }

    if payback_count > 0 {
        summary.average_payback_years = Some(payback_sum / payback_count as f64);
    }
    summary
}

pub fn get_portfolio(store: &dyn Storage) -> AppResult<PortfolioSummary> {
    Ok(summarize_portfolio(&store.list_projects()?))
}
