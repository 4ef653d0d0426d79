//! Catalog and project schema definitions.
//!
//! Field names serialize in camelCase so the same types serve the REST
//! contract, the stored documents, and catalog files.

use std::fmt;

use fcs_core::{FuelCellId, ProjectId};
use serde::{Deserialize, Serialize};

use crate::calculation::SizingInputs;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Technology {
    #[serde(rename = "PEMFC")]
    Pemfc,
    #[serde(rename = "DMFC")]
    Dmfc,
    #[serde(rename = "SOFC")]
    Sofc,
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "PAFC")]
    Pafc,
    #[serde(rename = "MCFC")]
    Mcfc,
}

impl Technology {
    pub fn as_str(self) -> &'static str {
        match self {
            Technology::Pemfc => "PEMFC",
            Technology::Dmfc => "DMFC",
            Technology::Sofc => "SOFC",
            Technology::Afc => "AFC",
            Technology::Pafc => "PAFC",
            Technology::Mcfc => "MCFC",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FuelType {
    #[default]
    Hydrogen,
    Methanol,
    #[serde(rename = "Natural Gas")]
    NaturalGas,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Hydrogen => "Hydrogen",
            FuelType::Methanol => "Methanol",
            FuelType::NaturalGas => "Natural Gas",
        }
    }

    /// Typical lower heating value in kWh/kg.
    pub fn typical_lhv(self) -> f64 {
        match self {
            FuelType::Hydrogen => 33.3,
            FuelType::Methanol => 5.5,
            FuelType::NaturalGas => 13.9,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_parasitic_loss() -> f64 {
    0.08
}

fn default_lhv() -> f64 {
    FuelType::Hydrogen.typical_lhv()
}

fn default_capex_per_kw() -> f64 {
    3000.0
}

/// Datasheet values of a fuel-cell model, as entered in the admin catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelCellSpec {
    pub manufacturer: String,
    pub model: String,
    #[serde(rename = "type")]
    pub technology: Technology,
    pub rated_power_kw: f64,
    #[serde(default)]
    pub min_power_kw: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power_kw: Option<f64>,
    pub output_voltage_v: f64,
    pub fuel_consumption_per_kwh: f64,
    /// Electrical efficiency in percent (0, 100].
    pub efficiency: f64,
    /// Fraction of gross output consumed by fans and pumps.
    #[serde(default = "default_parasitic_loss")]
    pub parasitic_loss: f64,
    #[serde(default)]
    pub fuel_type: FuelType,
    /// Fuel lower heating value in kWh/kg.
    #[serde(default = "default_lhv")]
    pub lhv: f64,
    #[serde(default = "default_capex_per_kw")]
    pub capex_per_kw: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasheet_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telecom_application: Option<String>,
}

impl FuelCellSpec {
    /// Upper end of the operating range; datasheets that omit it run up to rated power.
    pub fn effective_max_power_kw(&self) -> f64 {
        self.max_power_kw.unwrap_or(self.rated_power_kw)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }

    /// Identity of a model in the catalog: manufacturer and model, trimmed, ignoring case.
    pub fn catalog_key(&self) -> (String, String) {
        (
            self.manufacturer.trim().to_ascii_lowercase(),
            self.model.trim().to_ascii_lowercase(),
        )
    }
}

/// A catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelCell {
    pub id: FuelCellId,
    #[serde(flatten)]
    pub spec: FuelCellSpec,
}

/// Project creation payload.
///
/// Site parameters are optional on the wire; the service resolves them
/// against the configured defaults before anything is stored. Computed
/// fields sent by clients are ignored and recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_fuel_cell_id: Option<FuelCellId>,
    #[serde(flatten)]
    pub site: crate::calculation::SiteParameters,
}

/// Derived values persisted with a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutputs {
    pub derating_factor: f64,
    pub battery_capacity_kwh: f64,
    pub battery_capacity_ah: f64,
    pub battery_strings: u32,
    pub cable_size_mm2: f64,
    /// Present only when a fuel cell was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_consumption_daily: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_stack_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_savings: Option<f64>,
}

/// Everything stored for a project except the identity assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_fuel_cell_id: Option<FuelCellId>,
    #[serde(flatten)]
    pub inputs: SizingInputs,
    #[serde(flatten)]
    pub outputs: ProjectOutputs,
    /// SHA-256 over inputs, fuel-cell spec and engine version.
    pub input_fingerprint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(flatten)]
    pub record: ProjectRecord,
    /// RFC 3339 creation time.
    pub created_at: String,
}

/// Versioned catalog file for bulk import/export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogFile {
    pub version: u32,
    #[serde(default)]
    pub fuel_cells: Vec<FuelCellSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_cell_wire_names() {
        let json = r#"{
            "id": 3,
            "manufacturer": "Horizon",
            "model": "H-5000",
            "type": "PEMFC",
            "ratedPowerKw": 5.0,
            "outputVoltageV": 48,
            "fuelConsumptionPerKwh": 0.059,
            "efficiency": 51
        }"#;
        let fc: FuelCell = serde_json::from_str(json).unwrap();
        assert_eq!(fc.id.get(), 3);
        assert_eq!(fc.spec.technology, Technology::Pemfc);
        assert_eq!(fc.spec.parasitic_loss, 0.08);
        assert_eq!(fc.spec.lhv, 33.3);
        assert_eq!(fc.spec.capex_per_kw, 3000.0);
        assert_eq!(fc.spec.fuel_type, FuelType::Hydrogen);
        assert_eq!(fc.spec.effective_max_power_kw(), 5.0);

        let back = serde_json::to_value(&fc).unwrap();
        assert_eq!(back["type"], "PEMFC");
        assert_eq!(back["ratedPowerKw"], 5.0);
        assert!(back.get("datasheetUrl").is_none());
    }

    #[test]
    fn explicit_zero_parasitic_loss_is_kept() {
        let json = r#"{
            "manufacturer": "Acme",
            "model": "Z-1",
            "type": "SOFC",
            "ratedPowerKw": 2.0,
            "outputVoltageV": 48,
            "fuelConsumptionPerKwh": 0.05,
            "efficiency": 55,
            "parasiticLoss": 0
        }"#;
        let spec: FuelCellSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.parasitic_loss, 0.0);
        crate::validate_fuel_cell(&spec).unwrap();
    }

    #[test]
    fn catalog_key_ignores_case_and_padding() {
        let a: FuelCellSpec = serde_json::from_str(
            r#"{"manufacturer":" Ballard ","model":"fcgen-h2pm","type":"PEMFC","ratedPowerKw":5,"outputVoltageV":48,"fuelConsumptionPerKwh":0.06,"efficiency":50}"#,
        )
        .unwrap();
        assert_eq!(a.catalog_key(), ("ballard".to_string(), "fcgen-h2pm".to_string()));
    }

    #[test]
    fn natural_gas_spelling() {
        let ft: FuelType = serde_json::from_str("\"Natural Gas\"").unwrap();
        assert_eq!(ft, FuelType::NaturalGas);
        assert_eq!(ft.to_string(), "Natural Gas");
    }

    #[test]
    fn unknown_technology_is_rejected() {
        let err = serde_json::from_str::<Technology>("\"STEAM\"");
        assert!(err.is_err());
    }
}
