//! Input, catalog and project validation logic.

use std::collections::HashSet;

use crate::calculation::SizingInputs;
use crate::schema::{CatalogFile, FuelCellSpec, NewProject};
use fcs_core::units::constants::HOURS_PER_YEAR_MAX;

const MAX_NAME_LEN: usize = 200;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate entry: {id} in {context}")]
    DuplicateEntry { id: String, context: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

impl ValidationError {
    /// Offending field for client-side highlighting, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field } => Some(*field),
            ValidationError::InvalidValue { field, .. } => Some(field.as_str()),
            ValidationError::DuplicateEntry { .. } | ValidationError::UnsupportedVersion { .. } => {
                None
            }
        }
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be non-negative and finite"))
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive and finite"))
    }
}

pub fn validate_inputs(inputs: &SizingInputs) -> Result<(), ValidationError> {
    non_negative("loadKw", inputs.load_kw)?;
    finite("maxTemperature", inputs.max_temperature)?;
    finite("altitude", inputs.altitude)?;
    non_negative("autonomyHours", inputs.autonomy_hours)?;

    non_negative("hoursPerYear", inputs.hours_per_year)?;
    if inputs.hours_per_year > HOURS_PER_YEAR_MAX {
        return Err(invalid(
            "hoursPerYear",
            inputs.hours_per_year,
            "cannot exceed 8760 hours",
        ));
    }

    positive("dgCapacityKva", inputs.dg_capacity_kva)?;
    non_negative("dieselPrice", inputs.diesel_price)?;
    non_negative("pilferageFactor", inputs.pilferage_factor)?;
    non_negative("dgCapex", inputs.dg_capex)?;
    non_negative("h2Price", inputs.h2_price)?;
    non_negative("logisticsCostPct", inputs.logistics_cost_pct)?;

    if let Some(hours) = inputs.battery_buffer_hours {
        non_negative("batteryBufferHours", hours)?;
    }

    positive("batteryDod", inputs.battery_dod)?;
    if inputs.battery_dod > 1.0 {
        return Err(invalid(
            "batteryDod",
            inputs.battery_dod,
            "depth of discharge is a fraction in (0, 1]",
        ));
    }

    positive("systemVoltage", inputs.system_voltage)?;
    non_negative("refuelingCycleDays", inputs.refueling_cycle_days)?;

    Ok(())
}

fn validate_url(field: &str, url: &Option<String>) -> Result<(), ValidationError> {
    match url {
        Some(u) if !(u.starts_with("http://") || u.starts_with("https://")) => {
            Err(invalid(field, u, "must be an http(s) URL"))
        }
        _ => Ok(()),
    }
}

pub fn validate_fuel_cell(spec: &FuelCellSpec) -> Result<(), ValidationError> {
    if spec.manufacturer.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "manufacturer",
        });
    }
    if spec.model.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "model" });
    }

    positive("ratedPowerKw", spec.rated_power_kw)?;
    non_negative("minPowerKw", spec.min_power_kw)?;
    if spec.min_power_kw > spec.rated_power_kw {
        return Err(invalid(
            "minPowerKw",
            spec.min_power_kw,
            "cannot exceed rated power",
        ));
    }
    if let Some(max) = spec.max_power_kw {
        positive("maxPowerKw", max)?;
        if max < spec.rated_power_kw {
            return Err(invalid("maxPowerKw", max, "cannot be below rated power"));
        }
    }

    positive("outputVoltageV", spec.output_voltage_v)?;
    non_negative("fuelConsumptionPerKwh", spec.fuel_consumption_per_kwh)?;

    positive("efficiency", spec.efficiency)?;
    if spec.efficiency > 100.0 {
        return Err(invalid(
            "efficiency",
            spec.efficiency,
            "efficiency is a percentage in (0, 100]",
        ));
    }

    non_negative("parasiticLoss", spec.parasitic_loss)?;
    if spec.parasitic_loss >= 1.0 {
        return Err(invalid(
            "parasiticLoss",
            spec.parasitic_loss,
            "parasitic loss is a fraction in [0, 1)",
        ));
    }

    positive("lhv", spec.lhv)?;
    non_negative("capexPerKw", spec.capex_per_kw)?;

    validate_url("datasheetUrl", &spec.datasheet_url)?;
    validate_url("referenceUrl", &spec.reference_url)?;

    Ok(())
}

pub fn validate_new_project(project: &NewProject) -> Result<(), ValidationError> {
    let name = project.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField { field: "name" });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(
            "name",
            format!("{} chars", name.chars().count()),
            "must be at most 200 characters",
        ));
    }

    if let Some(lat) = project.latitude {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude", lat, "must be within [-90, 90]"));
        }
    }
    if let Some(lon) = project.longitude {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude", lon, "must be within [-180, 180]"));
        }
    }

    Ok(())
}

pub fn validate_catalog(catalog: &CatalogFile) -> Result<(), ValidationError> {
    if catalog.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: catalog.version,
        });
    }

    let mut seen = HashSet::new();
    for spec in &catalog.fuel_cells {
        validate_fuel_cell(spec)?;
        if !seen.insert(spec.catalog_key()) {
            return Err(ValidationError::DuplicateEntry {
                id: spec.display_name(),
                context: "catalog fuel_cells".to_string(),
            });
        }
    }

    Ok(())
}
