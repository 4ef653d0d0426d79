//! Sizing request contract: optional wire parameters, configurable defaults,
//! and the fully-resolved input set the engine consumes.

use fcs_core::FuelCellId;
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, validate_inputs};

/// Site, economics, battery and logistics parameters as received.
///
/// `loadKw` and `autonomyHours` are required; everything else falls back to
/// [`CalculationDefaults`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteParameters {
    #[serde(default)]
    pub load_kw: Option<f64>,
    #[serde(default)]
    pub max_temperature: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub autonomy_hours: Option<f64>,
    #[serde(default)]
    pub hours_per_year: Option<f64>,
    #[serde(default)]
    pub dg_capacity_kva: Option<f64>,
    #[serde(default)]
    pub diesel_price: Option<f64>,
    #[serde(default)]
    pub pilferage_factor: Option<f64>,
    #[serde(default)]
    pub dg_capex: Option<f64>,
    #[serde(default)]
    pub h2_price: Option<f64>,
    #[serde(default)]
    pub logistics_cost_pct: Option<f64>,
    #[serde(default)]
    pub battery_buffer_hours: Option<f64>,
    #[serde(default)]
    pub battery_dod: Option<f64>,
    #[serde(default)]
    pub system_voltage: Option<f64>,
    #[serde(default)]
    pub refueling_cycle_days: Option<f64>,
}

/// `POST /api/calculate` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub fuel_cell_id: Option<FuelCellId>,
    #[serde(flatten)]
    pub site: SiteParameters,
}

/// Values substituted for omitted optional parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculationDefaults {
    pub max_temperature: f64,
    pub altitude: f64,
    pub hours_per_year: f64,
    pub dg_capacity_kva: f64,
    pub diesel_price: f64,
    pub pilferage_factor: f64,
    pub dg_capex: f64,
    pub h2_price: f64,
    pub logistics_cost_pct: f64,
    /// `None` sizes the battery bank for the full autonomy window.
    pub battery_buffer_hours: Option<f64>,
    pub battery_dod: f64,
    pub system_voltage: f64,
    pub refueling_cycle_days: f64,
}

impl Default for CalculationDefaults {
    fn default() -> Self {
        Self {
            max_temperature: 35.0,
            altitude: 0.0,
            hours_per_year: 2000.0,
            dg_capacity_kva: 20.0,
            diesel_price: 1.0,
            pilferage_factor: 10.0,
            dg_capex: 5000.0,
            h2_price: 15.0,
            logistics_cost_pct: 10.0,
            battery_buffer_hours: None,
            battery_dod: 0.8,
            system_voltage: 48.0,
            refueling_cycle_days: 7.0,
        }
    }
}

/// Fully-resolved, validated engine input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingInputs {
    pub load_kw: f64,
    pub max_temperature: f64,
    pub altitude: f64,
    pub autonomy_hours: f64,
    pub hours_per_year: f64,
    pub dg_capacity_kva: f64,
    pub diesel_price: f64,
    pub pilferage_factor: f64,
    pub dg_capex: f64,
    pub h2_price: f64,
    pub logistics_cost_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_buffer_hours: Option<f64>,
    pub battery_dod: f64,
    pub system_voltage: f64,
    pub refueling_cycle_days: f64,
}

impl SizingInputs {
    /// Inputs for `load_kw` and `autonomy_hours` with every other value defaulted.
    pub fn with_defaults(load_kw: f64, autonomy_hours: f64, defaults: &CalculationDefaults) -> Self {
        Self {
            load_kw,
            max_temperature: defaults.max_temperature,
            altitude: defaults.altitude,
            autonomy_hours,
            hours_per_year: defaults.hours_per_year,
            dg_capacity_kva: defaults.dg_capacity_kva,
            diesel_price: defaults.diesel_price,
            pilferage_factor: defaults.pilferage_factor,
            dg_capex: defaults.dg_capex,
            h2_price: defaults.h2_price,
            logistics_cost_pct: defaults.logistics_cost_pct,
            battery_buffer_hours: defaults.battery_buffer_hours,
            battery_dod: defaults.battery_dod,
            system_voltage: defaults.system_voltage,
            refueling_cycle_days: defaults.refueling_cycle_days,
        }
    }

    /// Hours of load the battery bank must carry.
    pub fn battery_bank_hours(&self) -> f64 {
        self.battery_buffer_hours.unwrap_or(self.autonomy_hours)
    }
}

impl SiteParameters {
    /// Apply defaults and validate.
    pub fn resolve(&self, defaults: &CalculationDefaults) -> Result<SizingInputs, ValidationError> {
        let load_kw = self
            .load_kw
            .ok_or(ValidationError::MissingField { field: "loadKw" })?;
        let autonomy_hours = self
            .autonomy_hours
            .ok_or(ValidationError::MissingField {
                field: "autonomyHours",
            })?;

        let inputs = SizingInputs {
            load_kw,
            max_temperature: self.max_temperature.unwrap_or(defaults.max_temperature),
            altitude: self.altitude.unwrap_or(defaults.altitude),
            autonomy_hours,
            hours_per_year: self.hours_per_year.unwrap_or(defaults.hours_per_year),
            dg_capacity_kva: self.dg_capacity_kva.unwrap_or(defaults.dg_capacity_kva),
            diesel_price: self.diesel_price.unwrap_or(defaults.diesel_price),
            pilferage_factor: self.pilferage_factor.unwrap_or(defaults.pilferage_factor),
            dg_capex: self.dg_capex.unwrap_or(defaults.dg_capex),
            h2_price: self.h2_price.unwrap_or(defaults.h2_price),
            logistics_cost_pct: self
                .logistics_cost_pct
                .unwrap_or(defaults.logistics_cost_pct),
            battery_buffer_hours: self.battery_buffer_hours.or(defaults.battery_buffer_hours),
            battery_dod: self.battery_dod.unwrap_or(defaults.battery_dod),
            system_voltage: self.system_voltage.unwrap_or(defaults.system_voltage),
            refueling_cycle_days: self
                .refueling_cycle_days
                .unwrap_or(defaults.refueling_cycle_days),
        };

        validate_inputs(&inputs)?;
        Ok(inputs)
    }
}

impl CalculationRequest {
    /// Resolve the site parameters and require a fuel-cell reference.
    pub fn resolve(
        &self,
        defaults: &CalculationDefaults,
    ) -> Result<(FuelCellId, SizingInputs), ValidationError> {
        let fuel_cell_id = self.fuel_cell_id.ok_or(ValidationError::MissingField {
            field: "fuelCellId",
        })?;
        let inputs = self.site.resolve(defaults)?;
        Ok((fuel_cell_id, inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_wire_body_and_applies_defaults() {
        let body = r#"{"loadKw": 5, "fuelCellId": 1, "autonomyHours": 8}"#;
        let req: CalculationRequest = serde_json::from_str(body).unwrap();
        let (id, inputs) = req.resolve(&CalculationDefaults::default()).unwrap();

        assert_eq!(id.get(), 1);
        assert_eq!(inputs.load_kw, 5.0);
        assert_eq!(inputs.max_temperature, 35.0);
        assert_eq!(inputs.system_voltage, 48.0);
        assert_eq!(inputs.battery_dod, 0.8);
        assert_eq!(inputs.battery_buffer_hours, None);
        assert_eq!(inputs.battery_bank_hours(), 8.0);
    }

    #[test]
    fn explicit_buffer_hours_win() {
        let body = r#"{"loadKw": 5, "fuelCellId": 1, "autonomyHours": 8, "batteryBufferHours": 4}"#;
        let req: CalculationRequest = serde_json::from_str(body).unwrap();
        let (_, inputs) = req.resolve(&CalculationDefaults::default()).unwrap();
        assert_eq!(inputs.battery_bank_hours(), 4.0);
    }

    #[test]
    fn missing_load_names_the_field() {
        let body = r#"{"fuelCellId": 1, "autonomyHours": 8}"#;
        let req: CalculationRequest = serde_json::from_str(body).unwrap();
        let err = req.resolve(&CalculationDefaults::default()).unwrap_err();
        assert_eq!(err.field(), Some("loadKw"));
    }

    #[test]
    fn missing_fuel_cell_names_the_field() {
        let req = CalculationRequest {
            fuel_cell_id: None,
            site: SiteParameters {
                load_kw: Some(1.0),
                autonomy_hours: Some(1.0),
                ..Default::default()
            },
        };
        let err = req.resolve(&CalculationDefaults::default()).unwrap_err();
        assert_eq!(err.field(), Some("fuelCellId"));
    }

    #[test]
    fn configured_defaults_are_used() {
        let defaults = CalculationDefaults {
            system_voltage: 24.0,
            battery_buffer_hours: Some(2.0),
            ..Default::default()
        };
        let site = SiteParameters {
            load_kw: Some(1.0),
            autonomy_hours: Some(10.0),
            ..Default::default()
        };
        let inputs = site.resolve(&defaults).unwrap();
        assert_eq!(inputs.system_voltage, 24.0);
        assert_eq!(inputs.battery_bank_hours(), 2.0);
    }
}
