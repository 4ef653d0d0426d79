//! Power budget and stack count.

use fcs_core::try_ceil_count;
use fcs_schema::FuelCellSpec;

use crate::error::{SizingError, SizingResult};

/// How many stacks of a model the site needs and how much headroom they leave.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSizing {
    /// Load grossed up for derating (kW).
    pub gross_power_kw: f64,
    pub parasitic_loss_kw: f64,
    pub net_output_kw: f64,
    /// Net deliverable output of one stack at the site (kW).
    pub unit_derated_kw: f64,
    pub stack_count: u32,
    pub total_rated_kw: f64,
    pub total_derated_kw: f64,
    pub shortfall_kw: f64,
    /// Spare capacity as a percentage of the load; `None` when there is no load.
    pub margin_pct: Option<f64>,
}

impl StackSizing {
    pub fn compute(load_kw: f64, derating: f64, spec: &FuelCellSpec) -> SizingResult<Self> {
        let gross_power_kw = load_kw / derating;
        let parasitic_loss_kw = gross_power_kw * spec.parasitic_loss;
        let net_output_kw = gross_power_kw - parasitic_loss_kw;

        let unit_derated_kw = spec.rated_power_kw * derating * (1.0 - spec.parasitic_loss);
        if !(unit_derated_kw.is_finite() && unit_derated_kw > 0.0) {
            return Err(SizingError::NonPhysical {
                what: "derated stack output must be positive",
            });
        }

        let stack_count = try_ceil_count(load_kw / unit_derated_kw)
            .ok_or(SizingError::NonPhysical {
                what: "stack count exceeds the countable range",
            })?
            .max(1);
        let total_rated_kw = spec.rated_power_kw * stack_count as f64;
        let total_derated_kw = unit_derated_kw * stack_count as f64;
        let shortfall_kw = (load_kw - total_derated_kw).max(0.0);
        let margin_pct = if load_kw > 0.0 {
            Some((total_derated_kw - load_kw) / load_kw * 100.0)
        } else {
            None
        };

        Ok(Self {
            gross_power_kw,
            parasitic_loss_kw,
            net_output_kw,
            unit_derated_kw,
            stack_count,
            total_rated_kw,
            total_derated_kw,
            shortfall_kw,
            margin_pct,
        })
    }

    pub fn needs_multiple_stacks(&self) -> bool {
        self.stack_count > 1
    }

    pub fn is_undersized(&self) -> bool {
        self.shortfall_kw > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcs_schema::{FuelType, Technology};

    fn spec(rated: f64, parasitic: f64) -> FuelCellSpec {
        FuelCellSpec {
            manufacturer: "Test".to_string(),
            model: "T".to_string(),
            technology: Technology::Pemfc,
            rated_power_kw: rated,
            min_power_kw: 0.0,
            max_power_kw: None,
            output_voltage_v: 48.0,
            fuel_consumption_per_kwh: 0.06,
            efficiency: 50.0,
            parasitic_loss: parasitic,
            fuel_type: FuelType::Hydrogen,
            lhv: 33.3,
            capex_per_kw: 3000.0,
            datasheet_url: None,
            source: None,
            reference_url: None,
            telecom_application: None,
        }
    }

    #[test]
    fn parasitic_loss_forces_second_stack() {
        let s = StackSizing::compute(5.0, 1.0, &spec(5.0, 0.08)).unwrap();
        assert_eq!(s.stack_count, 2);
        assert!(s.needs_multiple_stacks());
        assert!((s.unit_derated_kw - 4.6).abs() < 1e-12);
        assert!((s.total_derated_kw - 9.2).abs() < 1e-12);
        assert!((s.margin_pct.unwrap() - 84.0).abs() < 1e-9);
        assert!(!s.is_undersized());
    }

    #[test]
    fn single_stack_when_it_fits() {
        let s = StackSizing::compute(3.0, 1.0, &spec(5.0, 0.08)).unwrap();
        assert_eq!(s.stack_count, 1);
        assert!((s.parasitic_loss_kw - 0.24).abs() < 1e-12);
        assert!((s.net_output_kw - 2.76).abs() < 1e-12);
    }

    #[test]
    fn zero_load_still_gets_one_stack() {
        let s = StackSizing::compute(0.0, 1.0, &spec(5.0, 0.08)).unwrap();
        assert_eq!(s.stack_count, 1);
        assert_eq!(s.margin_pct, None);
        assert_eq!(s.shortfall_kw, 0.0);
    }

    #[test]
    fn derating_grosses_up_load() {
        let s = StackSizing::compute(7.5, 0.75, &spec(5.0, 0.0)).unwrap();
        assert!((s.gross_power_kw - 10.0).abs() < 1e-12);
        assert_eq!(s.stack_count, 2);
    }

    #[test]
    fn total_parasitic_loss_is_rejected() {
        assert!(StackSizing::compute(1.0, 1.0, &spec(5.0, 1.0)).is_err());
    }

    #[test]
    fn uncountable_stack_count_is_rejected() {
        let err = StackSizing::compute(5.0, 1.0, &spec(1e-9, 0.08)).unwrap_err();
        assert!(matches!(err, SizingError::NonPhysical { .. }));
    }
}
