//! Fuel demand and refuelling logistics.

use fcs_core::ceil_count;
use fcs_core::units::constants::HOURS_PER_DAY;
use fcs_schema::FuelCellSpec;

use crate::constants::{CYLINDERS_PER_BUNDLE, H2_CYLINDER_KG};
use crate::error::{SizingError, SizingResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelDemand {
    pub hourly_kg: f64,
    pub daily_kg: f64,
}

impl FuelDemand {
    /// Fuel mass needed to produce `gross_kw` at the model's efficiency.
    pub fn compute(gross_kw: f64, spec: &FuelCellSpec) -> SizingResult<Self> {
        let efficiency = spec.efficiency / 100.0;
        if !(efficiency > 0.0 && spec.lhv > 0.0) {
            return Err(SizingError::NonPhysical {
                what: "efficiency and heating value must be positive",
            });
        }

        let hourly_kg = gross_kw / efficiency / spec.lhv;
        Ok(Self {
            hourly_kg,
            daily_kg: hourly_kg * HOURS_PER_DAY,
        })
    }
}

/// Cylinder deliveries needed to cover one refuelling cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefuelingPlan {
    pub total_kg: f64,
    pub cylinders: u32,
    pub bundles: u32,
}

impl RefuelingPlan {
    pub fn compute(hourly_kg: f64, cycle_days: f64) -> Self {
        let total_kg = hourly_kg * HOURS_PER_DAY * cycle_days;
        let cylinders = ceil_count(total_kg / H2_CYLINDER_KG);
        let bundles = ceil_count(cylinders as f64 / CYLINDERS_PER_BUNDLE);
        Self {
            total_kg,
            cylinders,
            bundles,
        }
    }
}
