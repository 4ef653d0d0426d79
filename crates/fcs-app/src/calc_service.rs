//! Sizing calculations against the stored catalog.

use fcs_core::Timer;
use fcs_schema::{CalculationDefaults, CalculationRequest, FuelCell, SizingInputs};
use fcs_sizing::{SizingEngine, SizingReport};
use fcs_store::Storage;
use tracing::debug;

use crate::catalog_service;
use crate::error::AppResult;

/// A finished calculation with the inputs and model it was run for.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub fuel_cell: FuelCell,
    pub inputs: SizingInputs,
    /// Exact engine output; call [`SizingReport::rounded`] for display.
    pub report: SizingReport,
}

/// Resolve `request` against `defaults`, look up its fuel cell, and size the site.
///
/// Missing or out-of-range inputs fail with `Validation` before the catalog
/// is consulted; an unknown fuel-cell id fails with `NotFound`.
#[tracing::instrument(skip_all, fields(fuel_cell_id = ?request.fuel_cell_id))]
pub fn calculate(
    store: &dyn Storage,
    defaults: &CalculationDefaults,
    request: &CalculationRequest,
) -> AppResult<Calculation> {
    let timer = Timer::start("calculate");

    let (fuel_cell_id, inputs) = request.resolve(defaults)?;
    let fuel_cell = catalog_service::get_fuel_cell(store, fuel_cell_id)?;
    let report = SizingEngine::default().calculate(&inputs, &fuel_cell.spec)?;

    debug!(
        stacks = report.required_stack_count,
        status = %report.payback_status,
        elapsed_ms = timer.stop(),
        "calculation finished"
    );
    Ok(Calculation {
        fuel_cell,
        inputs,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use fcs_core::RecordId;
    use fcs_schema::SiteParameters;
    use fcs_store::MemoryStore;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        catalog_service::seed_if_empty(&store).unwrap();
        store
    }

    fn request(fuel_cell: u32, load: f64) -> CalculationRequest {
        CalculationRequest {
            fuel_cell_id: RecordId::new(fuel_cell),
            site: SiteParameters {
                load_kw: Some(load),
                autonomy_hours: Some(8.0),
                ..Default::default()
            },
        }
    }

    #[test]
    fn calculates_for_catalog_model() {
        let store = seeded();
        let calc = calculate(&store, &CalculationDefaults::default(), &request(1, 5.0)).unwrap();
        assert_eq!(calc.fuel_cell.id.get(), 1);
        assert!((calc.report.battery_capacity_kwh - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_fuel_cell_is_not_found() {
        let store = seeded();
        let err = calculate(&store, &CalculationDefaults::default(), &request(999, 5.0)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn negative_load_is_validation() {
        let store = seeded();
        let err = calculate(&store, &CalculationDefaults::default(), &request(1, -2.0)).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("loadKw")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn validation_precedes_lookup() {
        let store = MemoryStore::new();
        let err = calculate(&store, &CalculationDefaults::default(), &request(1, -2.0)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
