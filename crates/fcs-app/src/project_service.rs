//! Saved sizing projects.

use fcs_core::ProjectId;
use fcs_schema::{
    CalculationDefaults, FuelCell, FuelCellSpec, NewProject, Project, ProjectOutputs,
    ProjectRecord, SizingInputs, validate_new_project,
};
use fcs_sizing::{ENGINE_VERSION, SizingEngine};
use fcs_store::{Storage, compute_input_fingerprint};

use crate::catalog_service;
use crate::error::{AppError, AppResult};

pub fn list_projects(store: &dyn Storage) -> AppResult<Vec<Project>> {
    Ok(store.list_projects()?)
}

pub fn get_project(store: &dyn Storage, id: ProjectId) -> AppResult<Project> {
    store
        .get_project(id)?
        .ok_or_else(|| AppError::not_found("Project", id))
}

/// Derived fields for a project, rounded for display.
///
/// Without a fuel cell only derating, battery and cable are sized.
pub fn compute_outputs(
    inputs: &SizingInputs,
    fuel_cell: Option<&FuelCellSpec>,
) -> AppResult<ProjectOutputs> {
    let engine = SizingEngine::default();
    let outputs = match fuel_cell {
        Some(spec) => {
            let r = engine.calculate(inputs, spec)?.rounded();
            ProjectOutputs {
                derating_factor: r.derating_factor,
                battery_capacity_kwh: r.battery_capacity_kwh,
                battery_capacity_ah: r.battery_capacity_ah,
                battery_strings: r.battery_strings,
                cable_size_mm2: r.cable_size_mm2,
                fuel_consumption_daily: Some(r.fuel_consumption_daily),
                required_stack_count: Some(r.required_stack_count),
                annual_savings: Some(r.annual_savings),
                payback_years: r.payback_years,
                co2_savings: Some(r.co2_savings),
            }
        }
        None => {
            let s = engine.size_storage(inputs)?;
            ProjectOutputs {
                derating_factor: s.derating_factor,
                battery_capacity_kwh: fcs_core::round_to(s.battery.capacity_kwh, 1),
                battery_capacity_ah: fcs_core::round_to(s.battery.capacity_ah, 1),
                battery_strings: s.battery.strings,
                cable_size_mm2: fcs_core::round_to(s.cable.cross_section_mm2, 1),
                ..Default::default()
            }
        }
    };
    Ok(outputs)
}

/// Validate, resolve defaults, compute outputs, and persist a new project.
#[tracing::instrument(skip_all, fields(name = %new.name))]
pub fn create_project(
    store: &dyn Storage,
    defaults: &CalculationDefaults,
    new: NewProject,
) -> AppResult<Project> {
    validate_new_project(&new)?;
    let inputs = new.site.resolve(defaults)?;

    let fuel_cell: Option<FuelCell> = new
        .selected_fuel_cell_id
        .map(|id| catalog_service::get_fuel_cell(store, id))
        .transpose()?;
    let spec = fuel_cell.as_ref().map(|fc| &fc.spec);

    let outputs = compute_outputs(&inputs, spec)?;
    let input_fingerprint = compute_input_fingerprint(&inputs, spec, ENGINE_VERSION);

    let record = ProjectRecord {
        name: new.name.trim().to_string(),
        description: new.description,
        latitude: new.latitude,
        longitude: new.longitude,
        selected_fuel_cell_id: new.selected_fuel_cell_id,
        inputs,
        outputs,
        input_fingerprint,
    };
    Ok(store.create_project(record)?)
}

pub fn delete_project(store: &dyn Storage, id: ProjectId) -> AppResult<()> {
    if store.delete_project(id)? {
        Ok(())
    } else {
        Err(AppError::not_found("Project", id))
    }
}

/// Whether a project's stored outputs still match what this engine and
/// the current catalog entry would produce.
pub fn is_up_to_date(store: &dyn Storage, project: &Project) -> AppResult<bool> {
    let fuel_cell = match project.record.selected_fuel_cell_id {
        Some(id) => match store.get_fuel_cell(id)? {
            Some(fc) => Some(fc),
            None => return Ok(false),
        },
        None => None,
    };
    let fingerprint = compute_input_fingerprint(
        &project.record.inputs,
        fuel_cell.as_ref().map(|fc| &fc.spec),
        ENGINE_VERSION,
    );
    Ok(fingerprint == project.record.input_fingerprint)
}
