//! Fuel-cell catalog operations.

use std::collections::HashSet;
use std::path::Path;

use fcs_core::FuelCellId;
use fcs_schema::{CatalogFile, FuelCell, FuelCellSpec, LATEST_VERSION, validate_fuel_cell};
use fcs_store::{Storage, StoreError};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Outcome of a bulk catalog import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    /// Entries whose manufacturer and model were already in the store.
    pub skipped: usize,
}

pub fn list_fuel_cells(store: &dyn Storage) -> AppResult<Vec<FuelCell>> {
    Ok(store.list_fuel_cells()?)
}

pub fn get_fuel_cell(store: &dyn Storage, id: FuelCellId) -> AppResult<FuelCell> {
    store
        .get_fuel_cell(id)?
        .ok_or_else(|| AppError::not_found("Fuel cell", id))
}

/// Add a model to the catalog. Manufacturer and model must be unique, ignoring
/// case; the store enforces that atomically with the insert.
#[tracing::instrument(skip_all, fields(model = %spec.display_name()))]
pub fn create_fuel_cell(store: &dyn Storage, spec: FuelCellSpec) -> AppResult<FuelCell> {
    validate_fuel_cell(&spec)?;
    Ok(store.create_fuel_cell(spec)?)
}

/// Insert every entry of `catalog` that the store does not already hold.
fn import_specs(store: &dyn Storage, catalog: CatalogFile) -> AppResult<ImportSummary> {
    let mut known: HashSet<(String, String)> = store
        .list_fuel_cells()?
        .iter()
        .map(|fc| fc.spec.catalog_key())
        .collect();

    let mut summary = ImportSummary::default();
    for spec in catalog.fuel_cells {
        if !known.insert(spec.catalog_key()) {
            summary.skipped += 1;
            continue;
        }
        validate_fuel_cell(&spec)?;
        match store.create_fuel_cell(spec) {
            Ok(_) => summary.created += 1,
            // Another writer added it since the snapshot above.
            Err(StoreError::Duplicate { .. }) => summary.skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(summary)
}

/// Load the built-in catalog into an empty store. Returns the number of models added.
pub fn seed_if_empty(store: &dyn Storage) -> AppResult<usize> {
    if !store.list_fuel_cells()?.is_empty() {
        return Ok(0);
    }
    let summary = import_specs(store, fcs_schema::builtin_catalog()?)?;
    info!(count = summary.created, backend = store.backend(), "seeded fuel-cell catalog");
    Ok(summary.created)
}

/// Import a YAML or JSON catalog file, migrating older versions.
pub fn import_catalog(store: &dyn Storage, path: &Path) -> AppResult<ImportSummary> {
    let catalog = fcs_schema::load_catalog(path)?;
    let summary = import_specs(store, catalog)?;
    info!(
        path = %path.display(),
        created = summary.created,
        skipped = summary.skipped,
        "imported catalog"
    );
    Ok(summary)
}

/// Current catalog as a versioned file document.
pub fn catalog_snapshot(store: &dyn Storage) -> AppResult<CatalogFile> {
    Ok(CatalogFile {
        version: LATEST_VERSION,
        fuel_cells: store
            .list_fuel_cells()?
            .into_iter()
            .map(|fc| fc.spec)
            .collect(),
    })
}

/// Write the catalog to `path`; the extension picks YAML or JSON.
pub fn export_catalog(store: &dyn Storage, path: &Path) -> AppResult<usize> {
    let catalog = catalog_snapshot(store)?;
    fcs_schema::save_catalog(path, &catalog)?;
    Ok(catalog.fuel_cells.len())
}
