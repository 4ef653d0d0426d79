//! fcs-schema: catalog and project data types, the sizing request contract,
//! validation, and versioned catalog files.

pub mod calculation;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use calculation::{CalculationDefaults, CalculationRequest, SiteParameters, SizingInputs};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{
    ValidationError, validate_catalog, validate_fuel_cell, validate_inputs, validate_new_project,
};

use std::path::Path;

const BUILTIN_CATALOG_YAML: &str = include_str!("../data/builtin_catalog.yaml");

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn finish_load(catalog: CatalogFile) -> SchemaResult<CatalogFile> {
    let catalog = migrate_to_latest(catalog)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn parse_catalog_yaml(content: &str) -> SchemaResult<CatalogFile> {
    finish_load(serde_yaml::from_str(content)?)
}

pub fn parse_catalog_json(content: &str) -> SchemaResult<CatalogFile> {
    finish_load(serde_json::from_str(content)?)
}

pub fn load_catalog_yaml(path: &Path) -> SchemaResult<CatalogFile> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog_yaml(&content)
}

pub fn save_catalog_yaml(path: &Path, catalog: &CatalogFile) -> SchemaResult<()> {
    validate_catalog(catalog)?;
    let content = serde_yaml::to_string(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_catalog_json(path: &Path) -> SchemaResult<CatalogFile> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog_json(&content)
}

pub fn save_catalog_json(path: &Path, catalog: &CatalogFile) -> SchemaResult<()> {
    validate_catalog(catalog)?;
    let content = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a catalog file, choosing the format by extension (`.json`, else YAML).
pub fn load_catalog(path: &Path) -> SchemaResult<CatalogFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_catalog_json(path),
        _ => load_catalog_yaml(path),
    }
}

/// Save a catalog file, choosing the format by extension (`.json`, else YAML).
pub fn save_catalog(path: &Path, catalog: &CatalogFile) -> SchemaResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => save_catalog_json(path, catalog),
        _ => save_catalog_yaml(path, catalog),
    }
}

/// Reference telecom fuel-cell models shipped with the service.
pub fn builtin_catalog() -> SchemaResult<CatalogFile> {
    parse_catalog_yaml(BUILTIN_CATALOG_YAML)
}
