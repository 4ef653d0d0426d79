//! Catalog file migration framework.

use crate::SchemaError;
use crate::schema::CatalogFile;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut catalog: CatalogFile) -> Result<CatalogFile, SchemaError> {
    while catalog.version < LATEST_VERSION {
        catalog = migrate_one_version(catalog)?;
    }
    Ok(catalog)
}

fn migrate_one_version(catalog: CatalogFile) -> Result<CatalogFile, SchemaError> {
    match catalog.version {
        0 => migrate_v0_to_v1(catalog),
        1 => migrate_v1_to_v2(catalog),
        v => Err(SchemaError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut catalog: CatalogFile) -> Result<CatalogFile, SchemaError> {
    catalog.version = 1;
    Ok(catalog)
}

/// v1 stored parasitic loss in percent; v2 stores a fraction.
fn migrate_v1_to_v2(mut catalog: CatalogFile) -> Result<CatalogFile, SchemaError> {
    for spec in &mut catalog.fuel_cells {
        spec.parasitic_loss /= 100.0;
    }
    catalog.version = 2;
    Ok(catalog)
}
