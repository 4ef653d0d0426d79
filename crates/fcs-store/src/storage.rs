//! The storage seam shared by the services.

use fcs_core::{FuelCellId, ProjectId};
use fcs_schema::{FuelCell, FuelCellSpec, Project, ProjectRecord};

use crate::StoreResult;

/// Catalog and project persistence.
///
/// Implementations assign ids and creation timestamps. Lookups return
/// `Ok(None)` for unknown ids; callers decide whether that is an error.
pub trait Storage: Send + Sync {
    /// All catalog entries in id order.
    fn list_fuel_cells(&self) -> StoreResult<Vec<FuelCell>>;

    fn get_fuel_cell(&self, id: FuelCellId) -> StoreResult<Option<FuelCell>>;

    /// Insert a model. Fails with `StoreError::Duplicate` when a row with the
    /// same [`FuelCellSpec::catalog_key`] exists; the check and the insert are atomic.
    fn create_fuel_cell(&self, spec: FuelCellSpec) -> StoreResult<FuelCell>;

    /// All projects, newest first.
    fn list_projects(&self) -> StoreResult<Vec<Project>>;

    fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    fn create_project(&self, record: ProjectRecord) -> StoreResult<Project>;

    /// Remove a project. Returns `false` when it did not exist.
    fn delete_project(&self, id: ProjectId) -> StoreResult<bool>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
