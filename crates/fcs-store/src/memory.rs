//! In-process store for tests and ephemeral servers.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fcs_core::{FuelCellId, ProjectId, RecordId};
use fcs_schema::{FuelCell, FuelCellSpec, Project, ProjectRecord};
use tracing::info;

use crate::storage::Storage;
use crate::{StoreError, StoreResult, now_rfc3339, sort_newest_first};

#[derive(Debug)]
struct Tables {
    fuel_cells: BTreeMap<FuelCellId, FuelCell>,
    projects: BTreeMap<ProjectId, Project>,
    next_fuel_cell: RecordId,
    next_project: RecordId,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            fuel_cells: BTreeMap::new(),
            projects: BTreeMap::new(),
            next_fuel_cell: RecordId::FIRST,
            next_project: RecordId::FIRST,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Poisoned { what: "memory tables" })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Poisoned { what: "memory tables" })
    }
}

/// Hand out `next` and advance it, refusing once the id space is used up.
fn allocate(next: &mut RecordId, collection: &'static str) -> StoreResult<RecordId> {
    let id = *next;
    let following = id.next();
    if following == id {
        return Err(StoreError::IdsExhausted { collection });
    }
    *next = following;
    Ok(id)
}

impl Storage for MemoryStore {
    fn list_fuel_cells(&self) -> StoreResult<Vec<FuelCell>> {
        Ok(self.read()?.fuel_cells.values().cloned().collect())
    }

    fn get_fuel_cell(&self, id: FuelCellId) -> StoreResult<Option<FuelCell>> {
        Ok(self.read()?.fuel_cells.get(&id).cloned())
    }

    fn create_fuel_cell(&self, spec: FuelCellSpec) -> StoreResult<FuelCell> {
        let mut tables = self.write()?;
        let key = spec.catalog_key();
        if tables.fuel_cells.values().any(|fc| fc.spec.catalog_key() == key) {
            return Err(StoreError::Duplicate {
                name: spec.display_name(),
            });
        }
        let id = allocate(&mut tables.next_fuel_cell, "fuel_cells")?;
        let fuel_cell = FuelCell { id, spec };
        tables.fuel_cells.insert(id, fuel_cell.clone());
        info!(%id, model = %fuel_cell.spec.display_name(), "fuel cell created");
        Ok(fuel_cell)
    }

    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read()?.projects.values().cloned().collect();
        sort_newest_first(&mut projects);
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    fn create_project(&self, record: ProjectRecord) -> StoreResult<Project> {
        let mut tables = self.write()?;
        let id = allocate(&mut tables.next_project, "projects")?;
        let project = Project {
            id,
            record,
            created_at: now_rfc3339(),
        };
        tables.projects.insert(id, project.clone());
        info!(%id, name = %project.record.name, "project created");
        Ok(project)
    }

    fn delete_project(&self, id: ProjectId) -> StoreResult<bool> {
        let removed = self.write()?.projects.remove(&id).is_some();
        if removed {
            info!(%id, "project deleted");
        }
        Ok(removed)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
