//! JSON-document store on the local filesystem.
//!
//! Layout under the root directory:
//!
//! ```text
//! fuel_cells/<id>.json
//! fuel_cells/sequence.json
//! projects/<id>.json
//! projects/sequence.json
//! ```
//!
//! `sequence.json` holds the next id so deleted ids are never reused.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fcs_core::{FuelCellId, ProjectId, RecordId};
use fcs_schema::{FuelCell, FuelCellSpec, Project, ProjectRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::Storage;
use crate::{StoreError, StoreResult, now_rfc3339, sort_newest_first};

const FUEL_CELLS: &str = "fuel_cells";
const PROJECTS: &str = "projects";
const SEQUENCE_FILE: &str = "sequence.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sequence {
    next_id: u32,
}

#[derive(Debug)]
pub struct FileStore {
    root_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root_dir: PathBuf) -> StoreResult<Self> {
        fs::create_dir_all(root_dir.join(FUEL_CELLS))?;
        fs::create_dir_all(root_dir.join(PROJECTS))?;
        Ok(Self {
            root_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Poisoned { what: "file store" })
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root_dir.join(collection)
    }

    fn document_path(&self, collection: &str, id: RecordId) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    fn document_ids(&self, collection: &str) -> StoreResult<Vec<RecordId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(self.collection_dir(collection))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match stem.parse::<RecordId>() {
                Ok(id) => ids.push(id),
                Err(_) if stem == "sequence" => {}
                Err(_) => warn!(path = %path.display(), "ignoring stray file in store"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_document<T: DeserializeOwned>(&self, path: &Path) -> StoreResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Write through a temporary file so readers never see a partial document.
    fn write_document<T: Serialize>(&self, path: &Path, value: &T) -> StoreResult<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let mut rows = Vec::new();
        for id in self.document_ids(collection)? {
            if let Some(row) = self.read_document(&self.document_path(collection, id))? {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Next free id for `collection`. Caller must hold the write lock.
    fn allocate(&self, collection: &'static str) -> StoreResult<RecordId> {
        let seq_path = self.collection_dir(collection).join(SEQUENCE_FILE);
        let stored: Option<Sequence> = self.read_document(&seq_path)?;

        let id = match stored.and_then(|s| RecordId::new(s.next_id)) {
            Some(id) => id,
            None => self
                .document_ids(collection)?
                .last()
                .map(|last| last.next())
                .unwrap_or(RecordId::FIRST),
        };

        let next_id = id
            .get()
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { collection })?;
        self.write_document(&seq_path, &Sequence { next_id })?;
        Ok(id)
    }
}

impl Storage for FileStore {
    fn list_fuel_cells(&self) -> StoreResult<Vec<FuelCell>> {
        self.read_collection(FUEL_CELLS)
    }

    fn get_fuel_cell(&self, id: FuelCellId) -> StoreResult<Option<FuelCell>> {
        self.read_document(&self.document_path(FUEL_CELLS, id))
    }

    fn create_fuel_cell(&self, spec: FuelCellSpec) -> StoreResult<FuelCell> {
        let _guard = self.lock()?;
        let key = spec.catalog_key();
        let existing: Vec<FuelCell> = self.read_collection(FUEL_CELLS)?;
        if existing.iter().any(|fc| fc.spec.catalog_key() == key) {
            return Err(StoreError::Duplicate {
                name: spec.display_name(),
            });
        }
        let id = self.allocate(FUEL_CELLS)?;
        let fuel_cell = FuelCell { id, spec };
        self.write_document(&self.document_path(FUEL_CELLS, id), &fuel_cell)?;
        info!(%id, model = %fuel_cell.spec.display_name(), "fuel cell created");
        Ok(fuel_cell)
    }

    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read_collection(PROJECTS)?;
        sort_newest_first(&mut projects);
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.read_document(&self.document_path(PROJECTS, id))
    }

    fn create_project(&self, record: ProjectRecord) -> StoreResult<Project> {
        let _guard = self.lock()?;
        let id = self.allocate(PROJECTS)?;
        let project = Project {
            id,
            record,
            created_at: now_rfc3339(),
        };
        self.write_document(&self.document_path(PROJECTS, id), &project)?;
        info!(%id, name = %project.record.name, "project created");
        Ok(project)
    }

    fn delete_project(&self, id: ProjectId) -> StoreResult<bool> {
        let _guard = self.lock()?;
        let path = self.document_path(PROJECTS, id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        info!(%id, "project deleted");
        Ok(true)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
