//! fcs-store: persistence for the fuel-cell catalog and saved projects.

pub mod file;
pub mod hash;
pub mod memory;
pub mod storage;

pub use file::FileStore;
pub use hash::compute_input_fingerprint;
pub use memory::MemoryStore;
pub use storage::Storage;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt document {path}: {message}")]
    Corrupt { path: String, message: String },

    #[error("Store lock poisoned: {what}")]
    Poisoned { what: &'static str },

    #[error("No ids left in {collection}")]
    IdsExhausted { collection: &'static str },

    #[error("Duplicate entry: {name} in fuel-cell catalog")]
    Duplicate { name: String },
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Newest first; ids break ties between projects created in the same millisecond.
pub(crate) fn sort_newest_first(projects: &mut [fcs_schema::Project]) {
    projects.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
