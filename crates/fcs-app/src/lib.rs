//! Shared application service layer for the fuel-cell sizing tool.
//!
//! The CLI and the HTTP server both go through these functions so catalog
//! rules, default resolution and project bookkeeping live in one place.

pub mod asset;
pub mod calc_service;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod export;
pub mod project_service;
pub mod query;

pub use asset::{AssetAssessment, AssetAssessmentRequest, AssetRecommendation, assess_asset};
pub use calc_service::{Calculation, calculate};
pub use catalog_service::{
    ImportSummary, catalog_snapshot, create_fuel_cell, export_catalog, get_fuel_cell,
    import_catalog, list_fuel_cells, seed_if_empty,
};
pub use config::{AppConfig, StorageConfig};
pub use error::{AppError, AppResult};
pub use export::{ReportRow, export_project_csv, project_report_rows, rows_to_csv};
pub use project_service::{
    compute_outputs, create_project, delete_project, get_project, is_up_to_date, list_projects,
};
pub use query::{PortfolioSummary, get_portfolio, summarize_portfolio};
