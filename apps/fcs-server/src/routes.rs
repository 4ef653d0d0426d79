//! REST handlers under `/api`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use fcs_app::{AppResult, AssetAssessment, AssetAssessmentRequest, PortfolioSummary};
use fcs_core::RecordId;
use fcs_schema::{CalculationRequest, FuelCell, FuelCellSpec, NewProject, Project};
use fcs_sizing::SizingReport;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Run a store-touching service call off the async executor.
async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}

fn parse_id(raw: &str) -> ApiResult<RecordId> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid id: {raw}"), Some("id")))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(v)| v).map_err(ApiError::from)
}

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.store.backend(),
    })
}

pub async fn list_fuel_cells(State(state): State<AppState>) -> ApiResult<Json<Vec<FuelCell>>> {
    let store = state.store.clone();
    let rows = blocking(move || fcs_app::list_fuel_cells(store.as_ref())).await?;
    Ok(Json(rows))
}

pub async fn get_fuel_cell(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<FuelCell>> {
    let id = parse_id(&raw_id)?;
    let store = state.store.clone();
    let fc = blocking(move || fcs_app::get_fuel_cell(store.as_ref(), id)).await?;
    Ok(Json(fc))
}

pub async fn create_fuel_cell(
    State(state): State<AppState>,
    payload: Result<Json<FuelCellSpec>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FuelCell>)> {
    let spec = body(payload)?;
    let store = state.store.clone();
    let fc = blocking(move || fcs_app::create_fuel_cell(store.as_ref(), spec)).await?;
    Ok((StatusCode::CREATED, Json(fc)))
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let store = state.store.clone();
    let rows = blocking(move || fcs_app::list_projects(store.as_ref())).await?;
    Ok(Json(rows))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Project>> {
    let id = parse_id(&raw_id)?;
    let store = state.store.clone();
    let project = blocking(move || fcs_app::get_project(store.as_ref(), id)).await?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let new = body(payload)?;
    let AppState { store, defaults } = state;
    let project = blocking(move || fcs_app::create_project(store.as_ref(), &defaults, new)).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    let store = state.store.clone();
    blocking(move || fcs_app::delete_project(store.as_ref(), id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn project_report_csv(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let store = state.store.clone();
    let csv = blocking(move || fcs_app::export_project_csv(store.as_ref(), id)).await?;
    let disposition = format!("attachment; filename=\"project-{id}-report.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

pub async fn portfolio(State(state): State<AppState>) -> ApiResult<Json<PortfolioSummary>> {
    let store = state.store.clone();
    let summary = blocking(move || fcs_app::get_portfolio(store.as_ref())).await?;
    Ok(Json(summary))
}

/// Sizing engine entry point. Responds with the display-rounded report.
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<SizingReport>> {
    let request = body(payload)?;
    let AppState { store, defaults } = state;
    let calc = blocking(move || fcs_app::calculate(store.as_ref(), &defaults, &request)).await?;
    Ok(Json(calc.report.rounded()))
}

pub async fn asset_analysis(
    payload: Result<Json<AssetAssessmentRequest>, JsonRejection>,
) -> ApiResult<Json<AssetAssessment>> {
    let request = body(payload)?;
    Ok(Json(fcs_app::assess_asset(&request)?))
}
