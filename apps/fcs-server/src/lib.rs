//! HTTP front end for the fuel-cell sizing services.

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag each request with a fresh id, echoed back in `x-request-id`.
async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let mut response = next.run(req).await;
        tracing::info!(status = response.status().as_u16(), "handled");
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health))
        .route(
            "/fuel-cells",
            get(routes::list_fuel_cells).post(routes::create_fuel_cell),
        )
        .route("/fuel-cells/:id", get(routes::get_fuel_cell))
        .route(
            "/projects",
            get(routes::list_projects).post(routes::create_project),
        )
        .route(
            "/projects/:id",
            get(routes::get_project).delete(routes::delete_project),
        )
        .route("/projects/:id/report.csv", get(routes::project_report_csv))
        .route("/portfolio", get(routes::portfolio))
        .route("/calculate", post(routes::calculate))
        .route("/asset-analysis", post(routes::asset_analysis));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
