use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fcs_schema::CalculationDefaults;
use fcs_server::{AppState, REQUEST_ID_HEADER, router};
use fcs_store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    fcs_app::seed_if_empty(store.as_ref()).unwrap();
    router(AppState::new(store, CalculationDefaults::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_backend() {
    let (status, body) = send_json(&app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_eq!(id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn fuel_cell_catalog() {
    let app = app();
    let (status, list) = send_json(&app, "GET", "/api/fuel-cells", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 15);
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[0]["type"], "PEMFC");

    let (status, one) = send_json(&app, "GET", "/api/fuel-cells/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["manufacturer"], "Ballard");

    let (status, err) = send_json(&app, "GET", "/api/fuel-cells/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(err["message"].as_str().unwrap().contains("not found"));

    let (status, err) = send_json(&app, "GET", "/api/fuel-cells/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "id");
}

#[tokio::test]
async fn create_fuel_cell_validates() {
    let app = app();
    let spec = json!({
        "manufacturer": "Acme",
        "model": "Rack-3",
        "type": "PEMFC",
        "ratedPowerKw": 3.0,
        "outputVoltageV": 48,
        "fuelConsumptionPerKwh": 0.06,
        "efficiency": 52
    });
    let (status, created) = send_json(&app, "POST", "/api/fuel-cells", Some(spec.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 16);
    assert_eq!(created["parasiticLoss"], 0.08);

    let mut bad = spec;
    bad["model"] = json!("Rack-4");
    bad["efficiency"] = json!(0);
    let (status, err) = send_json(&app, "POST", "/api/fuel-cells", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "efficiency");

    let (status, _) = send_json(&app, "POST", "/api/fuel-cells", Some(json!({"model": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calculate_returns_rounded_report() {
    let app = app();
    let req = json!({"loadKw": 5, "fuelCellId": 1, "autonomyHours": 8});
    let (status, report) = send_json(&app, "POST", "/api/calculate", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["batteryCapacityKwh"], 50.0);
    assert_eq!(report["batteryCapacityAh"], 1041.7);
    assert_eq!(report["batteryStrings"], 7);
    assert_eq!(report["requiredStackCount"], 2);
    assert_eq!(report["paybackStatus"], "diesel-favorable");
    assert!(report["paybackYears"].is_null());
}

#[tokio::test]
async fn calculate_errors() {
    let app = app();

    let missing = json!({"fuelCellId": 1, "autonomyHours": 8});
    let (status, err) = send_json(&app, "POST", "/api/calculate", Some(missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "loadKw");

    let negative = json!({"loadKw": -1, "fuelCellId": 1, "autonomyHours": 8});
    let (status, err) = send_json(&app, "POST", "/api/calculate", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "loadKw");

    let unknown = json!({"loadKw": 5, "fuelCellId": 404, "autonomyHours": 8});
    let (status, _) = send_json(&app, "POST", "/api/calculate", Some(unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/calculate", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calculate_rejects_inputs_that_overflow() {
    let app = app();

    let huge_load = json!({"loadKw": 1e308, "fuelCellId": 1, "autonomyHours": 8});
    let (status, err) = send_json(&app, "POST", "/api/calculate", Some(huge_load)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].is_string());

    let tiny_generator = json!({
        "loadKw": 5,
        "fuelCellId": 1,
        "autonomyHours": 8,
        "dgCapacityKva": 1e-310
    });
    let (status, err) = send_json(&app, "POST", "/api/calculate", Some(tiny_generator)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "dgLoadFactor");
}

#[tokio::test]
async fn calculate_rejects_uncountable_stacks() {
    let app = app();
    let micro = json!({
        "manufacturer": "Acme",
        "model": "Micro-1",
        "type": "PEMFC",
        "ratedPowerKw": 1e-9,
        "outputVoltageV": 48,
        "fuelConsumptionPerKwh": 0.06,
        "efficiency": 50
    });
    let (status, created) = send_json(&app, "POST", "/api/fuel-cells", Some(micro)).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = json!({"loadKw": 5, "fuelCellId": created["id"], "autonomyHours": 8});
    let (status, err) = send_json(&app, "POST", "/api/calculate", Some(req)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap().contains("stack count"));
}

#[tokio::test]
async fn duplicate_fuel_cell_is_bad_request() {
    let app = app();
    let (_, existing) = send_json(&app, "GET", "/api/fuel-cells/1", None).await;
    let mut copy = existing.clone();
    copy.as_object_mut().unwrap().remove("id");
    copy["model"] = json!(existing["model"].as_str().unwrap().to_lowercase());

    let (status, err) = send_json(&app, "POST", "/api/fuel-cells", Some(copy)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap().contains("Duplicate entry"));
}

#[tokio::test]
async fn project_lifecycle() {
    let app = app();
    let new = json!({
        "name": "Port Harcourt BTS",
        "latitude": 4.8,
        "longitude": 7.0,
        "selectedFuelCellId": 1,
        "loadKw": 5,
        "autonomyHours": 8
    });
    let (status, created) = send_json(&app, "POST", "/api/projects", Some(new)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_u64().unwrap();
    assert_eq!(created["batteryCapacityKwh"], 50.0);
    assert_eq!(created["systemVoltage"], 48.0);
    assert!(created["createdAt"].is_string());
    assert_eq!(created["inputFingerprint"].as_str().unwrap().len(), 64);

    let (status, list) = send_json(&app, "GET", "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, portfolio) = send_json(&app, "GET", "/api/portfolio", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["projectCount"], 1);

    let (status, csv) = send(&app, "GET", &format!("/api/projects/{id}/report.csv"), None).await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.contains("Port Harcourt BTS"));

    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/api/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn project_with_bad_coordinates() {
    let app = app();
    let new = json!({"name": "X", "latitude": 120, "loadKw": 1, "autonomyHours": 1});
    let (status, err) = send_json(&app, "POST", "/api/projects", Some(new)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "latitude");
}

#[tokio::test]
async fn asset_analysis() {
    let app = app();
    let req = json!({"loadFactor": 20, "age": 12, "ratedPower": 100, "runningHours": 500});
    let (status, body) = send_json(&app, "POST", "/api/asset-analysis", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "replace");
    assert_eq!(body["metrics"]["efficiencyLoss"], 25.0);
}
