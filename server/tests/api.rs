//! HTTP-level tests for the inference API
//!
//! Exercises the router end to end with `tower::ServiceExt::oneshot`,
//! using an untrained model where a loaded model is required.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use leafscan::backend::{default_device, DefaultBackend};
use leafscan::model::{LeafClassifier, LeafClassifierConfig};
use leafscan::{DiseaseDatabase, Predictor, CLASS_NAMES};
use leafscan_server::state::AppState;

const BOUNDARY: &str = "leafscan-test-boundary";

fn sample_database() -> DiseaseDatabase {
    DiseaseDatabase::from_json(include_str!("../../diseases.json")).unwrap()
}

fn state_without_model() -> Arc<AppState> {
    Arc::new(AppState::new(None, sample_database()))
}

fn state_with_model() -> Arc<AppState> {
    let device = default_device();
    let config = LeafClassifierConfig::new();
    let model = LeafClassifier::<DefaultBackend>::new(&config, &device);
    let predictor = Predictor::from_model(model, device).unwrap();
    Arc::new(AppState::new(Some(predictor), sample_database()))
}

fn multipart_body(
    field_name: &str,
    filename: Option<&str>,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    let disposition = match filename {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{name}\"\r\n"
        ),
        None => format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n"),
    };
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(64, 64));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[tokio::test]
async fn health_reports_model_not_loaded() {
    let app = leafscan_server::app(state_without_model());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], false);
    assert_eq!(json["disease_database_loaded"], true);
    assert_eq!(json["total_classes"], 38);
}

#[tokio::test]
async fn health_reports_empty_database() {
    let state = Arc::new(AppState::new(None, DiseaseDatabase::default()));
    let app = leafscan_server::app(state);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["disease_database_loaded"], false);
}

#[tokio::test]
async fn predict_without_model_is_500() {
    let app = leafscan_server::app(state_without_model());
    let body = multipart_body("file", Some("leaf.png"), "image/png", &sample_png());
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Model not loaded");
}

#[tokio::test]
async fn predict_rejects_bad_extension() {
    let app = leafscan_server::app(state_with_model());
    let body = multipart_body("file", Some("notes.txt"), "text/plain", b"hello");
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Invalid file type. Use JPG, PNG, or GIF");
}

#[tokio::test]
async fn predict_rejects_empty_filename() {
    let app = leafscan_server::app(state_with_model());
    let body = multipart_body("file", Some(""), "image/png", &sample_png());
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Empty filename");
}

#[tokio::test]
async fn predict_requires_file_field() {
    let app = leafscan_server::app(state_with_model());
    let body = multipart_body("other", Some("leaf.png"), "image/png", &sample_png());
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn predict_reports_undecodable_image() {
    let app = leafscan_server::app(state_with_model());
    let body = multipart_body("file", Some("leaf.png"), "image/png", b"not a real png");
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Error processing image");
}

#[tokio::test]
async fn predict_happy_path() {
    let app = leafscan_server::app(state_with_model());
    let body = multipart_body("file", Some("leaf.png"), "image/png", &sample_png());
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    assert_eq!(json["success"], true);
    let predicted = json["predicted_class"].as_str().unwrap();
    assert!(CLASS_NAMES.contains(&predicted));

    let confidence = json["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));

    let status = json["health_status"].as_str().unwrap();
    assert!(
        ["Healthy", "Mild Disease", "Critical", "Needs Further Analysis"].contains(&status)
    );

    // Every class has a database entry, so the join is never the placeholder
    assert!(json["disease_name"].as_str().unwrap() != "Unknown Disease");
    assert!(json["causes"].as_array().unwrap().len() > 0);
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let app = leafscan_server::app(state_with_model());
    let big = vec![0u8; leafscan_server::MAX_UPLOAD_BYTES + 1024];
    let body = multipart_body("file", Some("leaf.png"), "image/png", &big);
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(json["error"], "File too large. Maximum size is 10MB");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = leafscan_server::app(state_without_model());
    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Endpoint not found");
}

#[tokio::test]
async fn index_page_is_served() {
    let app = leafscan_server::app(state_without_model());
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("<html"));
    assert!(page.contains("/predict"));
}
