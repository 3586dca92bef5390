// tests/photos_api.rs
// Photo uploads against the directory-backed object store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use kennel_backend::api::http::router::app_router;
use kennel_backend::media::{DirObjectStore, PassthroughPipeline};
use kennel_backend::state::AppState;

const BOUNDARY: &str = "kennel-test-boundary";

fn test_app(dir: &TempDir) -> Router {
    let photos = Arc::new(DirObjectStore::new(
        dir.path().join("media"),
        "http://media.local",
    ));
    let state = Arc::new(AppState::new(
        &dir.path().join("data"),
        photos,
        Arc::new(PassthroughPipeline),
    ));
    app_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_upload(uri: &str, field: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"photo.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_cage_photo_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(multipart_upload("/cage/3/upload", "image", b"jpeg-bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["originalUrl"], "http://media.local/3.jpeg");
    assert_eq!(body["thumbnailUrl"], "http://media.local/3_thumb.jpeg");

    let media = dir.path().join("media");
    assert_eq!(std::fs::read(media.join("3.jpeg")).unwrap(), b"jpeg-bytes");
    assert!(media.join("3_thumb.jpeg").exists());
}

#[tokio::test]
async fn test_dog_photo_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(multipart_upload(
            "/cage/3/dogs/abc-123/photo",
            "image",
            b"dog-jpeg",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["originalUrl"],
        "http://media.local/cage_3_dog_abc-123.jpeg"
    );

    let media = dir.path().join("media");
    assert!(media.join("cage_3_dog_abc-123.jpeg").exists());
    assert!(media.join("cage_3_dog_abc-123_thumb.jpeg").exists());
}

#[tokio::test]
async fn test_upload_requires_image_field() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(multipart_upload("/cage/3/upload", "attachment", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("image"));
}

#[tokio::test]
async fn test_upload_to_out_of_range_cage_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(multipart_upload("/cage/99/upload", "image", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
