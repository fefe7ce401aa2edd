//! Integration tests for `HttpStore` against a mocked deck server.

use deckedit_client::{HttpStore, JsonStore};
use deckedit_common::SavePayload;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_reads_json_resource_under_json_root() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/lesson1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"concept": "C1"}])))
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    let doc = store.fetch("lesson1.json").await.unwrap();
    assert_eq!(doc, json!([{"concept": "C1"}]));
}

#[tokio::test]
async fn fetch_maps_non_success_status_to_store_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    let err = store.fetch("missing.json").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn fetch_rejects_malformed_json_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/broken.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    let err = store.fetch("broken.json").await.unwrap_err();
    assert!(err.status().is_none(), "parse failure has no status: {err}");
}

#[tokio::test]
async fn persist_posts_file_name_and_data_to_save_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/save-json"))
        .and(body_json(json!({
            "fileName": "a.json",
            "data": [{"concept": "C1-edited"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    let payload = SavePayload {
        file_name: "a.json".to_string(),
        data: json!([{"concept": "C1-edited"}]),
    };
    store.persist(&payload).await.unwrap();
}

#[tokio::test]
async fn persist_maps_server_rejection_to_store_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/save-json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Missing fileName or data"
        })))
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    let payload = SavePayload {
        file_name: "a.json".to_string(),
        data: json!([]),
    };
    let err = store.persist(&payload).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn image_probe_tolerates_missing_assets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/lesson1/1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG".to_vec()))
        .mount(&server)
        .await;

    let store = HttpStore::new(server.uri());
    assert!(store.image_available("images/lesson1/1.png").await);
    assert!(!store.image_available("images/lesson1/2.png").await);
}
