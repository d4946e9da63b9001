use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, FileInfo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.to_string())
        .unwrap()
}

fn upload_request(uri: &str, filename: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("filename", filename)
        .body(body.to_string())
        .unwrap()
}

// --- fixed responses ---

#[tokio::test]
async fn hello_returns_text() {
    let resp = app().oneshot(request("GET", "/hello", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "hello");
}

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app().oneshot(request("DELETE", "/status/404", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app().oneshot(request("GET", "/status/503", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// --- redirects ---

#[tokio::test]
async fn redirect_chain_counts_down() {
    let resp = app().oneshot(request("GET", "/redirect/2", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[http::header::LOCATION], "/redirect/1");

    let resp = app().oneshot(request("GET", "/redirect/0", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "hello");
}

#[tokio::test]
async fn loop_redirects_to_itself() {
    let resp = app().oneshot(request("HEAD", "/loop", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[http::header::LOCATION], "/loop");
}

#[tokio::test]
async fn legacy_upload_keeps_method() {
    let resp = app().oneshot(request("POST", "/legacy/files", "x")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[http::header::LOCATION], "/files");
}

// --- echo ---

#[tokio::test]
async fn echo_reports_content_length_and_auth() {
    let req = Request::builder()
        .method("POST")
        .uri("/echo")
        .header(http::header::CONTENT_LENGTH, "7")
        .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(r#"{"a":1}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()["x-received-content-length"], "7");
    assert_eq!(resp.headers()["x-received-authorization"], "Basic dXNlcjpwYXNz");
    assert_eq!(resp.headers()["x-received-bytes"], "7");
    assert_eq!(body_bytes(resp).await, r#"{"a":1}"#);
}

#[tokio::test]
async fn echo_put_returns_200() {
    let resp = app().oneshot(request("PUT", "/echo", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- files ---

#[tokio::test]
async fn upload_then_download() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(upload_request("/files", "/tmp/notes.txt", "some notes"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let info: FileInfo = body_json(resp).await;
    assert_eq!(info.filename, "/tmp/notes.txt");
    assert_eq!(info.size, 10);

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/files/{}", info.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "some notes");

    let resp = app
        .oneshot(request("GET", &format!("/legacy/files/{}", info.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        resp.headers()[http::header::LOCATION],
        format!("/files/{}", info.id).as_str()
    );
}

#[tokio::test]
async fn head_on_existing_file_has_no_body() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request("/files", "a.bin", "abc"))
        .await
        .unwrap();
    let info: FileInfo = body_json(resp).await;

    let resp = app
        .oneshot(request("HEAD", &format!("/files/{}", info.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn download_missing_file_returns_404() {
    let id = uuid::Uuid::new_v4();
    let resp = app()
        .oneshot(request("GET", &format!("/files/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_file_then_delete_again() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request("/files", "gone.txt", "x"))
        .await
        .unwrap();
    let info: FileInfo = body_json(resp).await;
    let uri = format!("/files/{}", info.id);

    let resp = app.clone().oneshot(request("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.oneshot(request("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_file_id_is_rejected() {
    let resp = app()
        .oneshot(request("GET", "/files/not-a-uuid", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
