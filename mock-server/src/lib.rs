use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{any, get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Metadata returned after an upload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub id: Uuid,
    pub filename: String,
    pub size: usize,
}

#[derive(Clone, Debug)]
struct StoredFile {
    info: FileInfo,
    data: Bytes,
}

type Db = Arc<RwLock<HashMap<Uuid, StoredFile>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/hello", get(hello))
        .route("/status/{code}", any(status))
        .route("/redirect/{n}", any(redirect_chain))
        .route("/loop", any(redirect_loop))
        .route("/echo", post(echo).put(echo))
        .route("/files", post(upload_file))
        .route("/files/{id}", get(download_file).delete(delete_file))
        .route("/legacy/files", post(legacy_upload))
        .route("/legacy/files/{id}", any(legacy_file))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> &'static str {
    "hello"
}

/// Respond with the requested status code and an empty body.
async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

/// `n` relative 302 redirects down to `/redirect/0`, which answers 200.
async fn redirect_chain(Path(n): Path<u32>) -> Response {
    if n == 0 {
        return "hello".into_response();
    }
    found(&format!("/redirect/{}", n - 1))
}

async fn redirect_loop() -> Response {
    found("/loop")
}

/// Report what the client sent: length and auth in headers, body echoed.
async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Response {
    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let mut response = (status, body.clone()).into_response();
    let out = response.headers_mut();
    if let Some(length) = headers.get(header::CONTENT_LENGTH) {
        out.insert("x-received-content-length", length.clone());
    }
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        out.insert("x-received-authorization", auth.clone());
    }
    out.insert("x-received-bytes", HeaderValue::from(body.len()));
    response
}

async fn upload_file(State(db): State<Db>, headers: HeaderMap, body: Bytes) -> (StatusCode, Json<FileInfo>) {
    let filename = headers
        .get("filename")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let info = FileInfo {
        id: Uuid::new_v4(),
        filename,
        size: body.len(),
    };
    tracing::debug!(id = %info.id, size = info.size, "stored upload");
    db.write().await.insert(
        info.id,
        StoredFile {
            info: info.clone(),
            data: body,
        },
    );
    (StatusCode::CREATED, Json(info))
}

async fn download_file(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Bytes, StatusCode> {
    let files = db.read().await;
    files.get(&id).map(|f| f.data.clone()).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_file(State(db): State<Db>, Path(id): Path<Uuid>) -> StatusCode {
    let mut files = db.write().await;
    files
        .remove(&id)
        .map(|f| {
            tracing::debug!(id = %f.info.id, "deleted file");
            StatusCode::NO_CONTENT
        })
        .unwrap_or(StatusCode::NOT_FOUND)
}

/// Old upload location; 307 keeps the method and body.
async fn legacy_upload() -> Redirect {
    Redirect::temporary("/files")
}

async fn legacy_file(Path(id): Path<Uuid>) -> Redirect {
    Redirect::permanent(&format!("/files/{id}"))
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
