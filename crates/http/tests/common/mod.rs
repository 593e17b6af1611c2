//! In-process stand-in for the storage API
//!
//! Serves GET/PUT/DELETE on `/<zone>/<path>` from an in-memory map, checks
//! the `AccessKey` header, verifies the optional `Checksum` header, and
//! records every request it receives.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use bsc_core::checksum::checksum_bytes;
use bsc_core::StorageObject;

pub const ZONE: &str = "testzone";
pub const ACCESS_KEY: &str = "zone-password";

/// One request as seen by the fake server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub checksum: Option<String>,
    /// Absent when the body was sent chunked
    pub content_length: Option<u64>,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Vec<u8>>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct FakeStorage {
    inner: Arc<Mutex<Inner>>,
}

impl FakeStorage {
    /// Start the server on an ephemeral port and return it with its endpoint
    pub async fn spawn() -> (Self, String) {
        let fake = FakeStorage::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .fallback(handle)
            .layer(DefaultBodyLimit::disable())
            .with_state(fake.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (fake, format!("http://{addr}/"))
    }

    pub fn insert(&self, path: &str, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.objects.insert(path.to_string(), data.to_vec());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().objects.get(path).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

async fn handle(
    State(fake): State<FakeStorage>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches('/').to_string();
    let checksum = headers
        .get("Checksum")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    let mut inner = fake.inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        checksum: checksum.clone(),
        content_length,
    });

    let authorized = headers
        .get("AccessKey")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == ACCESS_KEY);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if path.contains("teapot") {
        return StatusCode::IM_A_TEAPOT.into_response();
    }

    match method {
        Method::GET if path.ends_with('/') => {
            let listing = list_directory(&inner.objects, &path);
            let json = serde_json::to_vec(&listing).unwrap();
            ([(header::CONTENT_TYPE, "application/json")], json).into_response()
        }
        Method::GET => match inner.objects.get(&path) {
            Some(data) => data.clone().into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        Method::PUT => {
            if let Some(expected) = &checksum {
                if !expected.eq_ignore_ascii_case(&checksum_bytes(&body)) {
                    return StatusCode::BAD_REQUEST.into_response();
                }
            }
            inner.objects.insert(path, body.to_vec());
            StatusCode::CREATED.into_response()
        }
        Method::DELETE => {
            let before = inner.objects.len();
            if path.ends_with('/') {
                inner.objects.retain(|key, _| !key.starts_with(&path));
            } else {
                inner.objects.remove(&path);
            }
            if inner.objects.len() == before {
                StatusCode::NOT_FOUND.into_response()
            } else {
                StatusCode::OK.into_response()
            }
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

/// Immediate children of `dir`: files, plus one entry per subdirectory
fn list_directory(objects: &BTreeMap<String, Vec<u8>>, dir: &str) -> Vec<StorageObject> {
    let timestamp: jiff::civil::DateTime = "2024-05-01T12:00:00.5".parse().unwrap();
    let mut entries: BTreeMap<String, StorageObject> = BTreeMap::new();

    for (key, data) in objects.range(dir.to_string()..) {
        let Some(rest) = key.strip_prefix(dir) else {
            break;
        };
        let (name, is_directory) = match rest.split_once('/') {
            Some((name, _)) => (name.to_string(), true),
            None => (rest.to_string(), false),
        };

        entries.entry(name.clone()).or_insert_with(|| StorageObject {
            guid: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::nil(),
            date_created: timestamp,
            last_changed: timestamp,
            storage_zone_name: ZONE.to_string(),
            storage_zone_id: 42,
            server_id: 7,
            array_number: 0,
            path: format!("/{dir}"),
            object_name: name,
            length: if is_directory { 0 } else { data.len() as u64 },
            content_type: String::new(),
            checksum: (!is_directory).then(|| checksum_bytes(data)),
            replicated_zones: None,
            is_directory,
        });
    }

    entries.into_values().collect()
}
