//! A scriptable stand-in for the records API, served on a random local port.

use crate::{config::ApiConfig, state::RegistrarState};
use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;

const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    /// path relative to the api base, still percent-encoded
    pub path: String,
    pub body: Option<Value>,
}

type Canned = HashMap<(Method, String), (StatusCode, Value)>;

#[derive(Clone, Default)]
pub struct StubApi {
    responses: Arc<Mutex<Canned>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubApi {
    pub fn respond(self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Starts serving and returns the base url to configure the client with.
    pub async fn serve(&self) -> String {
        let app = Router::new().fallback(stub_handler).with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}{API_PREFIX}")
    }

    pub async fn state(&self) -> RegistrarState {
        let base_url = self.serve().await;
        RegistrarState::new(&ApiConfig::from_parts(&base_url, None).unwrap()).unwrap()
    }
}

async fn stub_handler(
    State(stub): State<StubApi>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let body = serde_json::from_slice(&body).ok();

    stub.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    let canned = stub.responses.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some((status, body)) => (status, axum::Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"mensagem": "not stubbed"})),
        )
            .into_response(),
    }
}

/// Sends a urlencoded form (or a bare GET) through the app router.
pub async fn send_form(
    app: &Router,
    method: Method,
    uri: &str,
    form: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            builder = builder.header("content-type", "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
