//! In-process mock of the backend REST API.
//!
//! Unrouted GETs answer `[]`; unrouted writes answer 200 with an empty
//! body. Every request is recorded so tests can assert on what was (or
//! was not) sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use atelier_client::desk::DeskContext;
use atelier_client::{ClientConfig, HttpClient};
use atelier_core::workflow::{Actor, ActorRole};
use atelier_shared::types::EmployeeId;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Routes {
    answers: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
    calls: Mutex<Vec<Call>>,
}

/// A running mock backend.
pub struct MockBackend {
    pub url: String,
    routes: Arc<Routes>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let routes = Arc::new(Routes::default());
        let app = Router::new()
            .fallback(answer)
            .with_state(Arc::clone(&routes));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            url: format!("http://{addr}"),
            routes,
        }
    }

    /// Answers `method path` with `status` and `body`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.routes.answers.lock().unwrap().insert(
            (method, path.to_string()),
            (StatusCode::from_u16(status).unwrap(), body),
        );
        self
    }

    pub fn get(&self, path: &str, body: Value) -> &Self {
        self.on(Method::GET, path, 200, body)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.routes.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &Method, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == *method && c.path == path)
            .collect()
    }

    /// Requests other than GET.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != Method::GET)
            .collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url.clone()).with_timeout(5)
    }

    pub fn desk(&self, employee: i64, role: ActorRole) -> DeskContext {
        self.desk_with(self.config(), employee, role)
    }

    pub fn desk_with(&self, config: ClientConfig, employee: i64, role: ActorRole) -> DeskContext {
        let http = HttpClient::new(&config).unwrap().with_token("test-token");
        DeskContext::new(http, Actor::new(EmployeeId(employee), role), config)
    }
}

async fn answer(
    State(routes): State<Arc<Routes>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    routes.calls.lock().unwrap().push(Call {
        method: method.clone(),
        path: path.clone(),
        body: serde_json::from_slice(&body).ok(),
    });

    let routed = routes
        .answers
        .lock()
        .unwrap()
        .get(&(method.clone(), path))
        .cloned();
    match routed {
        Some((status, value)) => (status, axum::Json(value)).into_response(),
        None if method == Method::GET => axum::Json(Value::Array(Vec::new())).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
