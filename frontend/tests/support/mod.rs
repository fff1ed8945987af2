//! Mock CarLux backend and client wiring for end-to-end scenarios.
//!
//! The backend is a real Actix server on an ephemeral port. Every request
//! is recorded, then answered from a fixed `(method, path)` route table;
//! unknown routes get a 404.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use carlux_frontend::domain::SupportPhone;
use carlux_frontend::domain::ports::{RecordingNavigator, RecordingNotifier};
use carlux_frontend::inbound::{ViewBinder, ViewPorts};
use carlux_frontend::outbound::document::MemoryDocument;
use carlux_frontend::outbound::geolocation::StaticGeolocator;
use carlux_frontend::outbound::http::ReqwestTransport;
use carlux_frontend::outbound::local_storage::JsonFileSessionStore;
use reqwest::Url;
use serde_json::Value;
use tempfile::TempDir;

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
}

struct BackendState {
    routes: HashMap<(Method, String), (u16, Value)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Route table entry: `(method, path)` answered with `(status, body)`.
pub type Route = ((Method, String), (u16, Value));

/// Running mock backend.
pub struct MockBackend {
    base_url: Url,
    handle: ServerHandle,
    state: Arc<BackendState>,
}

/// Canned answer for one route.
pub fn route(method: Method, path: &str, status: u16, body: Value) -> Route {
    ((method, path.to_owned()), (status, body))
}

async fn answer(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<BackendState>,
) -> HttpResponse {
    let path = request.path().to_owned();
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: request.method().to_string(),
            path: path.clone(),
            query: request.query_string().to_owned(),
            body: serde_json::from_slice(&body).ok(),
        });

    match state.routes.get(&(request.method().clone(), path)) {
        Some((status, payload)) => {
            let code = actix_web::http::StatusCode::from_u16(*status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(code).json(payload)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "no such route" })),
    }
}

impl MockBackend {
    /// Start a backend answering `routes`. Must run inside an Actix system.
    pub fn start(routes: impl IntoIterator<Item = Route>) -> Result<Self, String> {
        let state = web::Data::new(BackendState {
            routes: routes.into_iter().collect(),
            requests: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
        let addr = listener.local_addr().map_err(|err| err.to_string())?;

        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .default_service(web::to(answer))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .map_err(|err| err.to_string())?
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        let base_url = Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())?;
        Ok(Self {
            base_url,
            handle,
            state: state.into_inner(),
        })
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the server and wait for it to shut down.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Client wired to a mock backend through the native adapters.
pub struct Client {
    pub binder: ViewBinder,
    pub sessions: Arc<JsonFileSessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub page: Arc<MemoryDocument>,
    _session_dir: TempDir,
}

impl Client {
    /// Build a client with an empty session directory.
    pub fn against(backend: &MockBackend) -> Self {
        let session_dir = tempfile::tempdir().expect("session dir");
        let sessions =
            Arc::new(JsonFileSessionStore::open(session_dir.path()).expect("open session store"));
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let page = Arc::new(MemoryDocument::standard());
        let transport =
            ReqwestTransport::new(backend.base_url.clone()).expect("build HTTP transport");
        let binder = ViewBinder::new(
            Arc::new(transport),
            ViewPorts {
                sessions: sessions.clone(),
                navigator: navigator.clone(),
                notifier: notifier.clone(),
                page: page.clone(),
                geolocator: Arc::new(StaticGeolocator::default()),
            },
            SupportPhone::default(),
        );
        Self {
            binder,
            sessions,
            navigator,
            notifier,
            page,
            _session_dir: session_dir,
        }
    }
}
