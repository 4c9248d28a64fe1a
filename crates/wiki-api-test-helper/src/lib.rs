//! Stands in for a wiki so the client can be tested without the network.
//!
//! Each [`StubWiki`] listens on its own random port, answers every API
//! request with the same canned [`StubResponse`] and records what it received.

#![warn(unused_crate_dependencies)]

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::net::TcpListener;
use std::ops::Deref;
use std::sync::{Arc, LazyLock, Mutex};
use uuid::Uuid;
use wiki_shared::{
    const_config::path::PATH_API,
    site::SiteUrl,
    telemetry::{self, get_subscriber, init_subscriber},
};

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

/// What the stub answers with
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok<S: Into<String>>(body: S) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub form: HashMap<String, String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct StubState {
    response: StubResponse,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

pub struct StubWiki {
    pub address: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl Debug for StubWiki {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubWiki")
            .field("address", &self.address)
            .finish()
    }
}

pub struct TestApp<C> {
    pub stub: StubWiki,
    pub core_client: C,
}

impl<C> TestApp<C> {
    pub fn site(&self) -> SiteUrl {
        self.stub.site()
    }
}

/// Starts a stub wiki in the background and builds the client under test
pub async fn spawn_app<C, F>(response: StubResponse, build_client: F) -> TestApp<C>
where
    F: FnOnce() -> C,
{
    start_tracing();
    TestApp {
        stub: StubWiki::spawn(response).await,
        core_client: build_client(),
    }
}

impl StubWiki {
    pub async fn spawn(response: StubResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
        let port = listener
            .local_addr()
            .expect("failed to get local address")
            .port();
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            response,
            received: Arc::clone(&received),
        });
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route(PATH_API.path, web::post().to(api))
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen on stub listener")
        .run();
        // Dropped with the test runtime
        tokio::spawn(server);
        Self {
            address: format!("http://127.0.0.1:{port}"),
            received,
        }
    }

    pub fn site(&self) -> SiteUrl {
        SiteUrl::new(self.address.clone())
    }

    pub fn received_requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().expect("mutex poisoned").clone()
    }
}

async fn api(
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
    state: web::Data<StubState>,
) -> HttpResponse {
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    state
        .received
        .lock()
        .expect("mutex poisoned")
        .push(ReceivedRequest {
            form: form.into_inner(),
            user_agent,
        });
    let status = StatusCode::from_u16(state.response.status).expect("invalid stub status code");
    HttpResponse::build(status)
        .content_type("application/json")
        .body(state.response.body.clone())
}

/// Returns a site that refuses connections
pub fn unreachable_site() -> SiteUrl {
    start_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    drop(listener);
    SiteUrl::new(format!("http://127.0.0.1:{port}"))
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}
