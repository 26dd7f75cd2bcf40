//! Shared helpers for client integration tests
//!
//! `ScriptedServer` is a real HTTP server on a random local port that records
//! every request it receives and answers from a queue of canned replies.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use kconnect_client::{ClientConfig, ConnectClient, RetryPolicy};
use tokio::net::TcpListener;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// One request as seen by the server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path exactly as sent, still percent-encoded
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<(u16, String)>,
    fallback: Option<(u16, String)>,
    requests: Vec<Recorded>,
}

#[derive(Clone)]
pub struct ScriptedServer {
    addr: SocketAddr,
    script: Arc<Mutex<Script>>,
}

impl ScriptedServer {
    pub async fn start() -> Self {
        let script = Arc::new(Mutex::new(Script::default()));
        let app = Router::new().fallback(respond).with_state(script.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        Self { addr, script }
    }

    /// host:port the server listens on
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Queue a reply for the next unanswered request
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back((status, body.to_string()));
        self
    }

    /// Reply used once the queue is empty
    pub fn reply_always(&self, status: u16, body: &str) -> &Self {
        self.script.lock().unwrap().fallback = Some((status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn attempts(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    /// The single request received; fails if there was not exactly one
    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }

    /// Client bound to this server with a short retry wait
    pub fn client(&self) -> ConnectClient {
        ConnectClient::with_config(fast_config(&self.address())).unwrap()
    }
}

async fn respond(
    State(script): State<Arc<Mutex<Script>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut script = script.lock().unwrap();
    script.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let next = script.replies.pop_front();
    let (status, body) = match next {
        Some(reply) => reply,
        None => script
            .fallback
            .clone()
            .unwrap_or((500, "no reply scripted".to_string())),
    };

    (StatusCode::from_u16(status).unwrap(), body).into_response()
}

/// Default configuration with a short retry wait so retry tests stay fast
pub fn fast_config(address: &str) -> ClientConfig {
    ClientConfig::new(address).with_retry(RetryPolicy::default().with_wait(Duration::from_millis(5)))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kconnect_client=debug,kconnect_stub=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// An event emitted by the client crate, with the spans it was recorded in
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    /// Other fields rendered as `name=value`
    pub fields: String,
    /// Names of the enclosing spans, outermost first
    pub spans: Vec<String>,
}

/// Layer that records every `kconnect_client` event
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("kconnect_client") {
            return;
        }

        let spans = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name().to_string()).collect())
            .unwrap_or_default();

        let mut visitor = FieldText::default();
        event.record(&mut visitor);

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
            spans,
        });
    }
}

#[derive(Default)]
struct FieldText {
    message: String,
    fields: String,
}

impl Visit for FieldText {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, "{}={:?} ", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, "{}={} ", field.name(), value);
        }
    }
}
