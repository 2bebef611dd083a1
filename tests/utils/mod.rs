//! Test utilities for standing up a local API double.
//!
//! The server records every request it receives and answers through a
//! swappable handler, so tests can assert both what the binary sent and how
//! it reported the canned response.

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::{
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler invoked for each incoming request.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send>>>;

/// Requests seen by the server, oldest first.
pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// A request as received by the API double.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RecordedRequest {
    fn from_request(req: &Request<Bytes>) -> Self {
        Self {
            method: req.method().as_str().to_string(),
            path: req.uri().path().to_string(),
            headers: req
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
            body: req.body().clone(),
        }
    }

    /// First value of header `name` (lower case).
    #[allow(dead_code, reason = "used only in some tests")]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Handle returned by [`start_api`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// A running API double.
pub struct MockApi {
    pub addr: SocketAddr,
    pub handler: Handler,
    pub requests: RequestLog,
    pub shutdown: ShutdownHandle,
}

impl MockApi {
    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Answer every request with `status`, an optional content type and `body`.
    pub fn respond_with(&self, status: u16, content_type: Option<&'static str>, body: impl Into<String>) {
        let body = body.into();
        *self.handler.lock().expect("lock handler") = Box::new(move |_req| {
            let mut builder = Response::builder().status(status);
            if let Some(ct) = content_type {
                builder = builder.header("Content-Type", ct);
            }
            builder
                .body(Full::from(body.clone()))
                .expect("build response")
        });
    }

    /// Snapshot of the requests received so far.
    #[allow(dead_code, reason = "used only in some tests")]
    pub fn received(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock request log").clone()
    }
}

/// Start an HTTP server forwarding requests to a shared handler.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
///
/// # Panics
///
/// Panics if the default response cannot be constructed.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_api() -> Result<MockApi, std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::from("No handler"))
            .expect("failed to create default response")
    })));
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let handler_clone = handler.clone();
    let requests_clone = requests.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let log = requests_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            let log = log.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body
                                    .collect()
                                    .await
                                    .map(http_body_util::Collected::to_bytes)
                                    .unwrap_or_default();
                                let req = Request::from_parts(parts, bytes);
                                log.lock()
                                    .expect("lock request log")
                                    .push(RecordedRequest::from_request(&req));
                                let resp = {
                                    let mut f = h.lock().expect("lock handler in service");
                                    (f)(&req)
                                };
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok(MockApi {
        addr,
        handler,
        requests,
        shutdown: ShutdownHandle { join, stop: tx },
    })
}

/// An address nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be reserved.
#[allow(dead_code, reason = "used only in some tests")]
pub fn dead_address() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    listener.local_addr().expect("local addr")
}

/// Create an `api-lie-detector` command isolated from proxy settings.
///
/// # Panics
///
/// Panics if the binary cannot be located.
#[allow(clippy::must_use_candidate, reason = "helper for integration tests")]
pub fn detector_cmd() -> Command {
    let mut cmd = Command::cargo_bin("api-lie-detector").expect("binary");
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
