//! HTTP endpoint serving the exposition output.
//!
//! Each request to the metrics path runs one scrape. `/health` and `/healthz`
//! answer `OK` without touching the ecobee API.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::exposition::{self, PrometheusExporter};

/// Bind `addr` and serve until the runtime shuts down.
pub async fn run_server(
    addr: SocketAddr,
    metrics_path: String,
    exporter: Arc<PrometheusExporter>,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, path = %metrics_path, "serving metrics");
    serve(listener, metrics_path, exporter).await
}

/// Accept connections on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    metrics_path: String,
    exporter: Arc<PrometheusExporter>,
) -> std::io::Result<()> {
    let metrics_path: Arc<str> = metrics_path.into();

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);

        let metrics_path = metrics_path.clone();
        let exporter = exporter.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let metrics_path = metrics_path.clone();
                let exporter = exporter.clone();

                async move { handle_request(req, &metrics_path, &exporter).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!(peer = %peer, error = %e, "connection error");
            }
        });
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    metrics_path: &str,
    exporter: &PrometheusExporter,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();
    debug!(method = %req.method(), path, "request");

    if path == metrics_path {
        let body = exporter.render().await;
        Ok(text_response(StatusCode::OK, exposition::CONTENT_TYPE, body))
    } else if path == "/health" || path == "/healthz" {
        Ok(text_response(StatusCode::OK, "text/plain", "OK"))
    } else {
        Ok(text_response(StatusCode::NOT_FOUND, "text/plain", "Not Found"))
    }
}

fn text_response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
