use std::future::Future;
use std::io::Write;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Local;
use log::{debug, info, warn};
use tokio::net::TcpListener;

use crate::payload;
use crate::report::Report;

/// Body sent back for every accepted POST, whatever it contained.
pub const ACKNOWLEDGMENT: &str = r#"{"status": "received"}"#;

/// POST on any path goes to the webhook handler. Other methods get axum's 405.
/// Bodies of any size are read, so every well-formed POST is acknowledged.
pub fn router() -> Router {
    Router::new()
        .route("/", post(receive_webhook))
        .route("/*path", post(receive_webhook))
        .layer(DefaultBodyLimit::disable())
}

/// Serves webhooks on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Webhook receiver shut down");
    Ok(())
}

async fn receive_webhook(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    debug!(
        "{} {} ({} bytes, user agent {:?})",
        method,
        uri,
        body.len(),
        headers.get(header::USER_AGENT)
    );

    let mut stdout = std::io::stdout().lock();
    handle_webhook(&mut stdout, &headers, &body)
}

/// Decodes one webhook body, writes its report to `out` and builds the response.
fn handle_webhook(out: &mut impl Write, headers: &HeaderMap, body: &[u8]) -> Response {
    let declared = match declared_length(headers) {
        Ok(length) => length,
        Err(status) => {
            debug!("Webhook rejected: {}", status);
            return status.into_response();
        }
    };
    let body = &body[..declared.min(body.len())];

    let outcome = payload::decode(body);
    if let Err(e) = &outcome {
        debug!("Failed to decode webhook body: {}", e);
    }

    // 一次性写出整个报告，避免并发请求的输出交错
    let report = Report::new(&outcome, body, Local::now());
    if let Err(e) = write!(out, "{report}").and_then(|_| out.flush()) {
        warn!("Failed to write webhook report: {}", e);
    }

    acknowledge()
}

fn declared_length(headers: &HeaderMap) -> Result<usize, StatusCode> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(StatusCode::LENGTH_REQUIRED)?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or(StatusCode::BAD_REQUEST)
}

fn acknowledge() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        ACKNOWLEDGMENT,
    )
        .into_response()
}
