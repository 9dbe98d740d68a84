//! Transport-level middleware applied to every route.
//!
//! - `x-request-id` generation + propagation
//! - Access log (TraceLayer)
//! - Body size limit → 413 `PAYLOAD_TOO_LARGE`
//! - Global timeout → 408 `REQUEST_TIMEOUT`
//!
//! Rejections produced here use the same `{ success: false, error, code }`
//! body as handler errors.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy)]
pub struct TransportLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl From<&Config> for TransportLimits {
    fn from(config: &Config) -> Self {
        Self {
            body_limit_bytes: config.body_limit_bytes,
            request_timeout: config.request_timeout,
        }
    }
}

pub fn apply(router: Router, limits: TransportLimits) -> Router {
    let request_id_header = header::HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(map_response(render_oversized_body))
        .layer(HandleErrorLayer::new(render_transport_error))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

async fn render_transport_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        AppError::RequestTimeout
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        AppError::Internal
    }
}

// Both the body-limit layer and axum's body extractors answer 413 with a
// plain-text body; re-render it, keeping the other response headers.
async fn render_oversized_body(res: Response) -> Response {
    if res.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json(res.headers()) {
        return res;
    }

    let (parts, _) = res.into_parts();
    let mut rendered = AppError::PayloadTooLarge.into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
