//! Cross-origin policy.
//!
//! - `CORS_ALLOWED_ORIGINS` set: only those origins, in every environment.
//! - Unset in development: the request's own origin is echoed back.
//! - Unset in production: no cross-origin access.
//!
//! Credentials are allowed, so origins, methods and headers are always
//! explicit lists (never `*`).

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

const PREFLIGHT_MAX_AGE: std::time::Duration = std::time::Duration::from_secs(10 * 60);

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(config))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id])
        .max_age(PREFLIGHT_MAX_AGE);

    router.layer(cors)
}

fn allow_origin(config: &Config) -> AllowOrigin {
    if config.cors_allowed_origins.is_empty() {
        if config.app_env.is_production() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; cross-origin requests are refused");
            return AllowOrigin::list([]);
        }
        return AllowOrigin::mirror_request();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
