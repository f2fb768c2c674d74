use crate::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Build a CORS layer from config.
pub fn build_cors_layer(cors_cfg: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cors_cfg.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    let methods: Vec<Method> = cors_cfg
        .allowed_methods
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    if !methods.is_empty() {
        layer = layer.allow_methods(methods);
    }

    let headers: Vec<HeaderName> = cors_cfg
        .allowed_headers
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    if !headers.is_empty() {
        layer = layer.allow_headers(headers);
    }

    let exposed: Vec<HeaderName> = cors_cfg
        .exposed_headers
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    if !exposed.is_empty() {
        layer = layer.expose_headers(exposed);
    }

    // tower-http panics on credentials combined with a wildcard origin.
    if cors_cfg.allow_credentials && !cors_cfg.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_credentials(true);
    }

    if cors_cfg.max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cors_cfg.max_age_seconds));
    }

    layer
}
