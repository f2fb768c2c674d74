pub mod cors;
pub mod handlers;
pub mod response;
pub mod server;

use crate::config::CorsConfig;
use crate::utils::telemetry;
use axum::{
    http::{HeaderName, Request, Response},
    routing::{get, post},
    Router,
};
use handlers::{InputState, OrchestrationState};
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{field::Empty, Span};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Router of the orchestration service: `GET /?cep=...`.
pub fn orchestration_router(state: OrchestrationState, cors: &CorsConfig) -> Router {
    let router = Router::new()
        .route("/", get(handlers::get_temperatures))
        .with_state(state);
    with_middleware(router, cors)
}

/// Router of the input service: `POST /` with a JSON body.
pub fn input_router(state: InputState, cors: &CorsConfig) -> Router {
    let router = Router::new()
        .route("/", post(handlers::post_temperatures))
        .with_state(state);
    with_middleware(router, cors)
}

/// Client address as reported by a fronting proxy.
fn forwarded_client_ip<B>(req: &Request<B>) -> Option<&str> {
    let headers = req.headers();
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
        })
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}

/// Root span of one inbound request, continuing the caller's trace when the
/// request carries a `traceparent` header.
fn request_span<B>(req: &Request<B>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("n/a");

    let span = tracing::info_span!(
        parent: None,
        "http_request",
        method = %req.method(),
        uri = %req.uri().path(),
        request_id = %request_id,
        client_ip = forwarded_client_ip(req).unwrap_or("n/a"),
        otel.kind = "server",
        status = Empty,
        latency_ms = Empty,
    );

    telemetry::set_parent_from_headers(&span, req.headers());
    span
}

fn record_response<B>(res: &Response<B>, latency: Duration, span: &Span) {
    span.record("status", res.status().as_u16());
    span.record("latency_ms", latency.as_millis() as u64);
}

fn with_middleware(router: Router, cors: &CorsConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Registered innermost first; SetRequestId runs before the trace span is made.
    router
        .layer(CatchPanicLayer::new())
        .layer(cors::build_cors_layer(cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(record_response),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AddressResolver, AddressResult, GetTemperatures, WeatherProvider, WeatherSample};
    use crate::domain::cep::Cep;
    use crate::utils::error::LookupResult;
    use async_trait::async_trait;
    use axum::{body::Body, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Fixed;

    #[async_trait]
    impl AddressResolver for Fixed {
        async fn resolve(&self, _cep: &Cep) -> LookupResult<AddressResult> {
            Ok(AddressResult {
                place_name: "Curitiba".to_string(),
            })
        }
    }

    #[async_trait]
    impl WeatherProvider for Fixed {
        async fn fetch_temperature(&self, _location: &str) -> LookupResult<WeatherSample> {
            Ok(WeatherSample { celsius: 12.0 })
        }
    }

    fn router() -> Router {
        let state = OrchestrationState {
            use_case: Arc::new(GetTemperatures::new(Arc::new(Fixed), Arc::new(Fixed))),
        };
        orchestration_router(state, &CorsConfig::default())
    }

    fn get(uri: &str) -> axum::http::request::Builder {
        Request::builder().method("GET").uri(uri)
    }

    #[test]
    fn test_forwarded_client_ip() {
        let req = get("/").header("x-forwarded-for", "203.0.113.7, 10.0.0.1").body(()).unwrap();
        assert_eq!(forwarded_client_ip(&req), Some("203.0.113.7"));

        let req = get("/")
            .header("x-real-ip", "198.51.100.2")
            .header("x-forwarded-for", "203.0.113.7")
            .body(())
            .unwrap();
        assert_eq!(forwarded_client_ip(&req), Some("198.51.100.2"));

        assert_eq!(forwarded_client_ip(&get("/").body(()).unwrap()), None);
    }

    #[tokio::test]
    async fn test_response_carries_generated_request_id() {
        let response = router()
            .oneshot(get("/?cep=80010000").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let response = router()
            .oneshot(
                get("/?cep=80010000")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .header(
                        telemetry::TRACEPARENT,
                        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
    }
}
