//! HTTP handlers for the two services.
//!
//! Handlers only decode the request, call the use case and turn its outcome
//! into a [`JsonResponse`]. Malformed requests never reach the use case.

use crate::core::{ForwardTemperatures, GetTemperatures};
use crate::web::response::JsonResponse;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// State of the orchestration (two-hop) service.
#[derive(Clone)]
pub struct OrchestrationState {
    pub use_case: Arc<GetTemperatures>,
}

/// State of the input (single-hop) service.
#[derive(Clone)]
pub struct InputState {
    pub use_case: Arc<ForwardTemperatures>,
}

#[derive(Debug, Deserialize)]
pub struct CepQuery {
    // A missing parameter is an empty CEP, which fails validation with 422.
    #[serde(default)]
    pub cep: String,
}

#[derive(Debug, Deserialize)]
pub struct CepInput {
    #[serde(default)]
    pub cep: String,
}

/// GET /?cep=<raw>
pub async fn get_temperatures(
    State(state): State<OrchestrationState>,
    query: Result<Query<CepQuery>, QueryRejection>,
) -> JsonResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::debug!("Rejected query string: {}", rejection);
            return JsonResponse::failure(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let outcome = state.use_case.execute(&query.cep).await;
    if let Err(err) = &outcome {
        tracing::info!(kind = ?err.kind(), "Temperature lookup failed: {}", err);
    }

    outcome.into()
}

/// POST / with `{"cep": "<raw>"}`
pub async fn post_temperatures(
    State(state): State<InputState>,
    payload: Result<Json<CepInput>, JsonRejection>,
) -> JsonResponse {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            return JsonResponse::failure(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let outcome = state.use_case.execute(&input.cep).await;
    if let Err(err) = &outcome {
        tracing::info!(kind = ?err.kind(), "Temperature lookup failed: {}", err);
    }

    outcome.into()
}
