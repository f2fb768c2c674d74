use crate::domain::cep::Cep;
use crate::domain::model::TemperatureReport;
use crate::domain::ports::TemperatureForwarder;
use crate::utils::error::{LookupError, LookupResult, CEP_NOT_FOUND_MESSAGE, INVALID_CEP_MESSAGE};
use crate::utils::telemetry;
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde::Deserialize;

/// Envelope returned by the orchestration service.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureServiceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<TemperatureReport>,
}

/// Forwards a CEP to a temperature service that speaks the same envelope as
/// this crate's orchestration binary.
#[derive(Debug, Clone)]
pub struct TemperatureServiceClient {
    client: Client,
    url: String,
}

impl TemperatureServiceClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

/// Recovers the error kind from a failure message reported by the upstream.
///
/// Only the two exact sentinel texts are recognised; a reworded message from
/// the upstream degrades to `Upstream`.
pub fn classify_failure(message: String) -> LookupError {
    match message.as_str() {
        INVALID_CEP_MESSAGE => LookupError::InvalidCep,
        CEP_NOT_FOUND_MESSAGE => LookupError::NotFound,
        _ => LookupError::Upstream { message },
    }
}

#[async_trait]
impl TemperatureForwarder for TemperatureServiceClient {
    #[tracing::instrument(name = "TemperatureServiceClient::fetch_report", skip(self, cep), fields(cep = %cep))]
    async fn fetch_report(&self, cep: &Cep) -> LookupResult<TemperatureReport> {
        tracing::debug!("Forwarding CEP to: {}", self.url);

        // The receiving service parents its request span on this one.
        let mut headers = HeaderMap::new();
        telemetry::inject_current_context(&mut headers);

        let response = self
            .client
            .get(&self.url)
            .query(&[("cep", cep.as_str())])
            .headers(headers)
            .send()
            .await?;

        // Failures arrive as 4xx responses that still carry the envelope, so
        // the body is decoded whatever the status.
        let status = response.status();
        tracing::debug!("Temperature service response status: {}", status);

        let body = response.bytes().await?;
        let payload: TemperatureServiceResponse = serde_json::from_slice(&body).map_err(|e| {
            LookupError::upstream(format!(
                "temperature service returned status {} with unreadable body: {}",
                status, e
            ))
        })?;

        if !payload.success {
            return Err(classify_failure(payload.message));
        }

        payload
            .data
            .ok_or_else(|| LookupError::upstream("temperature service returned no data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cep::validate_digits;
    use httpmock::prelude::*;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::trace::SdkTracerProvider;
    use tracing::Instrument;
    use tracing_subscriber::layer::SubscriberExt;

    fn client_for(server: &MockServer) -> TemperatureServiceClient {
        TemperatureServiceClient::new(Client::new(), server.url("/"))
    }

    #[tokio::test]
    async fn test_fetch_report_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("cep", "12345678");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "message": "OK",
                "data": {"city": "city", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0}
            }));
        });

        let cep = validate_digits("12345678").unwrap();
        let report = client_for(&server).fetch_report(&cep).await.unwrap();

        api_mock.assert();
        assert_eq!(report.city, "city");
        assert_eq!(report.temp_k, 293.0);
    }

    #[tokio::test]
    async fn test_fetch_report_forwards_trace_context() {
        let provider = SdkTracerProvider::builder().build();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("service-input")));
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/")
                .query_param("cep", "12345678")
                .header_exists("traceparent");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "message": "OK",
                "data": {"city": "city", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0}
            }));
        });

        let cep = validate_digits("12345678").unwrap();
        let report = client_for(&server)
            .fetch_report(&cep)
            .instrument(tracing::info_span!("http_request"))
            .await;

        api_mock.assert();
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_report_reclassifies_sentinels() {
        for (status, message, expected) in [
            (422, "invalid zipcode", LookupError::InvalidCep),
            (404, "can not find zipcode", LookupError::NotFound),
            (400, "cannot find weather data", LookupError::upstream("cannot find weather data")),
        ] {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(GET).path("/");
                then.status(status)
                    .json_body(serde_json::json!({"success": false, "message": message}));
            });

            let cep = validate_digits("12345678").unwrap();
            let result = client_for(&server).fetch_report(&cep).await;

            assert_eq!(result, Err(expected));
        }
    }

    #[tokio::test]
    async fn test_fetch_report_unreadable_body_is_upstream() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(502).body("Bad Gateway");
        });

        let cep = validate_digits("12345678").unwrap();
        let err = client_for(&server).fetch_report(&cep).await.unwrap_err();

        assert!(matches!(err, LookupError::Upstream { ref message } if message.contains("502")));
    }

    #[test]
    fn test_classify_failure_is_exact_match() {
        assert_eq!(classify_failure("Invalid Zipcode".to_string()).kind(), crate::utils::error::ErrorKind::Upstream);
        assert_eq!(classify_failure("invalid zipcode".to_string()), LookupError::InvalidCep);
    }
}
