use super::join_url;
use crate::domain::model::WeatherSample;
use crate::domain::ports::WeatherProvider;
use crate::utils::error::{LookupError, LookupResult, WEATHER_NOT_FOUND_MESSAGE};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherApiResponse {
    pub current: CurrentWeather,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
}

/// Client for the `/v1/current.json` endpoint of WeatherAPI.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[tracing::instrument(name = "WeatherApiClient::fetch_temperature", skip(self))]
    async fn fetch_temperature(&self, location: &str) -> LookupResult<WeatherSample> {
        let url = join_url(&self.base_url, "/v1/current.json");
        tracing::debug!("Making weather request to: {} (q={})", url, location);

        // `query` percent-encodes the city name.
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("aqi", "no"),
            ])
            .send()
            .await?;

        tracing::debug!("Weather service response status: {}", response.status());
        if !response.status().is_success() {
            return Err(LookupError::upstream(WEATHER_NOT_FOUND_MESSAGE));
        }

        let payload: WeatherApiResponse = response.json().await?;
        Ok(WeatherSample {
            celsius: payload.current.temp_c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_temperature_sends_key_and_encoded_city() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/current.json")
                .query_param("key", "secret")
                .query_param("q", "São Paulo")
                .query_param("aqi", "no");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "location": {"name": "Sao Paulo"},
                    "current": {"temp_c": 21.5, "temp_f": 70.7}
                }));
        });

        let client = WeatherApiClient::new(Client::new(), server.base_url(), "secret");
        let sample = client.fetch_temperature("São Paulo").await.unwrap();

        api_mock.assert();
        assert_eq!(sample.celsius, 21.5);
    }

    #[tokio::test]
    async fn test_fetch_temperature_non_success_is_upstream() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(400)
                .json_body(serde_json::json!({"error": {"code": 1006, "message": "No matching location found."}}));
        });

        let client = WeatherApiClient::new(Client::new(), server.base_url(), "secret");
        let result = client.fetch_temperature("Atlantis").await;

        assert_eq!(result, Err(LookupError::upstream("cannot find weather data")));
    }

    #[tokio::test]
    async fn test_fetch_temperature_decode_failure_is_upstream() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/current.json");
            then.status(200).json_body(serde_json::json!({"current": {}}));
        });

        let client = WeatherApiClient::new(Client::new(), server.base_url(), "secret");
        let err = client.fetch_temperature("Recife").await.unwrap_err();

        assert_eq!(err.kind(), crate::utils::error::ErrorKind::Upstream);
    }

    #[tokio::test]
    async fn test_fetch_temperature_transport_failure_is_upstream() {
        // Nothing listens on port 9 on the test host.
        let client = WeatherApiClient::new(Client::new(), "http://127.0.0.1:9", "secret");
        let err = client.fetch_temperature("Recife").await.unwrap_err();

        assert_eq!(err.kind(), crate::utils::error::ErrorKind::Upstream);
    }
}
