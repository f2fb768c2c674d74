// Adapters layer: HTTP implementations of the domain ports.

pub mod temperature_service;
pub mod viacep;
pub mod weather_api;

pub use temperature_service::TemperatureServiceClient;
pub use viacep::ViaCepClient;
pub use weather_api::WeatherApiClient;

use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Builds the outbound client shared by every adapter of a process.
///
/// `reqwest::Client` pools connections internally and is cheap to clone, so
/// one instance is handed to each adapter.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(client)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
