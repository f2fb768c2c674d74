use crate::domain::cep::Cep;
use crate::domain::model::{AddressResult, TemperatureReport, WeatherSample};
use crate::utils::error::LookupResult;
use async_trait::async_trait;

/// Resolves a CEP to the name of its city.
///
/// Implementations must report "no such CEP" as `LookupError::NotFound` and
/// every transport or decoding problem as `LookupError::Upstream`.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, cep: &Cep) -> LookupResult<AddressResult>;
}

/// Fetches the current temperature, in Celsius, for a place name.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_temperature(&self, location: &str) -> LookupResult<WeatherSample>;
}

/// An aggregator that resolves a CEP and its weather in a single call.
#[async_trait]
pub trait TemperatureForwarder: Send + Sync {
    async fn fetch_report(&self, cep: &Cep) -> LookupResult<TemperatureReport>;
}
