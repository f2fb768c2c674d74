use crate::domain::cep;
use crate::domain::model::TemperatureReport;
use crate::domain::ports::{AddressResolver, WeatherProvider};
use crate::domain::temperature::convert;
use crate::utils::error::LookupResult;
use std::sync::Arc;

/// Two-hop lookup: CEP -> city (address service) -> temperature (weather service).
///
/// The weather service is only called once the address lookup has succeeded,
/// and whichever stage fails first decides the outcome.
#[derive(Clone)]
pub struct GetTemperatures {
    address_resolver: Arc<dyn AddressResolver>,
    weather_provider: Arc<dyn WeatherProvider>,
}

impl GetTemperatures {
    pub fn new(
        address_resolver: Arc<dyn AddressResolver>,
        weather_provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            address_resolver,
            weather_provider,
        }
    }

    #[tracing::instrument(name = "GetTemperatures::execute", skip(self))]
    pub async fn execute(&self, raw_cep: &str) -> LookupResult<TemperatureReport> {
        let cep = cep::normalize(raw_cep)?;

        let address = self.address_resolver.resolve(&cep).await?;
        tracing::debug!("CEP {} resolved to {}", cep, address.place_name);

        let sample = self
            .weather_provider
            .fetch_temperature(&address.place_name)
            .await?;
        tracing::debug!("{} is at {}°C", address.place_name, sample.celsius);

        Ok(TemperatureReport::new(address.place_name, convert(sample.celsius)))
    }
}
