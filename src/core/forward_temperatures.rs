use crate::domain::cep;
use crate::domain::model::TemperatureReport;
use crate::domain::ports::TemperatureForwarder;
use crate::utils::error::LookupResult;
use std::sync::Arc;

/// Single-hop lookup: validates the CEP locally, then hands it to an
/// aggregator that resolves both the address and the weather.
#[derive(Clone)]
pub struct ForwardTemperatures {
    forwarder: Arc<dyn TemperatureForwarder>,
}

impl ForwardTemperatures {
    pub fn new(forwarder: Arc<dyn TemperatureForwarder>) -> Self {
        Self { forwarder }
    }

    #[tracing::instrument(name = "ForwardTemperatures::execute", skip(self))]
    pub async fn execute(&self, raw_cep: &str) -> LookupResult<TemperatureReport> {
        let cep = cep::validate_digits(raw_cep)?;
        self.forwarder.fetch_report(&cep).await
    }
}
