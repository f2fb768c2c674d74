use super::join_url;
use crate::domain::cep::Cep;
use crate::domain::model::AddressResult;
use crate::domain::ports::AddressResolver;
use crate::utils::error::{LookupError, LookupResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Address payload returned by `GET /ws/{cep}/json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepResponse {
    // "true" in older payloads, `true` in newer ones, absent on a match.
    #[serde(default)]
    pub erro: Option<Value>,
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default)]
    pub ibge: String,
    #[serde(default)]
    pub gia: String,
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub siafi: String,
}

impl ViaCepResponse {
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag == "true",
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn lookup_url(&self, cep: &Cep) -> String {
        join_url(&self.base_url, &format!("/ws/{}/json", cep))
    }
}

#[async_trait]
impl AddressResolver for ViaCepClient {
    #[tracing::instrument(name = "ViaCepClient::resolve", skip(self, cep), fields(cep = %cep))]
    async fn resolve(&self, cep: &Cep) -> LookupResult<AddressResult> {
        let url = self.lookup_url(cep);
        tracing::debug!("Making address request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("Address service response status: {}", status);

        if !status.is_success() {
            return Err(LookupError::upstream(format!(
                "address service returned status {}",
                status
            )));
        }

        let payload: ViaCepResponse = response.json().await?;
        if payload.is_not_found() {
            tracing::info!("CEP {} not found by address service", cep);
            return Err(LookupError::NotFound);
        }

        Ok(AddressResult {
            place_name: payload.localidade,
        })
    }
}
