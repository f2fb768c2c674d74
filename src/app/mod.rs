// Application wiring: turns a validated config into a ready-to-serve router.

use crate::adapters::{build_http_client, TemperatureServiceClient, ViaCepClient, WeatherApiClient};
use crate::config::{ServeArgs, ServiceVariant, TomlConfig};
use crate::core::{ForwardTemperatures, GetTemperatures};
use crate::utils::error::Result;
use crate::utils::{logger, telemetry};
use crate::web::handlers::{InputState, OrchestrationState};
use crate::web::{input_router, orchestration_router};
use axum::Router;
use std::sync::Arc;
use tracing::Instrument;

/// Two-hop service: ViaCEP for the address, WeatherAPI for the temperature.
pub fn orchestration_app(config: &TomlConfig) -> Result<Router> {
    let client = build_http_client(config.request_timeout())?;

    let address_resolver = ViaCepClient::new(client.clone(), &config.address_service.base_url);
    let weather_provider = WeatherApiClient::new(
        client,
        &config.weather_service.base_url,
        config.weather_api_key()?,
    );

    let state = OrchestrationState {
        use_case: Arc::new(GetTemperatures::new(
            Arc::new(address_resolver),
            Arc::new(weather_provider),
        )),
    };

    Ok(orchestration_router(state, &config.cors))
}

/// Single-hop service: forwards the CEP to the orchestration service.
pub fn input_app(config: &TomlConfig) -> Result<Router> {
    let client = build_http_client(config.request_timeout())?;
    let forwarder = TemperatureServiceClient::new(client, config.forward_url()?);

    let state = InputState {
        use_case: Arc::new(ForwardTemperatures::new(Arc::new(forwarder))),
    };

    Ok(input_router(state, &config.cors))
}

/// Loads config, initialises logging and serves `variant` until shutdown.
pub async fn run(variant: ServiceVariant, args: ServeArgs) -> Result<()> {
    let config = args.load_config(variant)?;
    let service_name = config.service_name(variant);

    let provider = if config.telemetry.enabled {
        Some(telemetry::init_tracer_provider(&service_name, &config.telemetry)?)
    } else {
        None
    };
    let otel = provider
        .as_ref()
        .map(|provider| telemetry::otel_layer(provider, &service_name));
    logger::init_logger(args.verbose, args.log_format(&config), otel);

    let span = tracing::info_span!("service", name = %service_name);

    let result = async {
        tracing::info!("Starting {}", service_name);
        tracing::debug!(
            "Outbound timeout {:?}, CORS origins {:?}, span export {}",
            config.request_timeout(),
            config.cors.allowed_origins,
            if config.telemetry.enabled { config.telemetry.otlp_endpoint.as_str() } else { "off" }
        );

        let router = match variant {
            ServiceVariant::Orchestration => orchestration_app(&config)?,
            ServiceVariant::Input => input_app(&config)?,
        };

        crate::web::server::serve(router, &config.bind_address(variant)).await
    }
    .instrument(span)
    .await;

    if let Some(provider) = provider {
        telemetry::shutdown_tracer_provider(provider);
    }

    result
}
