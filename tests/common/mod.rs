#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use cep_weather::core::{AddressResolver, AddressResult, TemperatureReport, WeatherProvider, WeatherSample};
use cep_weather::core::{LookupResult, TemperatureForwarder};
use cep_weather::domain::cep::Cep;
use cep_weather::web::response::ApiResponse;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Address resolver returning a fixed result and counting its calls.
pub struct StubResolver {
    result: LookupResult<AddressResult>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new(result: LookupResult<AddressResult>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn city(name: &str) -> Arc<Self> {
        Self::new(Ok(AddressResult {
            place_name: name.to_string(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for StubResolver {
    async fn resolve(&self, _cep: &Cep) -> LookupResult<AddressResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct StubWeather {
    result: LookupResult<WeatherSample>,
    calls: AtomicUsize,
}

impl StubWeather {
    pub fn new(result: LookupResult<WeatherSample>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn celsius(celsius: f64) -> Arc<Self> {
        Self::new(Ok(WeatherSample { celsius }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn fetch_temperature(&self, _location: &str) -> LookupResult<WeatherSample> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct StubForwarder {
    result: LookupResult<TemperatureReport>,
    calls: AtomicUsize,
}

impl StubForwarder {
    pub fn new(result: LookupResult<TemperatureReport>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemperatureForwarder for StubForwarder {
    async fn fetch_report(&self, _cep: &Cep) -> LookupResult<TemperatureReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Sends `request` through `app` and decodes the envelope.
pub async fn call(app: Router, request: Request<Body>) -> (u16, ApiResponse) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let envelope: ApiResponse = serde_json::from_slice(&body).unwrap();

    (status, envelope)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
