use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_resolved,
    validate_socket_addr, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

pub const DEFAULT_ADDRESS_SERVICE_URL: &str = "http://viacep.com.br";
pub const DEFAULT_WEATHER_API_URL: &str = "http://api.weatherapi.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318/v1/traces";

/// Which binary a configuration is loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceVariant {
    /// Two-hop: address service + weather service.
    Orchestration,
    /// Single-hop: forwards to a temperature service.
    Input,
}

impl ServiceVariant {
    pub fn default_name(&self) -> &'static str {
        match self {
            ServiceVariant::Orchestration => "service-orchestration",
            ServiceVariant::Input => "service-input",
        }
    }

    pub fn default_bind_address(&self) -> &'static str {
        match self {
            ServiceVariant::Orchestration => "0.0.0.0:8081",
            ServiceVariant::Input => "0.0.0.0:8080",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub address_service: AddressServiceConfig,
    #[serde(default)]
    pub weather_service: WeatherServiceConfig,
    pub forward_service: Option<ForwardServiceConfig>,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: Option<String>,
    pub bind_address: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressServiceConfig {
    pub base_url: String,
}

impl Default for AddressServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADDRESS_SERVICE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_API_URL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardServiceConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowed_headers: ["Accept", "Authorization", "Content-Type", "X-CSRF-Token"]
                .into_iter()
                .map(String::from)
                .collect(),
            exposed_headers: vec!["Link".to_string()],
            allow_credentials: false,
            max_age_seconds: 300,
        }
    }
}

/// Span export over OTLP/HTTP. Off unless enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub otlp_endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只用環境變數組出配置（沒有設定檔時）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ServiceError::InvalidConfigValueError {
                        field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                        value: value.clone(),
                        reason: format!("expected a whole number of seconds: {}", e),
                    })
            })
            .transpose()?;

        // 設定了 OTLP endpoint 就開啟 span 匯出
        let telemetry = match lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            Some(otlp_endpoint) => TelemetryConfig {
                enabled: true,
                otlp_endpoint,
            },
            None => TelemetryConfig::default(),
        };

        Ok(Self {
            service: ServiceConfig {
                name: lookup("SERVICE_NAME"),
                bind_address: lookup("BIND_ADDRESS"),
                request_timeout_seconds,
                log_format: lookup("LOG_FORMAT"),
            },
            address_service: AddressServiceConfig {
                base_url: lookup("ADDRESS_SERVICE_URL")
                    .unwrap_or_else(|| DEFAULT_ADDRESS_SERVICE_URL.to_string()),
            },
            weather_service: WeatherServiceConfig {
                base_url: lookup("WEATHER_API_URL")
                    .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
                api_key: lookup("WEATHER_API_KEY"),
            },
            forward_service: lookup("WEATHER_SERVICE_URL").map(|url| ForwardServiceConfig { url }),
            cors: CorsConfig::default(),
            telemetry,
        })
    }

    /// 替換環境變數 (例如 ${WEATHER_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn service_name(&self, variant: ServiceVariant) -> String {
        self.service
            .name
            .clone()
            .unwrap_or_else(|| variant.default_name().to_string())
    }

    pub fn bind_address(&self, variant: ServiceVariant) -> String {
        self.service
            .bind_address
            .clone()
            .unwrap_or_else(|| variant.default_bind_address().to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.service
                .request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    pub fn weather_api_key(&self) -> Result<&str> {
        let key = validate_required_field("weather_service.api_key", &self.weather_service.api_key)?;
        validate_resolved("weather_service.api_key", key)?;
        validate_non_empty_string("weather_service.api_key", key)?;
        Ok(key)
    }

    pub fn forward_url(&self) -> Result<&str> {
        let forward = validate_required_field("forward_service.url", &self.forward_service)?;
        validate_url("forward_service.url", &forward.url)?;
        Ok(&forward.url)
    }

    /// 驗證通用欄位，再驗證該服務需要的欄位
    pub fn validate_for(&self, variant: ServiceVariant) -> Result<()> {
        self.validate()?;

        match variant {
            ServiceVariant::Orchestration => {
                validate_url("address_service.base_url", &self.address_service.base_url)?;
                validate_url("weather_service.base_url", &self.weather_service.base_url)?;
                self.weather_api_key()?;
            }
            ServiceVariant::Input => {
                self.forward_url()?;
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.service.name {
            validate_non_empty_string("service.name", name)?;
        }

        if let Some(addr) = &self.service.bind_address {
            validate_socket_addr("service.bind_address", addr)?;
        }

        if let Some(timeout) = self.service.request_timeout_seconds {
            validate_range("service.request_timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(format) = &self.service.log_format {
            format
                .parse::<crate::utils::logger::LogFormat>()
                .map_err(|reason| ServiceError::InvalidConfigValueError {
                    field: "service.log_format".to_string(),
                    value: format.clone(),
                    reason,
                })?;
        }

        if self.telemetry.enabled {
            validate_url("telemetry.otlp_endpoint", &self.telemetry.otlp_endpoint)?;
        }

        Ok(())
    }
}
