pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use config::{ServeArgs, ServiceVariant, TomlConfig};
pub use self::core::{ForwardTemperatures, GetTemperatures};
pub use domain::model::TemperatureReport;
pub use utils::error::{ErrorKind, LookupError, Result, ServiceError};
