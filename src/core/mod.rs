pub mod forward_temperatures;
pub mod get_temperatures;

pub use crate::domain::model::{AddressResult, TemperatureReport, WeatherSample};
pub use crate::domain::ports::{AddressResolver, TemperatureForwarder, WeatherProvider};
pub use crate::utils::error::{LookupError, LookupResult};
pub use forward_temperatures::ForwardTemperatures;
pub use get_temperatures::GetTemperatures;
