// Domain layer: CEP rules, temperature math, report model and the ports the
// use cases call through. No HTTP here.

pub mod cep;
pub mod model;
pub mod ports;
pub mod temperature;
