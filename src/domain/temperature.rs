/// A temperature expressed in the three reported scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

// Kelvin uses the integer offset 273, matching what clients of this service
// have always received.
const KELVIN_OFFSET: f64 = 273.0;

pub fn convert(celsius: f64) -> Temperatures {
    Temperatures {
        celsius,
        fahrenheit: celsius * 1.8 + 32.0,
        kelvin: celsius + KELVIN_OFFSET,
    }
}
