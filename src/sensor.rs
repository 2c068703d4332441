//! Sensor boundary.
//!
//! The wire protocol lives behind this trait; the loop only knows
//! trigger, settle, read.

use crate::error::SensorError;

/// Ambient temperature source.
///
/// `trigger` starts a reading on the hardware; the caller waits the
/// configured settle delay before `read`, which returns the most recent
/// sample in °C or the error that replaced it. Errors are per-cycle: the
/// next trigger starts fresh.
pub trait Sensor {
    fn trigger(&mut self) -> Result<(), SensorError>;
    fn read(&mut self) -> Result<f64, SensorError>;
}

/// One decimal place, applied before any decision logic sees the value.
pub fn round_reading(temp: f64) -> f64 {
    (temp * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_reading(16.4499), 16.4);
        assert_eq!(round_reading(16.45), 16.5);
        assert_eq!(round_reading(-0.04), -0.0);
        assert_eq!(round_reading(21.0), 21.0);
    }
}
