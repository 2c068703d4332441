//! Error taxonomy for the control loop.
//!
//! Three categories with three different fates: a `SensorError` costs one
//! cycle and nothing else, a `HardwareError` aborts the loop into the
//! safe-state path, and a `ConfigError` stops startup before any hardware
//! is touched.

use std::fmt;
use std::time::Duration;

/// A reading could not be used this cycle. The loop keeps the previous
/// relay and indicator state and retries on the next scheduled cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// No completed reading is available yet.
    NotReady,
    /// The data line never produced the expected pulse; probe missing or
    /// wedged.
    PulseTimeout,
    /// A full frame arrived but its checksum did not match.
    Checksum,
    /// Decoded cleanly but outside the plausible ambient range.
    OutOfRange(f64),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "no reading available yet"),
            Self::PulseTimeout => write!(f, "sensor pulse timeout"),
            Self::Checksum => write!(f, "sensor checksum mismatch"),
            Self::OutOfRange(t) => write!(f, "reading out of range: {t:.1}"),
        }
    }
}

impl std::error::Error for SensorError {}

/// An actuator write failed. Fatal: continuing with a heater relay in an
/// unknown state is worse than stopping.
#[derive(Debug)]
pub struct HardwareError {
    op: &'static str,
    detail: String,
}

impl HardwareError {
    pub fn new(op: &'static str, detail: impl fmt::Display) -> HardwareError {
        HardwareError {
            op,
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hardware {} failed: {}", self.op, self.detail)
    }
}

impl std::error::Error for HardwareError {}

/// Rejected at startup, before the loop runs or hardware is acquired.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The ON threshold must sit strictly below the OFF threshold,
    /// otherwise the dead band collapses and the relay chatters.
    BadThresholds {
        which: &'static str,
        on_c: f64,
        off_c: f64,
    },
    /// Polling faster than this wedges the sensor's read protocol.
    CycleTooShort(Duration),
    /// The heartbeat divisor must be positive.
    BadLogInterval(i64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadThresholds { which, on_c, off_c } => write!(
                f,
                "{which} thresholds invalid: ON {on_c:.1} must be below OFF {off_c:.1}"
            ),
            Self::CycleTooShort(d) => {
                write!(f, "cycle interval {d:?} is below the sensor minimum")
            }
            Self::BadLogInterval(n) => write!(f, "log interval {n} must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
