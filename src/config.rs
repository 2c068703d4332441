//! Calibration profiles and loop tuning.
//!
//! Two profiles ship: the standard one and a colder "heatwave" variant
//! that also enables the extreme-hot LED band and tracks its own cold
//! hysteresis pair. Everything the loop consumes is a field here, not a
//! constant buried in the logic.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// A hysteresis threshold pair. The gap between `on_c` and `off_c` is the
/// dead band; it must be strictly positive or the output chatters on
/// noisy readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub on_c: f64,
    pub off_c: f64,
}

impl Thresholds {
    pub fn new(on_c: f64, off_c: f64) -> Thresholds {
        Thresholds { on_c, off_c }
    }

    fn validate(&self, which: &'static str) -> Result<(), ConfigError> {
        if self.on_c >= self.off_c {
            return Err(ConfigError::BadThresholds {
                which,
                on_c: self.on_c,
                off_c: self.off_c,
            });
        }
        Ok(())
    }
}

/// What the cold-active (blue) LED branch keys off.
///
/// The two deployed variants disagree: one follows the relay state, the
/// other keeps an independent hysteresis flag with its own threshold pair
/// and no day/night gate. The choice is explicit configuration; the two
/// are never conflated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColdSource {
    RelayKeyed,
    Tracked(Thresholds),
}

/// Shortest inter-cycle interval the sensor's read protocol tolerates.
pub const MIN_CYCLE_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Config {
    /// Relay hysteresis pair.
    pub relay: Thresholds,
    /// Strategy for the cold-active LED branch.
    pub cold_indicator: ColdSource,
    /// Enables the > 27 °C extreme-hot band with its two-LED fan-out.
    pub heatwave_band: bool,
    pub day_brightness: u8,
    pub night_brightness: u8,
    /// Wait between triggering the sensor and reading the sample.
    pub settle_delay: Duration,
    /// Sleep between cycles. Never below [`MIN_CYCLE_INTERVAL`].
    pub cycle_interval: Duration,
    pub log_path: PathBuf,
    /// Heartbeat log period in cycles (~20 minutes at 3 s cycles).
    pub log_every: i64,
}

impl Config {
    /// The originally deployed calibration: relay-keyed cold branch, no
    /// extreme-hot band.
    pub fn standard() -> Config {
        Config {
            relay: Thresholds::new(16.5, 17.0),
            cold_indicator: ColdSource::RelayKeyed,
            heatwave_band: false,
            day_brightness: 255,
            night_brightness: 8,
            settle_delay: Duration::from_millis(200),
            cycle_interval: Duration::from_secs(3),
            log_path: PathBuf::from("log.txt"),
            log_every: 400,
        }
    }

    /// Colder calibration with the extreme-hot band and an independently
    /// tracked cold pair.
    pub fn heatwave() -> Config {
        Config {
            relay: Thresholds::new(15.5, 16.0),
            cold_indicator: ColdSource::Tracked(Thresholds::new(15.5, 16.0)),
            heatwave_band: true,
            ..Config::standard()
        }
    }

    /// Fails fast before the loop starts; a collapsed dead band or a
    /// too-fast cycle must never reach the hardware.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relay.validate("relay")?;
        if let ColdSource::Tracked(pair) = &self.cold_indicator {
            pair.validate("cold indicator")?;
        }
        if self.cycle_interval < MIN_CYCLE_INTERVAL {
            return Err(ConfigError::CycleTooShort(self.cycle_interval));
        }
        if self.log_every <= 0 {
            return Err(ConfigError::BadLogInterval(self.log_every));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_profiles_are_sane() {
        assert!(Config::standard().validate().is_ok());
        assert!(Config::heatwave().validate().is_ok());
        assert!(Config::standard().relay.on_c < Config::standard().relay.off_c);
    }

    #[test]
    fn inverted_relay_thresholds_rejected() {
        let mut c = Config::standard();
        c.relay = Thresholds::new(17.0, 16.5);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BadThresholds { which: "relay", .. })
        ));
    }

    #[test]
    fn collapsed_dead_band_rejected() {
        let mut c = Config::standard();
        c.relay = Thresholds::new(16.5, 16.5);
        assert!(c.validate().is_err());
    }

    #[test]
    fn inverted_cold_pair_rejected() {
        let mut c = Config::heatwave();
        c.cold_indicator = ColdSource::Tracked(Thresholds::new(16.0, 15.5));
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BadThresholds {
                which: "cold indicator",
                ..
            })
        ));
    }

    #[test]
    fn sub_minimum_cycle_rejected() {
        let mut c = Config::standard();
        c.cycle_interval = Duration::from_secs(1);
        assert!(matches!(c.validate(), Err(ConfigError::CycleTooShort(_))));
    }
}
