//! Hysteresis heater control for a Raspberry Pi: a DHT22 ambient probe
//! in, a heater relay and five status LEDs out, with a coalesced
//! append-only state log. One blocking control thread; SIGINT lands in a
//! safe state with every output off.

pub mod config;
pub mod control;
pub mod error;
pub mod indicator;
pub mod logfile;
pub mod outputs;
pub mod relay;
pub mod schedule;
pub mod sensor;
pub mod shutdown;

#[cfg(feature = "hardware")]
pub mod hw;
