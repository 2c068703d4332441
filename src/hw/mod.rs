//! Raspberry Pi adapters behind the `hardware` feature, so the control
//! logic builds and tests on any host.

pub mod dht22;
pub mod gpio;

pub use dht22::Dht22Sensor;
pub use gpio::{GpioBank, PinMap};
