//! DHT22 probe on a single GPIO data line.
//!
//! `trigger` runs the whole wire transaction and caches the outcome;
//! `read` hands the cache back after the settle delay. The optional
//! activity LED lights for every transaction and stays lit when the
//! probe failed, so a disconnected sensor is visible at a glance.

use std::thread;
use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, IoPin, Level, Mode, OutputPin};

use crate::error::{HardwareError, SensorError};
use crate::sensor::Sensor;

/// BCM defaults from the deployed wiring.
pub const DEFAULT_DATA_PIN: u8 = 22;
pub const DEFAULT_ACTIVITY_LED_PIN: u8 = 27;

/// A zero bit holds the line high ~27 µs, a one bit ~70 µs.
const BIT_ONE_THRESHOLD: Duration = Duration::from_micros(48);

/// The probe's rated measurement range.
const PLAUSIBLE_RANGE: std::ops::RangeInclusive<f64> = -40.0..=80.0;

pub struct Dht22Sensor {
    pin: IoPin,
    activity_led: Option<OutputPin>,
    last: Result<f64, SensorError>,
}

impl Dht22Sensor {
    pub fn open(data_pin: u8, activity_led_pin: Option<u8>) -> Result<Dht22Sensor, HardwareError> {
        let gpio = Gpio::new().map_err(|e| HardwareError::new("gpio open", e))?;
        let pin = gpio
            .get(data_pin)
            .map_err(|e| HardwareError::new("sensor pin claim", format!("pin {data_pin}: {e}")))?
            .into_io(Mode::Input);
        let activity_led = match activity_led_pin {
            Some(n) => Some(
                gpio.get(n)
                    .map_err(|e| HardwareError::new("activity led claim", format!("pin {n}: {e}")))?
                    .into_output_low(),
            ),
            None => None,
        };
        Ok(Dht22Sensor {
            pin,
            activity_led,
            last: Err(SensorError::NotReady),
        })
    }

    fn wait_for(&self, level: Level, timeout_us: u64) -> Result<(), SensorError> {
        let deadline = Instant::now() + Duration::from_micros(timeout_us);
        while self.pin.read() != level {
            if Instant::now() >= deadline {
                return Err(SensorError::PulseTimeout);
            }
        }
        Ok(())
    }

    fn pulse_width(&self, level: Level, timeout_us: u64) -> Result<Duration, SensorError> {
        let start = Instant::now();
        let deadline = start + Duration::from_micros(timeout_us);
        while self.pin.read() == level {
            if Instant::now() >= deadline {
                return Err(SensorError::PulseTimeout);
            }
        }
        Ok(start.elapsed())
    }

    fn read_frame(&mut self) -> Result<f64, SensorError> {
        // Host start signal: hold the line low, then release and listen.
        self.pin.set_mode(Mode::Output);
        self.pin.set_low();
        thread::sleep(Duration::from_millis(3));
        self.pin.set_mode(Mode::Input);

        // Presence answer: ~80 µs low, ~80 µs high, then the first bit's
        // low preamble.
        self.wait_for(Level::Low, 200)?;
        self.wait_for(Level::High, 200)?;
        self.wait_for(Level::Low, 200)?;

        let mut data = [0u8; 5];
        for bit in 0..40 {
            self.wait_for(Level::High, 100)?;
            let high = self.pulse_width(Level::High, 150)?;
            if high > BIT_ONE_THRESHOLD {
                data[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        let sum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        if sum != data[4] {
            return Err(SensorError::Checksum);
        }

        // Temperature is 16 bits, sign-and-magnitude, tenths of a degree.
        let raw = u16::from(data[2] & 0x7f) << 8 | u16::from(data[3]);
        let mut temp = f64::from(raw) / 10.0;
        if data[2] & 0x80 != 0 {
            temp = -temp;
        }
        if !PLAUSIBLE_RANGE.contains(&temp) {
            return Err(SensorError::OutOfRange(temp));
        }
        Ok(temp)
    }
}

impl Sensor for Dht22Sensor {
    fn trigger(&mut self) -> Result<(), SensorError> {
        if let Some(led) = &mut self.activity_led {
            led.set_high();
        }
        self.last = self.read_frame();
        if self.last.is_ok() {
            if let Some(led) = &mut self.activity_led {
                led.set_low();
            }
        }
        Ok(())
    }

    fn read(&mut self) -> Result<f64, SensorError> {
        self.last
    }
}
