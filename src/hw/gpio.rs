//! LED bank and relay on the Pi's GPIO header.
//!
//! LEDs are driven with PWM rather than plain on/off so the night dim
//! level does not visibly flicker; the relay pin is plain high/low.

use rppal::gpio::{Gpio, OutputPin};

use crate::error::HardwareError;
use crate::outputs::{OutputBank, OutputChannel};

/// BCM pin assignments, defaults from the deployed wiring.
#[derive(Debug, Clone, Copy)]
pub struct PinMap {
    pub red: u8,
    pub yellow: u8,
    pub white: u8,
    pub green: u8,
    pub blue: u8,
    pub relay: u8,
}

impl Default for PinMap {
    fn default() -> PinMap {
        PinMap {
            red: 5,
            yellow: 6,
            white: 7,
            green: 8,
            blue: 9,
            relay: 14,
        }
    }
}

/// High enough that the dimmest duty cycle stays flicker-free.
const PWM_FREQUENCY_HZ: f64 = 200.0;

pub struct GpioBank {
    red: OutputPin,
    yellow: OutputPin,
    white: OutputPin,
    green: OutputPin,
    blue: OutputPin,
    relay: OutputPin,
}

impl GpioBank {
    /// Claims all six pins, everything low. Pins are released (reset to
    /// inputs) when the bank drops.
    pub fn open(pins: PinMap) -> Result<GpioBank, HardwareError> {
        let gpio = Gpio::new().map_err(|e| HardwareError::new("gpio open", e))?;
        let claim = |n: u8| -> Result<OutputPin, HardwareError> {
            gpio.get(n)
                .map(|p| p.into_output_low())
                .map_err(|e| HardwareError::new("gpio claim", format!("pin {n}: {e}")))
        };
        Ok(GpioBank {
            red: claim(pins.red)?,
            yellow: claim(pins.yellow)?,
            white: claim(pins.white)?,
            green: claim(pins.green)?,
            blue: claim(pins.blue)?,
            relay: claim(pins.relay)?,
        })
    }

    fn pin(&mut self, channel: OutputChannel) -> &mut OutputPin {
        match channel {
            OutputChannel::Red => &mut self.red,
            OutputChannel::Yellow => &mut self.yellow,
            OutputChannel::White => &mut self.white,
            OutputChannel::Green => &mut self.green,
            OutputChannel::Blue => &mut self.blue,
            OutputChannel::Relay => &mut self.relay,
        }
    }
}

impl OutputBank for GpioBank {
    fn set_level(&mut self, channel: OutputChannel, level: u8) -> Result<(), HardwareError> {
        match channel {
            OutputChannel::Relay => {
                if level > 0 {
                    self.relay.set_high();
                } else {
                    self.relay.set_low();
                }
                Ok(())
            }
            led => {
                let pin = self.pin(led);
                if level == 0 {
                    pin.clear_pwm()
                        .map_err(|e| HardwareError::new("pwm clear", e))?;
                    pin.set_low();
                    Ok(())
                } else {
                    pin.set_pwm_frequency(PWM_FREQUENCY_HZ, f64::from(level) / 255.0)
                        .map_err(|e| HardwareError::new("pwm write", e))
                }
            }
        }
    }
}
