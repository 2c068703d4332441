//! Actuator boundary: five PWM LED channels plus the relay.

use crate::error::HardwareError;

/// Named output channels. The relay is a degenerate binary actuator: any
/// non-zero level means energised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    Red,
    Yellow,
    White,
    Green,
    Blue,
    Relay,
}

impl OutputChannel {
    /// The fixed, ordered LED bank.
    pub const LEDS: [OutputChannel; 5] = [
        OutputChannel::Red,
        OutputChannel::Yellow,
        OutputChannel::White,
        OutputChannel::Green,
        OutputChannel::Blue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputChannel::Red => "red",
            OutputChannel::Yellow => "yellow",
            OutputChannel::White => "white",
            OutputChannel::Green => "green",
            OutputChannel::Blue => "blue",
            OutputChannel::Relay => "relay",
        }
    }
}

/// Write side of the hardware.
pub trait OutputBank {
    /// Sets a channel's level, 0–255. LED channels are PWM duty; the
    /// relay treats any non-zero level as HIGH.
    fn set_level(&mut self, channel: OutputChannel, level: u8) -> Result<(), HardwareError>;

    /// Everything to zero. This is the safe-state primitive and runs on
    /// every exit path.
    fn all_off(&mut self) -> Result<(), HardwareError> {
        for led in OutputChannel::LEDS {
            self.set_level(led, 0)?;
        }
        self.set_level(OutputChannel::Relay, 0)
    }
}
