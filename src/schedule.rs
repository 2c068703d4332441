//! Day/night schedule.
//!
//! The heater is allowed on at night only; the LEDs dim over the same
//! window.

use chrono::{Local, Timelike};

/// Night runs from 22:00 through 06:59 the next morning. Both boundary
/// hours are inclusive.
pub const NIGHT_START_HOUR: u32 = 22;
pub const NIGHT_END_HOUR: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> DayPeriod {
        if hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR {
            DayPeriod::Night
        } else {
            DayPeriod::Day
        }
    }

    /// Period for the current wall-clock hour.
    pub fn now() -> DayPeriod {
        DayPeriod::from_hour(Local::now().hour())
    }

    pub fn is_night(self) -> bool {
        self == DayPeriod::Night
    }
}
