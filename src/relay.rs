//! Heater relay hysteresis.

use crate::config::Thresholds;
use crate::schedule::DayPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    On,
    Off,
}

impl RelayState {
    /// Status string as written to the state log.
    pub fn as_str(self) -> &'static str {
        match self {
            RelayState::On => "ON",
            RelayState::Off => "OFF",
        }
    }

    /// Output level for the binary relay channel.
    pub fn level(self) -> u8 {
        match self {
            RelayState::On => 1,
            RelayState::Off => 0,
        }
    }
}

/// One relay decision. Precedence:
/// 1. at or below ON and night -> On
/// 2. at or above OFF, or daytime -> Off
/// 3. dead band (or night-only activation not met) -> unchanged
pub fn next_relay_state(
    temp: f64,
    period: DayPeriod,
    prev: RelayState,
    thresholds: &Thresholds,
) -> RelayState {
    if temp <= thresholds.on_c && period.is_night() {
        RelayState::On
    } else if temp >= thresholds.off_c || !period.is_night() {
        RelayState::Off
    } else {
        prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COLD_PROFILE: Thresholds = Thresholds {
        on_c: 15.5,
        off_c: 16.0,
    };
    const STANDARD_PROFILE: Thresholds = Thresholds {
        on_c: 16.5,
        off_c: 17.0,
    };

    #[test]
    fn switches_on_below_threshold_at_night() {
        let s = next_relay_state(15.0, DayPeriod::Night, RelayState::Off, &COLD_PROFILE);
        assert_eq!(s, RelayState::On);
    }

    #[test]
    fn dead_band_holds_state_at_night() {
        let s = next_relay_state(16.7, DayPeriod::Night, RelayState::On, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::On);
        let s = next_relay_state(16.8, DayPeriod::Night, RelayState::Off, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::Off);
    }

    #[test]
    fn on_threshold_edge_engages_at_night() {
        // Exactly the ON threshold counts as "at or below".
        let s = next_relay_state(16.5, DayPeriod::Night, RelayState::On, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::On);
        let s = next_relay_state(16.5, DayPeriod::Night, RelayState::Off, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::On);
    }

    #[test]
    fn daytime_forces_off() {
        let s = next_relay_state(16.5, DayPeriod::Day, RelayState::On, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::Off);
        // Even below the ON threshold.
        let s = next_relay_state(10.0, DayPeriod::Day, RelayState::On, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::Off);
    }

    #[test]
    fn switches_off_at_off_threshold() {
        let s = next_relay_state(17.0, DayPeriod::Night, RelayState::On, &STANDARD_PROFILE);
        assert_eq!(s, RelayState::Off);
    }

    #[test]
    fn descending_night_switches_on_only_at_on_threshold() {
        let mut state = RelayState::Off;
        let mut temp = 17.5;
        while temp > COLD_PROFILE.on_c {
            state = next_relay_state(temp, DayPeriod::Night, state, &COLD_PROFILE);
            assert_eq!(state, RelayState::Off, "switched early at {temp:.1}");
            temp -= 0.1;
            temp = (temp * 10.0).round() / 10.0;
        }
        state = next_relay_state(COLD_PROFILE.on_c, DayPeriod::Night, state, &COLD_PROFILE);
        assert_eq!(state, RelayState::On);
    }

    proptest! {
        // Re-applying the rule with unchanged inputs never toggles.
        #[test]
        fn idempotent(temp in -40.0..60.0f64, night in any::<bool>(), start_on in any::<bool>()) {
            let period = if night { DayPeriod::Night } else { DayPeriod::Day };
            let prev = if start_on { RelayState::On } else { RelayState::Off };
            let first = next_relay_state(temp, period, prev, &STANDARD_PROFILE);
            let second = next_relay_state(temp, period, first, &STANDARD_PROFILE);
            prop_assert_eq!(first, second);
        }

        // A change of state implies a threshold was crossed.
        #[test]
        fn changes_only_at_crossings(temp in -40.0..60.0f64, start_on in any::<bool>()) {
            let prev = if start_on { RelayState::On } else { RelayState::Off };
            let next = next_relay_state(temp, DayPeriod::Night, prev, &STANDARD_PROFILE);
            if next != prev {
                prop_assert!(temp <= STANDARD_PROFILE.on_c || temp >= STANDARD_PROFILE.off_c);
            }
        }
    }
}
