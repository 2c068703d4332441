//! Status LED selection.
//!
//! Exactly one logical indicator is active per cycle; every other LED is
//! driven to zero. The extreme-hot band fans out: one logical decision,
//! two physical LEDs.

use crate::config::{Config, Thresholds};
use crate::outputs::OutputChannel;
use crate::schedule::DayPeriod;

/// Band edges in °C, upper bands first. Each band is open below, so the
/// bands partition the axis with no gaps or overlaps.
pub const EXTREME_HOT_ABOVE: f64 = 27.0;
pub const HOT_ABOVE: f64 = 24.0;
pub const WARM_ABOVE: f64 = 21.0;
pub const COMFORTABLE_ABOVE: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorChannel {
    ExtremeHot,
    Hot,
    Warm,
    Comfortable,
    ColdIdle,
    ColdActive,
}

impl IndicatorChannel {
    /// Physical LEDs lit for this indicator. ExtremeHot fans out to the
    /// two hottest LEDs; everything else maps one-to-one.
    pub fn outputs(self) -> &'static [OutputChannel] {
        match self {
            IndicatorChannel::ExtremeHot => &[OutputChannel::Red, OutputChannel::Yellow],
            IndicatorChannel::Hot => &[OutputChannel::Red],
            IndicatorChannel::Warm => &[OutputChannel::Yellow],
            IndicatorChannel::Comfortable => &[OutputChannel::White],
            IndicatorChannel::ColdIdle => &[OutputChannel::Green],
            IndicatorChannel::ColdActive => &[OutputChannel::Blue],
        }
    }
}

/// Second hysteresis flag for the cold LED pair, tracked independently of
/// the relay: same sticky dead-band shape, but no day/night gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColdWatch {
    Normal,
    Cold,
}

impl ColdWatch {
    pub fn update(self, temp: f64, thresholds: &Thresholds) -> ColdWatch {
        if temp <= thresholds.on_c {
            ColdWatch::Cold
        } else if temp >= thresholds.off_c {
            ColdWatch::Normal
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indication {
    pub channel: IndicatorChannel,
    pub brightness: u8,
}

/// Maps the cycle's sample to the one active indicator and its
/// brightness. `cold_active` is whatever the configured cold source says
/// this cycle (relay state or the ColdWatch flag); the selector does not
/// care which.
pub fn select_indication(
    temp: f64,
    cold_active: bool,
    period: DayPeriod,
    config: &Config,
) -> Indication {
    let brightness = if period.is_night() {
        config.night_brightness
    } else {
        config.day_brightness
    };

    let channel = if config.heatwave_band && temp > EXTREME_HOT_ABOVE {
        IndicatorChannel::ExtremeHot
    } else if temp > HOT_ABOVE {
        IndicatorChannel::Hot
    } else if temp > WARM_ABOVE {
        IndicatorChannel::Warm
    } else if temp > COMFORTABLE_ABOVE {
        IndicatorChannel::Comfortable
    } else if cold_active {
        IndicatorChannel::ColdActive
    } else {
        IndicatorChannel::ColdIdle
    };

    Indication {
        channel,
        brightness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn heatwave_band_fans_out() {
        let cfg = Config::heatwave();
        let ind = select_indication(28.0, false, DayPeriod::Day, &cfg);
        assert_eq!(ind.channel, IndicatorChannel::ExtremeHot);
        assert_eq!(
            ind.channel.outputs(),
            &[OutputChannel::Red, OutputChannel::Yellow]
        );
        assert_eq!(ind.brightness, 255);
    }

    #[test]
    fn extreme_band_folds_into_hot_when_disabled() {
        let cfg = Config::standard();
        let ind = select_indication(28.0, false, DayPeriod::Day, &cfg);
        assert_eq!(ind.channel, IndicatorChannel::Hot);
    }

    #[test]
    fn night_dims_regardless_of_channel() {
        let cfg = Config::standard();
        for temp in [28.0, 25.0, 22.0, 19.0, 10.0] {
            let ind = select_indication(temp, false, DayPeriod::Night, &cfg);
            assert_eq!(ind.brightness, cfg.night_brightness);
        }
    }

    #[test]
    fn cold_branch_splits_on_active_flag() {
        let cfg = Config::standard();
        let idle = select_indication(15.0, false, DayPeriod::Night, &cfg);
        assert_eq!(idle.channel, IndicatorChannel::ColdIdle);
        let active = select_indication(15.0, true, DayPeriod::Night, &cfg);
        assert_eq!(active.channel, IndicatorChannel::ColdActive);
    }

    #[test]
    fn band_edges_belong_to_the_band_below() {
        let cfg = Config::heatwave();
        assert_eq!(
            select_indication(27.0, false, DayPeriod::Day, &cfg).channel,
            IndicatorChannel::Hot
        );
        assert_eq!(
            select_indication(24.0, false, DayPeriod::Day, &cfg).channel,
            IndicatorChannel::Warm
        );
        assert_eq!(
            select_indication(21.0, false, DayPeriod::Day, &cfg).channel,
            IndicatorChannel::Comfortable
        );
        assert_eq!(
            select_indication(18.0, false, DayPeriod::Day, &cfg).channel,
            IndicatorChannel::ColdIdle
        );
    }

    #[test]
    fn cold_watch_is_sticky_in_its_dead_band() {
        let pair = Thresholds::new(15.5, 16.0);
        let mut w = ColdWatch::Normal;
        w = w.update(15.7, &pair);
        assert_eq!(w, ColdWatch::Normal);
        w = w.update(15.5, &pair);
        assert_eq!(w, ColdWatch::Cold);
        // Inside the dead band the flag holds, day or night is irrelevant.
        w = w.update(15.8, &pair);
        assert_eq!(w, ColdWatch::Cold);
        w = w.update(16.0, &pair);
        assert_eq!(w, ColdWatch::Normal);
    }

    proptest! {
        // The bands partition the temperature axis: every sample selects
        // exactly one channel, and that channel lights at least one LED
        // while all of its alternatives would light disjoint sets.
        #[test]
        fn exactly_one_indicator(temp in -40.0..60.0f64, cold in any::<bool>(), night in any::<bool>(), heatwave in any::<bool>()) {
            let mut cfg = Config::standard();
            cfg.heatwave_band = heatwave;
            let period = if night { DayPeriod::Night } else { DayPeriod::Day };
            let ind = select_indication(temp, cold, period, &cfg);
            prop_assert!(!ind.channel.outputs().is_empty());
            prop_assert!(ind.brightness > 0);
            // Selection is a total function: re-evaluating gives the same
            // single channel.
            prop_assert_eq!(select_indication(temp, cold, period, &cfg).channel, ind.channel);
        }
    }
}
