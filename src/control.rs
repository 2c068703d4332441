//! The control loop.
//!
//! One cycle: trigger, settle, read, decide, actuate, maybe log, sleep.
//! Every decision in a cycle uses the same rounded sample; nothing is
//! re-read mid-cycle. All mutable control state lives on [`ControlLoop`];
//! there are no globals.

use anyhow::Result;
use chrono::{Local, Timelike};
use log::{debug, error, info, warn};

use crate::config::{ColdSource, Config};
use crate::error::SensorError;
use crate::indicator::{select_indication, ColdWatch, Indication};
use crate::logfile::StateLog;
use crate::outputs::{OutputBank, OutputChannel};
use crate::relay::{next_relay_state, RelayState};
use crate::schedule::DayPeriod;
use crate::sensor::{round_reading, Sensor};
use crate::shutdown::ShutdownFlag;

pub struct ControlLoop<S: Sensor, B: OutputBank> {
    config: Config,
    sensor: S,
    outputs: B,
    log: StateLog,
    relay: RelayState,
    cold_watch: ColdWatch,
    /// Starts at -1: the heartbeat log condition is a modulo on this
    /// counter, so the first (often inaccurate) reading never heartbeats.
    iteration: i64,
}

impl<S: Sensor, B: OutputBank> ControlLoop<S, B> {
    pub fn new(config: Config, sensor: S, outputs: B) -> ControlLoop<S, B> {
        let log = StateLog::new(config.log_path.clone(), config.log_every);
        ControlLoop {
            config,
            sensor,
            outputs,
            log,
            relay: RelayState::Off,
            cold_watch: ColdWatch::Normal,
            iteration: -1,
        }
    }

    /// Runs until shutdown is requested or an actuator write fails. The
    /// relay is forced off before the first cycle.
    pub fn run(&mut self, shutdown: &ShutdownFlag) -> Result<()> {
        self.outputs
            .set_level(OutputChannel::Relay, RelayState::Off.level())?;
        info!(
            "control loop running: relay ON<={:.1} OFF>={:.1}, cycle {:?}",
            self.config.relay.on_c, self.config.relay.off_c, self.config.cycle_interval
        );

        while !shutdown.is_requested() {
            let triggered = match self.sensor.trigger() {
                Ok(()) => true,
                Err(e) => {
                    warn!("sensor trigger failed: {e}");
                    false
                }
            };
            if shutdown.wait_timeout(self.config.settle_delay) {
                break;
            }
            let reading = if triggered {
                self.sensor.read()
            } else {
                Err(SensorError::NotReady)
            };
            self.run_cycle(reading, Local::now().hour())?;
            if shutdown.wait_timeout(self.config.cycle_interval) {
                break;
            }
        }
        info!("control loop stopped");
        Ok(())
    }

    /// The non-blocking half of one cycle. A sensor error skips every
    /// decision and side effect (relay, LEDs and log state persist
    /// exactly as the previous cycle left them) but the cycle still
    /// counts.
    fn run_cycle(&mut self, reading: Result<f64, SensorError>, hour: u32) -> Result<()> {
        match reading {
            Ok(raw) => self.apply_sample(round_reading(raw), hour)?,
            Err(e) => warn!("no usable reading this cycle: {e}"),
        }
        self.iteration += 1;
        Ok(())
    }

    fn apply_sample(&mut self, temp: f64, hour: u32) -> Result<()> {
        let period = DayPeriod::from_hour(hour);
        debug!("t={temp:.1} hour={hour} relay={}", self.relay.as_str());

        let next = next_relay_state(temp, period, self.relay, &self.config.relay);
        if next != self.relay {
            self.outputs
                .set_level(OutputChannel::Relay, next.level())?;
            info!("relay {} -> {} at {temp:.1}", self.relay.as_str(), next.as_str());
            self.relay = next;
        }

        if let ColdSource::Tracked(pair) = self.config.cold_indicator {
            self.cold_watch = self.cold_watch.update(temp, &pair);
        }
        let cold_active = match self.config.cold_indicator {
            ColdSource::RelayKeyed => self.relay == RelayState::On,
            ColdSource::Tracked(_) => self.cold_watch == ColdWatch::Cold,
        };

        let indication = select_indication(temp, cold_active, period, &self.config);
        self.drive_leds(&indication)?;

        if self.log.due(self.iteration, self.relay) {
            // The log is an audit record, not an actuator: a failed append
            // is reported but does not stop the heater.
            if let Err(e) = self.log.record(temp, self.relay) {
                error!("state log append failed: {e:#}");
            }
        }
        Ok(())
    }

    fn drive_leds(&mut self, indication: &Indication) -> Result<()> {
        let lit = indication.channel.outputs();
        for led in OutputChannel::LEDS {
            let level = if lit.contains(&led) {
                indication.brightness
            } else {
                0
            };
            self.outputs.set_level(led, level)?;
        }
        Ok(())
    }

    /// Drives every channel to zero. Runs on every exit path; after a
    /// hardware fault this is best effort.
    pub fn safe_state(&mut self) {
        if let Err(e) = self.outputs.all_off() {
            error!("safe-state shutdown incomplete: {e}");
        }
    }

    pub fn relay_state(&self) -> RelayState {
        self.relay
    }
}
