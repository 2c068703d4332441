use std::env;

use anyhow::{bail, Context, Result};
use log::{error, info};

use heater_control::config::{ColdSource, Config};
use heater_control::control::ControlLoop;
use heater_control::hw::{dht22, Dht22Sensor, GpioBank, PinMap};
use heater_control::shutdown::ShutdownFlag;

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::standard();
    for arg in &args[1..] {
        if arg == "standard" {
            config = Config::standard();
        } else if arg == "heatwave" {
            config = Config::heatwave();
        } else if arg == "+band" {
            config.heatwave_band = true;
        } else if arg == "-band" {
            config.heatwave_band = false;
        } else if arg == "+coldtrack" {
            config.cold_indicator = ColdSource::Tracked(config.relay);
        } else if arg == "-coldtrack" {
            config.cold_indicator = ColdSource::RelayKeyed;
        } else if let Some(path) = arg.strip_prefix("log=") {
            config.log_path = path.into();
        } else {
            bail!(
                "Usage: heater-control [standard|heatwave] [+band|-band] [+coldtrack|-coldtrack] [log=<path>]"
            );
        }
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let config = parse_args()?;
    // Fail fast: a collapsed dead band must never reach the hardware.
    config.validate()?;

    let shutdown = ShutdownFlag::new();
    shutdown.install()?;

    let sensor = Dht22Sensor::open(dht22::DEFAULT_DATA_PIN, Some(dht22::DEFAULT_ACTIVITY_LED_PIN))
        .context("sensor init")?;
    let outputs = GpioBank::open(PinMap::default()).context("gpio init")?;
    info!("heater control started");

    let mut ctl = ControlLoop::new(config, sensor, outputs);
    let result = ctl.run(&shutdown);

    // Safe state on every exit path, then the pins release on drop.
    ctl.safe_state();
    if let Err(e) = &result {
        error!("fatal: {e:#}");
    }
    result
}
