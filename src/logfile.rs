//! Append-only relay/temperature audit log.
//!
//! One tab-separated line per record: local timestamp, rounded
//! temperature, relay status. Records are coalesced: a heartbeat every
//! `log_every` cycles plus an immediate record on every relay transition.
//! Nothing here ever rewrites or deletes a line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::relay::RelayState;

pub struct StateLog {
    path: PathBuf,
    every: i64,
    /// Status at the previous write. Starts Off to match the forced-off
    /// relay at startup, so the first (often inaccurate) reading is not
    /// logged as a phantom transition.
    last_status: RelayState,
}

impl StateLog {
    pub fn new(path: PathBuf, every: i64) -> StateLog {
        StateLog {
            path,
            every,
            last_status: RelayState::Off,
        }
    }

    /// Coalescing rule. The iteration counter starts at -1 and -1 % every
    /// is non-zero, so the heartbeat first fires on the second completed
    /// cycle; a status change logs immediately regardless.
    pub fn due(&self, counter: i64, status: RelayState) -> bool {
        counter % self.every == 0 || status != self.last_status
    }

    pub fn record(&mut self, temp: f64, status: RelayState) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        writeln!(
            file,
            "{}\t{:.1}\t{}",
            Local::now().format("%d/%m/%Y %H:%M:%S"),
            temp,
            status.as_str()
        )
        .with_context(|| format!("append to {}", self.path.display()))?;
        self.last_status = status;
        Ok(())
    }

    pub fn last_status(&self) -> RelayState {
        self.last_status
    }
}
