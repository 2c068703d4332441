//! Cooperative shutdown.
//!
//! One SIGINT means: finish nothing, drive everything off, exit 0. The
//! loop's sleeps all go through [`ShutdownFlag::wait_timeout`] so the
//! interrupt cuts them short instead of waiting out a full cycle.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

#[derive(Clone, Default)]
pub struct ShutdownFlag {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownFlag {
    pub fn new() -> ShutdownFlag {
        ShutdownFlag::default()
    }

    /// Registers the SIGINT handler. Only one signal is handled; a second
    /// Ctrl-C while cleanup runs is ignored by the handler (it just sets
    /// the already-set flag again).
    pub fn install(&self) -> Result<()> {
        let flag = self.clone();
        ctrlc::set_handler(move || flag.request()).context("install SIGINT handler")
    }

    pub fn request(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }

    pub fn is_requested(&self) -> bool {
        *self.inner.0.lock().unwrap()
    }

    /// Sleeps at most `timeout`. Returns true as soon as shutdown is
    /// requested, false once the full timeout elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut requested = lock.lock().unwrap();
        while !*requested {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = cvar.wait_timeout(requested, deadline - now).unwrap();
            requested = guard;
        }
        true
    }
}
