//! Lap timing for the kernel runs.
//!
//! A [`LapTimer`] holds one active lap: a label and a start instant.
//! `start` overwrites both, and `stop` measures against them without
//! clearing anything, so stopping twice in a row reports the same label
//! twice with a growing elapsed time.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// One finished measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    pub label: String,
    pub elapsed: Duration,
}

impl Lap {
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Throughput of an N×N×N multiply that took this long: 2·N³ flops.
    pub fn gflops(&self, n: usize) -> f64 {
        let flops = 2.0 * (n as f64).powi(3);
        flops / self.secs() / 1e9
    }
}

/// `[label] 0.1234`
impl fmt::Display for Lap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:.4}", self.label, self.secs())
    }
}

#[derive(Debug, Default)]
pub struct LapTimer {
    active: Option<(String, Instant)>,
}

impl LapTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a lap. Silently replaces a lap that was never stopped.
    pub fn start(&mut self, label: &str) {
        self.active = Some((label.to_string(), Instant::now()));
    }

    /// Measure the active lap and print it to stderr as `[label] secs`.
    ///
    /// The lap stays active: a second `stop` reuses the same label and start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveLap`] if `start` was never called.
    pub fn stop(&self) -> Result<Lap> {
        let (label, begin) = self.active.as_ref().ok_or(Error::NoActiveLap)?;
        let lap = Lap {
            label: label.clone(),
            elapsed: begin.elapsed(),
        };
        eprintln!("{}", lap);
        Ok(lap)
    }
}

/// Run `f` as one lap: start, call, stop.
pub fn timed<T, F>(timer: &mut LapTimer, label: &str, f: F) -> Result<(T, Lap)>
where
    F: FnOnce() -> T,
{
    timer.start(label);
    let out = f();
    let lap = timer.stop()?;
    Ok((out, lap))
}
