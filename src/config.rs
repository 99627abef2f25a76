//! Run configuration.
//!
//! - [`PlaybackConfig`]: tick period for real-time playback, read from
//!   `TICK_SECONDS` (seconds, default 0.5).
//! - [`SimulationConfig`]: a complete scenario (algorithm, quantum, batch)
//!   as loaded from JSON.
//!
//! # Scenario Format
//!
//! ```json
//! {
//!   "algorithm": "RR",
//!   "quantum": 2,
//!   "playback": { "tick_seconds": 0.25 },
//!   "processes": [
//!     { "name": "editor", "arrival": 0, "burst": 5 },
//!     { "arrival": 1, "burst": 3 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SimError;
use crate::models::{Algorithm, ProcessInput, Tick};
use crate::scheduler::Engine;

/// Environment variable holding the playback tick period in seconds.
pub const TICK_SECONDS_ENV: &str = "TICK_SECONDS";

/// Tick period used when nothing is configured.
pub const DEFAULT_TICK_SECONDS: f64 = 0.5;

/// Real-time playback settings.
///
/// The engine itself has no notion of wall-clock time; this period only
/// tells whoever drives `step()` how often to do it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds between two ticks.
    pub tick_seconds: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
        }
    }
}

impl PlaybackConfig {
    /// Creates a config with the given period.
    ///
    /// # Errors
    /// [`SimError::InvalidConfiguration`] unless `tick_seconds` is finite
    /// and positive.
    pub fn new(tick_seconds: f64) -> Result<Self, SimError> {
        if !tick_seconds.is_finite() || tick_seconds <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "tick period must be a positive number of seconds (got {tick_seconds})"
            )));
        }
        Ok(Self { tick_seconds })
    }

    /// Reads `TICK_SECONDS` from the process environment.
    pub fn from_env() -> Result<Self, SimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `TICK_SECONDS` through `lookup`, falling back to the default
    /// when the variable is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(TICK_SECONDS_ENV) {
            None => Ok(Self::default()),
            Some(raw) => {
                let seconds = raw.trim().parse::<f64>().map_err(|_| {
                    SimError::InvalidConfiguration(format!(
                        "{TICK_SECONDS_ENV} must be a number (got '{raw}')"
                    ))
                })?;
                Self::new(seconds)
            }
        }
    }

    /// Tick period as a [`Duration`].
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.tick_seconds)
    }
}

/// A complete simulation scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling discipline.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Round-Robin quantum. `None` = 1.
    #[serde(default)]
    pub quantum: Option<Tick>,
    /// Playback pacing.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Process batch.
    #[serde(default)]
    pub processes: Vec<ProcessInput>,
}

impl SimulationConfig {
    /// Creates an empty scenario for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Sets the quantum.
    pub fn with_quantum(mut self, quantum: Tick) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the playback pacing.
    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    /// Adds a process draft.
    pub fn with_process(mut self, process: ProcessInput) -> Self {
        self.processes.push(process);
        self
    }

    /// Replaces the process batch.
    pub fn with_processes(mut self, processes: Vec<ProcessInput>) -> Self {
        self.processes = processes;
        self
    }

    /// Parses a scenario from JSON.
    ///
    /// # Errors
    /// [`SimError::InvalidConfiguration`] for an unknown algorithm name or a
    /// bad tick period; [`SimError::Config`] if the document does not match
    /// the scenario format.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let raw: serde_json::Value = serde_json::from_str(json).map_err(invalid_scenario)?;
        if let Some(name) = raw.get("algorithm").and_then(serde_json::Value::as_str) {
            name.parse::<Algorithm>()?;
        }
        let config: Self = serde_json::from_value(raw).map_err(invalid_scenario)?;
        PlaybackConfig::new(config.playback.tick_seconds)?;
        Ok(config)
    }

    /// Creates an engine and loads the batch.
    pub fn build_engine(&self) -> Result<Engine, SimError> {
        let mut engine = Engine::new(self.algorithm, self.quantum)?;
        engine.load_processes(&self.processes)?;
        Ok(engine)
    }
}

fn invalid_scenario(e: serde_json::Error) -> SimError {
    SimError::config(format!("invalid scenario: {e}"))
}
