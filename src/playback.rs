//! Caller-driven playback of a run.
//!
//! A display client receives a periodic "tick" signal from some transport
//! and calls [`Playback::on_tick`] for each one. Playback steps the engine
//! once per signal while running and stops by itself when the run is done.
//! The transport and the rendering are not part of this crate.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::PlaybackConfig;
use crate::scheduler::{Engine, SnapshotView};

/// Start/stop state around an engine.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    config: PlaybackConfig,
    engine: Option<Engine>,
    running: bool,
}

impl Playback {
    /// Creates an idle playback with no engine.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            engine: None,
            running: false,
        }
    }

    /// Tick period to announce to the display client.
    pub fn tick_period(&self) -> Duration {
        self.config.tick_period()
    }

    /// Installs a loaded engine and starts playing.
    ///
    /// Returns the initial snapshot so the client can render t=0.
    pub fn start(&mut self, engine: Engine) -> SnapshotView {
        let snapshot = engine.snapshot();
        info!(
            algorithm = %engine.algorithm(),
            processes = engine.processes().len(),
            tick_ms = self.tick_period().as_millis() as u64,
            "playback started"
        );
        self.running = !engine.is_done();
        self.engine = Some(engine);
        snapshot
    }

    /// Pauses playback. Ticks received while stopped are ignored.
    pub fn stop(&mut self) {
        if self.running {
            debug!("playback stopped");
        }
        self.running = false;
    }

    /// Resumes a stopped run. Returns whether playback is now running.
    pub fn resume(&mut self) -> bool {
        self.running = self.engine.as_ref().is_some_and(|e| !e.is_done());
        self.running
    }

    /// Whether ticks currently advance the engine.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The engine being played, if any.
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Handles one external tick signal.
    ///
    /// Steps the engine once and returns the new snapshot, or `None` if
    /// playback is stopped or no engine is installed.
    pub fn on_tick(&mut self) -> Option<SnapshotView> {
        if !self.running {
            return None;
        }
        let engine = self.engine.as_mut()?;
        engine.step();
        if engine.is_done() {
            self.running = false;
            info!(time = engine.time(), "playback finished");
        }
        Some(engine.snapshot())
    }
}
