//! Frame driver
//!
//! Owns the simulation and a high score store. Each frame clamps the
//! caller's elapsed time, ticks once, and reacts to the tick's events. The
//! simulation never touches storage itself.

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, RenderSnapshot, SimulationState, TickInput, build_snapshot, tick};

pub struct Session<S: HighScoreStore> {
    state: SimulationState,
    store: S,
    best: HighScore,
    settings: Settings,
}

impl<S: HighScoreStore> Session<S> {
    /// Fresh title-screen session seeded with `seed`. A store that can't be
    /// read starts the record at zero.
    pub fn new(settings: Settings, store: S, seed: u64) -> Self {
        let best = match store.load() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Failed to load high score: {e}");
                HighScore::default()
            }
        };

        let mut state = SimulationState::with_settings(seed, &settings);
        state.hi_score = best.score;
        log::info!(
            "Session ready (seed {seed}, quality {}, best {})",
            settings.quality.as_str(),
            best.score
        );

        Self {
            state,
            store,
            best,
            settings,
        }
    }

    /// Advance by `elapsed` wall-clock seconds, returning what happened.
    /// Hitches and bogus clocks are clamped to [0, MAX_FRAME_DT].
    pub fn frame(&mut self, elapsed: f32, input: &TickInput) -> Vec<GameEvent> {
        let dt = if elapsed.is_finite() {
            crate::clamp(elapsed, 0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();

        for event in &events {
            match event {
                GameEvent::HighScoreRaised { .. } => self.record_best(),
                GameEvent::GameOver { score, level } => {
                    log::info!("Run ended: {score} points on level {level}");
                    self.record_best();
                }
                GameEvent::WaveStarted { level } => {
                    log::debug!("Level {level} begins");
                }
                _ => {}
            }
        }

        events
    }

    fn record_best(&mut self) {
        if !self.best.submit(self.state.hi_score, self.state.level) {
            return;
        }
        if let Err(e) = self.store.save(&self.best) {
            log::warn!("Failed to save high score: {e}");
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        build_snapshot(&self.state)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn best(&self) -> HighScore {
        self.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
