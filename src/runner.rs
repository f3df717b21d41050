//! Frame driver
//!
//! Converts variable host frame times into whole fixed-rate simulation ticks,
//! so the per-tick constants mean the same thing on a 60 Hz laptop and a
//! 144 Hz monitor. One `Runner` lives for the whole page; the `GameState`
//! inside it is the current session.

use crate::audio::{self, AudioSink};
use crate::consts::*;
use crate::sim::{GameState, TickInput, tick};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

pub struct Runner {
    pub state: GameState,
    /// Input gathered since the last tick
    pub input: TickInput,
    accumulator: f32,
    /// Best score this page load (memory only)
    pub best_score: u32,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    pub fps: u32,
}

impl Runner {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            best_score: 0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Queue a flap for the next tick
    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    /// Queue the welcome-screen dismissal for the next tick
    pub fn start_session(&mut self) {
        self.input.start_session = true;
    }

    /// Run as many ticks as `dt` seconds of frame time allow, then hand the
    /// raised events to the audio sink. Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32, audio: &mut dyn AudioSink) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }

        self.best_score = self.best_score.max(self.state.score);

        let events = self.state.drain_events();
        if !events.is_empty() {
            audio::dispatch(&events, audio);
        }

        substeps
    }

    /// Track frame timestamps (ms) for the FPS counter
    pub fn record_frame_time(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample is the one we overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59.0 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}
