//! Fixed-step driver shared by the browser and native front ends

use crate::consts::{FRAME_MS, MAX_FRAME_GAP_MS, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

use super::input::Command;

/// Tolerance for accumulated clock jitter (ms)
const STEP_EPSILON: f64 = 1e-6;

/// Game instance: session plus the per-frame plumbing around it
pub struct Game {
    pub state: GameState,
    input: TickInput,
    accumulator: f64,
    last_time: Option<f64>,
    quit: bool,
    /// Events from every substep of the last update
    events: Vec<GameEvent>,
    /// Wall-clock time discarded by the frame gap clamp (ms)
    dropped_ms: f64,
}

impl Game {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
            quit: false,
            events: Vec::new(),
            dropped_ms: 0.0,
        }
    }

    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    pub fn reset(&mut self) {
        self.input.reset = true;
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", if on { "on" } else { "off" });
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Queue a player command for the next tick
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Flap => self.flap(),
            Command::Reset => self.reset(),
            Command::Action => {
                if self.state.is_game_over() {
                    self.reset();
                } else {
                    self.flap();
                }
            }
            Command::ToggleAutopilot => self.set_autopilot(!self.input.autopilot),
            Command::Quit => self.quit(),
        }
    }

    /// Run simulation ticks for the time elapsed since the last call
    ///
    /// Returns the number of ticks run. The first call runs exactly one.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        self.events.clear();

        let elapsed = match self.last_time {
            Some(last) => {
                let gap = (now_ms - last).max(0.0);
                if gap > MAX_FRAME_GAP_MS {
                    let dropped = gap - MAX_FRAME_GAP_MS;
                    self.dropped_ms += dropped;
                    log::warn!("Frame gap of {:.1} ms; dropping {:.1} ms", gap, dropped);
                }
                gap.min(MAX_FRAME_GAP_MS)
            }
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator + STEP_EPSILON >= FRAME_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.events.extend_from_slice(&self.state.events);
            self.accumulator -= FRAME_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.flap = false;
            self.input.reset = false;
        }

        substeps
    }

    /// Events from the last [`Game::update`]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Total wall-clock time skipped after stalls (ms)
    pub fn dropped_ms(&self) -> f64 {
        self.dropped_ms
    }
}
