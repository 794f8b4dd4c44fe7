//! Session state and the read-only snapshot handed to renderers

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipe::PipeStream;
use crate::config::{ConfigError, GameConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Crashed; frozen until reset
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    PipeSpawned { id: u32 },
    Scored { score: u32 },
    Crashed { score: u32 },
    Reset,
}

/// Complete session state
///
/// The session is the only owner of the bird and the pipes; nothing else
/// keeps references to them across frames.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning (validated)
    pub config: GameConfig,
    /// Seed the gap RNG was created from
    pub seed: u64,
    /// Gap RNG
    pub(crate) rng: Pcg32,
    pub bird: Bird,
    pub pipes: PipeStream,
    pub score: u32,
    /// Best score this process has seen (not persisted)
    pub best_score: u32,
    pub phase: GamePhase,
    /// Simulation clock (ms), advanced only while playing
    pub time_ms: f64,
    /// Simulation clock value at the last pipe spawn
    pub last_spawn_ms: f64,
    /// Frames simulated while playing
    pub time_ticks: u64,
    /// Completed runs (resets so far)
    pub runs: u32,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session, rejecting invalid tuning
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(config, seed))
    }

    /// Start a session with the default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::fresh(GameConfig::default(), seed)
    }

    fn fresh(config: GameConfig, seed: u64) -> Self {
        log::info!("New session (seed {})", seed);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::new(&config),
            pipes: PipeStream::new(),
            score: 0,
            best_score: 0,
            phase: GamePhase::Playing,
            time_ms: 0.0,
            last_spawn_ms: 0.0,
            time_ticks: 0,
            runs: 0,
            events: Vec::new(),
        }
    }

    /// Back to a fresh run: new bird, no pipes, zero score
    ///
    /// The spawn timer restarts from the current simulation time. The best
    /// score and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.score = 0;
        self.last_spawn_ms = self.time_ms;
        self.phase = GamePhase::Playing;
        self.runs += 1;
        self.events.push(GameEvent::Reset);
        log::info!("Run {} started", self.runs + 1);
    }

    /// End the run
    pub(crate) fn crash(&mut self) {
        self.phase = GamePhase::GameOver;
        self.best_score = self.best_score.max(self.score);
        self.events.push(GameEvent::Crashed { score: self.score });
        log::info!(
            "Game over: score {} (best {}) after {} frames",
            self.score,
            self.best_score,
            self.time_ticks
        );
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Read-only view for renderers and HUDs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bird: BirdView {
                x: self.bird.pos.x,
                y: self.bird.pos.y,
                tilt: self.bird.tilt,
                size: self.bird.size,
            },
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    width: p.width,
                    gap_center_y: p.gap_center_y,
                    gap_height: self.config.gap_height,
                })
                .collect(),
            score: self.score,
            best_score: self.best_score,
            phase: self.phase,
            visible_width: self.config.visible_width,
            visible_height: self.config.visible_height,
        }
    }
}

/// Bird as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    /// Degrees, positive = nose up
    pub tilt: f32,
    pub size: f32,
}

/// Pipe pair as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    pub gap_center_y: f32,
    pub gap_height: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
    pub visible_width: f32,
    pub visible_height: f32,
}
