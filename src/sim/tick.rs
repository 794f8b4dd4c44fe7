//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame: input, bird physics, pipe
//! stream (spawn, scroll, score, evict), then the crash check.

use super::collision::collides_any;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::FRAME_MS;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (ignored after a crash)
    pub flap: bool,
    /// Start a new run (only honoured after a crash)
    pub reset: bool,
    /// Demo mode - the autopilot flaps for the player
    pub autopilot: bool,
}

/// Advance the game state by `dt` frames
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::GameOver => {
            if !input.reset {
                return;
            }
            state.reset();
        }
        GamePhase::Playing => {
            let wants_flap = input.flap || (input.autopilot && autopilot_wants_flap(state));
            if wants_flap {
                state.bird.flap(&state.config);
                state.events.push(GameEvent::Flapped);
            }
        }
    }

    let config = state.config;
    state.time_ticks += 1;
    state.time_ms += dt as f64 * FRAME_MS;

    state.bird.advance(dt, &config);

    let last_spawn = state.pipes.maybe_spawn(
        state.time_ms,
        state.last_spawn_ms,
        &config,
        &mut state.rng,
    );
    if last_spawn != state.last_spawn_ms {
        state.last_spawn_ms = last_spawn;
        if let Some(pipe) = state.pipes.newest() {
            state.events.push(GameEvent::PipeSpawned { id: pipe.id });
        }
    }

    state.pipes.advance(dt, &config);

    for _ in 0..state.pipes.score_passed(state.bird.pos.x) {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    state.pipes.prune();

    if collides_any(&state.bird, state.pipes.iter(), &config) {
        state.crash();
    }
}

/// Should the autopilot flap this frame?
///
/// Aims for the next pipe the bird has not fully cleared (screen middle when
/// there is none) and flaps once the falling bird sinks into the lower part of
/// that gap, low enough that the apex of the flap still clears the top.
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    let config = &state.config;
    let bird = &state.bird;
    if bird.rising() {
        return false;
    }

    let half = bird.size / 2.0;
    let target = state
        .pipes
        .iter()
        .find(|p| p.right() + half >= bird.pos.x - half)
        .map(|p| p.gap_center_y)
        .unwrap_or(config.visible_height / 2.0);

    let trigger = target + config.gap_height / 2.0 - bird.size;
    bird.pos.y > trigger || bird.pos.y + half >= config.visible_height
}
