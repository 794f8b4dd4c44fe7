//! Platform glue: input, clocks, the fixed-step driver and the frame loop
//!
//! The browser front end drives [`Game`] from `requestAnimationFrame`; native
//! builds use [`run`], which paces frames with a [`FrameClock`].

pub mod game;
pub mod input;
pub mod time;

pub use game::Game;
pub use input::{Command, InputSource, ScriptedInput};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
pub use time::{FrameClock, ManualClock};

use crate::consts::{FRAME_MS, MAX_FRAME_GAP_MS};
use crate::sim::{GameEvent, Snapshot};

/// Draws a frame
pub trait Renderer {
    /// Called once per frame after the update, with that update's events
    fn render(&mut self, snapshot: &Snapshot, events: &[GameEvent]);
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &Snapshot, _events: &[GameEvent]) {}
}

/// What a finished loop reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub crashes: u32,
    pub final_score: u32,
    pub best_score: u32,
    /// Stopped by a quit command (as opposed to the frame limit)
    pub quit: bool,
}

/// Run the frame loop until quit or `max_frames`
///
/// Each frame: poll input, stop on quit before touching the session, apply
/// commands, update, render, then wait for the next frame deadline.
pub fn run<I, R, C>(
    game: &mut Game,
    input: &mut I,
    renderer: &mut R,
    clock: &mut C,
    max_frames: Option<u64>,
) -> RunSummary
where
    I: InputSource,
    R: Renderer,
    C: FrameClock,
{
    let mut summary = RunSummary::default();
    let mut commands = Vec::new();
    let mut snapshot = game.snapshot();
    let mut deadline = clock.now_ms();

    loop {
        if max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }

        commands.clear();
        input.poll(&snapshot, &mut commands);
        if game.quit_requested() || commands.contains(&Command::Quit) {
            game.quit();
            summary.quit = true;
            log::info!("Quit after {} frames", summary.frames);
            break;
        }
        for &command in &commands {
            game.apply(command);
        }

        let now = clock.now_ms();
        game.update(now);
        summary.crashes += game
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count() as u32;

        snapshot = game.snapshot();
        renderer.render(&snapshot, game.events());
        summary.frames += 1;

        deadline += FRAME_MS;
        if deadline < now - MAX_FRAME_GAP_MS {
            // Too far behind to catch up; pace from here
            deadline = now;
        }
        clock.wait_until(deadline);
    }

    summary.final_score = game.state.score;
    summary.best_score = game.state.best_score;
    summary
}
