//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Pipes kept in spawn (= screen) order
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod pipe;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Rect, bird_hitbox, collides, collides_any, out_of_bounds, pipe_rects};
pub use pipe::{Pipe, PipeStream};
pub use state::{BirdView, GameEvent, GamePhase, GameState, PipeView, Snapshot};
pub use tick::{TickInput, autopilot_wants_flap, tick};
