//! Deterministic simulation
//!
//! All gameplay lives here and nothing here renders, plays sound or reads
//! the clock:
//! - One call to `Game::tick` is one fixed step
//! - Gap placement comes from a seeded RNG owned by the game
//! - Side effects leave as `GameEvent`s for the frame loop to route

pub mod bird;
pub mod collision;
pub mod physics;
pub mod pipes;
pub mod score;
pub mod state;

pub use bird::{Bird, TRAIL_CAPACITY, TrailPoint};
pub use collision::{Rect, detect};
pub use physics::Physics;
pub use pipes::{Pipe, PipeStream};
pub use score::update_score;
pub use state::{Game, GameEvent, Input, RunState, Snapshot};
