//! Flappy Blossom - a pastel Flappy Bird for the terminal
//!
//! Modules:
//! - `sim`: deterministic core (physics, obstacles, collision, scoring, run state)
//! - `clock`: fixed-timestep frame driver
//! - `input`: terminal events to game actions
//! - `assets`: optional sprites loaded from the run directory
//! - `audio`: jump/hit/point sound cues
//! - `render`: half-block pixel renderer and decorative scenery
//! - `app`: the frame loop tying everything together

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod input;
pub mod render;
pub mod sim;
pub mod terminal;

/// World and timing constants. The simulation always runs in these units,
/// whatever the terminal size.
pub mod consts {
    /// Simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Most ticks one frame may run to catch up after a stall
    pub const MAX_CATCH_UP: u32 = 5;

    /// World width
    pub const SCREEN_WIDTH: f64 = 400.0;
    /// World height, ground band included
    pub const SCREEN_HEIGHT: f64 = 600.0;
    /// Height of the ground band at the bottom of the world
    pub const GROUND_HEIGHT: f64 = 100.0;
    /// y of the ground line
    pub const GROUND_LINE: f64 = SCREEN_HEIGHT - GROUND_HEIGHT;
}
