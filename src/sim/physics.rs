//! Tuning constants for the simulation

use crate::consts::{GROUND_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Every constant the core reads. `Default` is the shipped game.
#[derive(Debug, Clone, PartialEq)]
pub struct Physics {
    pub screen_width: f64,
    pub screen_height: f64,
    pub ground_height: f64,

    /// Added to the bird's velocity every tick
    pub gravity: f64,
    /// Velocity set by a flap (negative is up)
    pub jump_velocity: f64,

    pub bird_x: f64,
    pub bird_y: f64,
    pub bird_width: f64,
    pub bird_height: f64,

    /// Leftward pipe movement per tick
    pub pipe_speed: f64,
    pub pipe_width: f64,
    /// Vertical opening between the two segments
    pub pipe_gap: f64,
    /// A pipe spawns on every tick that is a multiple of this
    pub spawn_interval: u64,
    /// Shortest allowed top segment
    pub min_top: f64,
    /// Shortest allowed bottom segment
    pub min_bottom: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: 0.5,
            jump_velocity: -10.0,
            bird_x: 80.0,
            bird_y: 250.0,
            bird_width: 40.0,
            bird_height: 40.0,
            pipe_speed: 3.0,
            pipe_width: 60.0,
            pipe_gap: 150.0,
            spawn_interval: 90,
            min_top: 50.0,
            min_bottom: 100.0,
        }
    }
}

impl Physics {
    /// y of the ground line (top of the ground band)
    pub fn ground_line(&self) -> f64 {
        self.screen_height - self.ground_height
    }

    /// Lowest y the bird's top edge may take
    pub fn bird_floor(&self) -> f64 {
        self.ground_line() - self.bird_height
    }

    /// Tallest top segment that still leaves `min_bottom` below the gap
    pub fn max_top(&self) -> f64 {
        self.ground_line() - self.pipe_gap - self.min_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gap_range() {
        let p = Physics::default();
        assert_eq!(p.ground_line(), 500.0);
        assert_eq!(p.max_top(), 250.0);
        assert_eq!(p.bird_floor(), 460.0);
    }
}
