//! The player character

use std::collections::VecDeque;

use super::collision::Rect;
use super::physics::Physics;

/// Number of trail points kept
pub const TRAIL_CAPACITY: usize = 8;
/// Life a trail point starts with; it loses one per tick
pub const TRAIL_LIFE: i32 = 10;
/// Display rotation bounds in degrees (positive tilts the nose down)
pub const MIN_ROTATION: f64 = -30.0;
pub const MAX_ROTATION: f64 = 90.0;

/// A recent bird centre, fading out as `life` runs down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    pub life: i32,
}

#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity: f64,
    /// Degrees, derived from velocity each step
    pub rotation: f64,
    /// Oldest first
    trail: VecDeque<TrailPoint>,
}

impl Bird {
    pub fn new(physics: &Physics) -> Self {
        Self {
            x: physics.bird_x,
            y: physics.bird_y,
            width: physics.bird_width,
            height: physics.bird_height,
            velocity: 0.0,
            rotation: 0.0,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.trail.iter()
    }

    /// Set the upward velocity. Returns the centre, where the flap burst goes.
    pub fn flap(&mut self, physics: &Physics) -> (f64, f64) {
        self.velocity = physics.jump_velocity;
        self.center()
    }

    /// Advance one tick: gravity, rotation, trail, ground clamp.
    pub fn step(&mut self, physics: &Physics) {
        self.velocity += physics.gravity;
        self.y += self.velocity;
        self.rotation = (self.velocity * 3.0).clamp(MIN_ROTATION, MAX_ROTATION);

        let (cx, cy) = self.center();
        self.trail.push_back(TrailPoint {
            x: cx,
            y: cy,
            life: TRAIL_LIFE,
        });
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
        for point in &mut self.trail {
            point.life -= 1;
        }

        let floor = physics.bird_floor();
        if self.y > floor {
            self.y = floor;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flap_sets_velocity() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        let (cx, cy) = bird.flap(&physics);
        assert_eq!(bird.velocity, -10.0);
        assert_eq!((cx, cy), (100.0, 270.0));
    }

    #[test]
    fn test_projectile_after_flap() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.flap(&physics);
        for _ in 0..20 {
            bird.step(&physics);
        }
        // y_t = 250 - 10t + 0.25 t (t + 1)
        assert_eq!(bird.y, 155.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_projectile_matches_running_sum() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.flap(&physics);
        let mut expected = 250.0;
        for t in 1..=12 {
            bird.step(&physics);
            expected += -10.0 + 0.5 * t as f64;
            assert_eq!(bird.y, expected);
        }
    }

    #[test]
    fn test_rotation_clamped() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.flap(&physics);
        bird.step(&physics);
        assert_eq!(bird.rotation, -28.5);

        bird.velocity = -20.0;
        bird.step(&physics);
        assert_eq!(bird.rotation, MIN_ROTATION);

        bird.velocity = 40.0;
        bird.y = 0.0;
        bird.step(&physics);
        assert_eq!(bird.rotation, MAX_ROTATION);
    }

    #[test]
    fn test_trail_capacity_and_decay() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.step(&physics);
        assert_eq!(bird.trail().len(), 1);
        assert_eq!(bird.trail().next().map(|p| p.life), Some(TRAIL_LIFE - 1));

        for _ in 0..20 {
            bird.step(&physics);
        }
        assert_eq!(bird.trail().len(), TRAIL_CAPACITY);
        let lives: Vec<i32> = bird.trail().map(|p| p.life).collect();
        // Oldest first, each one tick older than the next
        assert_eq!(lives, vec![2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_ground_clamp_zeroes_velocity() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.y = physics.bird_floor() - 1.0;
        bird.velocity = 5.0;
        bird.step(&physics);
        assert_eq!(bird.y, physics.bird_floor());
        assert_eq!(bird.velocity, 0.0);
    }

    proptest! {
        #[test]
        fn prop_never_below_ground(flaps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let physics = Physics::default();
            let mut bird = Bird::new(&physics);
            for flap in flaps {
                if flap {
                    bird.flap(&physics);
                }
                let before = bird.y + (bird.velocity + physics.gravity);
                bird.step(&physics);
                prop_assert!(bird.y <= physics.bird_floor());
                if before > physics.bird_floor() {
                    prop_assert_eq!(bird.velocity, 0.0);
                }
                prop_assert!(bird.trail().len() <= TRAIL_CAPACITY);
            }
        }
    }
}
