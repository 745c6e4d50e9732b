//! Decorative clouds, stars and flap particles
//!
//! Owned by the presentation side; none of this feeds back into the game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{PASTELS, Rgb};
use crate::consts::{GROUND_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const CLOUD_COUNT: usize = 5;
pub const STAR_COUNT: usize = 20;
pub const BURST_SIZE: usize = 5;
pub const PARTICLE_LIFE: i32 = 30;

#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub size: f64,
}

#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Cycles through 0..120
    pub twinkle: u32,
    pub color: Rgb,
}

impl Star {
    /// Opacity, brightest at both ends of the twinkle cycle
    pub fn alpha(&self) -> f64 {
        let a = (60i32 - self.twinkle as i32).unsigned_abs() * 4;
        a.min(255) as f64 / 255.0
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: i32,
    pub size: f64,
    pub color: Rgb,
}

impl Particle {
    pub fn alpha(&self) -> f64 {
        self.life.max(0) as f64 / PARTICLE_LIFE as f64
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

impl Scenery {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.random_range(0.0..=SCREEN_WIDTH),
                y: rng.random_range(50.0..=250.0),
                speed: rng.random_range(0.3..0.8),
                size: rng.random_range(30..=60) as f64,
            })
            .collect();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..=SCREEN_WIDTH),
                y: rng.random_range(0.0..=SCREEN_HEIGHT - GROUND_HEIGHT),
                size: rng.random_range(1..=3) as f64,
                twinkle: rng.random_range(0..=60),
                color: PASTELS[rng.random_range(0..PASTELS.len())],
            })
            .collect();
        Self {
            clouds,
            stars,
            particles: Vec::new(),
            rng,
        }
    }

    /// Advance one tick. Particles only move while a run is live.
    pub fn update(&mut self, running: bool) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x < -100.0 {
                cloud.x = SCREEN_WIDTH + 50.0;
                cloud.y = self.rng.random_range(50.0..=250.0);
            }
        }
        for star in &mut self.stars {
            star.twinkle = (star.twinkle + 1) % 120;
        }
        if running {
            for p in &mut self.particles {
                p.x += p.vx;
                p.y += p.vy;
                p.vy += 0.2;
                p.life -= 1;
            }
            self.particles.retain(|p| !p.is_dead());
        }
    }

    /// Spray a flap burst from (x, y).
    pub fn burst(&mut self, x: f64, y: f64) {
        for _ in 0..BURST_SIZE {
            self.particles.push(Particle {
                x,
                y,
                vx: self.rng.random_range(-2.0..=2.0),
                vy: self.rng.random_range(-3.0..=-1.0),
                life: PARTICLE_LIFE,
                size: self.rng.random_range(2..=5) as f64,
                color: PASTELS[self.rng.random_range(0..PASTELS.len())],
            });
        }
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
    }
}
