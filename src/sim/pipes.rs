//! Obstacle pipes and the stream that spawns, scrolls and retires them

use rand::Rng;

use super::collision::Rect;
use super::physics::Physics;

/// A top/bottom pipe pair with a gap between.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f64,
    pub width: f64,
    pub top_height: f64,
    /// y where the bottom segment starts
    pub bottom_y: f64,
    pub bottom_height: f64,
    scored: bool,
}

impl Pipe {
    /// Pipe whose top segment is `top_height` tall. The bottom segment fills
    /// from the end of the gap down to the ground line.
    pub fn new(x: f64, top_height: f64, physics: &Physics) -> Self {
        let bottom_y = top_height + physics.pipe_gap;
        Self {
            x,
            width: physics.pipe_width,
            top_height,
            bottom_y,
            bottom_height: physics.ground_line() - bottom_y,
            scored: false,
        }
    }

    /// Pipe at `x` with a gap drawn uniformly from the whole-unit heights
    /// in `[min_top, max_top]`.
    pub fn random<R: Rng>(x: f64, rng: &mut R, physics: &Physics) -> Self {
        let lo = physics.min_top.ceil() as i64;
        let hi = (physics.max_top().floor() as i64).max(lo);
        let top_height = rng.random_range(lo..=hi) as f64;
        Self::new(x, top_height, physics)
    }

    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Flip the scored flag. Returns false if it was already set.
    pub(crate) fn mark_scored(&mut self) -> bool {
        !std::mem::replace(&mut self.scored, true)
    }

    /// The top and bottom collision boxes.
    pub fn segments(&self) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, self.width, self.top_height),
            Rect::new(self.x, self.bottom_y, self.width, self.bottom_height),
        ]
    }
}

/// Live pipes in spawn order, which is also left-to-right order.
#[derive(Debug, Clone, Default)]
pub struct PipeStream {
    pipes: Vec<Pipe>,
}

impl PipeStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pipe at the right edge if `tick` lands on the spawn interval.
    pub fn maybe_spawn<R: Rng>(&mut self, tick: u64, rng: &mut R, physics: &Physics) -> bool {
        if physics.spawn_interval == 0 || tick % physics.spawn_interval != 0 {
            return false;
        }
        self.pipes
            .push(Pipe::random(physics.screen_width, rng, physics));
        true
    }

    /// Scroll every pipe left and drop the ones fully past the left edge.
    pub fn step(&mut self, physics: &Physics) {
        for pipe in &mut self.pipes {
            pipe.x -= physics.pipe_speed;
        }
        self.pipes.retain(|p| !p.is_off_screen());
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pipe> {
        self.pipes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Pipe> {
        self.pipes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }
}

impl<'a> IntoIterator for &'a PipeStream {
    type Item = &'a Pipe;
    type IntoIter = std::slice::Iter<'a, Pipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.pipes.iter()
    }
}
