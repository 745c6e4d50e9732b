//! Axis-aligned box collision

use super::bird::Bird;
use super::physics::Physics;
use super::pipes::PipeStream;

/// Axis-aligned rectangle in world units, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// True when the interiors intersect. Touching edges and empty
    /// rectangles never overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Whether the bird hits any pipe segment or has reached the ground.
pub fn detect(bird: &Bird, pipes: &PipeStream, physics: &Physics) -> bool {
    let body = bird.rect();
    let hit_pipe = pipes
        .iter()
        .flat_map(|p| p.segments())
        .any(|segment| body.overlaps(&segment));

    hit_pipe || body.bottom() >= physics.ground_line()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pipes::Pipe;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(5.0, 5.0, 0.0, 10.0)));
    }

    #[test]
    fn test_detect_pipe_hit() {
        let physics = Physics::default();
        let bird = Bird::new(&physics);
        let mut pipes = PipeStream::new();
        // Bird box spans y 250..290; a 260-tall top segment reaches into it
        pipes.push(Pipe::new(70.0, 260.0, &physics));
        assert!(detect(&bird, &pipes, &physics));
    }

    #[test]
    fn test_detect_bottom_segment_hit() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        let mut pipes = PipeStream::new();
        // Gap spans 50..200, bottom segment 200..500
        pipes.push(Pipe::new(70.0, 50.0, &physics));
        assert!(detect(&bird, &pipes, &physics));
        // Box 230..270 still reaches into the bottom segment
        bird.y = 230.0;
        assert!(detect(&bird, &pipes, &physics));
        // Bird box 155..195 sits inside the gap
        bird.y = 155.0;
        assert!(!detect(&bird, &pipes, &physics));
    }

    #[test]
    fn test_detect_through_gap() {
        let physics = Physics::default();
        let bird = Bird::new(&physics);
        let mut pipes = PipeStream::new();
        // Gap spans 200..350, bird spans 250..290
        pipes.push(Pipe::new(70.0, 200.0, &physics));
        assert!(!detect(&bird, &pipes, &physics));
    }

    #[test]
    fn test_detect_ground() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        let pipes = PipeStream::new();
        bird.y = physics.bird_floor() - 0.5;
        assert!(!detect(&bird, &pipes, &physics));
        bird.y = physics.bird_floor();
        assert!(detect(&bird, &pipes, &physics));
    }

    #[test]
    fn test_flying_above_screen_clears_top_segment() {
        let physics = Physics::default();
        let mut bird = Bird::new(&physics);
        bird.y = -60.0;
        let mut pipes = PipeStream::new();
        pipes.push(Pipe::new(70.0, 200.0, &physics));
        assert!(!detect(&bird, &pipes, &physics));
    }
}
