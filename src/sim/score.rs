//! Points for pipes the bird has cleared

use super::bird::Bird;
use super::pipes::PipeStream;

/// Mark every unscored pipe whose trailing edge is strictly left of the
/// bird's x and return how many were newly marked.
pub fn update_score(bird: &Bird, pipes: &mut PipeStream) -> u32 {
    let mut delta = 0;
    for pipe in pipes.iter_mut() {
        if pipe.trailing_edge() < bird.x && pipe.mark_scored() {
            delta += 1;
        }
    }
    delta
}
