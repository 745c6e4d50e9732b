//! Run state machine tying the core together

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::collision::detect;
use super::physics::Physics;
use super::pipes::PipeStream;
use super::score::update_score;

/// Lifecycle of one play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the first flap; nothing moves
    Idle,
    Running,
    /// Crashed; frozen until restart
    Ended,
}

/// Player intents the core understands. Quitting is the frame loop's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Jump,
    Restart,
}

/// Things that happened during `handle` or `tick`, for audio and effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    /// Flap at the bird's centre
    Jumped { x: f64, y: f64 },
    Scored { score: u32 },
    Crashed { score: u32, best: u32 },
    Reset,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: RunState,
    pub bird: &'a Bird,
    pub pipes: &'a PipeStream,
    pub score: u32,
    pub best: u32,
    pub tick: u64,
    pub physics: &'a Physics,
}

#[derive(Debug, Clone)]
pub struct Game {
    physics: Physics,
    state: RunState,
    bird: Bird,
    pipes: PipeStream,
    score: u32,
    /// Survives restarts, never written anywhere
    best: u32,
    /// Ticks since the current run started
    tick: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_physics(Physics::default(), seed)
    }

    pub fn with_physics(physics: Physics, seed: u64) -> Self {
        Self {
            bird: Bird::new(&physics),
            physics,
            state: RunState::Idle,
            pipes: PipeStream::new(),
            score: 0,
            best: 0,
            tick: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &PipeStream {
        &self.pipes
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// Apply a player input. Inputs that make no sense in the current
    /// state are ignored.
    pub fn handle(&mut self, input: Input) {
        match (self.state, input) {
            (RunState::Idle, Input::Jump) => {
                self.state = RunState::Running;
                log::debug!("run started");
                self.events.push(GameEvent::Started);
            }
            (RunState::Running, Input::Jump) => {
                let (x, y) = self.bird.flap(&self.physics);
                self.events.push(GameEvent::Jumped { x, y });
            }
            (RunState::Ended, Input::Restart) => self.reset(),
            _ => {}
        }
    }

    /// Advance the simulation one fixed step. Does nothing unless running.
    pub fn tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.tick += 1;

        self.bird.step(&self.physics);
        self.pipes.step(&self.physics);
        self.pipes
            .maybe_spawn(self.tick, &mut self.rng, &self.physics);

        let gained = update_score(&self.bird, &mut self.pipes);
        for _ in 0..gained {
            self.score += 1;
            self.events.push(GameEvent::Scored { score: self.score });
        }

        if detect(&self.bird, &self.pipes, &self.physics) {
            self.best = self.best.max(self.score);
            self.state = RunState::Ended;
            log::debug!(
                "crashed at tick {} with score {} (best {})",
                self.tick,
                self.score,
                self.best
            );
            self.events.push(GameEvent::Crashed {
                score: self.score,
                best: self.best,
            });
        }
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            bird: &self.bird,
            pipes: &self.pipes,
            score: self.score,
            best: self.best,
            tick: self.tick,
            physics: &self.physics,
        }
    }

    fn reset(&mut self) {
        self.bird = Bird::new(&self.physics);
        self.pipes = PipeStream::new();
        self.score = 0;
        self.tick = 0;
        self.state = RunState::Idle;
        log::debug!("reset, best stays {}", self.best);
        self.events.push(GameEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pipes::Pipe;

    fn running_game() -> Game {
        let mut game = Game::new(42);
        game.handle(Input::Jump);
        game.drain_events().for_each(drop);
        game
    }

    #[test]
    fn test_idle_jump_starts_without_flap() {
        let mut game = Game::new(1);
        game.handle(Input::Jump);
        assert_eq!(game.state(), RunState::Running);
        assert_eq!(game.bird().velocity, 0.0);
        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_running_jump_flaps() {
        let mut game = running_game();
        game.handle(Input::Jump);
        assert_eq!(game.bird().velocity, -10.0);
        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Jumped { x: 100.0, y: 270.0 }]);
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut game = Game::new(1);
        for _ in 0..100 {
            game.tick();
        }
        assert_eq!(game.ticks(), 0);
        assert_eq!(game.bird().y, 250.0);
        assert!(game.pipes().is_empty());
    }

    #[test]
    fn test_restart_ignored_unless_ended() {
        let mut game = Game::new(1);
        game.handle(Input::Restart);
        assert_eq!(game.state(), RunState::Idle);
        game.handle(Input::Jump);
        game.handle(Input::Restart);
        assert_eq!(game.state(), RunState::Running);
    }

    #[test]
    fn test_flap_trajectory_through_game() {
        let mut game = running_game();
        game.handle(Input::Jump);
        for _ in 0..20 {
            game.tick();
        }
        assert_eq!(game.bird().y, 155.0);
        assert_eq!(game.state(), RunState::Running);
    }

    #[test]
    fn test_falling_ends_run_once() {
        let mut game = running_game();
        let mut ticks = 0;
        while game.state() == RunState::Running {
            game.tick();
            ticks += 1;
            assert!(ticks < 100, "bird never reached the ground");
        }
        assert_eq!(game.state(), RunState::Ended);
        let crashes = game
            .drain_events()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crashes, 1);

        // Frozen after the crash
        let y = game.bird().y;
        let tick = game.ticks();
        game.tick();
        game.handle(Input::Jump);
        assert_eq!(game.bird().y, y);
        assert_eq!(game.ticks(), tick);
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_pipe_hit_ends_run_and_records_best() {
        let mut game = running_game();
        game.score = 3;
        let physics = game.physics().clone();
        // Top segment reaching down past the bird, right on top of it
        game.pipes.push(Pipe::new(75.0, 300.0, &physics));
        game.tick();
        assert_eq!(game.state(), RunState::Ended);
        assert_eq!(game.best(), 3);
    }

    #[test]
    fn test_bottom_segment_hit_ends_run_once() {
        let mut game = running_game();
        let physics = game.physics().clone();
        // Gap 50..200, so the bottom segment covers the bird at 250..290
        game.pipes.push(Pipe::new(75.0, 50.0, &physics));
        game.tick();
        assert_eq!(game.state(), RunState::Ended);
        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Crashed { score: 0, best: 0 }]);

        game.tick();
        assert_eq!(game.state(), RunState::Ended);
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_scoring_emits_event() {
        let mut game = running_game();
        let physics = game.physics().clone();
        // Trailing edge at 81 moves to 78 this tick, left of bird x 80
        game.pipes.push(Pipe::new(21.0, 50.0, &physics));
        game.tick();
        assert_eq!(game.score(), 1);
        let events: Vec<_> = game.drain_events().collect();
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
    }

    #[test]
    fn test_restart_keeps_best_only() {
        let mut game = running_game();
        game.score = 5;
        while game.state() == RunState::Running {
            game.tick();
        }
        assert_eq!(game.best(), 5);

        game.handle(Input::Restart);
        assert_eq!(game.state(), RunState::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.ticks(), 0);
        assert!(game.pipes().is_empty());
        assert_eq!(game.bird().y, 250.0);
        assert_eq!(game.best(), 5);
        assert_eq!(game.drain_events().last(), Some(GameEvent::Reset));
    }

    #[test]
    fn test_lower_score_does_not_lower_best() {
        let mut game = running_game();
        game.best = 9;
        game.score = 2;
        while game.state() == RunState::Running {
            game.tick();
        }
        assert_eq!(game.best(), 9);
    }

    #[test]
    fn test_same_seed_same_pipes() {
        let play = |seed| {
            let mut game = Game::new(seed);
            game.handle(Input::Jump);
            let mut tops = Vec::new();
            for t in 0..200 {
                if t % 15 == 0 {
                    game.handle(Input::Jump);
                }
                game.tick();
                tops = game.pipes().iter().map(|p| p.top_height).collect();
            }
            tops
        };
        assert_eq!(play(99), play(99));
    }
}
