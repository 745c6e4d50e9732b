//! The frame loop: input, fixed ticks, effects, drawing

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crossterm::event;

use crate::assets::Assets;
use crate::audio::{Cue, SoundBoard};
use crate::clock::FrameClock;
use crate::consts::{MAX_CATCH_UP, TICKS_PER_SECOND};
use crate::input::{Action, map_event};
use crate::render::{PixelBuf, Scenery, draw_frame};
use crate::sim::{Game, GameEvent, RunState};

pub struct App {
    game: Game,
    scenery: Scenery,
    sounds: SoundBoard,
    assets: Assets,
    buf: PixelBuf,
    clock: FrameClock,
}

impl App {
    pub fn new(seed: u64, assets: Assets, sounds: SoundBoard, size: (u16, u16)) -> Self {
        Self {
            game: Game::new(seed),
            // Decoration gets its own stream so it never shifts gap placement
            scenery: Scenery::new(seed.wrapping_add(1)),
            sounds,
            assets,
            buf: PixelBuf::for_terminal(size.0, size.1),
            clock: FrameClock::new(TICKS_PER_SECOND, MAX_CATCH_UP, Instant::now()),
        }
    }

    #[cfg(test)]
    fn game(&self) -> &Game {
        &self.game
    }

    #[cfg(test)]
    fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    #[cfg(test)]
    fn buf(&self) -> &PixelBuf {
        &self.buf
    }

    /// Run until the player quits.
    pub fn run(&mut self, out: &mut impl Write) -> io::Result<()> {
        log::debug!("game loop started");
        loop {
            while event::poll(Duration::ZERO)? {
                let Some(action) = map_event(&event::read()?) else {
                    continue;
                };
                if self.apply(action).is_break() {
                    log::debug!("quit, best score {}", self.game.best());
                    return Ok(());
                }
            }

            let ticks = self.clock.advance(Instant::now());
            self.update(ticks);
            self.draw();
            self.buf.present(out)?;

            std::thread::sleep(self.clock.until_next(Instant::now()));
        }
    }

    /// Route one action. Breaks when the player asked to quit.
    pub fn apply(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::Quit => return ControlFlow::Break(()),
            Action::Game(input) => {
                self.game.handle(input);
                self.dispatch_events();
            }
            Action::Resize(cols, rows) => {
                log::debug!("terminal resized to {cols}x{rows}");
                self.buf.resize(cols as usize, rows as usize * 2);
            }
        }
        ControlFlow::Continue(())
    }

    /// Run `ticks` fixed steps of game and scenery.
    pub fn update(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.game.tick();
            self.scenery
                .update(self.game.state() == RunState::Running);
            self.dispatch_events();
        }
    }

    pub fn draw(&mut self) {
        draw_frame(&mut self.buf, &self.game.snapshot(), &self.scenery, &self.assets);
    }

    fn dispatch_events(&mut self) {
        for ev in self.game.drain_events() {
            match ev {
                GameEvent::Jumped { x, y } => {
                    self.scenery.burst(x, y);
                    self.sounds.play(Cue::Jump);
                }
                GameEvent::Scored { .. } => self.sounds.play(Cue::Point),
                GameEvent::Crashed { .. } => self.sounds.play(Cue::Hit),
                GameEvent::Reset => self.scenery.clear_particles(),
                GameEvent::Started => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scenery::BURST_SIZE;
    use crate::sim::Input;

    fn app() -> App {
        App::new(7, Assets::default(), SoundBoard::silent(), (80, 24))
    }

    #[test]
    fn test_quit_breaks() {
        let mut app = app();
        assert!(app.apply(Action::Quit).is_break());
        assert!(app.apply(Action::Game(Input::Jump)).is_continue());
    }

    #[test]
    fn test_flap_bursts_particles() {
        let mut app = app();
        app.apply(Action::Game(Input::Jump));
        assert_eq!(app.game().state(), RunState::Running);
        // Starting the run is not a flap
        assert!(app.scenery().particles.is_empty());
        app.apply(Action::Game(Input::Jump));
        assert_eq!(app.scenery().particles.len(), BURST_SIZE);
    }

    #[test]
    fn test_restart_clears_particles() {
        let mut app = app();
        app.apply(Action::Game(Input::Jump));
        app.apply(Action::Game(Input::Jump));
        // Fall to the ground
        app.update(200);
        assert_eq!(app.game().state(), RunState::Ended);
        app.apply(Action::Game(Input::Restart));
        assert_eq!(app.game().state(), RunState::Idle);
        assert!(app.scenery().particles.is_empty());
    }

    #[test]
    fn test_resize_reallocates_buffer() {
        let mut app = app();
        app.apply(Action::Resize(100, 30));
        assert_eq!((app.buf().width(), app.buf().height()), (100, 60));
        app.draw();
    }

    #[test]
    fn test_update_idle_keeps_game_still() {
        let mut app = app();
        app.update(30);
        assert_eq!(app.game().ticks(), 0);
        assert_eq!(app.game().state(), RunState::Idle);
    }
}
