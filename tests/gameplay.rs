use flappy_blossom::assets::Assets;
use flappy_blossom::render::{PixelBuf, Scenery, draw_frame};
use flappy_blossom::sim::{Game, GameEvent, Input, Physics, RunState};

/// No gravity and a gap so wide every placement lets the bird through
fn hover_physics() -> Physics {
    Physics {
        gravity: 0.0,
        pipe_gap: 350.0,
        min_top: 50.0,
        min_bottom: 50.0,
        ..Physics::default()
    }
}

#[test]
fn pipe_lifecycle_and_scoring() {
    let mut game = Game::with_physics(hover_physics(), 11);
    game.handle(Input::Jump);
    assert_eq!(game.state(), RunState::Running);

    for _ in 0..89 {
        game.tick();
    }
    assert!(game.pipes().is_empty());

    game.tick();
    assert_eq!(game.ticks(), 90);
    assert_eq!(game.pipes().len(), 1);
    let first = game.pipes().iter().next().unwrap();
    assert_eq!(first.x, 400.0);
    assert!((50.0..=100.0).contains(&first.top_height));
    assert_eq!(first.bottom_y, first.top_height + 350.0);

    while game.ticks() < 216 {
        game.tick();
    }
    assert_eq!(game.score(), 0);
    game.tick();
    assert_eq!(game.score(), 1);
    assert!(game
        .drain_events()
        .any(|e| e == GameEvent::Scored { score: 1 }));

    while game.ticks() < 243 {
        game.tick();
    }
    assert_eq!(game.pipes().len(), 2);
    assert_eq!(game.pipes().iter().next().unwrap().x, -59.0);
    game.tick();
    assert_eq!(game.pipes().len(), 1);
    assert_eq!(game.state(), RunState::Running);
}

#[test]
fn crash_restart_and_play_again() {
    let mut game = Game::new(5);
    game.handle(Input::Jump);
    while game.state() == RunState::Running {
        game.tick();
    }
    let events: Vec<_> = game.drain_events().collect();
    assert!(matches!(
        events.last(),
        Some(GameEvent::Crashed { score: 0, best: 0 })
    ));

    // Jumping does nothing until restart
    game.handle(Input::Jump);
    assert_eq!(game.state(), RunState::Ended);

    game.handle(Input::Restart);
    assert_eq!(game.state(), RunState::Idle);
    assert!(game.pipes().is_empty());
    assert_eq!(game.score(), 0);

    game.handle(Input::Jump);
    game.tick();
    assert_eq!(game.state(), RunState::Running);
    assert_eq!(game.ticks(), 1);
}

#[test]
fn frames_render_in_every_state() {
    let assets = Assets::default();
    let scenery = Scenery::new(1);
    let mut game = Game::new(3);
    let mut out = Vec::new();

    for cols_rows in [(80, 24), (200, 20), (30, 60), (1, 1)] {
        let mut buf = PixelBuf::for_terminal(cols_rows.0, cols_rows.1);
        draw_frame(&mut buf, &game.snapshot(), &scenery, &assets);
        buf.present(&mut out).unwrap();
    }

    game.handle(Input::Jump);
    while game.state() == RunState::Running {
        game.tick();
    }
    let mut buf = PixelBuf::for_terminal(80, 24);
    draw_frame(&mut buf, &game.snapshot(), &scenery, &assets);
    buf.present(&mut out).unwrap();
    assert!(!out.is_empty());
}
