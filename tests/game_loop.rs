use std::collections::HashMap;
use std::time::{Duration, Instant};

use glam::Vec2;

use breakout::engine::graphics::renderer::plan_draws;
use breakout::engine::input::{key_code, keys};
use breakout::game::breakout::{BACKGROUND_TEXTURE, BALL_RADIUS, BALL_TEXTURE, PADDLE_TEXTURE, PLAYER_SIZE};
use breakout::game::{FrameTimer, GameState};
use breakout::{Game, GameConfig};

const FRAME: Duration = Duration::from_millis(16);

/// Runs `frames` iterations of the loop body minus the GPU work.
fn run_frames(game: &mut Game, timer: &mut FrameTimer, start: &mut Instant, frames: u32) {
    for _ in 0..frames {
        let dt = timer.tick_at(*start);
        game.process_input(dt);
        game.update(dt);
        *start += FRAME;
    }
}

#[test]
fn test_menu_then_play() {
    let config = GameConfig::from_vars(|key| {
        HashMap::from([("BREAKOUT_START_IN_MENU", "true")])
            .get(key)
            .map(|v| v.to_string())
    });
    let mut game = Game::new(config.screen_width, config.screen_height);
    game.state = config.start_state;
    let mut timer = FrameTimer::new();
    let mut now = Instant::now();

    game.input.set_key(keys::RIGHT, true);
    run_frames(&mut game, &mut timer, &mut now, 10);
    assert_eq!(game.state, GameState::Menu);
    assert_eq!(game.player.position().x, 350.0);

    game.input.set_key(keys::ENTER, true);
    run_frames(&mut game, &mut timer, &mut now, 1);
    assert_eq!(game.state, GameState::Active);

    run_frames(&mut game, &mut timer, &mut now, 10);
    assert!(game.player.position().x > 350.0);
}

#[test]
fn test_paddle_stops_at_wall_after_many_frames() {
    let mut game = Game::new(800, 600);
    let mut timer = FrameTimer::new();
    let mut now = Instant::now();

    let left = key_code(winit::keyboard::KeyCode::KeyA).unwrap();
    assert_eq!(left, keys::A);
    game.input.set_key(left, true);
    run_frames(&mut game, &mut timer, &mut now, 120);
    assert_eq!(game.player.position().x, 0.0);

    game.input.set_key(left, false);
    game.input.set_key(keys::D, true);
    run_frames(&mut game, &mut timer, &mut now, 300);
    assert_eq!(game.player.position().x, 800.0 - PLAYER_SIZE.x);

    let ball = game.ball.object.position;
    assert_eq!(ball, Vec2::new(800.0 - PLAYER_SIZE.x / 2.0 - BALL_RADIUS, 600.0 - PLAYER_SIZE.y - 2.0 * BALL_RADIUS));
}

#[test]
fn test_losing_focus_releases_keys() {
    let mut game = Game::new(800, 600);
    let mut timer = FrameTimer::new();
    let mut now = Instant::now();

    game.input.set_key(keys::D, true);
    run_frames(&mut game, &mut timer, &mut now, 2);
    let moved_to = game.player.position().x;
    assert!(moved_to > 350.0);

    game.input.reset();
    run_frames(&mut game, &mut timer, &mut now, 5);
    assert_eq!(game.player.position().x, moved_to);
}

#[test]
fn test_frame_batch_draws_one_run_per_texture() {
    let game = Game::new(1024, 768);
    let batch = game.compose();
    let runs = plan_draws(&batch.sprites);
    let textures: Vec<&str> = runs.iter().map(|r| r.texture.as_str()).collect();
    assert_eq!(textures, vec![BACKGROUND_TEXTURE, PADDLE_TEXTURE, BALL_TEXTURE]);
    assert_eq!(batch.sprites[0].size, Vec2::new(1024.0, 768.0));
}
