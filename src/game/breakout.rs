//! The `Game` facade driven by the main loop.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::engine::error::ResourceError;
use crate::engine::graphics::{
    Sprite, SpriteBatch, SpriteInstance, SpriteRenderer, SpriteVertex, ShaderDescriptor,
};
use crate::engine::input::{keys, InputState};
use crate::engine::resources::{ResourceManager, TextureRequest};
use crate::engine::window::{Frame, Window};
use crate::game::player::Player;
use crate::game::state::GameState;
use crate::game::world::camera::{Camera2D, SpriteGlobals};
use crate::game::world::game_object::Ball;

pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
/// Paddle speed in screen units per second.
pub const PLAYER_VELOCITY: f32 = 500.0;
pub const BALL_RADIUS: f32 = 12.5;

pub const SPRITE_SHADER: &str = "sprite";
pub const BACKGROUND_TEXTURE: &str = "background";
pub const PADDLE_TEXTURE: &str = "paddle";
pub const BALL_TEXTURE: &str = "face";

const MENU_TINT: Vec3 = Vec3::splat(0.4);

const TEXTURES: [TextureRequest<'static>; 3] = [
    TextureRequest { name: BACKGROUND_TEXTURE, path: "background.jpg", alpha: false },
    TextureRequest { name: PADDLE_TEXTURE, path: "paddle.png", alpha: true },
    TextureRequest { name: BALL_TEXTURE, path: "face.png", alpha: true },
];

pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub width: u32,
    pub height: u32,
    pub player: Player,
    pub ball: Ball,
    camera: Camera2D,
    elapsed: f32,
    renderer: Option<SpriteRenderer>,
}

impl Game {
    pub fn new(width: u32, height: u32) -> Self {
        let camera = Camera2D::new(width, height);
        let player_position = Vec2::new(
            camera.width / 2.0 - PLAYER_SIZE.x / 2.0,
            camera.height - PLAYER_SIZE.y,
        );
        let player = Player::new(PADDLE_TEXTURE, player_position, PLAYER_SIZE, PLAYER_VELOCITY);
        let mut ball = Ball::new(BALL_TEXTURE, BALL_RADIUS);
        ball.rest_on(&player.object);

        Self {
            state: GameState::default(),
            input: InputState::new(),
            width,
            height,
            player,
            ball,
            camera,
            elapsed: 0.0,
            renderer: None,
        }
    }

    /// Loads the sprite shader and textures and sets up the renderer.
    /// Textures that fail to load are replaced by a checkerboard.
    pub fn init(&mut self, window: &Window, resources: &mut ResourceManager) -> Result<(), ResourceError> {
        let device = window.device();
        let queue = window.queue();

        let texture_layout = resources.texture_layout();
        let desc = ShaderDescriptor {
            label: SPRITE_SHADER,
            vertex_layouts: &[SpriteVertex::desc(), SpriteInstance::desc()],
            uniform_size: std::mem::size_of::<SpriteGlobals>() as u64,
            texture_layout: Some(&texture_layout),
            format: window.format(),
        };
        resources
            .load_shader(device, SPRITE_SHADER, "shaders/sprite.vert.wgsl", "shaders/sprite.frag.wgsl", &desc)?
            .upload_uniforms(queue, &self.camera.uniform())?;

        let fallbacks = resources.load_textures_or_default(device, queue, &TEXTURES);
        if fallbacks > 0 {
            warn!("{} of {} textures replaced by the default", fallbacks, TEXTURES.len());
        }

        self.renderer = Some(SpriteRenderer::new(device));
        info!("Game initialised at {}x{}", self.width, self.height);
        Ok(())
    }

    pub fn process_input(&mut self, dt: f32) {
        match self.state {
            GameState::Menu => {
                if self.input.take_press(keys::ENTER) {
                    debug!("Leaving menu");
                    self.state = GameState::Active;
                }
            }
            GameState::Active => {
                let mut direction = 0.0;
                if self.input.is_key_down(keys::A) || self.input.is_key_down(keys::LEFT) {
                    direction -= 1.0;
                }
                if self.input.is_key_down(keys::D) || self.input.is_key_down(keys::RIGHT) {
                    direction += 1.0;
                }
                if self.player.steer(direction, dt, self.camera.width) {
                    self.ball.rest_on(&self.player.object);
                }
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.ball.rest_on(&self.player.object);
    }

    /// Sprites for the current frame, back to front.
    pub fn compose(&self) -> SpriteBatch {
        let tint = match self.state {
            GameState::Active => Vec3::ONE,
            GameState::Menu => MENU_TINT,
        };
        let mut batch = SpriteBatch::new();
        batch.push(Sprite::new(BACKGROUND_TEXTURE, Vec2::ZERO, self.camera.size()).with_color(tint));
        for object in [&self.player.object, &self.ball.object] {
            let sprite = object.sprite();
            let color = sprite.color * tint;
            batch.push(sprite.with_color(color));
        }
        batch
    }

    pub fn render(&mut self, window: &Window, frame: &mut Frame, resources: &ResourceManager) {
        let batch = self.compose();
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.prepare(window.device(), window.queue(), &batch);

        let shader = match resources.shader(SPRITE_SHADER) {
            Ok(shader) => shader,
            Err(e) => {
                debug!("Nothing rendered: {}", e);
                return;
            }
        };
        let mut pass = frame.render_pass();
        renderer.draw(&mut pass, shader, resources);
    }

    /// Seconds of game time since the game was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_centres_paddle_at_bottom() {
        let game = Game::new(800, 600);
        assert_eq!(game.player.position(), Vec2::new(350.0, 580.0));
        assert_eq!(game.ball.object.position, Vec2::new(387.5, 555.0));
        assert_eq!(game.state, GameState::Active);
    }

    #[test]
    fn test_menu_ignores_movement_until_enter() {
        let mut game = Game::new(800, 600);
        game.state = GameState::Menu;
        game.input.set_key(keys::D, true);
        game.process_input(0.5);
        assert_eq!(game.player.position().x, 350.0);

        game.input.set_key(keys::ENTER, true);
        game.process_input(0.0);
        assert_eq!(game.state, GameState::Active);

        game.process_input(0.1);
        assert_eq!(game.player.position().x, 400.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut game = Game::new(800, 600);
        game.input.set_key(keys::LEFT, true);
        game.input.set_key(keys::RIGHT, true);
        game.process_input(1.0);
        assert_eq!(game.player.position().x, 350.0);
    }

    #[test]
    fn test_ball_follows_paddle() {
        let mut game = Game::new(800, 600);
        game.input.set_key(keys::A, true);
        game.process_input(0.2);
        assert_eq!(game.player.position().x, 250.0);
        assert_eq!(game.ball.object.position.x, 250.0 + 50.0 - BALL_RADIUS);
    }

    #[test]
    fn test_compose_order_and_tint() {
        let mut game = Game::new(800, 600);
        let batch = game.compose();
        let textures: Vec<&str> = batch.sprites.iter().map(|s| s.texture.as_str()).collect();
        assert_eq!(textures, vec![BACKGROUND_TEXTURE, PADDLE_TEXTURE, BALL_TEXTURE]);
        assert_eq!(batch.sprites[0].size, Vec2::new(800.0, 600.0));
        assert!(batch.sprites.iter().all(|s| s.color == Vec3::ONE));

        game.state = GameState::Menu;
        assert!(game.compose().sprites.iter().all(|s| s.color == MENU_TINT));
    }

    #[test]
    fn test_textures_load_from_assets_root() {
        let paths: Vec<(&str, &str, bool)> = TEXTURES.iter().map(|r| (r.name, r.path, r.alpha)).collect();
        assert_eq!(
            paths,
            vec![
                (BACKGROUND_TEXTURE, "background.jpg", false),
                (PADDLE_TEXTURE, "paddle.png", true),
                (BALL_TEXTURE, "face.png", true),
            ]
        );
    }

    #[test]
    fn test_update_advances_time() {
        let mut game = Game::new(800, 600);
        game.update(0.25);
        game.update(0.5);
        assert_eq!(game.elapsed(), 0.75);
    }
}
