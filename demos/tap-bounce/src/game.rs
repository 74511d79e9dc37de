use glam::Vec2;
use tma_engine::*;

const WORLD_W: f32 = 400.0;
const WORLD_H: f32 = 700.0;
const BALL_SIZE: f32 = 48.0;
const GRAVITY: f32 = 900.0;
const TAP_BOOST: f32 = -520.0;
const TAP_RADIUS: f32 = 80.0;

/// GameEvent kinds sent to the UI.
const EVENT_SCORE: f32 = 1.0;
const EVENT_GAME_OVER: f32 = 2.0;

/// Tap the ball to keep it off the floor. Each save scores a point.
pub struct TapBounce {
    ball: Option<EntityId>,
    score: u32,
    game_over: bool,
    pending_restart: Option<u32>,
}

impl TapBounce {
    pub fn new() -> Self {
        Self {
            ball: None,
            score: 0,
            game_over: false,
            pending_restart: None,
        }
    }

    fn ball_texture(ctx: &EngineContext) -> TextureRef {
        ctx.textures
            .get("ball")
            .unwrap_or_else(|| TextureRef::new(AtlasId(0), 0.0, 0.0))
    }

    fn theme_tint(ctx: &EngineContext) -> Tint {
        ctx.host.theme.tint("button_color").unwrap_or(Tint::WHITE)
    }

    fn serve(&mut self, ctx: &mut EngineContext) {
        let texture = Self::ball_texture(ctx);
        let tint = Self::theme_tint(ctx);
        let Some(ball) = self.ball.and_then(|id| ctx.scene.get_mut(id)) else {
            return;
        };
        ball.transform.reset();
        ball.transform.set_position(WORLD_W / 2.0, WORLD_H / 3.0);
        ball.transform.set_scale(BALL_SIZE);
        if let Some(physics) = ball.physics.as_mut() {
            physics.set_velocity(0.0, 0.0);
        }
        if let Some(sprite) = ball.sprite.as_mut() {
            sprite.set_texture(Some(texture));
            sprite.set_tint(tint);
            sprite.set_visible(true);
        }
        self.score = 0;
        self.game_over = false;
    }

    fn tap(&mut self, ctx: &mut EngineContext, at: Vec2) {
        if self.game_over {
            return;
        }
        let Some(ball) = self.ball.and_then(|id| ctx.scene.get_mut(id)) else {
            return;
        };
        let offset = ball.pos() - at;
        if offset.length() > TAP_RADIUS {
            return;
        }
        if let Some(physics) = ball.physics.as_mut() {
            // Kick away from the finger, always upward.
            let sideways = (offset.x / TAP_RADIUS) * 180.0;
            physics.set_velocity(physics.velocity.x, 0.0);
            physics.add_velocity(sideways, TAP_BOOST);
        }
        self.score += 1;
        ctx.haptic(ImpactStyle::Light);
        ctx.emit_event(GameEvent {
            kind: EVENT_SCORE,
            a: self.score as f32,
            ..Default::default()
        });
    }

    fn keep_in_bounds(&mut self, ctx: &mut EngineContext) {
        let Some(ball) = self.ball.and_then(|id| ctx.scene.get_mut(id)) else {
            return;
        };
        let half = BALL_SIZE / 2.0;
        let pos = ball.pos();
        let Some(physics) = ball.physics.as_mut() else {
            return;
        };

        if pos.x < half || pos.x > WORLD_W - half {
            physics.set_velocity(-physics.velocity.x, physics.velocity.y);
            ball.transform.set_position(pos.x.clamp(half, WORLD_W - half), pos.y);
        }
        if pos.y < half && physics.velocity.y < 0.0 {
            physics.set_velocity(physics.velocity.x, 0.0);
        }

        if pos.y > WORLD_H - half && !self.game_over {
            self.game_over = true;
            physics.set_velocity(0.0, 0.0);
            if let Some(sprite) = ball.sprite.as_mut() {
                sprite.set_visible(false);
            }
            log::info!("tap-bounce: game over with {} points", self.score);
            ctx.notify(NotificationType::Error);
            ctx.emit_event(GameEvent {
                kind: EVENT_GAME_OVER,
                a: self.score as f32,
                ..Default::default()
            });
            let id = ctx.confirm(format!("You scored {}. Play again?", self.score));
            self.pending_restart = Some(id);
        }
    }
}

impl Default for TapBounce {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TapBounce {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let texture = Self::ball_texture(ctx);
        let id = ctx.spawn(|e| {
            e.with_tag("ball")
                .with_physics(
                    PhysicsComponent::new()
                        .with_gravity(GRAVITY)
                        .with_friction(0.4)
                        .with_max_velocity(1200.0),
                )
                .with_sprite(SpriteComponent::new(texture))
        });
        self.ball = Some(id);
        self.serve(ctx);
        log::info!("tap-bounce: ready (telegram: {})", ctx.host.in_telegram);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.tap(ctx, Vec2::new(x, y)),
                InputEvent::ThemeChanged { .. } => {
                    let tint = Self::theme_tint(ctx);
                    if let Some(sprite) = self
                        .ball
                        .and_then(|id| ctx.scene.get_mut(id))
                        .and_then(|e| e.sprite.as_mut())
                    {
                        sprite.set_tint(tint);
                    }
                }
                InputEvent::ConfirmResult { id, confirmed } if self.pending_restart == Some(id) => {
                    self.pending_restart = None;
                    if confirmed {
                        self.serve(ctx);
                    } else {
                        ctx.request(HostRequest::Close);
                    }
                }
                _ => {}
            }
        }
        self.keep_in_bounds(ctx);
    }
}
