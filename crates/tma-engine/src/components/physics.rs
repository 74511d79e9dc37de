use glam::Vec2;

/// Arcade-style motion data consumed by the movement system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Downward acceleration in world units per second squared (Y-down).
    pub gravity: f32,
    /// Linear damping per second. 0.0 = no slowdown.
    pub friction: f32,
    /// Speed cap. `f32::INFINITY` leaves the velocity unclamped.
    pub max_velocity: f32,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: 0.0,
            friction: 0.0,
            max_velocity: f32::INFINITY,
        }
    }
}

impl PhysicsComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
    }

    /// Add to the current velocity. The speed cap is applied by the movement
    /// system, not here.
    pub fn add_velocity(&mut self, dx: f32, dy: f32) {
        self.velocity += Vec2::new(dx, dy);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }
}
