use glam::Vec2;

/// Where an entity sits in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// Position in world units.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale: the rendered size in world units.
    pub scale: f32,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl TransformComponent {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Restore origin, no rotation, unit scale.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -- Builder pattern --

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_position_reads_back() {
        let mut t = TransformComponent::default();
        t.set_position(12.5, -3.0);
        assert_eq!(t.x(), 12.5);
        assert_eq!(t.y(), -3.0);
    }

    #[test]
    fn translate_accumulates() {
        let mut t = TransformComponent::new(1.0, 1.0);
        t.translate(Vec2::new(2.0, 3.0));
        t.translate(Vec2::new(-1.0, 0.5));
        assert_eq!(t.pos, Vec2::new(2.0, 4.5));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut t = TransformComponent::new(40.0, 50.0)
            .with_rotation(1.2)
            .with_scale(3.0);
        t.reset();
        assert_eq!(t, TransformComponent::default());
        assert_eq!(t.scale, 1.0);
    }
}
