use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::physics::PhysicsComponent;
use crate::components::sprite::SpriteComponent;
use crate::components::transform::TransformComponent;

/// Fat Entity — a single struct with optional components.
/// Every entity has a transform; physics and sprite are opt-in.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped by systems).
    pub active: bool,
    pub transform: TransformComponent,
    /// Motion (optional — entities without physics stay where they are put).
    pub physics: Option<PhysicsComponent>,
    /// Sprite (optional — entities without sprites are invisible).
    pub sprite: Option<SpriteComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            transform: TransformComponent::default(),
            physics: None,
            sprite: None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    /// Reset every attached component to its defaults. Attachment is unchanged.
    pub fn reset_components(&mut self) {
        self.transform.reset();
        if let Some(physics) = &mut self.physics {
            physics.reset();
        }
        if let Some(sprite) = &mut self.sprite {
            sprite.reset();
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.transform.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_transform(mut self, transform: TransformComponent) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsComponent) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }
}
