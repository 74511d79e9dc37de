use crate::core::scene::Scene;

/// Integrate every active entity's physics into its transform for one fixed step.
///
/// Order per entity: gravity, friction, speed cap, then position.
pub fn tick_movement(scene: &mut Scene, dt: f32) {
    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        let Some(physics) = entity.physics.as_mut() else {
            continue;
        };

        physics.velocity.y += physics.gravity * dt;

        if physics.friction > 0.0 {
            physics.velocity /= 1.0 + physics.friction * dt;
        }

        if physics.max_velocity.is_finite() {
            physics.velocity = physics.velocity.clamp_length_max(physics.max_velocity.max(0.0));
        }

        entity.transform.translate(physics.velocity * dt);
    }
}
