use crate::components::entity::Entity;
use crate::components::sprite::BlendMode;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

fn to_instance(entity: &Entity) -> Option<(RenderInstance, BlendMode)> {
    if !entity.active {
        return None;
    }
    let sprite = entity.sprite.as_ref()?;
    if !sprite.visible {
        return None;
    }
    let texture = sprite.texture?;
    let [tint_r, tint_g, tint_b] = sprite.tint.rgb();
    let t = &entity.transform;

    let instance = RenderInstance {
        x: t.pos.x,
        y: t.pos.y,
        rotation: t.rotation,
        scale: t.scale,
        sprite_col: texture.col,
        alpha: sprite.alpha,
        cell_span: texture.cell_span,
        atlas_row: texture.row,
        tint_r,
        tint_g,
        tint_b,
        anchor_x: sprite.anchor.x,
        anchor_y: sprite.anchor.y,
        atlas: texture.atlas.0 as f32,
        _pad: [0.0; 2],
    };
    Some((instance, sprite.blend))
}

/// Build the render buffer from a set of entities.
///
/// Only active entities with a visible, textured sprite are drawn. Alpha-blended
/// instances come first; `atlas_split` marks where additive ones begin.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut additive: Vec<RenderInstance> = Vec::new();
    for (instance, blend) in entities.filter_map(to_instance) {
        match blend {
            BlendMode::Alpha => {
                if !buffer.push(instance) {
                    log::warn!("render buffer full ({} instances), dropping sprites", buffer.capacity());
                    break;
                }
            }
            BlendMode::Additive => additive.push(instance),
        }
    }

    buffer.set_atlas_split(buffer.instance_count());
    let additive_total = additive.len();
    for (pushed, instance) in additive.into_iter().enumerate() {
        if !buffer.push(instance) {
            log::warn!(
                "render buffer full ({} instances), dropping {} additive sprites",
                buffer.capacity(),
                additive_total - pushed
            );
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::{AtlasId, SpriteComponent, TextureRef, Tint};
    use glam::Vec2;

    fn textured() -> SpriteComponent {
        SpriteComponent::new(TextureRef::new(AtlasId(0), 1.0, 2.0))
    }

    #[test]
    fn groups_by_blend_mode() {
        let entities = vec![
            Entity::new(EntityId(1)).with_sprite(textured()),
            Entity::new(EntityId(2)).with_sprite(textured().with_blend(BlendMode::Additive)),
            Entity::new(EntityId(3)).with_sprite(textured()),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.atlas_split, 2);
    }

    #[test]
    fn copies_transform_and_sprite_fields() {
        let entity = Entity::new(EntityId(1))
            .with_pos(Vec2::new(10.0, 20.0))
            .with_rotation(0.5)
            .with_scale(48.0)
            .with_sprite(
                textured()
                    .with_tint(Tint(0xFF0000))
                    .with_alpha(0.5)
                    .with_anchor(Vec2::new(0.5, 1.0)),
            );
        let mut buffer = RenderBuffer::new();
        build_render_buffer(std::iter::once(&entity), &mut buffer);

        let inst = buffer.instances[0];
        assert_eq!((inst.x, inst.y, inst.rotation, inst.scale), (10.0, 20.0, 0.5, 48.0));
        assert_eq!((inst.sprite_col, inst.atlas_row), (1.0, 2.0));
        assert_eq!((inst.tint_r, inst.tint_g, inst.tint_b), (1.0, 0.0, 0.0));
        assert_eq!(inst.alpha, 0.5);
        assert_eq!(inst.anchor_y, 1.0);
    }

    #[test]
    fn hidden_untextured_and_inactive_are_skipped() {
        let mut hidden = textured();
        hidden.set_visible(false);
        let mut inactive = Entity::new(EntityId(3)).with_sprite(textured());
        inactive.active = false;

        let entities = vec![
            Entity::new(EntityId(1)).with_sprite(hidden),
            Entity::new(EntityId(2)).with_sprite(SpriteComponent::default()),
            inactive,
            Entity::new(EntityId(4)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn respects_buffer_capacity() {
        let entities: Vec<_> = (0..5)
            .map(|i| Entity::new(EntityId(i)).with_sprite(textured()))
            .collect();
        let mut buffer = RenderBuffer::with_capacity(3);
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.atlas_split, 3);
    }

    #[test]
    fn additive_overflow_is_dropped_after_alpha() {
        let entities: Vec<_> = (0..5)
            .map(|i| {
                let blend = if i < 2 { BlendMode::Alpha } else { BlendMode::Additive };
                Entity::new(EntityId(i)).with_sprite(textured().with_blend(blend))
            })
            .collect();
        let mut buffer = RenderBuffer::with_capacity(3);
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.atlas_split, 2);
    }
}
