use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to the shared buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
///
/// The `scale` field is the world-space rendered size in game units.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space rendered size in game units.
    pub scale: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// UV cell span (1.0 = single cell, 2.0 = 2x2 block).
    pub cell_span: f32,
    /// Atlas row.
    pub atlas_row: f32,
    pub tint_r: f32,
    pub tint_g: f32,
    pub tint_b: f32,
    /// Pivot in normalized sprite space.
    pub anchor_x: f32,
    pub anchor_y: f32,
    /// Atlas index, so the renderer can bind the right texture.
    pub atlas: f32,
    pub _pad: [f32; 2],
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// All sprite instances for one frame.
pub struct RenderBuffer {
    /// Alpha-blended instances first, then additive instances from `atlas_split` on.
    pub instances: Vec<RenderInstance>,
    /// Index of the first additive instance.
    pub atlas_split: u32,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// A buffer that accepts at most `capacity` instances per frame.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            atlas_split: 0,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.atlas_split = 0;
    }

    /// Append an instance. Returns false (and drops it) once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn set_atlas_split(&mut self, split: u32) {
        self.atlas_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data viewed as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 64);
        assert_eq!(RenderInstance::STRIDE_BYTES, 64);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance::default()));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn as_floats_matches_layout() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance {
            x: 1.0,
            y: 2.0,
            tint_r: 0.5,
            ..Default::default()
        });
        let floats = buf.as_floats();
        assert_eq!(floats.len(), RenderInstance::FLOATS);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[1], 2.0);
        assert_eq!(floats[8], 0.5);
    }
}
