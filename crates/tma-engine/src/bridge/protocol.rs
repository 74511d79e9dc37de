/// Shared buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 16 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_INSTANCE_COUNT: usize = 4;
pub const HEADER_ATLAS_SPLIT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_WORLD_WIDTH: usize = 8;
pub const HEADER_WORLD_HEIGHT: usize = 9;
pub const HEADER_VIEWPORT_WIDTH: usize = 10;
pub const HEADER_VIEWPORT_HEIGHT: usize = 11;
pub const HEADER_VIEWPORT_STABLE_HEIGHT: usize = 12;
pub const HEADER_FIT_SCALE: usize = 13;
pub const HEADER_FIT_OFFSET_X: usize = 14;
pub const HEADER_FIT_OFFSET_Y: usize = 15;

pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per render instance (wire format).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Buffer layout computed from the configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }

    /// A zeroed header with the static fields filled in.
    pub fn header(&self, config: &GameConfig) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_WORLD_WIDTH] = config.world_width;
        header[HEADER_WORLD_HEIGHT] = config.world_height;
        header[HEADER_FIT_SCALE] = 1.0;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.instance_data_floats, 512 * 16);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.buffer_total_floats, 16 + 512 * 16 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 20);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_capacities_and_world_size() {
        let config = GameConfig::default();
        let header = ProtocolLayout::from_config(&config).header(&config);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_INSTANCES], 512.0);
        assert_eq!(header[HEADER_WORLD_HEIGHT], config.world_height);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 0.0);
    }
}
