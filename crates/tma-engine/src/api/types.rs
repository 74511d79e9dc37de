use bytemuck::{Pod, Zeroable};

use crate::host::haptics::{ImpactStyle, NotificationType};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to TypeScript via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

/// Something the game wants the Mini-App host to do.
///
/// Game code only ever queues these; the runner forwards them to the
/// `TelegramService` after `Game::update` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// `HapticFeedback.impactOccurred(style)`.
    Haptic(ImpactStyle),
    /// `HapticFeedback.notificationOccurred(type)`.
    Notify(NotificationType),
    /// `HapticFeedback.selectionChanged()`.
    Selection,
    /// Ask the player a yes/no question. The answer comes back as
    /// `InputEvent::ConfirmResult` carrying the same `id`.
    Confirm { id: u32, message: String },
    /// Show an informational dialog.
    Alert { message: String },
    /// Expand the Mini-App to full height.
    Expand,
    /// Close the Mini-App.
    Close,
}
