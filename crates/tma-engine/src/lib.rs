pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod host;

// Re-export key types at crate root for convenience
pub use api::config::{GameConfig, HostConfig, ConfigError};
pub use api::game::{Game, EngineContext, RenderContext, HostSnapshot};
pub use api::types::{EntityId, GameEvent, HostRequest};
pub use components::entity::Entity;
pub use components::transform::TransformComponent;
pub use components::physics::PhysicsComponent;
pub use components::sprite::{SpriteComponent, TextureRef, AtlasId, BlendMode, Tint};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::TextureRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use systems::movement::tick_movement;
pub use systems::render::build_render_buffer;

// Mini-App host integration
pub use host::{
    TelegramService, MiniAppHost, BrowserShell, HostEvent, HostError,
    ImpactStyle, NotificationType, ThemeParams, ColorScheme,
    Viewport, ViewportFit, WebAppUser, ConfirmCallback, AlertCallback,
};
pub use host::service::HostInbox;
