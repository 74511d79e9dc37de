use crate::api::config::GameConfig;
use crate::api::types::{EntityId, GameEvent, HostRequest};
use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::host::haptics::{ImpactStyle, NotificationType};
use crate::host::theme::{ColorScheme, ThemeParams};
use crate::host::viewport::Viewport;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step of game logic. The movement system runs right after.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// What the game may know about its host. Refreshed by the runner when the
/// host reports a change.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    pub in_telegram: bool,
    pub viewport: Viewport,
    pub theme: ThemeParams,
    pub color_scheme: ColorScheme,
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub textures: TextureRegistry,
    pub host: HostSnapshot,
    pub events: Vec<GameEvent>,
    host_requests: Vec<HostRequest>,
    next_id: u32,
    next_confirm_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            textures: TextureRegistry::new(),
            host: HostSnapshot::default(),
            events: Vec::new(),
            host_requests: Vec::new(),
            next_id: 1,
            next_confirm_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an ID and spawn the entity built by `build`.
    pub fn spawn(&mut self, build: impl FnOnce(Entity) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(build(Entity::new(id)))
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a request for the Mini-App host.
    pub fn request(&mut self, request: HostRequest) {
        self.host_requests.push(request);
    }

    pub fn haptic(&mut self, style: ImpactStyle) {
        self.request(HostRequest::Haptic(style));
    }

    pub fn notify(&mut self, kind: NotificationType) {
        self.request(HostRequest::Notify(kind));
    }

    /// Ask the player to confirm. Returns the id the answer will carry in
    /// `InputEvent::ConfirmResult`.
    pub fn confirm(&mut self, message: impl Into<String>) -> u32 {
        let id = self.next_confirm_id;
        self.next_confirm_id += 1;
        self.request(HostRequest::Confirm {
            id,
            message: message.into(),
        });
        id
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.request(HostRequest::Alert {
            message: message.into(),
        });
    }

    /// Take queued host requests in the order they were made.
    pub fn take_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.host_requests)
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
