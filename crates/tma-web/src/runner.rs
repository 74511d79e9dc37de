use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use tma_engine::bridge::protocol::{
    HEADER_ATLAS_SPLIT, HEADER_EVENT_COUNT, HEADER_FIT_OFFSET_X, HEADER_FIT_OFFSET_Y,
    HEADER_FIT_SCALE, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT,
    HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_STABLE_HEIGHT, HEADER_VIEWPORT_WIDTH,
};
use tma_engine::{
    build_render_buffer, tick_movement, AssetManifest, EngineContext, FixedTimestep, Game,
    GameConfig, HostEvent, HostInbox, InputEvent, InputQueue, ProtocolLayout, RenderBuffer,
    RenderContext, TelegramService, TextureRegistry, ViewportFit,
};

/// Host events raised by `WebApp.onEvent` callbacks, drained once per frame.
pub type HostEventQueue = Rc<RefCell<Vec<HostEvent>>>;

/// Generic game runner that wires up the engine loop and the Telegram service.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    service: TelegramService,
    host_events: HostEventQueue,
    inbox: HostInbox,
    fit: ViewportFit,
    /// Header + instances + events, laid out per `ProtocolLayout`.
    frame: Vec<f32>,
    frame_counter: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, config: GameConfig, service: TelegramService, host_events: HostEventQueue) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame),
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            service,
            host_events,
            inbox: Rc::new(RefCell::new(Vec::new())),
            fit: ViewportFit { scale: 1.0, offset: Vec2::ZERO },
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Initialize the host service and the game. Call once after construction.
    pub fn init(&mut self) {
        self.service.init();
        self.sync_host_snapshot();
        self.game.init(&mut self.ctx);
        self.frame[..HEADER_FLOATS].copy_from_slice(&self.layout.header(&self.config));
        self.initialized = true;
    }

    fn sync_host_snapshot(&mut self) {
        let host = &mut self.ctx.host;
        host.in_telegram = self.service.is_in_telegram();
        host.viewport = self.service.viewport();
        host.theme = self.service.theme().clone();
        host.color_scheme = self.service.color_scheme();
        self.fit = host
            .viewport
            .fit_world(self.config.world_width, self.config.world_height);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Push a pointer event given in viewport CSS pixels; it reaches the game in world units.
    pub fn push_pointer(&mut self, x: f32, y: f32, make: impl FnOnce(f32, f32) -> InputEvent) {
        let world = self.fit.to_world(Vec2::new(x, y));
        self.input.push(make(world.x, world.y));
    }

    /// Parse an asset manifest and make its textures available by name.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        self.ctx.textures = TextureRegistry::from_manifest(&manifest);
        log::info!("manifest: {} textures loaded", self.ctx.textures.len());
        Ok(())
    }

    /// Run one frame: host events, fixed-step update + movement, host requests, render.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let host_events: Vec<HostEvent> = std::mem::take(&mut *self.host_events.borrow_mut());
        if !host_events.is_empty() {
            for event in host_events {
                let translated = self.service.handle_event(event);
                self.input.push(translated);
            }
            self.sync_host_snapshot();
        }
        for answer in std::mem::take(&mut *self.inbox.borrow_mut()) {
            self.input.push(answer);
        }

        // Input goes to the first step only, and survives frames that ran no step.
        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let input = InputQueue::from(self.input.drain());
            let idle = InputQueue::new();
            for step in 0..steps {
                let step_input = if step == 0 { &input } else { &idle };
                self.game.update(&mut self.ctx, step_input);
                tick_movement(&mut self.ctx.scene, self.timestep.dt());
            }
        }

        for request in self.ctx.take_host_requests() {
            self.service.dispatch(request, &self.inbox);
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.write_frame();
    }

    fn write_frame(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let instances = self.render_buffer.as_floats();
        let start = self.layout.instance_data_offset;
        let len = instances.len().min(self.layout.instance_data_floats);
        self.frame[start..start + len].copy_from_slice(&instances[..len]);

        let events: &[f32] = bytemuck::cast_slice(&self.ctx.events);
        let event_count = self.ctx.events.len().min(self.layout.max_events);
        if event_count < self.ctx.events.len() {
            log::warn!("dropping {} game events over capacity", self.ctx.events.len() - event_count);
        }
        let start = self.layout.event_data_offset;
        let len = event_count * tma_engine::GameEvent::FLOATS;
        self.frame[start..start + len].copy_from_slice(&events[..len]);

        let viewport = self.service.viewport();
        let header = &mut self.frame[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        header[HEADER_ATLAS_SPLIT] = self.render_buffer.atlas_split as f32;
        header[HEADER_EVENT_COUNT] = event_count as f32;
        header[HEADER_VIEWPORT_WIDTH] = viewport.width;
        header[HEADER_VIEWPORT_HEIGHT] = viewport.height;
        header[HEADER_VIEWPORT_STABLE_HEIGHT] = viewport.stable_height;
        header[HEADER_FIT_SCALE] = self.fit.scale;
        header[HEADER_FIT_OFFSET_X] = self.fit.offset.x;
        header[HEADER_FIT_OFFSET_Y] = self.fit.offset.y;
    }

    pub fn service(&self) -> &TelegramService {
        &self.service
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn atlas_split(&self) -> u32 {
        self.render_buffer.atlas_split
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tma_engine::{
        AlertCallback, BrowserShell, ColorScheme, ConfirmCallback, HostConfig, HostError,
        ImpactStyle, MiniAppHost, NotificationType, PhysicsComponent, SpriteComponent, TextureRef,
        AtlasId, ThemeParams, Viewport, WebAppUser,
    };

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeHost(Log);

    impl MiniAppHost for FakeHost {
        fn ready(&self) {}
        fn expand(&self) {}
        fn close(&self) {}
        fn impact_occurred(&self, style: ImpactStyle) -> Result<(), HostError> {
            self.0.borrow_mut().push(format!("impact:{}", style.as_str()));
            Ok(())
        }
        fn notification_occurred(&self, _kind: NotificationType) -> Result<(), HostError> {
            Ok(())
        }
        fn selection_changed(&self) -> Result<(), HostError> {
            Ok(())
        }
        fn show_confirm(&self, _message: &str, callback: ConfirmCallback) {
            callback(true);
        }
        fn show_alert(&self, _message: &str, callback: AlertCallback) {
            callback();
        }
        fn viewport(&self) -> Viewport {
            Viewport::browser(800.0, 1400.0)
        }
        fn theme_params(&self) -> Result<ThemeParams, HostError> {
            Ok(ThemeParams::default())
        }
        fn color_scheme(&self) -> ColorScheme {
            ColorScheme::Dark
        }
        fn platform(&self) -> String {
            "test".into()
        }
        fn version(&self) -> String {
            "7.0".into()
        }
        fn init_data_user(&self) -> Option<WebAppUser> {
            None
        }
    }

    struct NullShell;

    impl BrowserShell for NullShell {
        fn confirm(&self, _message: &str) -> bool {
            false
        }
        fn alert(&self, _message: &str) {}
        fn set_css_var(&self, _name: &str, _value: &str) {}
        fn inner_size(&self) -> (f32, f32) {
            (400.0, 700.0)
        }
    }

    /// Spawns one falling sprite; taps buzz and ask a question.
    #[derive(Default)]
    struct Probe {
        seen: Vec<InputEvent>,
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.spawn(|e| {
                e.with_tag("ball")
                    .with_physics(PhysicsComponent::new().with_velocity(Vec2::new(60.0, 0.0)))
                    .with_sprite(SpriteComponent::new(TextureRef::new(AtlasId(0), 0.0, 0.0)))
            });
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            for event in input.iter() {
                self.seen.push(*event);
                if let InputEvent::PointerDown { .. } = event {
                    ctx.haptic(ImpactStyle::Light);
                    ctx.confirm("again?");
                }
            }
        }
    }

    fn runner(in_telegram: bool) -> (GameRunner<Probe>, Log, HostEventQueue) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let host: Option<Box<dyn MiniAppHost>> = if in_telegram {
            Some(Box::new(FakeHost(Rc::clone(&log))))
        } else {
            None
        };
        let service = TelegramService::new(host, Box::new(NullShell), HostConfig::default());
        let events: HostEventQueue = Rc::new(RefCell::new(Vec::new()));
        let mut runner = GameRunner::new(Probe::default(), GameConfig::default(), service, Rc::clone(&events));
        runner.init();
        (runner, log, events)
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn tick_moves_entities_and_fills_frame() {
        let (mut r, _, _) = runner(false);
        r.tick(DT);
        assert_eq!(r.instance_count(), 1);
        let x = r.frame[r.layout.instance_data_offset];
        assert!((x - 1.0).abs() < 1e-4, "x was {}", x);
        assert_eq!(r.frame[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(r.frame[HEADER_FRAME_COUNTER], 1.0);
    }

    #[test]
    fn pointer_is_converted_to_world_units() {
        let (mut r, _, _) = runner(true);
        // 800x1400 viewport over a 400x700 world: 2 px per unit.
        r.push_pointer(200.0, 300.0, |x, y| InputEvent::PointerMove { x, y });
        r.tick(DT);
        assert_eq!(r.game.seen[0], InputEvent::PointerMove { x: 100.0, y: 150.0 });
    }

    #[test]
    fn requests_reach_host_and_answers_come_back() {
        let (mut r, log, _) = runner(true);
        r.push_pointer(0.0, 0.0, |x, y| InputEvent::PointerDown { x, y });
        r.tick(DT);
        assert_eq!(*log.borrow(), vec!["impact:light"]);

        r.tick(DT);
        assert!(r
            .game
            .seen
            .contains(&InputEvent::ConfirmResult { id: 1, confirmed: true }));
    }

    #[test]
    fn host_events_are_translated_for_the_game() {
        let (mut r, _, events) = runner(true);
        events.borrow_mut().push(HostEvent::ThemeChanged);
        events
            .borrow_mut()
            .push(HostEvent::ViewportChanged { is_state_stable: false });
        r.tick(DT);
        assert_eq!(r.game.seen[0], InputEvent::ThemeChanged { dark: true });
        assert_eq!(
            r.game.seen[1],
            InputEvent::ViewportResized { width: 800.0, height: 1400.0, stable: false }
        );
        assert!(r.ctx.host.color_scheme.is_dark());
    }

    #[test]
    fn input_waits_for_a_fixed_step() {
        let (mut r, _, _) = runner(false);
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        r.tick(0.001);
        assert!(r.game.seen.is_empty());
        r.tick(DT);
        assert_eq!(r.game.seen, vec![InputEvent::KeyDown { key_code: 32 }]);
    }

    #[test]
    fn slow_frame_delivers_input_once() {
        let (mut r, log, _) = runner(true);
        r.push_pointer(0.0, 0.0, |x, y| InputEvent::PointerDown { x, y });
        r.tick(DT * 2.5);
        assert_eq!(*log.borrow(), vec!["impact:light"]);
        assert_eq!(r.game.seen.len(), 1);
        assert_eq!(r.ctx.scene.iter().count(), 1);

        r.tick(DT);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let service = TelegramService::new(None, Box::new(NullShell), HostConfig::default());
        let mut r = GameRunner::new(
            Probe::default(),
            GameConfig::default(),
            service,
            Rc::new(RefCell::new(Vec::new())),
        );
        r.tick(DT);
        assert_eq!(r.instance_count(), 0);
        assert!(r.ctx.scene.is_empty());
    }
}
