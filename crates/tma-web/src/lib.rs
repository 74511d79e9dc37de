pub mod runner;
pub mod telegram;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::JsValue;

use tma_engine::{BrowserShell, Game, MiniAppHost, TelegramService};

pub use runner::{GameRunner, HostEventQueue};
pub use telegram::{DomShell, WebAppHost};
pub use js_sys;

/// Build a runner for `game`: apply the JS config override, start console
/// logging at the configured level, and attach the Telegram host when present.
pub fn boot<G: Game>(game: G, config_override: Option<&str>, name: &str) -> GameRunner<G> {
    console_error_panic_hook::set_once();

    let mut config = game.config();
    let override_result = config_override.map(|json| config.merge_json(json));
    if let Some(Ok(merged)) = &override_result {
        config = merged.clone();
    }

    let level = config.log_level().unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);
    if let Some(Err(err)) = override_result {
        log::error!("{}: ignoring config override: {}", name, err);
    }

    let host_events: HostEventQueue = Rc::new(RefCell::new(Vec::new()));
    let host = WebAppHost::detect();
    if let Some(host) = &host {
        host.subscribe(&host_events);
    }
    let host: Option<Box<dyn MiniAppHost>> = host.map(|h| Box::new(h) as Box<dyn MiniAppHost>);
    let shell: Box<dyn BrowserShell> = Box::new(DomShell);
    let service = TelegramService::new(host, shell, config.host.clone());

    GameRunner::new(game, config, service, host_events)
}

/// A Promise resolving to the player's answer, via the host dialog or `window.confirm`.
pub fn confirm_promise(service: &TelegramService, message: &str) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        service.show_confirm(
            message,
            Box::new(move |confirmed: bool| {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_bool(confirmed));
            }),
        );
    })
}

/// A Promise resolving once the alert is dismissed.
pub fn alert_promise(service: &TelegramService, message: &str) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        service.show_alert(
            message,
            Box::new(move || {
                let _ = resolve.call0(&JsValue::NULL);
            }),
        );
    })
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner and a pending config override
/// - `with_runner()` helper function
/// - wasm-bindgen exports for the loop, input, shared-buffer accessors and the
///   Telegram service (`tg_*`)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use tma_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// tma_web::export_game!(MyGame, "my-game");
/// ```
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static CONFIG_OVERRIDE: RefCell<Option<String>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        /// Partial JSON `GameConfig` override. Must be called before `game_init`.
        #[wasm_bindgen]
        pub fn game_configure(json: &str) {
            CONFIG_OVERRIDE.with(|cell| *cell.borrow_mut() = Some(json.to_string()));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            let config_override = CONFIG_OVERRIDE.with(|cell| cell.borrow_mut().take());
            let runner = $crate::boot(<$game_type>::new(), config_override.as_deref(), $game_name);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        /// Pointer coordinates are viewport CSS pixels.
        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_pointer(x, y, |x, y| InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_pointer(x, y, |x, y| InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_pointer(x, y, |x, y| InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_manifest(json)).map_err(|e| JsValue::from_str(&e.to_string()))
        }

        // ---- Shared buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_atlas_split() -> u32 {
            with_runner(|r| r.atlas_split())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        // ---- Telegram service ----

        #[wasm_bindgen]
        pub fn tg_is_in_telegram() -> bool {
            with_runner(|r| r.service().is_in_telegram())
        }

        /// 0 light, 1 medium, 2 heavy, 3 rigid, 4 soft.
        #[wasm_bindgen]
        pub fn tg_haptic_impact(code: u32) {
            if let Some(style) = ImpactStyle::from_code(code) {
                with_runner(|r| r.service().haptic_impact(style));
            }
        }

        /// 0 error, 1 success, 2 warning.
        #[wasm_bindgen]
        pub fn tg_haptic_notification(code: u32) {
            if let Some(kind) = NotificationType::from_code(code) {
                with_runner(|r| r.service().haptic_notification(kind));
            }
        }

        #[wasm_bindgen]
        pub fn tg_show_confirm(message: &str) -> $crate::js_sys::Promise {
            with_runner(|r| $crate::confirm_promise(r.service(), message))
        }

        #[wasm_bindgen]
        pub fn tg_show_alert(message: &str) -> $crate::js_sys::Promise {
            with_runner(|r| $crate::alert_promise(r.service(), message))
        }

        #[wasm_bindgen]
        pub fn tg_expand() {
            with_runner(|r| r.service().expand());
        }

        #[wasm_bindgen]
        pub fn tg_close() {
            with_runner(|r| r.service().close());
        }

        #[wasm_bindgen]
        pub fn tg_color_scheme() -> String {
            with_runner(|r| r.service().color_scheme().as_str().to_string())
        }

        #[wasm_bindgen]
        pub fn tg_user_name() -> Option<String> {
            with_runner(|r| r.service().user().map(|u| u.display_name()))
        }
    };
}
