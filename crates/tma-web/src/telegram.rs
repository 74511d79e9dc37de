use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use tma_engine::{
    AlertCallback, BrowserShell, ColorScheme, ConfirmCallback, HostError, HostEvent,
    ImpactStyle, MiniAppHost, NotificationType, ThemeParams, Viewport, WebAppUser,
};

use crate::runner::HostEventQueue;

fn js_err(value: JsValue) -> HostError {
    HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_f32(target: &JsValue, key: &str) -> Option<f32> {
    get(target, key).and_then(|v| v.as_f64()).map(|v| v as f32)
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key).and_then(|v| v.as_string())
}

/// Call `target[name](...args)` with `this` bound to `target`.
fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, HostError> {
    let func: Function = get(target, name)
        .and_then(|f| f.dyn_into().ok())
        .ok_or_else(|| HostError::Unavailable(name.to_string()))?;
    let args: Array = args.iter().collect();
    func.apply(target, &args).map_err(js_err)
}

fn inner_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// `window.Telegram.WebApp`.
pub struct WebAppHost {
    webapp: JsValue,
}

impl WebAppHost {
    /// Find the host API. `telegram-web-app.js` defines `WebApp` in any
    /// browser, so it only counts as Telegram when the client reports a
    /// platform or passes init data.
    pub fn detect() -> Option<WebAppHost> {
        let window = web_sys::window()?;
        let telegram = get(window.as_ref(), "Telegram")?;
        let webapp = get(&telegram, "WebApp")?;
        if !webapp.is_object() {
            return None;
        }
        let has_init_data = get_string(&webapp, "initData").is_some_and(|d| !d.is_empty());
        let platform = get_string(&webapp, "platform").unwrap_or_default();
        if !has_init_data && (platform.is_empty() || platform == "unknown") {
            log::debug!("telegram: WebApp script present but not launched from a client");
            return None;
        }
        Some(WebAppHost { webapp })
    }

    fn haptic_feedback(&self) -> Result<JsValue, HostError> {
        get(&self.webapp, "HapticFeedback").ok_or_else(|| HostError::Unavailable("HapticFeedback".into()))
    }

    fn call_logged(&self, name: &str) {
        if let Err(err) = call(&self.webapp, name, &[]) {
            log::warn!("telegram: {} failed: {}", name, err);
        }
    }

    /// Register `viewportChanged` and `themeChanged` handlers that push into `queue`.
    /// The handlers live for the rest of the page.
    pub fn subscribe(&self, queue: &HostEventQueue) {
        let viewport_queue = HostEventQueue::clone(queue);
        let on_viewport = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            let is_state_stable = get(&payload, "isStateStable")
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            viewport_queue
                .borrow_mut()
                .push(HostEvent::ViewportChanged { is_state_stable });
        });
        self.on_event(HostEvent::ViewportChanged { is_state_stable: true }.name(), on_viewport.as_ref());
        on_viewport.forget();

        let theme_queue = HostEventQueue::clone(queue);
        let on_theme = Closure::<dyn FnMut()>::new(move || {
            theme_queue.borrow_mut().push(HostEvent::ThemeChanged);
        });
        self.on_event(HostEvent::ThemeChanged.name(), on_theme.as_ref());
        on_theme.forget();
    }

    fn on_event(&self, name: &str, handler: &JsValue) {
        if let Err(err) = call(&self.webapp, "onEvent", &[JsValue::from_str(name), handler.clone()]) {
            log::warn!("telegram: onEvent('{}') failed: {}", name, err);
        }
    }
}

impl MiniAppHost for WebAppHost {
    fn ready(&self) {
        self.call_logged("ready");
    }

    fn expand(&self) {
        self.call_logged("expand");
    }

    fn close(&self) {
        self.call_logged("close");
    }

    fn impact_occurred(&self, style: ImpactStyle) -> Result<(), HostError> {
        let haptics = self.haptic_feedback()?;
        call(&haptics, "impactOccurred", &[JsValue::from_str(style.as_str())]).map(|_| ())
    }

    fn notification_occurred(&self, kind: NotificationType) -> Result<(), HostError> {
        let haptics = self.haptic_feedback()?;
        call(&haptics, "notificationOccurred", &[JsValue::from_str(kind.as_str())]).map(|_| ())
    }

    fn selection_changed(&self) -> Result<(), HostError> {
        let haptics = self.haptic_feedback()?;
        call(&haptics, "selectionChanged", &[]).map(|_| ())
    }

    fn show_confirm(&self, message: &str, callback: ConfirmCallback) {
        let handler = Closure::once_into_js(move |confirmed: JsValue| {
            callback(confirmed.as_bool().unwrap_or(false));
        });
        if let Err(err) = call(&self.webapp, "showConfirm", &[JsValue::from_str(message), handler]) {
            log::warn!("telegram: showConfirm failed, answer lost: {}", err);
        }
    }

    fn show_alert(&self, message: &str, callback: AlertCallback) {
        let handler = Closure::once_into_js(move || callback());
        if let Err(err) = call(&self.webapp, "showAlert", &[JsValue::from_str(message), handler]) {
            log::warn!("telegram: showAlert failed: {}", err);
        }
    }

    fn viewport(&self) -> Viewport {
        let (width, window_height) = inner_size();
        let height = get_f32(&self.webapp, "viewportHeight").unwrap_or(window_height);
        Viewport {
            width,
            height,
            stable_height: get_f32(&self.webapp, "viewportStableHeight").unwrap_or(height),
            is_expanded: get(&self.webapp, "isExpanded")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        }
    }

    fn theme_params(&self) -> Result<ThemeParams, HostError> {
        let Some(params) = get(&self.webapp, "themeParams") else {
            return Ok(ThemeParams::default());
        };
        let json: String = JSON::stringify(&params).map_err(js_err)?.into();
        ThemeParams::from_json(&json)
    }

    fn color_scheme(&self) -> ColorScheme {
        get_string(&self.webapp, "colorScheme")
            .map(|s| ColorScheme::parse(&s))
            .unwrap_or_default()
    }

    fn platform(&self) -> String {
        get_string(&self.webapp, "platform").unwrap_or_else(|| "unknown".into())
    }

    fn version(&self) -> String {
        get_string(&self.webapp, "version").unwrap_or_else(|| "6.0".into())
    }

    fn init_data_user(&self) -> Option<WebAppUser> {
        let user = get(&self.webapp, "initDataUnsafe").and_then(|d| get(&d, "user"))?;
        let json: String = JSON::stringify(&user).ok()?.into();
        match WebAppUser::from_json(&json) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("telegram: ignoring malformed user: {}", err);
                None
            }
        }
    }
}

/// Browser-native dialogs and the document root's style.
pub struct DomShell;

impl BrowserShell for DomShell {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(message) {
                log::warn!("alert failed: {:?}", err);
            }
        }
    }

    fn set_css_var(&self, name: &str, value: &str) {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(root) = root {
            if let Err(err) = root.style().set_property(name, value) {
                log::warn!("css var {} not set: {:?}", name, err);
            }
        }
    }

    fn inner_size(&self) -> (f32, f32) {
        inner_size()
    }
}
