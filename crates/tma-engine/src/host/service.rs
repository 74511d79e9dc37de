use std::cell::RefCell;
use std::rc::Rc;

use crate::api::config::HostConfig;
use crate::api::types::HostRequest;
use crate::host::haptics::{ImpactStyle, NotificationType};
use crate::host::theme::{ColorScheme, ThemeParams};
use crate::host::traits::{AlertCallback, BrowserShell, ConfirmCallback, HostEvent, MiniAppHost};
use crate::host::user::WebAppUser;
use crate::host::viewport::Viewport;
use crate::input::queue::InputEvent;

/// Minimum Bot API version exposing `HapticFeedback`.
pub const HAPTICS_MIN_VERSION: &str = "6.1";
/// Minimum Bot API version exposing `showConfirm` / `showAlert`.
pub const DIALOGS_MIN_VERSION: &str = "6.2";

/// Events produced by host callbacks that fire outside the frame loop
/// (dialog answers). The runner drains this into the game's input queue.
pub type HostInbox = Rc<RefCell<Vec<InputEvent>>>;

/// Adapts the game shell to the Telegram Mini-App host.
///
/// Every host call is guarded by [`is_in_telegram`](Self::is_in_telegram).
/// Without a host, dialogs fall back to the browser and everything else is
/// skipped.
pub struct TelegramService {
    host: Option<Box<dyn MiniAppHost>>,
    shell: Box<dyn BrowserShell>,
    config: HostConfig,
    viewport: Viewport,
    theme: ThemeParams,
    scheme: ColorScheme,
    user: Option<WebAppUser>,
}

impl TelegramService {
    pub fn new(host: Option<Box<dyn MiniAppHost>>, shell: Box<dyn BrowserShell>, config: HostConfig) -> Self {
        Self {
            host,
            shell,
            config,
            viewport: Viewport::default(),
            theme: ThemeParams::default(),
            scheme: ColorScheme::default(),
            user: None,
        }
    }

    pub fn is_in_telegram(&self) -> bool {
        self.host.is_some()
    }

    /// Signal readiness, optionally expand, and mirror theme and viewport into CSS.
    pub fn init(&mut self) {
        if let Some(host) = &self.host {
            host.ready();
            if self.config.expand_on_init {
                host.expand();
            }
            self.user = host.init_data_user();
            log::info!(
                "telegram: ready on {} (Bot API {})",
                host.platform(),
                host.version()
            );
        } else {
            log::info!("telegram: host API absent, running in plain browser mode");
        }

        self.refresh_theme();
        self.refresh_viewport();
        self.apply_theme();
        self.apply_viewport();
    }

    pub fn expand(&self) {
        if let Some(host) = &self.host {
            host.expand();
        }
    }

    pub fn close(&self) {
        if let Some(host) = &self.host {
            host.close();
        }
    }

    /// The host, if haptics are enabled and supported by the running client.
    fn haptics_host(&self) -> Option<&dyn MiniAppHost> {
        if !self.config.haptics_enabled {
            return None;
        }
        let host = self.host.as_deref()?;
        if !host.is_version_at_least(HAPTICS_MIN_VERSION) {
            log::debug!("telegram: haptics need Bot API {}", HAPTICS_MIN_VERSION);
            return None;
        }
        Some(host)
    }

    pub fn haptic_impact(&self, style: ImpactStyle) {
        if let Some(host) = self.haptics_host() {
            if let Err(err) = host.impact_occurred(style) {
                log::warn!("telegram: impact haptic '{}' failed: {}", style.as_str(), err);
            }
        }
    }

    pub fn haptic_notification(&self, kind: NotificationType) {
        if let Some(host) = self.haptics_host() {
            if let Err(err) = host.notification_occurred(kind) {
                log::warn!("telegram: notification haptic '{}' failed: {}", kind.as_str(), err);
            }
        }
    }

    pub fn haptic_selection(&self) {
        if let Some(host) = self.haptics_host() {
            if let Err(err) = host.selection_changed() {
                log::warn!("telegram: selection haptic failed: {}", err);
            }
        }
    }

    fn dialog_host(&self) -> Option<&dyn MiniAppHost> {
        self.host
            .as_deref()
            .filter(|host| host.is_version_at_least(DIALOGS_MIN_VERSION))
    }

    /// Ask a yes/no question. Without host dialogs, `window.confirm` answers
    /// synchronously and `callback` runs before this returns.
    pub fn show_confirm(&self, message: &str, callback: ConfirmCallback) {
        match self.dialog_host() {
            Some(host) => host.show_confirm(message, callback),
            None => {
                log::debug!("telegram: confirm via browser fallback");
                callback(self.shell.confirm(message));
            }
        }
    }

    pub fn show_alert(&self, message: &str, callback: AlertCallback) {
        match self.dialog_host() {
            Some(host) => host.show_alert(message, callback),
            None => {
                log::debug!("telegram: alert via browser fallback");
                self.shell.alert(message);
                callback();
            }
        }
    }

    /// React to a host event and translate it for the game.
    pub fn handle_event(&mut self, event: HostEvent) -> InputEvent {
        match event {
            HostEvent::ViewportChanged { is_state_stable } => {
                self.refresh_viewport();
                self.apply_viewport();
                InputEvent::ViewportResized {
                    width: self.viewport.width,
                    height: self.viewport.height,
                    stable: is_state_stable,
                }
            }
            HostEvent::ThemeChanged => {
                self.refresh_theme();
                self.apply_theme();
                InputEvent::ThemeChanged {
                    dark: self.scheme.is_dark(),
                }
            }
        }
    }

    /// Carry out a request queued by game code. Confirm answers land in `inbox`.
    pub fn dispatch(&self, request: HostRequest, inbox: &HostInbox) {
        match request {
            HostRequest::Haptic(style) => self.haptic_impact(style),
            HostRequest::Notify(kind) => self.haptic_notification(kind),
            HostRequest::Selection => self.haptic_selection(),
            HostRequest::Confirm { id, message } => {
                let inbox = Rc::clone(inbox);
                self.show_confirm(
                    &message,
                    Box::new(move |confirmed: bool| {
                        inbox.borrow_mut().push(InputEvent::ConfirmResult { id, confirmed });
                    }),
                );
            }
            HostRequest::Alert { message } => self.show_alert(&message, Box::new(|| {})),
            HostRequest::Expand => self.expand(),
            HostRequest::Close => self.close(),
        }
    }

    /// Re-read the viewport from the host, or from the window outside Telegram.
    pub fn refresh_viewport(&mut self) {
        self.viewport = match &self.host {
            Some(host) => host.viewport(),
            None => {
                let (w, h) = self.shell.inner_size();
                Viewport::browser(w, h)
            }
        };
    }

    /// Re-read theme params and colour scheme. A malformed theme keeps the previous one.
    pub fn refresh_theme(&mut self) {
        let Some(host) = &self.host else {
            return;
        };
        match host.theme_params() {
            Ok(theme) => self.theme = theme,
            Err(err) => log::warn!("telegram: keeping previous theme: {}", err),
        }
        self.scheme = host.color_scheme();
    }

    /// Write `<prefix>-theme-*` and `<prefix>-color-scheme`. Colours the host
    /// no longer sends are cleared.
    pub fn apply_theme(&self) {
        if !self.config.mirror_css || !self.is_in_telegram() {
            return;
        }
        let prefix = &self.config.css_prefix;
        for (name, value) in self.theme.css_variables(prefix) {
            self.shell.set_css_var(&name, &value);
        }
        self.shell
            .set_css_var(&format!("{}-color-scheme", prefix), self.scheme.as_str());
    }

    /// Write `<prefix>-viewport-height` and `<prefix>-viewport-stable-height`.
    pub fn apply_viewport(&self) {
        if !self.config.mirror_css {
            return;
        }
        let prefix = &self.config.css_prefix;
        self.shell.set_css_var(
            &format!("{}-viewport-height", prefix),
            &format!("{}px", self.viewport.height),
        );
        self.shell.set_css_var(
            &format!("{}-viewport-stable-height", prefix),
            &format!("{}px", self.viewport.stable_height),
        );
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> &ThemeParams {
        &self.theme
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn user(&self) -> Option<&WebAppUser> {
        self.user.as_ref()
    }
}
