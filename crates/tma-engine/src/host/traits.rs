use crate::host::error::HostError;
use crate::host::haptics::{ImpactStyle, NotificationType};
use crate::host::theme::{ColorScheme, ThemeParams};
use crate::host::user::WebAppUser;
use crate::host::viewport::Viewport;

/// Invoked once with the player's answer to a confirmation dialog.
pub type ConfirmCallback = Box<dyn FnOnce(bool)>;
/// Invoked once when an alert dialog is dismissed.
pub type AlertCallback = Box<dyn FnOnce()>;

/// Events the host raises via `WebApp.onEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// `viewportChanged`. `is_state_stable` is false mid-drag.
    ViewportChanged { is_state_stable: bool },
    /// `themeChanged`.
    ThemeChanged,
}

impl HostEvent {
    /// The event name passed to `WebApp.onEvent`.
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::ViewportChanged { .. } => "viewportChanged",
            HostEvent::ThemeChanged => "themeChanged",
        }
    }
}

/// The Telegram Mini-App API (`window.Telegram.WebApp`).
pub trait MiniAppHost {
    /// Tell the client the app has loaded and can be shown.
    fn ready(&self);
    fn expand(&self);
    fn close(&self);

    fn impact_occurred(&self, style: ImpactStyle) -> Result<(), HostError>;
    fn notification_occurred(&self, kind: NotificationType) -> Result<(), HostError>;
    fn selection_changed(&self) -> Result<(), HostError>;

    fn show_confirm(&self, message: &str, callback: ConfirmCallback);
    fn show_alert(&self, message: &str, callback: AlertCallback);

    fn viewport(&self) -> Viewport;
    fn theme_params(&self) -> Result<ThemeParams, HostError>;
    fn color_scheme(&self) -> ColorScheme;
    /// e.g. "android", "ios", "tdesktop", "unknown".
    fn platform(&self) -> String;
    /// Bot API version the client supports, e.g. "7.2".
    fn version(&self) -> String;
    fn init_data_user(&self) -> Option<WebAppUser>;

    /// `WebApp.isVersionAtLeast`.
    fn is_version_at_least(&self, min: &str) -> bool {
        version_at_least(&self.version(), min)
    }
}

/// Browser-native equivalents used when the host API is absent.
pub trait BrowserShell {
    /// `window.confirm`. Blocks until answered.
    fn confirm(&self, message: &str) -> bool;
    /// `window.alert`. Blocks until dismissed.
    fn alert(&self, message: &str);
    /// Set a custom property on the document root element.
    fn set_css_var(&self, name: &str, value: &str);
    /// `window.innerWidth` / `innerHeight` in CSS pixels.
    fn inner_size(&self) -> (f32, f32);
}

/// Compare dotted numeric versions. Missing components count as 0; garbage
/// components count as 0 too, so an unparsable client version never passes a
/// non-zero minimum.
pub fn version_at_least(version: &str, min: &str) -> bool {
    let parse = |s: &str| -> Vec<u32> { s.split('.').map(|p| p.trim().parse().unwrap_or(0)).collect() };
    let have = parse(version);
    let need = parse(min);
    let len = have.len().max(need.len());
    for i in 0..len {
        let a = have.get(i).copied().unwrap_or(0);
        let b = need.get(i).copied().unwrap_or(0);
        if a != b {
            return a > b;
        }
    }
    true
}
