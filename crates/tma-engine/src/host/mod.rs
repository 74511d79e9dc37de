//! Telegram Mini-App host integration.
//!
//! The engine never talks to `window.Telegram.WebApp` directly. `tma-web`
//! implements [`MiniAppHost`] and [`BrowserShell`] over wasm-bindgen; this
//! module holds the platform-neutral decisions (presence checks, fallbacks,
//! CSS variable mirroring) so they can be unit tested natively.

pub mod error;
pub mod haptics;
pub mod service;
pub mod theme;
pub mod traits;
pub mod user;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::HostError;
pub use haptics::{ImpactStyle, NotificationType};
pub use service::TelegramService;
pub use theme::{ColorScheme, ThemeParams};
pub use traits::{AlertCallback, BrowserShell, ConfirmCallback, HostEvent, MiniAppHost};
pub use user::WebAppUser;
pub use viewport::{Viewport, ViewportFit};
