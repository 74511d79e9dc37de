/// Failures reported by the Mini-App host bridge.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    /// The running Telegram client does not expose the requested API.
    #[error("host API unavailable: {0}")]
    Unavailable(String),

    /// A JavaScript call threw.
    #[error("host call failed: {0}")]
    Js(String),

    /// `themeParams` could not be decoded.
    #[error("invalid theme params: {0}")]
    InvalidThemeParams(#[from] serde_json::Error),
}
