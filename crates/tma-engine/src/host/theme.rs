use serde::{Deserialize, Serialize};

use crate::components::sprite::Tint;
use crate::host::error::HostError;

/// `WebApp.colorScheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Anything other than "dark" is treated as light.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("dark") {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

/// `WebApp.themeParams`: `#rrggbb` colours, each optional depending on client version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeParams {
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub hint_color: Option<String>,
    pub link_color: Option<String>,
    pub button_color: Option<String>,
    pub button_text_color: Option<String>,
    pub secondary_bg_color: Option<String>,
    pub header_bg_color: Option<String>,
    pub accent_text_color: Option<String>,
    pub section_bg_color: Option<String>,
    pub section_header_text_color: Option<String>,
    pub subtitle_text_color: Option<String>,
    pub destructive_text_color: Option<String>,
}

impl ThemeParams {
    /// Decode the JSON form of `themeParams`. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(json)?)
    }

    fn slots(&self) -> [(&'static str, &Option<String>); 13] {
        [
            ("bg_color", &self.bg_color),
            ("text_color", &self.text_color),
            ("hint_color", &self.hint_color),
            ("link_color", &self.link_color),
            ("button_color", &self.button_color),
            ("button_text_color", &self.button_text_color),
            ("secondary_bg_color", &self.secondary_bg_color),
            ("header_bg_color", &self.header_bg_color),
            ("accent_text_color", &self.accent_text_color),
            ("section_bg_color", &self.section_bg_color),
            ("section_header_text_color", &self.section_header_text_color),
            ("subtitle_text_color", &self.subtitle_text_color),
            ("destructive_text_color", &self.destructive_text_color),
        ]
    }

    /// Present colours in declaration order, keyed by their host name.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        self.slots()
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .collect()
    }

    /// CSS custom properties mirroring this theme, e.g. `--tg-theme-bg-color`.
    /// Every known colour is listed; absent ones carry an empty value so a
    /// previously mirrored colour gets cleared.
    pub fn css_variables(&self, prefix: &str) -> Vec<(String, String)> {
        self.slots()
            .into_iter()
            .map(|(key, value)| {
                (
                    format!("{}-theme-{}", prefix, key.replace('_', "-")),
                    value.clone().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// A theme colour as a sprite tint, when present and well formed.
    pub fn tint(&self, key: &str) -> Option<Tint> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| Tint::parse_hex(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "bg_color": "#17212b",
        "text_color": "#f5f5f5",
        "button_color": "#5288c1",
        "bottom_bar_bg_color": "#000000"
    }"##;

    #[test]
    fn decodes_and_ignores_unknown_keys() {
        let theme = ThemeParams::from_json(SAMPLE).unwrap();
        assert_eq!(theme.bg_color.as_deref(), Some("#17212b"));
        assert!(theme.hint_color.is_none());
        assert_eq!(theme.entries().len(), 3);
    }

    #[test]
    fn css_variables_use_dashed_names() {
        let theme = ThemeParams::from_json(SAMPLE).unwrap();
        let vars = theme.css_variables("--tg");
        assert_eq!(vars[0], ("--tg-theme-bg-color".to_string(), "#17212b".to_string()));
        assert!(vars.iter().any(|(k, _)| k == "--tg-theme-button-color"));
        assert_eq!(vars.len(), 13);
        assert!(vars.contains(&("--tg-theme-hint-color".to_string(), String::new())));
    }

    #[test]
    fn tint_lookup() {
        let theme = ThemeParams::from_json(SAMPLE).unwrap();
        assert_eq!(theme.tint("button_color"), Some(Tint(0x5288C1)));
        assert_eq!(theme.tint("link_color"), None);
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            ThemeParams::from_json("\"oops\""),
            Err(HostError::InvalidThemeParams(_))
        ));
    }

    #[test]
    fn color_scheme_parse() {
        assert!(ColorScheme::parse("dark").is_dark());
        assert_eq!(ColorScheme::parse("light"), ColorScheme::Light);
        assert_eq!(ColorScheme::parse(""), ColorScheme::Light);
    }
}
