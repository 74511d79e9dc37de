use serde::{Deserialize, Serialize};

/// Strength of an impact haptic, as named by `HapticFeedback.impactOccurred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    #[default]
    Medium,
    Heavy,
    Rigid,
    Soft,
}

impl ImpactStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ImpactStyle::Light => "light",
            ImpactStyle::Medium => "medium",
            ImpactStyle::Heavy => "heavy",
            ImpactStyle::Rigid => "rigid",
            ImpactStyle::Soft => "soft",
        }
    }

    /// Map a wire code (0..=4) from the JS side.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ImpactStyle::Light),
            1 => Some(ImpactStyle::Medium),
            2 => Some(ImpactStyle::Heavy),
            3 => Some(ImpactStyle::Rigid),
            4 => Some(ImpactStyle::Soft),
            _ => None,
        }
    }
}

/// Outcome haptic, as named by `HapticFeedback.notificationOccurred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Error,
    Success,
    Warning,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::Error => "error",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(NotificationType::Error),
            1 => Some(NotificationType::Success),
            2 => Some(NotificationType::Warning),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_host_api() {
        assert_eq!(ImpactStyle::Rigid.as_str(), "rigid");
        assert_eq!(NotificationType::Success.as_str(), "success");
        assert_eq!(serde_json::to_string(&ImpactStyle::Soft).unwrap(), "\"soft\"");
    }

    #[test]
    fn codes_round_the_range() {
        assert_eq!(ImpactStyle::from_code(2), Some(ImpactStyle::Heavy));
        assert_eq!(ImpactStyle::from_code(5), None);
        assert_eq!(NotificationType::from_code(0), Some(NotificationType::Error));
        assert_eq!(NotificationType::from_code(3), None);
    }
}
