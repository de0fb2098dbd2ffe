use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::TriggerParam;

/// Which trigger field keyboard/UI input currently edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Navigate,
    Volume,
    Pan,
    Pitch,
    Arrangement,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Navigate,
        Mode::Volume,
        Mode::Pan,
        Mode::Pitch,
        Mode::Arrangement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Navigate => "navigate",
            Mode::Volume => "volume",
            Mode::Pan => "pan",
            Mode::Pitch => "pitch",
            Mode::Arrangement => "arrangement",
        }
    }

    /// The trigger parameter this mode edits, carrying `value`.
    /// `None` for modes that do not edit a trigger field.
    pub fn trigger_param(&self, value: f32) -> Option<TriggerParam> {
        match self {
            Mode::Volume => Some(TriggerParam::Volume(value)),
            Mode::Pan => Some(TriggerParam::Pan(value)),
            Mode::Pitch => Some(TriggerParam::Pitch(value)),
            Mode::Navigate | Mode::Arrangement => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unknown mode tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode {:?}", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_tag() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        assert_eq!(
            "Volume".parse::<Mode>(),
            Err(ParseModeError("Volume".to_string()))
        );
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn trigger_param_follows_mode() {
        assert_eq!(Mode::Volume.trigger_param(0.5), Some(TriggerParam::Volume(0.5)));
        assert_eq!(Mode::Pan.trigger_param(-1.0), Some(TriggerParam::Pan(-1.0)));
        assert_eq!(Mode::Pitch.trigger_param(12.0), Some(TriggerParam::Pitch(12.0)));
        assert_eq!(Mode::Navigate.trigger_param(1.0), None);
        assert_eq!(Mode::Arrangement.trigger_param(1.0), None);
    }
}
