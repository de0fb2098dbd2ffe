use serde::{Deserialize, Serialize};

/// A playable sample. Its position in `DrumMachineState::samples` is the index
/// of its trigger row in every arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: String,
    pub name: String,
    pub url: String,
    pub default_volume: f32,
}

impl Sample {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            default_volume: 1.0,
        }
    }
}
