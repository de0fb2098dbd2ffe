//! Global timing settings and their partial-update form.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;
pub const DEFAULT_MEASURES: u32 = 4;
pub const DEFAULT_TEMPO: f32 = 120.0;
/// Upper bound on `beatsPerMeasure * measures`.
pub const MAX_TOTAL_BEATS: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub beats_per_measure: u32,
    pub measures: u32,
    pub tempo: f32, // BPM
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            measures: DEFAULT_MEASURES,
            tempo: DEFAULT_TEMPO,
        }
    }
}

impl GlobalSettings {
    /// Row length every trigger row must have.
    pub fn total_beats(&self) -> usize {
        self.beats_per_measure as usize * self.measures as usize
    }

    /// Check the settings describe a playable grid.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.beats_per_measure == 0 {
            return Err("beatsPerMeasure must be greater than zero");
        }
        if self.measures == 0 {
            return Err("measures must be greater than zero");
        }
        if u64::from(self.beats_per_measure) * u64::from(self.measures) > MAX_TOTAL_BEATS {
            return Err("beatsPerMeasure * measures exceeds 1024 beats");
        }
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err("tempo must be a positive number");
        }
        Ok(())
    }

    /// Copy of these settings with every field present in `patch` overridden.
    pub fn merged(&self, patch: &GlobalSettingsPatch) -> Self {
        Self {
            beats_per_measure: patch.beats_per_measure.unwrap_or(self.beats_per_measure),
            measures: patch.measures.unwrap_or(self.measures),
            tempo: patch.tempo.unwrap_or(self.tempo),
        }
    }
}

/// Partial `GlobalSettings`; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beats_per_measure: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f32>,
}

impl GlobalSettingsPatch {
    pub fn beats(beats_per_measure: u32, measures: u32) -> Self {
        Self {
            beats_per_measure: Some(beats_per_measure),
            measures: Some(measures),
            tempo: None,
        }
    }

    pub fn tempo(tempo: f32) -> Self {
        Self {
            tempo: Some(tempo),
            ..Self::default()
        }
    }
}
