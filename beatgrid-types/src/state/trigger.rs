//! Trigger grid cell.

use serde::{Deserialize, Serialize};

/// One schedulable event on a (sample, beat) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub is_active: bool,
    pub volume: f32, // 0.0-1.0, default 1.0
    pub pan: f32,    // -1.0 (left) to 1.0 (right), not enforced
    pub pitch: f32,  // semitone offset, unbounded
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            is_active: false,
            volume: 1.0,
            pan: 0.0,
            pitch: 0.0,
        }
    }
}

/// A row of `beats` default-valued triggers.
pub fn empty_row(beats: usize) -> Vec<Trigger> {
    vec![Trigger::default(); beats]
}
