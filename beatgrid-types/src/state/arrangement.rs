//! Arrangement types.

use serde::{Deserialize, Serialize};

use super::trigger::{empty_row, Trigger};

/// One complete pattern: a trigger row per sample, each `total_beats` long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub volume: f32, // 0.0-1.0
    pub triggers: Vec<Vec<Trigger>>, // [sample][beat]
}

impl Arrangement {
    /// Active, full-volume arrangement with a default-valued `tracks × beats` grid.
    pub fn new(id: impl Into<String>, name: impl Into<String>, tracks: usize, beats: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            volume: 1.0,
            triggers: (0..tracks).map(|_| empty_row(beats)).collect(),
        }
    }

    pub fn trigger(&self, track: usize, beat: usize) -> Option<&Trigger> {
        self.triggers.get(track).and_then(|row| row.get(beat))
    }

    pub fn trigger_mut(&mut self, track: usize, beat: usize) -> Option<&mut Trigger> {
        self.triggers.get_mut(track).and_then(|row| row.get_mut(beat))
    }

    /// Grow or truncate every row to exactly `beats`. Growth appends default
    /// triggers; truncation drops trailing ones.
    pub fn resize_rows(&mut self, beats: usize) {
        for row in &mut self.triggers {
            row.resize(beats, Trigger::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_default_grid() {
        let arr = Arrangement::new("7", "Arrangement 7", 3, 16);
        assert!(arr.is_active);
        assert_eq!(arr.volume, 1.0);
        assert_eq!(arr.triggers.len(), 3);
        assert!(arr.triggers.iter().all(|row| row.len() == 16));
        assert!(arr.triggers.iter().flatten().all(|t| *t == Trigger::default()));
    }

    #[test]
    fn resize_rows_truncates_from_the_end() {
        let mut arr = Arrangement::new("1", "Default", 1, 8);
        arr.triggers[0][0].is_active = true;
        arr.triggers[0][7].is_active = true;
        arr.resize_rows(4);
        assert_eq!(arr.triggers[0].len(), 4);
        assert!(arr.triggers[0][0].is_active);
    }

    #[test]
    fn resize_rows_pads_with_defaults() {
        let mut arr = Arrangement::new("1", "Default", 2, 2);
        arr.triggers[1][1].pitch = 5.0;
        arr.resize_rows(5);
        assert!(arr.triggers.iter().all(|row| row.len() == 5));
        assert_eq!(arr.triggers[1][1].pitch, 5.0);
        assert_eq!(arr.triggers[1][4], Trigger::default());
    }

    #[test]
    fn trigger_lookup_is_bounds_checked() {
        let arr = Arrangement::new("1", "Default", 1, 4);
        assert!(arr.trigger(0, 3).is_some());
        assert!(arr.trigger(0, 4).is_none());
        assert!(arr.trigger(1, 0).is_none());
    }
}
