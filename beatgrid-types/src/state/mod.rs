pub mod arrangement;
pub mod cursor;
pub mod mode;
pub mod sample;
pub mod settings;
pub mod trigger;

pub use arrangement::Arrangement;
pub use cursor::Cursor;
pub use mode::{Mode, ParseModeError};
pub use sample::Sample;
pub use settings::{GlobalSettings, GlobalSettingsPatch, MAX_TOTAL_BEATS};
pub use trigger::{empty_row, Trigger};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::InvariantViolation;

/// Root application state: the single source of truth for the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrumMachineState {
    pub arrangements: Vec<Arrangement>,
    pub current_arrangement_index: usize,
    pub global_settings: GlobalSettings,
    pub samples: Vec<Sample>,
    pub mode: Mode,
    pub cursor: Cursor,
}

impl Default for DrumMachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl DrumMachineState {
    pub fn new() -> Self {
        Self::new_with_defaults(GlobalSettings::default())
    }

    /// Fresh state: a single empty "Default" arrangement and no samples.
    pub fn new_with_defaults(global_settings: GlobalSettings) -> Self {
        Self {
            arrangements: vec![Arrangement::new("1", "Default", 0, global_settings.total_beats())],
            current_arrangement_index: 0,
            global_settings,
            samples: Vec::new(),
            mode: Mode::Navigate,
            cursor: Cursor::default(),
        }
    }

    pub fn total_beats(&self) -> usize {
        self.global_settings.total_beats()
    }

    pub fn current_arrangement(&self) -> Option<&Arrangement> {
        self.arrangements.get(self.current_arrangement_index)
    }

    pub fn current_arrangement_mut(&mut self) -> Option<&mut Arrangement> {
        self.arrangements.get_mut(self.current_arrangement_index)
    }

    /// Trigger under the cursor in the current arrangement.
    pub fn current_trigger(&self) -> Option<&Trigger> {
        self.current_arrangement()
            .and_then(|arr| arr.trigger(self.cursor.y, self.cursor.x))
    }

    pub fn current_trigger_mut(&mut self) -> Option<&mut Trigger> {
        let Cursor { x, y, .. } = self.cursor;
        self.current_arrangement_mut()
            .and_then(|arr| arr.trigger_mut(y, x))
    }

    /// Verify every structural rule the reducers maintain. Used to vet states
    /// that did not come out of a reducer, such as persisted blobs.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.global_settings
            .validate()
            .map_err(InvariantViolation::InvalidSettings)?;

        let beats = self.total_beats();
        for (a, arr) in self.arrangements.iter().enumerate() {
            if arr.triggers.len() != self.samples.len() {
                return Err(InvariantViolation::TrackCountMismatch {
                    arrangement: a,
                    rows: arr.triggers.len(),
                    samples: self.samples.len(),
                });
            }
            if !(0.0..=1.0).contains(&arr.volume) {
                return Err(InvariantViolation::VolumeOutOfRange { arrangement: a, cell: None });
            }
            for (track, row) in arr.triggers.iter().enumerate() {
                if row.len() != beats {
                    return Err(InvariantViolation::RowLengthMismatch {
                        arrangement: a,
                        track,
                        len: row.len(),
                        expected: beats,
                    });
                }
                if let Some(beat) = row.iter().position(|t| !(0.0..=1.0).contains(&t.volume)) {
                    return Err(InvariantViolation::VolumeOutOfRange {
                        arrangement: a,
                        cell: Some((track, beat)),
                    });
                }
            }
        }

        if !self.arrangements.is_empty()
            && self.current_arrangement_index >= self.arrangements.len()
        {
            return Err(InvariantViolation::CurrentArrangementOutOfRange {
                index: self.current_arrangement_index,
                len: self.arrangements.len(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(arr) = self.arrangements.iter().find(|arr| !seen.insert(arr.id.as_str())) {
            return Err(InvariantViolation::DuplicateArrangementId(arr.id.clone()));
        }
        let mut seen = HashSet::new();
        if let Some(sample) = self.samples.iter().find(|s| !seen.insert(s.id.as_str())) {
            return Err(InvariantViolation::DuplicateSampleId(sample.id.clone()));
        }

        let y_ok = self.samples.is_empty() || self.cursor.y < self.samples.len();
        if self.cursor.x >= beats || !y_ok {
            return Err(InvariantViolation::CursorOutOfRange {
                x: self.cursor.x,
                y: self.cursor.y,
            });
        }

        Ok(())
    }
}
