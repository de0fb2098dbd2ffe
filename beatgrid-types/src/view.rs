//! Read-only projections for renderers and audio drivers.
//!
//! A renderer needs every `(track, beat)` cell of an arrangement plus whether
//! the cursor sits on it; an audio driver needs the triggers that fire on a
//! given beat. Both are derived from a `DrumMachineState` alone.

use crate::{DrumMachineState, Sample, Trigger};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub track: usize,
    pub beat: usize,
    pub trigger: &'a Trigger,
    pub is_cursor: bool,
}

/// Cells of the current arrangement, row by row.
pub fn grid_cells(state: &DrumMachineState) -> impl Iterator<Item = GridCell<'_>> + '_ {
    arrangement_cells(state, state.current_arrangement_index)
}

/// Cells of the arrangement at `index`, row by row. Empty if there is none.
/// The cursor is only marked in the current arrangement.
pub fn arrangement_cells(
    state: &DrumMachineState,
    index: usize,
) -> impl Iterator<Item = GridCell<'_>> + '_ {
    let is_current = index == state.current_arrangement_index;
    let cursor = state.cursor;
    state
        .arrangements
        .get(index)
        .into_iter()
        .flat_map(|arr| arr.triggers.iter().enumerate())
        .flat_map(move |(track, row)| {
            row.iter().enumerate().map(move |(beat, trigger)| GridCell {
                track,
                beat,
                trigger,
                is_cursor: is_current && cursor.x == beat && cursor.y == track,
            })
        })
}

/// A trigger due to play on the requested beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepHit<'a> {
    pub arrangement: usize,
    pub arrangement_volume: f32,
    pub track: usize,
    pub sample: &'a Sample,
    pub trigger: &'a Trigger,
}

impl StepHit<'_> {
    /// Trigger volume scaled by its arrangement's volume.
    pub fn gain(&self) -> f32 {
        self.trigger.volume * self.arrangement_volume
    }
}

/// Every active trigger at `beat_counter mod totalBeats` across all active
/// arrangements, in arrangement then track order.
pub fn step_hits(state: &DrumMachineState, beat_counter: u64) -> Vec<StepHit<'_>> {
    let beats = state.total_beats();
    if beats == 0 {
        return Vec::new();
    }
    let beat = (beat_counter % beats as u64) as usize;

    let mut hits = Vec::new();
    for (a, arr) in state.arrangements.iter().enumerate() {
        if !arr.is_active {
            continue;
        }
        for (track, (row, sample)) in arr.triggers.iter().zip(&state.samples).enumerate() {
            if let Some(trigger) = row.get(beat).filter(|t| t.is_active) {
                hits.push(StepHit {
                    arrangement: a,
                    arrangement_volume: arr.volume,
                    track,
                    sample,
                    trigger,
                });
            }
        }
    }
    hits
}
