//! Pure state-mutation reducers for the beatgrid sequencer.
//!
//! These functions are the single source of truth for action → state mutations.
//! They hold all domain policy: cursor wrapping, clamping, id allocation and the
//! row resize that keeps every trigger row `totalBeats` long.
//!
//! Reducers mutate the `DrumMachineState` they are handed and nothing else.
//! When a reducer returns an error the caller must discard that state; reducers
//! validate before they write, so a rejected action leaves it untouched anyway.

mod arrangement;
mod cursor;
mod sample;
mod settings;
mod trigger;

use crate::{DrumMachineState, GridAction, ReduceError};

pub use arrangement::next_arrangement_id;

/// Apply an action's state mutations to the given state.
pub fn reduce_action(action: &GridAction, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    match action {
        GridAction::MoveCursor(direction) => {
            cursor::move_cursor(*direction, state);
            Ok(())
        }
        GridAction::SetMode(mode) => {
            state.mode = *mode;
            Ok(())
        }
        GridAction::ToggleTrigger => {
            trigger::toggle(state);
            Ok(())
        }
        GridAction::AdjustTriggerParameter(param) => trigger::adjust(*param, state),
        GridAction::CreateArrangement => arrangement::create(state),
        GridAction::SelectArrangement(index) => arrangement::select(*index, state),
        GridAction::ToggleArrangementActive(index) => arrangement::toggle_active(*index, state),
        GridAction::SetArrangementVolume(index, volume) => {
            arrangement::set_volume(*index, *volume, state)
        }
        GridAction::AddSample(sample) => sample::add(sample, state),
        GridAction::UpdateGlobalSettings(patch) => settings::update(patch, state),
    }
}

fn finite(value: f32, field: &'static str) -> Result<f32, ReduceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReduceError::NonFiniteValue(field))
    }
}
