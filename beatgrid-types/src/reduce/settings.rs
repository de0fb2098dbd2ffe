use crate::{DrumMachineState, GlobalSettingsPatch, ReduceError};

/// Merge `patch` into the global settings and resize every trigger row of
/// every arrangement to the new total in the same pass.
pub(super) fn update(patch: &GlobalSettingsPatch, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    let merged = state.global_settings.merged(patch);
    merged.validate().map_err(ReduceError::InvalidSettings)?;

    let beats = merged.total_beats();
    state.global_settings = merged;
    for arr in &mut state.arrangements {
        arr.resize_rows(beats);
    }
    if state.cursor.x >= beats {
        state.cursor.x = beats - 1;
    }
    Ok(())
}
