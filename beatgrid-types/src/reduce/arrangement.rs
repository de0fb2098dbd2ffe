use crate::{Arrangement, DrumMachineState, ReduceError};

use super::finite;

/// First unused decimal id, starting from `len + 1`.
pub fn next_arrangement_id(state: &DrumMachineState) -> String {
    let mut n = state.arrangements.len() + 1;
    loop {
        let id = n.to_string();
        if !state.arrangements.iter().any(|arr| arr.id == id) {
            return id;
        }
        n += 1;
    }
}

pub(super) fn create(state: &mut DrumMachineState) -> Result<(), ReduceError> {
    let id = next_arrangement_id(state);
    let name = format!("Arrangement {}", state.arrangements.len() + 1);
    let arrangement = Arrangement::new(id, name, state.samples.len(), state.total_beats());
    state.arrangements.push(arrangement);
    Ok(())
}

fn check_index(index: usize, state: &DrumMachineState) -> Result<(), ReduceError> {
    if index < state.arrangements.len() {
        Ok(())
    } else {
        Err(ReduceError::ArrangementOutOfRange {
            index,
            len: state.arrangements.len(),
        })
    }
}

pub(super) fn select(index: usize, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    check_index(index, state)?;
    state.current_arrangement_index = index;
    state.cursor.z = index;
    Ok(())
}

pub(super) fn toggle_active(index: usize, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    check_index(index, state)?;
    let arr = &mut state.arrangements[index];
    arr.is_active = !arr.is_active;
    Ok(())
}

pub(super) fn set_volume(
    index: usize,
    volume: f32,
    state: &mut DrumMachineState,
) -> Result<(), ReduceError> {
    check_index(index, state)?;
    let volume = finite(volume, "volume")?;
    state.arrangements[index].volume = volume.clamp(0.0, 1.0);
    Ok(())
}
