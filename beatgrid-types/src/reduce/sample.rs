use crate::{empty_row, DrumMachineState, ReduceError, Sample};

use super::finite;

/// Append a sample and give every arrangement a matching default row.
pub(super) fn add(sample: &Sample, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    if state.samples.iter().any(|s| s.id == sample.id) {
        return Err(ReduceError::DuplicateSampleId(sample.id.clone()));
    }
    finite(sample.default_volume, "defaultVolume")?;
    let beats = state.total_beats();
    state.samples.push(sample.clone());
    for arr in &mut state.arrangements {
        arr.triggers.push(empty_row(beats));
    }
    Ok(())
}
