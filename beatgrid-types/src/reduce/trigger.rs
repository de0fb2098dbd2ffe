use crate::{DrumMachineState, ReduceError, TriggerParam};

use super::finite;

/// Flip the trigger under the cursor. Nothing to toggle if the cell is missing.
pub(super) fn toggle(state: &mut DrumMachineState) {
    if let Some(trigger) = state.current_trigger_mut() {
        trigger.is_active = !trigger.is_active;
    }
}

/// Set one field of the trigger under the cursor. Volume is clamped to 0.0-1.0;
/// pan and pitch are stored as given.
pub(super) fn adjust(param: TriggerParam, state: &mut DrumMachineState) -> Result<(), ReduceError> {
    let value = finite(param.value(), param.name())?;
    if let Some(trigger) = state.current_trigger_mut() {
        match param {
            TriggerParam::Volume(_) => trigger.volume = value.clamp(0.0, 1.0),
            TriggerParam::Pan(_) => trigger.pan = value,
            TriggerParam::Pitch(_) => trigger.pitch = value,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::reduce_action;
    use crate::{GridAction, Sample, Trigger};

    fn state() -> DrumMachineState {
        let mut state = DrumMachineState::new();
        reduce_action(
            &GridAction::AddSample(Sample::new("1", "test", "test.wav")),
            &mut state,
        )
        .unwrap();
        state
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut state = state();
        toggle(&mut state);
        assert!(state.arrangements[0].triggers[0][0].is_active);
        toggle(&mut state);
        assert!(!state.arrangements[0].triggers[0][0].is_active);
    }

    #[test]
    fn toggle_hits_only_the_cursor_cell() {
        let mut state = state();
        state.cursor.x = 5;
        toggle(&mut state);
        let row = &state.arrangements[0].triggers[0];
        assert!(row[5].is_active);
        assert_eq!(row.iter().filter(|t| t.is_active).count(), 1);
    }

    #[test]
    fn toggle_without_samples_is_noop() {
        let mut state = DrumMachineState::new();
        let before = state.clone();
        toggle(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn adjust_sets_each_field() {
        let mut state = state();
        adjust(TriggerParam::Volume(0.5), &mut state).unwrap();
        adjust(TriggerParam::Pan(-1.0), &mut state).unwrap();
        adjust(TriggerParam::Pitch(12.0), &mut state).unwrap();
        let t = state.arrangements[0].triggers[0][0];
        assert_eq!(t.volume, 0.5);
        assert_eq!(t.pan, -1.0);
        assert_eq!(t.pitch, 12.0);
        assert!(!t.is_active);
    }

    #[test]
    fn adjust_clamps_volume_only() {
        let mut state = state();
        adjust(TriggerParam::Volume(1.7), &mut state).unwrap();
        assert_eq!(state.arrangements[0].triggers[0][0].volume, 1.0);
        adjust(TriggerParam::Volume(-0.2), &mut state).unwrap();
        assert_eq!(state.arrangements[0].triggers[0][0].volume, 0.0);

        adjust(TriggerParam::Pan(-3.0), &mut state).unwrap();
        adjust(TriggerParam::Pitch(-48.0), &mut state).unwrap();
        assert_eq!(state.arrangements[0].triggers[0][0].pan, -3.0);
        assert_eq!(state.arrangements[0].triggers[0][0].pitch, -48.0);
    }

    #[test]
    fn adjust_rejects_non_finite() {
        let mut state = state();
        assert_eq!(
            adjust(TriggerParam::Pitch(f32::NAN), &mut state),
            Err(ReduceError::NonFiniteValue("pitch"))
        );
        assert_eq!(state.arrangements[0].triggers[0][0], Trigger::default());
    }
}
