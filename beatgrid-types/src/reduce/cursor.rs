use crate::{Direction, DrumMachineState};

/// Step the cursor one cell, wrapping at both edges. A no-op along an axis with
/// nothing to move over.
pub(super) fn move_cursor(direction: Direction, state: &mut DrumMachineState) {
    let beats = state.total_beats();
    let tracks = state.samples.len();
    let cursor = &mut state.cursor;
    match direction {
        Direction::Right => {
            if beats > 0 {
                cursor.x = (cursor.x + 1) % beats;
            }
        }
        Direction::Left => {
            if beats > 0 {
                cursor.x = wrap_back(cursor.x, beats);
            }
        }
        Direction::Down => {
            if tracks > 0 {
                cursor.y = (cursor.y + 1) % tracks;
            }
        }
        Direction::Up => {
            if tracks > 0 {
                cursor.y = wrap_back(cursor.y, tracks);
            }
        }
    }
}

fn wrap_back(pos: usize, len: usize) -> usize {
    if pos == 0 || pos > len {
        len - 1
    } else {
        pos - 1
    }
}
