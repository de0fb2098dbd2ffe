//! Plain-text rendering of the sequencer state.

use std::fmt::Write;

use beatgrid_types::{grid_cells, DrumMachineState, Mode};

/// Header line, one row per sample, and the arrangement list.
pub fn render(state: &DrumMachineState) -> String {
    let mut out = String::new();
    let settings = &state.global_settings;
    let _ = writeln!(
        out,
        "[{}] {}/{} @ {} bpm  cursor ({}, {}, {})",
        state.mode,
        settings.beats_per_measure,
        settings.measures,
        settings.tempo,
        state.cursor.x,
        state.cursor.y,
        state.cursor.z,
    );

    let beats_per_measure = settings.beats_per_measure as usize;
    let mut line = String::new();
    for cell in grid_cells(state) {
        if cell.beat == 0 {
            let name = state.samples.get(cell.track).map_or("?", |s| s.name.as_str());
            line = format!("{:>10} ", name);
        } else if beats_per_measure > 0 && cell.beat % beats_per_measure == 0 {
            line.push(' ');
        }
        line.push(match (cell.is_cursor, cell.trigger.is_active) {
            (true, true) => '@',
            (true, false) => '_',
            (false, true) => 'x',
            (false, false) => '.',
        });
        if cell.beat + 1 == state.total_beats() {
            let _ = writeln!(out, "{}", line);
        }
    }

    if state.samples.is_empty() {
        let _ = writeln!(out, "{:>10}", "(no samples)");
    }

    if let Some(trigger) = state.current_trigger() {
        if state.mode != Mode::Navigate && state.mode != Mode::Arrangement {
            let _ = writeln!(
                out,
                "  volume {:.2}  pan {:.2}  pitch {:.2}",
                trigger.volume, trigger.pan, trigger.pitch
            );
        }
    }

    for (i, arr) in state.arrangements.iter().enumerate() {
        let marker = if i == state.current_arrangement_index { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {} {:<12} {} vol {:.2}",
            marker,
            arr.id,
            arr.name,
            if arr.is_active { "on " } else { "off" },
            arr.volume
        );
    }
    out
}
