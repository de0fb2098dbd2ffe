//! Action types for the dispatch system.
//!
//! Every state transition the sequencer supports is one `GridAction`. The
//! reducers in [`crate::reduce`] give each variant its meaning.

use serde::{Deserialize, Serialize};

use crate::{GlobalSettingsPatch, Mode, Sample};

/// Cursor movement. Left/right walk beats, up/down walk sample rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A trigger field together with its new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerParam {
    /// Clamped to 0.0-1.0.
    Volume(f32),
    /// Stored as given.
    Pan(f32),
    /// Semitones, stored as given.
    Pitch(f32),
}

impl TriggerParam {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerParam::Volume(_) => "volume",
            TriggerParam::Pan(_) => "pan",
            TriggerParam::Pitch(_) => "pitch",
        }
    }

    pub fn value(&self) -> f32 {
        match self {
            TriggerParam::Volume(v) | TriggerParam::Pan(v) | TriggerParam::Pitch(v) => *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridAction {
    MoveCursor(Direction),
    SetMode(Mode),
    /// Flip `isActive` of the trigger under the cursor.
    ToggleTrigger,
    AdjustTriggerParameter(TriggerParam),
    CreateArrangement,
    /// Make the arrangement at this index current (also sets `cursor.z`).
    SelectArrangement(usize),
    ToggleArrangementActive(usize),
    SetArrangementVolume(usize, f32),
    AddSample(Sample),
    UpdateGlobalSettings(GlobalSettingsPatch),
}

impl GridAction {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GridAction::MoveCursor(_) => "move_cursor",
            GridAction::SetMode(_) => "set_mode",
            GridAction::ToggleTrigger => "toggle_trigger",
            GridAction::AdjustTriggerParameter(_) => "adjust_trigger_parameter",
            GridAction::CreateArrangement => "create_arrangement",
            GridAction::SelectArrangement(_) => "select_arrangement",
            GridAction::ToggleArrangementActive(_) => "toggle_arrangement_active",
            GridAction::SetArrangementVolume(_, _) => "set_arrangement_volume",
            GridAction::AddSample(_) => "add_sample",
            GridAction::UpdateGlobalSettings(_) => "update_global_settings",
        }
    }
}
