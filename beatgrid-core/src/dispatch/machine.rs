//! DrumMachine: the handle external collaborators hold.

use std::sync::Arc;

use beatgrid_types::{
    Direction, DrumMachineState, GlobalSettingsPatch, GridAction, Mode, Sample, TriggerParam,
};

use super::{dispatch_action, ActionError, Dispatcher};
use crate::persistence::{self, BlobStore, LoadOutcome, PersistenceError, STATE_KEY};
use crate::store::{Store, Subscription};

/// Owns the state store and the blob store the state is saved to, and exposes
/// one method per sequencer operation.
///
/// The store sits behind an `Arc` so render and audio threads can hold it
/// directly via [`DrumMachine::store`].
pub struct DrumMachine {
    store: Arc<Store<DrumMachineState>>,
    blobs: Box<dyn BlobStore>,
    key: String,
}

impl DrumMachine {
    pub fn new(blobs: Box<dyn BlobStore>) -> Self {
        Self::with_state(DrumMachineState::new(), blobs)
    }

    pub fn with_state(state: DrumMachineState, blobs: Box<dyn BlobStore>) -> Self {
        Self {
            store: Arc::new(Store::new(state)),
            blobs,
            key: STATE_KEY.to_string(),
        }
    }

    /// Use `key` instead of the default blob key for save/load.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn store(&self) -> &Arc<Store<DrumMachineState>> {
        &self.store
    }

    pub fn state(&self) -> Arc<DrumMachineState> {
        self.store.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription<DrumMachineState>
    where
        F: Fn(&DrumMachineState) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn move_cursor(&self, direction: Direction) -> Result<(), ActionError> {
        self.dispatch(&GridAction::MoveCursor(direction))
    }

    pub fn set_mode(&self, mode: Mode) -> Result<(), ActionError> {
        self.dispatch(&GridAction::SetMode(mode))
    }

    /// Set the mode from its tag ("navigate", "volume", ...). Unknown tags are
    /// rejected without touching the state.
    pub fn set_mode_named(&self, tag: &str) -> Result<(), ActionError> {
        let mode = tag.parse::<Mode>().map_err(|e| {
            log::warn!(target: "dispatch", "set_mode: {}", e);
            ActionError::from(e)
        })?;
        self.set_mode(mode)
    }

    pub fn toggle_trigger(&self) -> Result<(), ActionError> {
        self.dispatch(&GridAction::ToggleTrigger)
    }

    pub fn adjust_trigger_parameter(&self, param: TriggerParam) -> Result<(), ActionError> {
        self.dispatch(&GridAction::AdjustTriggerParameter(param))
    }

    pub fn create_arrangement(&self) -> Result<(), ActionError> {
        self.dispatch(&GridAction::CreateArrangement)
    }

    pub fn select_arrangement(&self, index: usize) -> Result<(), ActionError> {
        self.dispatch(&GridAction::SelectArrangement(index))
    }

    pub fn toggle_arrangement_active(&self, index: usize) -> Result<(), ActionError> {
        self.dispatch(&GridAction::ToggleArrangementActive(index))
    }

    pub fn set_arrangement_volume(&self, index: usize, volume: f32) -> Result<(), ActionError> {
        self.dispatch(&GridAction::SetArrangementVolume(index, volume))
    }

    pub fn add_sample(&self, sample: Sample) -> Result<(), ActionError> {
        self.dispatch(&GridAction::AddSample(sample))
    }

    pub fn update_global_settings(&self, patch: GlobalSettingsPatch) -> Result<(), ActionError> {
        self.dispatch(&GridAction::UpdateGlobalSettings(patch))
    }

    /// Write the current state to the blob store under this machine's key.
    pub fn save_state(&self) -> Result<(), PersistenceError> {
        persistence::save_state(&self.store, self.blobs.as_ref(), &self.key)
    }

    /// Replace the current state with the saved one. A missing or corrupt
    /// blob leaves the current state as it is.
    pub fn load_state(&self) -> Result<LoadOutcome, PersistenceError> {
        persistence::load_state(&self.store, self.blobs.as_ref(), &self.key)
    }
}

impl Dispatcher for DrumMachine {
    fn dispatch(&self, action: &GridAction) -> Result<(), ActionError> {
        dispatch_action(&self.store, action)
    }
}
