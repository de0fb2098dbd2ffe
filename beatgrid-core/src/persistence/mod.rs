//! Saving and restoring the whole `DrumMachineState` as one JSON blob.
//!
//! The blob is the state verbatim (camelCase field names, nested as in memory)
//! stored under a single key in a [`BlobStore`]. Loading is all-or-nothing: a
//! blob that does not parse, or parses into a state that breaks an invariant,
//! is logged and ignored.

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use std::fmt;
use std::io;

use beatgrid_types::{DrumMachineState, InvariantViolation};

use crate::store::{Store, StoreError};

/// Key the state is stored under unless configured otherwise.
pub const STATE_KEY: &str = "drumMachineState";

/// External key-value storage for serialized state.
pub trait BlobStore: Send + Sync {
    /// The blob under `key`, or `None` if nothing was ever written there.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value.
    fn write(&self, key: &str, blob: &str) -> io::Result<()>;
}

#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid(InvariantViolation),
    Store(StoreError),
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<InvariantViolation> for PersistenceError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invalid(e)
    }
}

impl From<StoreError> for PersistenceError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Invalid(e) => write!(f, "invalid state: {}", e),
            Self::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// What `load_state` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The saved state replaced the current one.
    Loaded,
    /// Nothing saved under the key; current state kept.
    Missing,
    /// The saved blob was unusable; current state kept.
    Corrupt,
}

pub fn encode_state(state: &DrumMachineState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a blob and check it describes a valid state.
pub fn decode_state(blob: &str) -> Result<DrumMachineState, PersistenceError> {
    let state: DrumMachineState = serde_json::from_str(blob)?;
    state.check_invariants()?;
    Ok(state)
}

pub fn save_state(
    store: &Store<DrumMachineState>,
    blobs: &dyn BlobStore,
    key: &str,
) -> Result<(), PersistenceError> {
    let state = store.get();
    let blob = encode_state(&state)?;
    blobs.write(key, &blob)?;
    log::debug!(target: "persistence", "saved state under {:?} ({} bytes)", key, blob.len());
    Ok(())
}

pub fn load_state(
    store: &Store<DrumMachineState>,
    blobs: &dyn BlobStore,
    key: &str,
) -> Result<LoadOutcome, PersistenceError> {
    let blob = match blobs.read(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            log::debug!(target: "persistence", "no saved state under {:?}", key);
            return Ok(LoadOutcome::Missing);
        }
        Err(e) => {
            log::warn!(target: "persistence", "could not read saved state {:?}: {}", key, e);
            return Err(e.into());
        }
    };

    match decode_state(&blob) {
        Ok(state) => {
            store.replace(state)?;
            log::debug!(target: "persistence", "loaded state from {:?}", key);
            Ok(LoadOutcome::Loaded)
        }
        Err(e) => {
            log::warn!(target: "persistence", "ignoring saved state {:?}: {}", key, e);
            Ok(LoadOutcome::Corrupt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatgrid_types::{empty_row, Sample};

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode_state("{not json"), Err(PersistenceError::Json(_))));
        assert!(matches!(decode_state("{}"), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn decode_rejects_invariant_violations() {
        let mut state = DrumMachineState::new();
        state.samples.push(Sample::new("1", "test", "test.wav"));
        state.arrangements[0].triggers.push(empty_row(15));
        let blob = serde_json::to_string(&state).unwrap();
        assert!(matches!(decode_state(&blob), Err(PersistenceError::Invalid(_))));
    }

    #[test]
    fn decode_rejects_oversized_grid() {
        let blob = r#"{
            "arrangements": [{"id": "1", "name": "Default", "isActive": true, "volume": 1, "triggers": []}],
            "currentArrangementIndex": 0,
            "globalSettings": {"beatsPerMeasure": 4294967295, "measures": 4294967295, "tempo": 120},
            "samples": [],
            "mode": "navigate",
            "cursor": {"x": 0, "y": 0, "z": 0}
        }"#;
        assert!(matches!(
            decode_state(blob),
            Err(PersistenceError::Invalid(InvariantViolation::InvalidSettings(_)))
        ));
    }

    #[test]
    fn decode_accepts_hand_written_blob() {
        let blob = r#"{
            "arrangements": [{
                "id": "1", "name": "Default", "isActive": true, "volume": 1,
                "triggers": [[
                    {"isActive": true, "volume": 1, "pan": 0, "pitch": 0},
                    {"isActive": false, "volume": 0.5, "pan": -1, "pitch": 12}
                ]]
            }],
            "currentArrangementIndex": 0,
            "globalSettings": {"beatsPerMeasure": 2, "measures": 1, "tempo": 120},
            "samples": [{"id": "1", "name": "test", "url": "test.wav", "defaultVolume": 1}],
            "mode": "pan",
            "cursor": {"x": 1, "y": 0, "z": 0}
        }"#;
        let state = decode_state(blob).unwrap();
        assert_eq!(state.total_beats(), 2);
        assert!(state.arrangements[0].triggers[0][0].is_active);
        assert_eq!(state.arrangements[0].triggers[0][1].pitch, 12.0);
        assert_eq!(state.mode, beatgrid_types::Mode::Pan);
    }
}
