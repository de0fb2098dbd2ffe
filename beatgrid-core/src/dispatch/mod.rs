//! Action dispatch: every state change goes through [`dispatch_action`], which
//! runs the matching reducer inside a single `Store::update`.

mod machine;

pub use machine::DrumMachine;

use std::fmt;

use beatgrid_types::reduce::reduce_action;
use beatgrid_types::{DrumMachineState, GridAction, ParseModeError, ReduceError};

use crate::store::{Store, StoreError};

/// Why an action did not change the state.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The reducer refused the action; applying it would break an invariant.
    Rejected(ReduceError),
    InvalidMode(ParseModeError),
    Store(StoreError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(e) => write!(f, "action rejected: {}", e),
            Self::InvalidMode(e) => write!(f, "{}", e),
            Self::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(e) => Some(e),
            Self::InvalidMode(e) => Some(e),
            Self::Store(e) => Some(e),
        }
    }
}

impl From<ReduceError> for ActionError {
    fn from(e: ReduceError) -> Self {
        Self::Rejected(e)
    }
}

impl From<ParseModeError> for ActionError {
    fn from(e: ParseModeError) -> Self {
        Self::InvalidMode(e)
    }
}

impl From<StoreError> for ActionError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Trait for dispatching actions to the state store.
pub trait Dispatcher {
    fn dispatch(&self, action: &GridAction) -> Result<(), ActionError>;
}

impl Dispatcher for Store<DrumMachineState> {
    fn dispatch(&self, action: &GridAction) -> Result<(), ActionError> {
        dispatch_action(self, action)
    }
}

/// Dispatch an action against `store`. A rejected action leaves the current
/// state in place and notifies no one; the error is logged and returned.
pub fn dispatch_action(
    store: &Store<DrumMachineState>,
    action: &GridAction,
) -> Result<(), ActionError> {
    let result = store.update(|draft| -> Result<(), ActionError> {
        reduce_action(action, draft)?;
        debug_assert_eq!(draft.check_invariants(), Ok(()), "{} broke an invariant", action.name());
        Ok(())
    });
    match &result {
        Ok(()) => log::debug!(target: "dispatch", "applied {}", action.name()),
        Err(e) => log::warn!(target: "dispatch", "{}: {}", action.name(), e),
    }
    result
}
