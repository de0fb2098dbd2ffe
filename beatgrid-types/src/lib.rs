//! # beatgrid-types
//!
//! Shared type definitions for the beatgrid step sequencer.
//! This crate holds the trigger grid data model, the action enums, the pure
//! reducers that implement every state transition, and the read-only views
//! that renderers and audio drivers consume.
//!
//! Nothing here owns state or performs I/O; `beatgrid-core` wraps these pieces
//! in a store with subscriptions and persistence.

pub mod action;
mod error;
pub mod reduce;
pub mod state;
pub mod view;

pub use action::*;
pub use error::{InvariantViolation, ReduceError};
pub use state::*;
pub use view::{arrangement_cells, grid_cells, step_hits, GridCell, StepHit};
