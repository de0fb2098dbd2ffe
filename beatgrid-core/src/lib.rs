//! # beatgrid-core
//!
//! Backend library for the beatgrid step sequencer. Provides the state store,
//! action dispatch and persistence, independent of any renderer or audio
//! engine.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use beatgrid_core::config::Config;
//! use beatgrid_core::persistence::FileBlobStore;
//! use beatgrid_core::DrumMachine;
//! use beatgrid_types::{Direction, DrumMachineState};
//!
//! // 1. Build the initial state from configured defaults
//! let config = Config::load();
//! let state = DrumMachineState::new_with_defaults(config.defaults());
//! let blobs = FileBlobStore::new(config.storage_dir());
//! let machine = DrumMachine::with_state(state, Box::new(blobs)).with_key(config.storage_key());
//!
//! // 2. Observe every new state (renderer, audio driver, ...)
//! let sub = machine.subscribe(|state| println!("cursor at {:?}", state.cursor));
//!
//! // 3. Mutate through actions only
//! machine.add_sample(config.kit()[0].clone())?;
//! machine.move_cursor(Direction::Right)?;
//! machine.toggle_trigger()?;
//!
//! // 4. Persist
//! machine.save_state()?;
//! sub.unsubscribe();
//! ```
//!
//! ## Module Overview
//!
//! - [`store`]: `Store<S>`: copy-on-write state with ordered, panic-isolated
//!   subscriptions
//! - [`dispatch`]: `dispatch_action()` and the `DrumMachine` handle; the only
//!   way the sequencer state changes
//! - [`persistence`]: JSON blob save/load over a `BlobStore` (file or memory)
//! - [`config`]: TOML configuration (embedded defaults + user override)

pub mod config;
pub mod dispatch;
pub mod persistence;
pub mod store;

pub use beatgrid_types as types;
pub use dispatch::{dispatch_action, ActionError, Dispatcher, DrumMachine};
pub use persistence::{BlobStore, LoadOutcome, PersistenceError};
pub use store::{Store, StoreError, Subscription};
