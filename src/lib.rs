//! PEARL - gamified career learning
//!
//! The Taiken Story progress tracker and its collaborators: a static content
//! catalog, the story and practice state machines, life regeneration,
//! key-value persistence, and a client for the PEARL backend.
//!
//! ## Layout
//!
//! 1. **Game core** (`catalog`, `story`, `practice`, `lives`): synchronous
//!    state machines returning events. No I/O.
//!
//! 2. **Adapters** (`store`, `prefs`, `present`, `api`, `auth`, `sync`):
//!    persistence, notifications and the backend. Failures here are logged
//!    and never corrupt game state.
//!
//! [`taiken::TaikenSession`] wires the two together.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod lives;
pub mod practice;
pub mod prefs;
pub mod present;
pub mod store;
pub mod story;
pub mod sync;
pub mod taiken;

pub use error::{CatalogError, PracticeError, StoreError, StoryError};
