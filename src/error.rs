//! Error types for the Taiken game, catalog and store
//!
//! Validation failures carry no state change: callers can report them and
//! carry on with the same machine.

/// Content lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Rejected story operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    #[error("Please select an answer")]
    NoSelection,

    #[error("Option {index} does not exist (question has {available} options)")]
    InvalidOption { index: usize, available: usize },

    #[error("This question has already been answered")]
    AlreadyAnswered,

    #[error("Answer the current question before moving on")]
    NotAnswered,

    #[error("You ran out of lives")]
    Exhausted,

    #[error("All story episodes are already complete")]
    StoryComplete,

    #[error("Episode {requested} is locked (current episode is {current})")]
    EpisodeLocked { requested: u32, current: u32 },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Rejected practice operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PracticeError {
    #[error("No practice set is active")]
    NoActiveSession,

    #[error("Please select an answer")]
    NoSelection,

    #[error("Option {index} does not exist (question has {available} options)")]
    InvalidOption { index: usize, available: usize },

    #[error("This question has already been answered")]
    AlreadyAnswered,

    #[error("Answer the current question before moving on")]
    NotAnswered,

    #[error("No hint points remaining!")]
    OutOfHints,

    #[error("No more lives! Try the set again.")]
    Exhausted,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Key-value store failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("Failed to create storage directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}
