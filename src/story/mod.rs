//! Taiken Story: episode progression with lives and score

mod events;
mod machine;
mod state;

pub use events::StoryEvent;
pub use machine::{Replay, StoryMachine};
pub use state::{AnswerRecord, Phase, ProgressState, MAX_LIVES, POINTS_PER_CORRECT};
