//! Events emitted by story transitions

/// Something the presentation layer may want to announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryEvent {
    AnsweredCorrect {
        points: u32,
        explanation: &'static str,
    },
    AnsweredIncorrect {
        lives_left: u32,
        explanation: &'static str,
    },
    /// Lives just hit zero; input is blocked until reset or a life returns
    OutOfLives,
    QuestionAdvanced {
        episode: u32,
        question: u32,
    },
    EpisodeCompleted(u32),
    EpisodeUnlocked(u32),
    StoryCompleted,
    EpisodeSelected(u32),
    LifeGained {
        lives: u32,
    },
    Reset,
}
