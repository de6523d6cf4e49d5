//! Persisted story progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Maximum (and starting) number of lives
pub const MAX_LIVES: u32 = 3;

/// Score awarded for each correct answer
pub const POINTS_PER_CORRECT: u32 = 100;

/// Where the machine is within the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for an answer to the current question
    #[default]
    AwaitingAnswer,
    /// Answered correctly, waiting for `advance`
    AnsweredCorrect,
    /// Answered incorrectly with lives to spare, waiting for `advance`
    AnsweredIncorrect,
    /// Out of lives; only reset or a regained life leaves this state
    Exhausted,
    /// Last question of the last episode acknowledged
    StoryComplete,
}

impl Phase {
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::AnsweredCorrect | Self::AnsweredIncorrect)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingAnswer => "awaiting answer",
            Self::AnsweredCorrect => "answered (correct)",
            Self::AnsweredIncorrect => "answered (incorrect)",
            Self::Exhausted => "out of lives",
            Self::StoryComplete => "story complete",
        }
    }
}

/// One entry of the append-only answer log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub episode: u32,
    pub question: u32,
    pub selected: usize,
    pub correct: bool,
}

/// Full story progress, serialized verbatim to the store on every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// 1-based episode number
    pub current_episode: u32,
    /// 1-based question number within the episode
    pub current_question: u32,
    pub lives: u32,
    pub score: u32,
    #[serde(default)]
    pub answered_questions: Vec<AnswerRecord>,
    /// Completion flag per episode, index 0 is episode 1
    #[serde(default)]
    pub episode_complete: Vec<bool>,
    #[serde(default)]
    pub phase: Phase,
    /// Start of the running life-regeneration interval
    #[serde(default, rename = "lastLifeLoss")]
    pub regen_started_at: Option<DateTime<Utc>>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            current_episode: 1,
            current_question: 1,
            lives: MAX_LIVES,
            score: 0,
            answered_questions: Vec::new(),
            episode_complete: vec![false; catalog::episode_count() as usize],
            phase: Phase::AwaitingAnswer,
            regen_started_at: None,
        }
    }
}

impl ProgressState {
    pub fn is_episode_complete(&self, episode: u32) -> bool {
        episode
            .checked_sub(1)
            .and_then(|i| self.episode_complete.get(i as usize))
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn mark_episode_complete(&mut self, episode: u32) {
        let idx = episode.saturating_sub(1) as usize;
        if self.episode_complete.len() <= idx {
            self.episode_complete.resize(idx + 1, false);
        }
        self.episode_complete[idx] = true;
    }

    pub fn correct_count(&self) -> usize {
        self.answered_questions.iter().filter(|a| a.correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.answered_questions.iter().filter(|a| !a.correct).count()
    }

    /// Bring a rehydrated blob back inside its bounds
    ///
    /// Stored state may come from an older build or a hand-edited store.
    /// Positions are clamped into the catalog, lives into `0..=MAX_LIVES`,
    /// and a zero-lives state is forced into `Exhausted`.
    pub fn sanitize(mut self) -> Self {
        let episodes = catalog::episode_count().max(1);
        self.current_episode = self.current_episode.clamp(1, episodes);

        let per_episode = catalog::episode_questions(self.current_episode)
            .map(|q| q.len() as u32)
            .unwrap_or(1)
            .max(1);
        self.current_question = self.current_question.clamp(1, per_episode);

        self.lives = self.lives.min(MAX_LIVES);
        self.episode_complete.resize(episodes as usize, false);

        if self.lives == 0 {
            self.phase = Phase::Exhausted;
        } else if self.phase == Phase::Exhausted {
            self.phase = Phase::AwaitingAnswer;
        }
        if self.lives == MAX_LIVES {
            self.regen_started_at = None;
        }
        self
    }
}
