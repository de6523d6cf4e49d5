//! Story progress state machine
//!
//! Owns a [`ProgressState`] and applies the submit / advance / select /
//! reset transitions to it. Every rejected operation leaves the state
//! untouched.

use std::collections::HashSet;

use chrono::Utc;

use super::events::StoryEvent;
use super::state::{AnswerRecord, Phase, ProgressState, MAX_LIVES, POINTS_PER_CORRECT};
use crate::catalog::{self, Question};
use crate::error::{CatalogError, StoryError};

/// Score and lives reconstructed from the answer log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    pub score: u32,
    pub lives: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StoryMachine {
    state: ProgressState,
}

impl StoryMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a rehydrated state
    pub fn from_state(state: ProgressState) -> Self {
        Self {
            state: state.sanitize(),
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn into_state(self) -> ProgressState {
        self.state
    }

    /// Question at the current position
    pub fn current_question(&self) -> Result<&'static Question, StoryError> {
        let questions = catalog::episode_questions(self.state.current_episode)?;
        let idx = self.state.current_question.saturating_sub(1) as usize;
        questions.get(idx).ok_or_else(|| {
            CatalogError::NotFound(format!(
                "question {} of episode {}",
                self.state.current_question, self.state.current_episode
            ))
            .into()
        })
    }

    pub fn chapter_title(&self) -> &'static str {
        catalog::episode(self.state.current_episode)
            .map(|e| e.title)
            .unwrap_or("")
    }

    /// Share of distinct story questions answered correctly, 0..=100
    ///
    /// Replayed questions count once. Only a finished story reads 100.
    pub fn progress_percent(&self) -> u8 {
        if self.state.phase == Phase::StoryComplete {
            return 100;
        }
        let solved: HashSet<(u32, u32)> = self
            .state
            .answered_questions
            .iter()
            .filter(|a| a.correct)
            .map(|a| (a.episode, a.question))
            .collect();
        let total = catalog::total_story_questions().max(1);
        (solved.len() * 100 / total).min(99) as u8
    }

    /// Submit an answer for the current question
    ///
    /// `None` means nothing was selected; that is a validation failure, not
    /// a transition.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Result<Vec<StoryEvent>, StoryError> {
        match self.state.phase {
            Phase::Exhausted => return Err(StoryError::Exhausted),
            Phase::StoryComplete => return Err(StoryError::StoryComplete),
            Phase::AnsweredCorrect | Phase::AnsweredIncorrect => {
                return Err(StoryError::AlreadyAnswered)
            }
            Phase::AwaitingAnswer => {}
        }

        let selected = selected.ok_or(StoryError::NoSelection)?;
        let question = self.current_question()?;
        if !question.has_option(selected) {
            return Err(StoryError::InvalidOption {
                index: selected,
                available: question.options.len(),
            });
        }

        let correct = question.is_correct(selected);
        self.state.answered_questions.push(AnswerRecord {
            episode: self.state.current_episode,
            question: self.state.current_question,
            selected,
            correct,
        });

        let mut events = Vec::new();
        if correct {
            self.state.score += POINTS_PER_CORRECT;
            self.state.phase = Phase::AnsweredCorrect;
            events.push(StoryEvent::AnsweredCorrect {
                points: POINTS_PER_CORRECT,
                explanation: question.explanation,
            });
        } else {
            self.state.lives = self.state.lives.saturating_sub(1);
            if self.state.regen_started_at.is_none() {
                self.state.regen_started_at = Some(Utc::now());
            }
            events.push(StoryEvent::AnsweredIncorrect {
                lives_left: self.state.lives,
                explanation: question.explanation,
            });
            if self.state.lives == 0 {
                self.state.phase = Phase::Exhausted;
                events.push(StoryEvent::OutOfLives);
            } else {
                self.state.phase = Phase::AnsweredIncorrect;
            }
        }

        tracing::debug!(
            episode = self.state.current_episode,
            question = self.state.current_question,
            selected,
            correct,
            lives = self.state.lives,
            score = self.state.score,
            "story answer submitted"
        );
        Ok(events)
    }

    /// Move past an acknowledged answer
    ///
    /// Incorrect answers progress too; only running out of lives blocks.
    /// Once the story is complete this is a no-op.
    pub fn advance(&mut self) -> Result<Vec<StoryEvent>, StoryError> {
        match self.state.phase {
            Phase::StoryComplete => return Ok(Vec::new()),
            Phase::Exhausted => return Err(StoryError::Exhausted),
            Phase::AwaitingAnswer => return Err(StoryError::NotAnswered),
            Phase::AnsweredCorrect | Phase::AnsweredIncorrect => {}
        }

        let episode = self.state.current_episode;
        let per_episode = catalog::episode_questions(episode)?.len() as u32;
        let mut events = Vec::new();

        if self.state.current_question < per_episode {
            self.state.current_question += 1;
            self.state.phase = Phase::AwaitingAnswer;
            events.push(StoryEvent::QuestionAdvanced {
                episode,
                question: self.state.current_question,
            });
        } else {
            self.state.mark_episode_complete(episode);
            events.push(StoryEvent::EpisodeCompleted(episode));

            if episode < catalog::episode_count() {
                self.state.current_episode = episode + 1;
                self.state.current_question = 1;
                self.state.phase = Phase::AwaitingAnswer;
                events.push(StoryEvent::EpisodeUnlocked(episode + 1));
            } else {
                self.state.phase = Phase::StoryComplete;
                events.push(StoryEvent::StoryCompleted);
            }
        }

        tracing::debug!(
            episode = self.state.current_episode,
            question = self.state.current_question,
            phase = self.state.phase.label(),
            "story advanced"
        );
        Ok(events)
    }

    /// Jump back to the start of an unlocked episode
    pub fn select_episode(&mut self, episode: u32) -> Result<Vec<StoryEvent>, StoryError> {
        catalog::episode(episode)?;
        if episode > self.state.current_episode {
            return Err(StoryError::EpisodeLocked {
                requested: episode,
                current: self.state.current_episode,
            });
        }

        self.state.current_episode = episode;
        self.state.current_question = 1;
        if self.state.phase != Phase::Exhausted {
            self.state.phase = Phase::AwaitingAnswer;
        }
        Ok(vec![StoryEvent::EpisodeSelected(episode)])
    }

    /// Return to the very beginning, clearing score, lives and the log
    pub fn reset(&mut self) -> Vec<StoryEvent> {
        self.state = ProgressState::default();
        tracing::debug!("story reset");
        vec![StoryEvent::Reset]
    }

    /// Restore one life
    ///
    /// Called by the regeneration timer and by "watch ad". Leaves
    /// `Exhausted` once a life is back.
    pub fn gain_life(&mut self) -> Vec<StoryEvent> {
        if self.state.lives >= MAX_LIVES {
            return Vec::new();
        }
        self.state.lives += 1;
        if self.state.lives == MAX_LIVES {
            self.state.regen_started_at = None;
        }
        if self.state.phase == Phase::Exhausted {
            self.state.phase = Phase::AwaitingAnswer;
        }
        vec![StoryEvent::LifeGained {
            lives: self.state.lives,
        }]
    }

    /// Restore all lives at once ("buy")
    pub fn refill_lives(&mut self) -> Vec<StoryEvent> {
        let mut events = Vec::new();
        while self.state.lives < MAX_LIVES {
            events.extend(self.gain_life());
        }
        events
    }

    /// Hint for the current question
    ///
    /// The story hint is free; only practice sessions spend hint points.
    pub fn hint(&self) -> Result<&'static str, StoryError> {
        match self.state.phase {
            Phase::Exhausted => Err(StoryError::Exhausted),
            Phase::StoryComplete => Err(StoryError::StoryComplete),
            _ => Ok(self.current_question()?.first_sentence()),
        }
    }

    pub(crate) fn set_regen_started_at(&mut self, at: Option<chrono::DateTime<Utc>>) {
        self.state.regen_started_at = at;
    }

    /// Rebuild score and lives from the answer log alone
    ///
    /// Holds for any sequence of submits since the last reset in which no
    /// life was regained.
    pub fn replay(log: &[AnswerRecord]) -> Replay {
        let correct = log.iter().filter(|a| a.correct).count() as u32;
        let incorrect = log.iter().filter(|a| !a.correct).count() as u32;
        Replay {
            score: POINTS_PER_CORRECT * correct,
            lives: MAX_LIVES.saturating_sub(incorrect),
        }
    }
}
