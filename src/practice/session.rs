//! A single practice-set run

use serde::Serialize;

use crate::catalog::{PracticeSet, Question};
use crate::error::PracticeError;
use crate::story::{MAX_LIVES, POINTS_PER_CORRECT};

/// Hint points granted to every practice session
pub const DEFAULT_HINTS: u32 = 3;

/// Snapshot of a running practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeProgressState {
    pub active_set_id: Option<String>,
    /// 0-based position within the set
    pub current_question_index: usize,
    pub lives: u32,
    pub score: u32,
    pub hints: u32,
    pub is_answered: bool,
    pub selected_option: Option<usize>,
}

impl Default for PracticeProgressState {
    fn default() -> Self {
        Self {
            active_set_id: None,
            current_question_index: 0,
            lives: MAX_LIVES,
            score: 0,
            hints: DEFAULT_HINTS,
            is_answered: false,
            selected_option: None,
        }
    }
}

/// Result of checking an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeAnswer {
    pub correct: bool,
    pub correct_index: usize,
    pub lives_left: u32,
    pub explanation: &'static str,
}

/// Where `next` took the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeStep {
    /// Moved to the question at this 0-based index
    Question(usize),
    /// Session is over and must be discarded
    Finished(PracticeOutcome),
}

/// How a discarded session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeOutcome {
    Completed {
        set_id: String,
        score: u32,
        lives: u32,
    },
    OutOfLives {
        set_id: String,
        score: u32,
    },
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    set: &'static PracticeSet,
    state: PracticeProgressState,
}

impl PracticeSession {
    pub fn new(set: &'static PracticeSet) -> Self {
        Self {
            set,
            state: PracticeProgressState {
                active_set_id: Some(set.id.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn set(&self) -> &'static PracticeSet {
        self.set
    }

    pub fn state(&self) -> &PracticeProgressState {
        &self.state
    }

    pub fn current_question(&self) -> &'static Question {
        // index is kept < questions.len() by `next`
        &self.set.questions[self.state.current_question_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_question_index + 1 >= self.set.questions.len()
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), PracticeError> {
        if self.state.is_answered {
            return Err(PracticeError::AlreadyAnswered);
        }
        let question = self.current_question();
        if !question.has_option(index) {
            return Err(PracticeError::InvalidOption {
                index,
                available: question.options.len(),
            });
        }
        self.state.selected_option = Some(index);
        Ok(())
    }

    pub fn submit(&mut self) -> Result<PracticeAnswer, PracticeError> {
        if self.state.lives == 0 {
            return Err(PracticeError::Exhausted);
        }
        if self.state.is_answered {
            return Err(PracticeError::AlreadyAnswered);
        }
        let selected = self.state.selected_option.ok_or(PracticeError::NoSelection)?;
        let question = self.current_question();
        let correct = question.is_correct(selected);

        self.state.is_answered = true;
        if correct {
            self.state.score += POINTS_PER_CORRECT;
        } else {
            self.state.lives = self.state.lives.saturating_sub(1);
        }

        tracing::debug!(
            set = self.set.id,
            index = self.state.current_question_index,
            selected,
            correct,
            lives = self.state.lives,
            "practice answer submitted"
        );
        Ok(PracticeAnswer {
            correct,
            correct_index: question.correct,
            lives_left: self.state.lives,
            explanation: question.explanation,
        })
    }

    pub fn request_hint(&mut self) -> Result<&'static str, PracticeError> {
        if self.state.is_answered {
            return Err(PracticeError::AlreadyAnswered);
        }
        if self.state.hints == 0 {
            return Err(PracticeError::OutOfHints);
        }
        self.state.hints -= 1;
        Ok(self.current_question().first_sentence())
    }

    pub fn next(&mut self) -> Result<PracticeStep, PracticeError> {
        if !self.state.is_answered {
            return Err(PracticeError::NotAnswered);
        }
        let set_id = self.set.id.to_string();
        if self.state.lives == 0 {
            return Ok(PracticeStep::Finished(PracticeOutcome::OutOfLives {
                set_id,
                score: self.state.score,
            }));
        }
        if self.is_last_question() {
            return Ok(PracticeStep::Finished(PracticeOutcome::Completed {
                set_id,
                score: self.state.score,
                lives: self.state.lives,
            }));
        }

        self.state.current_question_index += 1;
        self.state.is_answered = false;
        self.state.selected_option = None;
        Ok(PracticeStep::Question(self.state.current_question_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_last_life_lost_ends_session() {
        let set = catalog::practice_set("error-handling").unwrap();
        let mut session = PracticeSession::new(set);
        session.state.lives = 1;

        let wrong = (set.questions[0].correct + 1) % set.questions[0].options.len();
        session.select_option(wrong).unwrap();
        let answer = session.submit().unwrap();
        assert_eq!(answer.lives_left, 0);
        assert_eq!(session.submit(), Err(PracticeError::Exhausted));

        assert_eq!(
            session.next(),
            Ok(PracticeStep::Finished(PracticeOutcome::OutOfLives {
                set_id: "error-handling".to_string(),
                score: 0,
            }))
        );
    }

    #[test]
    fn test_invalid_option() {
        let set = catalog::practice_set("debugging").unwrap();
        let mut session = PracticeSession::new(set);
        assert_eq!(
            session.select_option(9),
            Err(PracticeError::InvalidOption {
                index: 9,
                available: 4
            })
        );
    }
}
