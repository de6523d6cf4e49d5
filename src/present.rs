//! Presentation adapter
//!
//! Turns state-machine results into short user-facing notifications. The
//! presentation layer renders these; it never touches machine internals.

use crate::error::{PracticeError, StoryError};
use crate::practice::{PracticeAnswer, PracticeOutcome, PracticeStep};
use crate::story::StoryEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Notification for a story event, if it deserves one
pub fn story_notification(event: &StoryEvent) -> Option<Notification> {
    let n = match event {
        StoryEvent::AnsweredCorrect {
            points,
            explanation,
        } => Notification::success(format!(
            "Correct Answer! Great job! You earned {points} points. {explanation}"
        )),
        StoryEvent::AnsweredIncorrect {
            lives_left,
            explanation,
        } => Notification::error(format!(
            "Incorrect Answer ({lives_left} lives left). {explanation}"
        )),
        StoryEvent::OutOfLives => Notification::error(
            "Game Over. You've run out of lives! Review the material and try again.",
        ),
        StoryEvent::QuestionAdvanced { question, .. } => {
            Notification::info(format!("Moving to Question {question}"))
        }
        StoryEvent::EpisodeCompleted(_) => return None,
        StoryEvent::EpisodeUnlocked(n) => Notification::success(format!("Episode {n} Unlocked!")),
        StoryEvent::StoryCompleted => {
            Notification::success("You have completed all story episodes!")
        }
        StoryEvent::EpisodeSelected(n) => Notification::info(format!("Replaying Episode {n}")),
        StoryEvent::LifeGained { lives } => {
            Notification::success(format!("You gained 1 life. Lives: {lives}"))
        }
        StoryEvent::Reset => Notification::info("Game Reset!"),
    };
    Some(n)
}

pub fn story_error_notification(err: &StoryError) -> Notification {
    match err {
        StoryError::Exhausted => Notification::error(
            "You ran out of lives! Please wait for lives to regenerate or buy more.",
        ),
        StoryError::StoryComplete => Notification::success(err.to_string()),
        _ => Notification::error(err.to_string()),
    }
}

pub fn story_hint_notification(hint: &str) -> Notification {
    Notification::warning(format!("Hint: {hint}"))
}

pub fn practice_answer_notification(answer: &PracticeAnswer) -> Notification {
    if answer.correct {
        Notification::success(format!("Great Job! {}", answer.explanation))
    } else if answer.lives_left == 0 {
        Notification::error("No more lives! Try the set again.")
    } else {
        Notification::error(format!("Not Quite... {}", answer.explanation))
    }
}

pub fn practice_step_notification(step: &PracticeStep) -> Option<Notification> {
    match step {
        PracticeStep::Question(_) => None,
        PracticeStep::Finished(PracticeOutcome::Completed { score, .. }) => Some(
            Notification::success(format!("Practice Set Completed! Points: {score}")),
        ),
        PracticeStep::Finished(PracticeOutcome::OutOfLives { .. }) => {
            Some(Notification::error("No more lives! Try the set again."))
        }
    }
}

pub fn practice_hint_notification(hint: &str, hints_left: u32) -> Notification {
    Notification::warning(format!("Hint: {hint} ({hints_left} hints left)"))
}

pub fn practice_error_notification(err: &PracticeError) -> Notification {
    Notification::error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_unlock_message() {
        let n = story_notification(&StoryEvent::EpisodeUnlocked(2)).unwrap();
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.message, "Episode 2 Unlocked!");
    }

    #[test]
    fn test_reset_message() {
        let n = story_notification(&StoryEvent::Reset).unwrap();
        assert_eq!(n.to_string(), "[info] Game Reset!");
    }

    #[test]
    fn test_episode_completed_is_silent() {
        assert!(story_notification(&StoryEvent::EpisodeCompleted(1)).is_none());
    }

    #[test]
    fn test_validation_errors() {
        let n = story_error_notification(&StoryError::NoSelection);
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, "Please select an answer");

        let n = practice_error_notification(&PracticeError::OutOfHints);
        assert_eq!(n.message, "No hint points remaining!");
    }
}
