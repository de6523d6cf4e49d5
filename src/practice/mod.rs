//! Practice sets: short, independent quiz sessions
//!
//! Unlike the story, practice progress lives only as long as the session.
//! Finishing the last question, running out of lives or exiting discards it.

mod session;

pub use session::{
    PracticeAnswer, PracticeOutcome, PracticeProgressState, PracticeSession, PracticeStep,
    DEFAULT_HINTS,
};

use crate::catalog;
use crate::error::PracticeError;

/// Holds at most one active practice session
#[derive(Debug, Clone, Default)]
pub struct PracticeTracker {
    active: Option<PracticeSession>,
}

impl PracticeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session, replacing any active one
    pub fn start(&mut self, set_id: &str) -> Result<&PracticeSession, PracticeError> {
        let set = catalog::practice_set(set_id)?;
        if let Some(prev) = &self.active {
            tracing::debug!(previous = prev.set().id, "replacing active practice session");
        }
        Ok(self.active.insert(PracticeSession::new(set)))
    }

    pub fn active(&self) -> Option<&PracticeSession> {
        self.active.as_ref()
    }

    /// Snapshot of the active session, or the idle default
    pub fn state(&self) -> PracticeProgressState {
        self.active
            .as_ref()
            .map(|s| s.state().clone())
            .unwrap_or_default()
    }

    fn session_mut(&mut self) -> Result<&mut PracticeSession, PracticeError> {
        self.active.as_mut().ok_or(PracticeError::NoActiveSession)
    }

    pub fn select_option(&mut self, index: usize) -> Result<(), PracticeError> {
        self.session_mut()?.select_option(index)
    }

    pub fn submit(&mut self) -> Result<PracticeAnswer, PracticeError> {
        self.session_mut()?.submit()
    }

    pub fn request_hint(&mut self) -> Result<&'static str, PracticeError> {
        self.session_mut()?.request_hint()
    }

    /// Advance; a finished session is dropped before returning
    pub fn next(&mut self) -> Result<PracticeStep, PracticeError> {
        let step = self.session_mut()?.next()?;
        if let PracticeStep::Finished(outcome) = &step {
            tracing::debug!(?outcome, "practice session finished");
            self.active = None;
        }
        Ok(step)
    }

    pub fn exit(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    fn answer(tracker: &mut PracticeTracker, correct: bool) -> PracticeAnswer {
        let q = tracker.active().unwrap().current_question();
        let pick = if correct {
            q.correct
        } else {
            (q.correct + 1) % q.options.len()
        };
        tracker.select_option(pick).unwrap();
        tracker.submit().unwrap()
    }

    #[test]
    fn test_no_active_session() {
        let mut tracker = PracticeTracker::new();
        assert_eq!(tracker.submit(), Err(PracticeError::NoActiveSession));
        assert_eq!(tracker.request_hint(), Err(PracticeError::NoActiveSession));
        assert_eq!(tracker.state(), PracticeProgressState::default());
    }

    #[test]
    fn test_unknown_set() {
        let mut tracker = PracticeTracker::new();
        let err = tracker.start("nope").unwrap_err();
        assert!(matches!(err, PracticeError::Catalog(CatalogError::NotFound(_))));
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_start_is_fresh() {
        let mut tracker = PracticeTracker::new();
        tracker.start("error-handling").unwrap();
        let state = tracker.state();
        assert_eq!(state.active_set_id.as_deref(), Some("error-handling"));
        assert_eq!(state.lives, 3);
        assert_eq!(state.hints, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_question_index, 0);
    }

    #[test]
    fn test_submit_without_selection() {
        let mut tracker = PracticeTracker::new();
        tracker.start("debugging").unwrap();
        assert_eq!(tracker.submit(), Err(PracticeError::NoSelection));
        assert!(!tracker.state().is_answered);
    }

    #[test]
    fn test_hints_run_out() {
        let mut tracker = PracticeTracker::new();
        tracker.start("error-handling").unwrap();
        for left in (0..3).rev() {
            tracker.request_hint().unwrap();
            assert_eq!(tracker.state().hints, left);
        }
        let before = tracker.state();
        assert_eq!(tracker.request_hint(), Err(PracticeError::OutOfHints));
        assert_eq!(tracker.state(), before);
    }

    #[test]
    fn test_hint_returns_first_sentence() {
        let mut tracker = PracticeTracker::new();
        tracker.start("debugging").unwrap();
        assert_eq!(
            tracker.request_hint().unwrap(),
            "console.trace() outputs a full stack trace to the console, showing how you got to that function"
        );
    }

    #[test]
    fn test_selection_locked_after_submit() {
        let mut tracker = PracticeTracker::new();
        tracker.start("debugging").unwrap();
        answer(&mut tracker, true);
        assert_eq!(tracker.select_option(1), Err(PracticeError::AlreadyAnswered));
        assert_eq!(tracker.request_hint(), Err(PracticeError::AlreadyAnswered));
    }

    #[test]
    fn test_completes_and_discards() {
        let mut tracker = PracticeTracker::new();
        tracker.start("error-handling").unwrap();

        assert!(answer(&mut tracker, true).correct);
        assert_eq!(tracker.next(), Ok(PracticeStep::Question(1)));
        assert!(!tracker.state().is_answered);
        assert_eq!(tracker.state().selected_option, None);

        let result = answer(&mut tracker, false);
        assert!(!result.correct);
        assert_eq!(result.lives_left, 2);

        assert_eq!(
            tracker.next(),
            Ok(PracticeStep::Finished(PracticeOutcome::Completed {
                set_id: "error-handling".to_string(),
                score: 100,
                lives: 2,
            }))
        );
        assert!(tracker.active().is_none());
        assert_eq!(tracker.next(), Err(PracticeError::NoActiveSession));
    }

    #[test]
    fn test_next_requires_answer() {
        let mut tracker = PracticeTracker::new();
        tracker.start("api-integration").unwrap();
        assert_eq!(tracker.next(), Err(PracticeError::NotAnswered));
    }

    #[test]
    fn test_exit_discards() {
        let mut tracker = PracticeTracker::new();
        tracker.start("api-integration").unwrap();
        tracker.exit();
        assert!(tracker.active().is_none());
    }
}
