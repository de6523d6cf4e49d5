//! End-to-end story and practice flows over the SQLite store

use tempfile::TempDir;

use pearl::lives::LifeRegen;
use pearl::practice::{PracticeOutcome, PracticeStep, PracticeTracker};
use pearl::prefs::{self, Theme};
use pearl::store::{keys, Persistence, SqliteStore};
use pearl::story::{Phase, ProgressState, StoryEvent, StoryMachine};
use pearl::sync::ProgressSync;
use pearl::taiken::TaikenSession;
use pearl::{PracticeError, StoryError};

fn open_session(dir: &TempDir) -> TaikenSession<SqliteStore> {
    let store = SqliteStore::open(&dir.path().join("pearl.db")).expect("Failed to open store");
    TaikenSession::open(
        Persistence::new(store),
        LifeRegen::default(),
        ProgressSync::disabled(),
    )
}

fn answer_correctly(session: &mut TaikenSession<SqliteStore>) -> Vec<StoryEvent> {
    let pick = session.current_question().unwrap().correct;
    session.submit_answer(Some(pick)).unwrap()
}

fn answer_wrongly(session: &mut TaikenSession<SqliteStore>) -> Vec<StoryEvent> {
    let question = session.current_question().unwrap();
    let wrong = (question.correct + 1) % question.options.len();
    session.submit_answer(Some(wrong)).unwrap()
}

#[test]
fn test_full_story_survives_restarts() {
    let dir = TempDir::new().unwrap();

    // play each question in a fresh process, as the CLI does
    for _ in 0..9 {
        let mut session = open_session(&dir);
        answer_correctly(&mut session);
        session.advance().unwrap();
    }

    let mut session = open_session(&dir);
    let state = session.state().clone();
    assert_eq!(state.phase, Phase::StoryComplete);
    assert_eq!(state.score, 900);
    assert_eq!(state.lives, 3);
    assert_eq!(state.episode_complete, vec![true, true, true]);
    assert_eq!(state.answered_questions.len(), 9);
    assert_eq!(prefs::chapter_progress(session.persistence()), 100);

    // acknowledging again is a no-op
    assert_eq!(session.advance().unwrap(), Vec::new());
    assert_eq!(session.submit_answer(Some(0)), Err(StoryError::StoryComplete));
}

#[test]
fn test_episode_unlock_after_three_correct() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);

    let mut events = Vec::new();
    for _ in 0..3 {
        answer_correctly(&mut session);
        events = session.advance().unwrap();
    }
    assert!(events.contains(&StoryEvent::EpisodeUnlocked(2)));

    let reopened = open_session(&dir);
    assert_eq!(reopened.state().current_episode, 2);
    assert_eq!(reopened.state().current_question, 1);
    assert!(reopened.state().is_episode_complete(1));

    // replaying episode 1 keeps score and log
    let mut session = reopened;
    session.select_episode(1).unwrap();
    assert_eq!(session.state().score, 300);
    assert_eq!(
        session.select_episode(3),
        Err(StoryError::EpisodeLocked {
            requested: 3,
            current: 1
        })
    );
}

#[test]
fn test_running_out_of_lives_and_recovering() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);

    answer_wrongly(&mut session);
    session.advance().unwrap();
    answer_wrongly(&mut session);
    session.advance().unwrap();
    let events = answer_wrongly(&mut session);
    assert!(events.contains(&StoryEvent::OutOfLives));

    let mut session = open_session(&dir);
    assert_eq!(session.machine().phase(), Phase::Exhausted);
    assert_eq!(session.state().lives, 0);
    assert!(session.state().regen_started_at.is_some());
    assert_eq!(session.submit_answer(Some(0)), Err(StoryError::Exhausted));
    assert_eq!(session.advance(), Err(StoryError::Exhausted));

    let replay = StoryMachine::replay(&session.state().answered_questions);
    assert_eq!(replay.lives, 0);
    assert_eq!(replay.score, 0);

    // watching an ad brings one life back and unblocks input
    session.gain_life();
    assert_eq!(session.state().lives, 1);
    assert_eq!(session.machine().phase(), Phase::AwaitingAnswer);

    session.reset();
    let reopened = open_session(&dir);
    assert_eq!(reopened.state(), &ProgressState::default());
}

#[test]
fn test_preferences_share_the_store() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(&dir.path().join("pearl.db")).unwrap();
    let persistence = Persistence::new(store);

    assert_eq!(prefs::load_theme(&persistence), Theme::Light);
    prefs::save_theme(&persistence, Theme::Dark);
    assert_eq!(prefs::load_theme(&persistence), Theme::Dark);

    // a game-state write does not disturb the theme
    persistence.save(keys::GAME_STATE, &ProgressState::default());
    assert_eq!(prefs::load_theme(&persistence), Theme::Dark);
}

#[test]
fn test_practice_set_to_completion() {
    let mut tracker = PracticeTracker::new();
    tracker.start("error-handling").unwrap();
    let total = tracker.active().unwrap().set().questions.len();

    let mut last = None;
    for _ in 0..total {
        assert_eq!(tracker.submit(), Err(PracticeError::NoSelection));
        let pick = tracker.active().unwrap().current_question().correct;
        tracker.select_option(pick).unwrap();
        assert!(tracker.submit().unwrap().correct);
        last = Some(tracker.next().unwrap());
    }

    assert_eq!(
        last,
        Some(PracticeStep::Finished(PracticeOutcome::Completed {
            set_id: "error-handling".to_string(),
            score: 100 * total as u32,
            lives: 3,
        }))
    );
    assert!(tracker.active().is_none());
    assert_eq!(tracker.next(), Err(PracticeError::NoActiveSession));
}
