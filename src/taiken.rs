//! Story session driver
//!
//! Wraps a [`StoryMachine`] with the collaborators the story page needs:
//! the state is written back after every mutation, chapter progress follows
//! the questions solved, regeneration is caught up on load and milestones go to
//! [`ProgressSync`].

use chrono::Utc;

use crate::catalog::Question;
use crate::error::StoryError;
use crate::lives::{LifeRegen, RegenStatus};
use crate::prefs;
use crate::store::{keys, KvStore, Persistence};
use crate::story::{ProgressState, StoryEvent, StoryMachine};
use crate::sync::ProgressSync;

pub struct TaikenSession<S: KvStore> {
    machine: StoryMachine,
    persistence: Persistence<S>,
    regen: LifeRegen,
    sync: ProgressSync,
}

impl<S: KvStore> TaikenSession<S> {
    /// Load saved progress (or start fresh) and credit regenerated lives
    pub fn open(persistence: Persistence<S>, regen: LifeRegen, sync: ProgressSync) -> Self {
        let machine = match persistence.load::<ProgressState>(keys::GAME_STATE) {
            Some(state) => StoryMachine::from_state(state),
            None => StoryMachine::new(),
        };

        let mut session = Self {
            machine,
            persistence,
            regen,
            sync,
        };
        let events = session.regen.catch_up(&mut session.machine, Utc::now());
        if !events.is_empty() {
            session.commit(&events);
        }
        session
    }

    pub fn machine(&self) -> &StoryMachine {
        &self.machine
    }

    pub fn state(&self) -> &ProgressState {
        self.machine.state()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn current_question(&self) -> Result<&'static Question, StoryError> {
        self.machine.current_question()
    }

    pub fn regen_status(&self) -> RegenStatus {
        self.regen.status(&self.machine, Utc::now())
    }

    pub fn regen(&self) -> LifeRegen {
        self.regen
    }

    pub fn submit_answer(&mut self, selected: Option<usize>) -> Result<Vec<StoryEvent>, StoryError> {
        let events = self.machine.submit_answer(selected)?;
        self.commit(&events);
        Ok(events)
    }

    pub fn advance(&mut self) -> Result<Vec<StoryEvent>, StoryError> {
        let events = self.machine.advance()?;
        self.commit(&events);
        Ok(events)
    }

    pub fn select_episode(&mut self, episode: u32) -> Result<Vec<StoryEvent>, StoryError> {
        let events = self.machine.select_episode(episode)?;
        self.commit(&events);
        Ok(events)
    }

    pub fn reset(&mut self) -> Vec<StoryEvent> {
        let events = self.machine.reset();
        self.commit(&events);
        events
    }

    /// "Watch ad" or a fired regeneration timer
    pub fn gain_life(&mut self) -> Vec<StoryEvent> {
        let events = self.machine.gain_life();
        self.commit(&events);
        events
    }

    /// "Buy lives"
    pub fn refill_lives(&mut self) -> Vec<StoryEvent> {
        let events = self.machine.refill_lives();
        self.commit(&events);
        events
    }

    /// Credit any lives due by now
    pub fn catch_up(&mut self) -> Vec<StoryEvent> {
        let events = self.regen.catch_up(&mut self.machine, Utc::now());
        if !events.is_empty() {
            self.commit(&events);
        }
        events
    }

    pub fn hint(&self) -> Result<&'static str, StoryError> {
        self.machine.hint()
    }

    fn commit(&self, events: &[StoryEvent]) {
        self.persistence.save(keys::GAME_STATE, self.machine.state());
        prefs::set_chapter_progress(&self.persistence, self.machine.progress_percent());
        self.sync.story(events, self.machine.state());
    }
}
