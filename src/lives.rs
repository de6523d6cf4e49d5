//! Life regeneration
//!
//! One life comes back every [`DEFAULT_REGEN_INTERVAL`] after the first
//! loss, until lives are full again. The timer is outside the state
//! machine: whatever fires it calls [`StoryMachine::gain_life`], the same
//! transition "watch ad" uses.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::story::{StoryEvent, StoryMachine, MAX_LIVES};

pub const DEFAULT_REGEN_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// What the regeneration timer is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenStatus {
    /// Lives are full; no timer running
    Full,
    /// Next life arrives after this much more time
    Waiting(Duration),
}

/// Regeneration rules over a configurable interval
#[derive(Debug, Clone, Copy)]
pub struct LifeRegen {
    interval: Duration,
}

impl Default for LifeRegen {
    fn default() -> Self {
        Self::new(DEFAULT_REGEN_INTERVAL)
    }
}

impl LifeRegen {
    pub fn new(interval: Duration) -> Self {
        // zero would regenerate an unbounded number of lives per tick
        let interval = interval.max(Duration::from_secs(1));
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next life
    pub fn status(&self, machine: &StoryMachine, now: DateTime<Utc>) -> RegenStatus {
        let state = machine.state();
        if state.lives >= MAX_LIVES {
            return RegenStatus::Full;
        }
        let Some(started) = state.regen_started_at else {
            return RegenStatus::Waiting(self.interval);
        };
        let elapsed = (now - started).to_std().unwrap_or_default();
        RegenStatus::Waiting(self.interval.saturating_sub(elapsed))
    }

    /// Credit every interval that elapsed while nobody was watching
    ///
    /// Called on session start. Restores one life per full interval since
    /// the timer started, capped at the maximum, and moves the timer start
    /// forward by the intervals consumed.
    pub fn catch_up(&self, machine: &mut StoryMachine, now: DateTime<Utc>) -> Vec<StoryEvent> {
        let state = machine.state();
        if state.lives >= MAX_LIVES {
            return Vec::new();
        }
        let Some(started) = state.regen_started_at else {
            return Vec::new();
        };

        let elapsed = (now - started).to_std().unwrap_or_default();
        let due = (elapsed.as_secs() / self.interval.as_secs()) as u32;
        let missing = MAX_LIVES - state.lives;
        let granted = due.min(missing);
        if granted == 0 {
            return Vec::new();
        }

        let mut events = Vec::new();
        for _ in 0..granted {
            events.extend(machine.gain_life());
        }
        if machine.state().lives < MAX_LIVES {
            let consumed = self.interval * granted;
            let next_start = chrono::Duration::from_std(consumed)
                .map(|d| started + d)
                .unwrap_or(now);
            machine.set_regen_started_at(Some(next_start));
        }

        tracing::info!(granted, lives = machine.state().lives, "regenerated lives");
        events
    }
}

/// Wait for the next life, then hand control to `on_life`
///
/// Returns immediately if lives are already full. The caller owns the
/// machine; this only sleeps and signals.
pub async fn wait_for_next_life<F>(regen: LifeRegen, machine: &StoryMachine, on_life: F)
where
    F: FnOnce(),
{
    match regen.status(machine, Utc::now()) {
        RegenStatus::Full => {}
        RegenStatus::Waiting(left) => {
            tracing::debug!(seconds = left.as_secs(), "waiting for next life");
            tokio::time::sleep(left).await;
            on_life();
        }
    }
}

/// Format a duration as `MM:SS`
pub fn format_countdown(left: Duration) -> String {
    let secs = left.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
