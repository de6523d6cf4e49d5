//! Best-effort progress sync
//!
//! Story and practice milestones are reported to the analytics endpoint.
//! Requests run on tokio's blocking pool and nobody waits for them on the
//! transition path; a failed upload is logged and forgotten.

use serde_json::json;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, TrackEvent};
use crate::practice::PracticeOutcome;
use crate::story::{ProgressState, StoryEvent};

const CONTENT_TYPE: &str = "taiken";

/// Analytics events worth uploading for a batch of story events
pub fn story_track_events(events: &[StoryEvent], state: &ProgressState) -> Vec<TrackEvent> {
    let mut out = Vec::new();
    for event in events {
        let (event_type, extra) = match event {
            StoryEvent::AnsweredCorrect { points, .. } => (
                "taiken_answer",
                json!({ "correct": true, "points": points }),
            ),
            StoryEvent::AnsweredIncorrect { lives_left, .. } => (
                "taiken_answer",
                json!({ "correct": false, "lives_left": lives_left }),
            ),
            StoryEvent::EpisodeCompleted(n) => ("episode_complete", json!({ "completed_episode": n })),
            StoryEvent::StoryCompleted => ("story_complete", json!({})),
            StoryEvent::OutOfLives => ("out_of_lives", json!({})),
            _ => continue,
        };

        let mut metadata = json!({
            "event_id": uuid::Uuid::new_v4().to_string(),
            "episode": state.current_episode,
            "question": state.current_question,
            "score": state.score,
            "lives": state.lives,
        });
        merge(&mut metadata, extra);

        out.push(TrackEvent {
            event_type: event_type.to_string(),
            content_type: CONTENT_TYPE.to_string(),
            metadata,
        });
    }
    out
}

pub fn practice_track_event(outcome: &PracticeOutcome) -> TrackEvent {
    let metadata = match outcome {
        PracticeOutcome::Completed { set_id, score, lives } => json!({
            "set_id": set_id,
            "score": score,
            "lives": lives,
            "completed": true,
        }),
        PracticeOutcome::OutOfLives { set_id, score } => json!({
            "set_id": set_id,
            "score": score,
            "lives": 0,
            "completed": false,
        }),
    };
    TrackEvent {
        event_type: "practice_complete".to_string(),
        content_type: CONTENT_TYPE.to_string(),
        metadata,
    }
}

fn merge(base: &mut serde_json::Value, extra: serde_json::Value) {
    if let (Some(base), serde_json::Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
}

/// Fire-and-forget uploader
#[derive(Clone)]
pub struct ProgressSync {
    client: Option<ApiClient>,
}

impl ProgressSync {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A sync that never sends anything
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn story(&self, events: &[StoryEvent], state: &ProgressState) -> Option<JoinHandle<()>> {
        self.send(story_track_events(events, state))
    }

    pub fn practice(&self, outcome: &PracticeOutcome) -> Option<JoinHandle<()>> {
        self.send(vec![practice_track_event(outcome)])
    }

    /// Queue uploads on the blocking pool
    ///
    /// Returns `None` when there is nothing to send, sync is disabled, or no
    /// runtime is available.
    pub fn send(&self, batch: Vec<TrackEvent>) -> Option<JoinHandle<()>> {
        let client = self.client.clone()?;
        if batch.is_empty() {
            return None;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime, skipping progress sync");
            return None;
        };

        Some(handle.spawn_blocking(move || {
            for event in &batch {
                match client.track(event) {
                    Ok(()) => tracing::debug!("Synced {} event", event.event_type),
                    Err(e) => tracing::warn!("Failed to sync {} event: {}", event.event_type, e),
                }
            }
        }))
    }
}
