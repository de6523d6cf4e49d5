//! Read-only content catalog
//!
//! Story episodes and practice sets are fixed at build time and looked up
//! by episode number or practice-set id.

mod episodes;
mod practice_sets;

pub use episodes::EPISODES;
pub use practice_sets::PRACTICE_SETS;

use serde::Serialize;

use crate::error::CatalogError;

/// A single multiple-choice question
///
/// Options are identified by their index; there is no other stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub code: Option<&'static str>,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
}

impl Question {
    /// Whether `selected` is the correct option
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct
    }

    /// Whether `index` names one of this question's options
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// First sentence of the explanation, used as a hint
    ///
    /// A sentence ends at a full stop followed by whitespace or the end of
    /// the text, so `response.json()` does not cut the hint short.
    pub fn first_sentence(&self) -> &'static str {
        let text = self.explanation.trim();
        let bytes = text.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'.' && bytes.get(i + 1).is_none_or(|n| n.is_ascii_whitespace()) {
                return &text[..i];
            }
        }
        text
    }
}

/// A chapter of the narrative flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub number: u32,
    pub title: &'static str,
    pub questions: &'static [Question],
}

/// An independent, non-narrative bundle of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeSet {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub questions: &'static [Question],
}

/// Number of story episodes
pub fn episode_count() -> u32 {
    EPISODES.len() as u32
}

/// Look up an episode by its 1-based number
pub fn episode(number: u32) -> Result<&'static Episode, CatalogError> {
    EPISODES
        .iter()
        .find(|e| e.number == number)
        .ok_or_else(|| CatalogError::NotFound(format!("episode {number}")))
}

/// Ordered questions of an episode
pub fn episode_questions(number: u32) -> Result<&'static [Question], CatalogError> {
    episode(number).map(|e| e.questions)
}

/// Look up a practice set by id
pub fn practice_set(id: &str) -> Result<&'static PracticeSet, CatalogError> {
    PRACTICE_SETS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CatalogError::NotFound(format!("practice set '{id}'")))
}

/// All practice sets in insertion order
pub fn practice_sets() -> &'static [PracticeSet] {
    PRACTICE_SETS
}

/// Total number of questions across all episodes
pub fn total_story_questions() -> usize {
    EPISODES.iter().map(|e| e.questions.len()).sum()
}
