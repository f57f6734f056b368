//! Attribute-based recall
//!
//! Recall is literal: a record matches on exact emotion equality and on
//! exact, case-insensitive tag membership. There is no fuzzy or semantic
//! scoring.

use crate::types::{Emotion, Memory};
use serde::{Deserialize, Serialize};

/// Constraints applied when recalling memories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallFilter {
    /// Only memories with this emotion (None = any)
    pub emotion: Option<Emotion>,
    /// Only memories carrying this tag (None or empty = any)
    pub tag: Option<String>,
}

impl RecallFilter {
    /// A filter with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The tag constraint exactly as given; empty counts as unconstrained
    pub fn tag_constraint(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Check whether a single memory satisfies every constraint
    pub fn matches(&self, memory: &Memory) -> bool {
        if let Some(emotion) = self.emotion {
            if memory.emotion != emotion {
                return false;
            }
        }

        match self.tag_constraint() {
            Some(tag) => memory.has_tag(tag),
            None => true,
        }
    }
}

/// Select the memories matching `criteria`, keeping their relative order.
pub fn filter<'a, I>(memories: I, criteria: &RecallFilter) -> Vec<&'a Memory>
where
    I: IntoIterator<Item = &'a Memory>,
{
    memories.into_iter().filter(|m| criteria.matches(m)).collect()
}

/// Reverse a store-ordered selection for display, newest first.
pub fn most_recent_first<'a>(mut memories: Vec<&'a Memory>) -> Vec<&'a Memory> {
    memories.reverse();
    memories
}
