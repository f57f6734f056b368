//! # EchoMind - Personal thought journal with emotional recall

pub mod error;
pub mod recall;
pub mod reflection;
pub mod store;
pub mod types;

pub use error::{JournalError, Result};
pub use recall::{most_recent_first, RecallFilter};
pub use reflection::{
    DailyEmotionMatrix, DailyEmotionRow, EmotionCount, Reflection, ReflectionConfig,
    ReflectionConfigBuilder, WeeklySummary,
};
pub use store::MemoryStore;
pub use types::{parse_tags, Emotion, Memory, MemoryId};

use chrono::{DateTime, Utc};

/// One journaling session.
///
/// Owns the session's memory store and reflection settings. Create one at
/// session start, pass it by reference to each operation, drop it when the
/// session ends; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    store: MemoryStore,
    config: ReflectionConfig,
}

impl Journal {
    /// Start an empty session with default reflection settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty session with custom reflection settings
    pub fn with_config(config: ReflectionConfig) -> Self {
        Self {
            store: MemoryStore::new(),
            config,
        }
    }

    /// Capture a thought stamped with the current instant.
    ///
    /// Blank text is silently skipped and `None` is returned.
    pub fn capture(&mut self, text: &str, emotion: Emotion, tags_raw: &str) -> Option<&Memory> {
        self.capture_at(text, emotion, tags_raw, Utc::now())
    }

    /// Capture a thought stamped with an explicit instant
    pub fn capture_at(
        &mut self,
        text: &str,
        emotion: Emotion,
        tags_raw: &str,
        timestamp: DateTime<Utc>,
    ) -> Option<&Memory> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Skipping capture with blank text");
            return None;
        }

        let memory = Memory::new_at(text, emotion, timestamp).with_tags(parse_tags(tags_raw));
        tracing::debug!(
            id = %memory.id,
            emotion = emotion.name(),
            tags = memory.tags.len(),
            "Captured thought"
        );
        Some(self.store.append(memory))
    }

    /// Capture with an emotion given as text (label, name or emoji).
    ///
    /// Unknown emotions are rejected before the text is looked at.
    pub fn capture_labeled(
        &mut self,
        text: &str,
        emotion: &str,
        tags_raw: &str,
    ) -> Result<Option<&Memory>> {
        let emotion: Emotion = emotion.parse()?;
        Ok(self.capture(text, emotion, tags_raw))
    }

    /// Memories matching `filter`, in store order
    pub fn recall(&self, filter: &RecallFilter) -> Vec<&Memory> {
        recall::filter(&self.store, filter)
    }

    /// Weekly reflection over the window ending at `now`
    pub fn reflect(&self, now: DateTime<Utc>) -> Reflection {
        reflection::reflect(&self.store, now, &self.config)
    }

    /// All memories in capture order
    pub fn all(&self) -> &[Memory] {
        self.store.all()
    }

    /// Get the underlying store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }
}
