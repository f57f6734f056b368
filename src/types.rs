//! Memory records and the emotion vocabulary

use crate::error::JournalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for memories
pub type MemoryId = String;

/// One captured thought
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Memory {
    /// Unique identifier
    pub id: MemoryId,
    /// The thought itself, trimmed and never blank
    pub text: String,
    /// How the user felt when capturing it
    pub emotion: Emotion,
    /// Free-form tags in input order (duplicates are kept)
    pub tags: Vec<String>,
    /// When the thought was captured
    pub timestamp: DateTime<Utc>,
}

impl Memory {
    /// Create a new memory stamped with the current instant
    pub fn new(text: impl Into<String>, emotion: Emotion) -> Self {
        Self::new_at(text, emotion, Utc::now())
    }

    /// Create a new memory stamped with an explicit instant
    pub fn new_at(text: impl Into<String>, emotion: Emotion, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            emotion,
            tags: Vec::new(),
            timestamp,
        }
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Exact, case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

/// Split a comma-separated tag string, trimming each piece and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// The fixed set of emotions a thought can carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Stressed,
    Curious,
    Frustrated,
    Calm,
}

impl Emotion {
    /// All emotions, in picker order
    pub const ALL: &[Emotion] = &[
        Emotion::Happy,
        Emotion::Stressed,
        Emotion::Curious,
        Emotion::Frustrated,
        Emotion::Calm,
    ];

    /// Lowercase name, as used on the command line and in JSON
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Stressed => "stressed",
            Emotion::Curious => "curious",
            Emotion::Frustrated => "frustrated",
            Emotion::Calm => "calm",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😄",
            Emotion::Stressed => "😟",
            Emotion::Curious => "🤔",
            Emotion::Frustrated => "😠",
            Emotion::Calm => "😌",
        }
    }

    /// Display label, e.g. "😄 Happy"
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "😄 Happy",
            Emotion::Stressed => "😟 Stressed",
            Emotion::Curious => "🤔 Curious",
            Emotion::Frustrated => "😠 Frustrated",
            Emotion::Calm => "😌 Calm",
        }
    }

    /// Chart colour as a hex RGB string
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Happy => "#FFD700",
            Emotion::Stressed => "#FF6347",
            Emotion::Curious => "#1E90FF",
            Emotion::Frustrated => "#8B0000",
            Emotion::Calm => "#32CD32",
        }
    }

    /// Chart colour as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Emotion::Happy => (0xFF, 0xD7, 0x00),
            Emotion::Stressed => (0xFF, 0x63, 0x47),
            Emotion::Curious => (0x1E, 0x90, 0xFF),
            Emotion::Frustrated => (0x8B, 0x00, 0x00),
            Emotion::Calm => (0x32, 0xCD, 0x32),
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Emotion {
    type Err = JournalError;

    /// Accepts the full label, the bare name (any case) or the emoji alone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| {
                trimmed == e.label()
                    || trimmed == e.emoji()
                    || trimmed.eq_ignore_ascii_case(e.name())
            })
            .ok_or_else(|| JournalError::UnknownEmotion(s.to_string()))
    }
}
