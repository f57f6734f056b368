use echomind::{DailyEmotionMatrix, Emotion, EmotionCount, Memory, WeeklySummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub text: String,
    pub emotion: String,
    /// Comma-separated, as typed by the user
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Deserialize)]
pub struct RecallRequest {
    pub emotion: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub id: String,
    pub text: String,
    pub emotion: Emotion,
    pub emotion_label: String,
    pub tags: Vec<String>,
    pub timestamp: String,
}

impl From<&Memory> for MemoryResponse {
    fn from(m: &Memory) -> Self {
        Self {
            id: m.id.clone(),
            text: m.text.clone(),
            emotion: m.emotion,
            emotion_label: m.emotion.label().to_string(),
            tags: m.tags.clone(),
            timestamp: m.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    pub captured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryResponse>,
}

#[derive(Debug, Serialize)]
pub struct EmotionResponse {
    pub name: String,
    pub label: String,
    pub color: String,
}

impl From<Emotion> for EmotionResponse {
    fn from(e: Emotion) -> Self {
        Self {
            name: e.name().to_string(),
            label: e.label().to_string(),
            color: e.color().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmotionCountResponse {
    pub emotion: Emotion,
    pub label: String,
    pub color: String,
    pub count: usize,
}

impl From<&EmotionCount> for EmotionCountResponse {
    fn from(c: &EmotionCount) -> Self {
        Self {
            emotion: c.emotion,
            label: c.emotion.label().to_string(),
            color: c.emotion.color().to_string(),
            count: c.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReflectionResponse {
    NoData {
        message: String,
    },
    Summary {
        window_start: String,
        total_count: usize,
        emotion_counts: Vec<EmotionCountResponse>,
        /// Newest first
        highlights: Vec<MemoryResponse>,
        daily_emotion_matrix: DailyEmotionMatrix,
        weekly_emotion_totals: Vec<EmotionCountResponse>,
    },
}

impl ReflectionResponse {
    pub fn no_data() -> Self {
        Self::NoData {
            message: "You have not captured any thoughts in the past week.".to_string(),
        }
    }
}

impl From<&WeeklySummary> for ReflectionResponse {
    fn from(s: &WeeklySummary) -> Self {
        Self::Summary {
            window_start: s.window_start.to_rfc3339(),
            total_count: s.total_count,
            emotion_counts: s.emotion_counts.iter().map(Into::into).collect(),
            highlights: s
                .highlights_for_display()
                .into_iter()
                .map(Into::into)
                .collect(),
            daily_emotion_matrix: s.daily_emotion_matrix.clone(),
            weekly_emotion_totals: s.weekly_emotion_totals.iter().map(Into::into).collect(),
        }
    }
}
