//! Weekly reflection
//!
//! Aggregates the memories captured in a trailing time window (seven days by
//! default) into:
//! - per-emotion counts, in the order emotions were first seen
//! - a short list of highlights (the oldest few records of the window)
//! - a per-day, per-emotion matrix for the mood line graph
//! - per-emotion totals sorted by count, for the weekly bar chart
//!
//! All functions here are pure: they read a snapshot of memories and an
//! explicit `now`, and never touch the store.

use crate::error::{JournalError, Result};
use crate::types::{Emotion, Memory};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Reflection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionConfig {
    /// Length of the trailing window
    pub window: Duration,
    /// Maximum number of highlights to sample
    pub highlight_limit: usize,
    /// Offset used to turn timestamps into calendar dates
    pub utc_offset: FixedOffset,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            window: Duration::days(7),
            highlight_limit: 3,
            utc_offset: Utc.fix(),
        }
    }
}

impl ReflectionConfig {
    pub fn builder() -> ReflectionConfigBuilder {
        ReflectionConfigBuilder::new()
    }
}

/// Builder for reflection config
#[derive(Debug, Clone)]
pub struct ReflectionConfigBuilder {
    window_days: i64,
    highlight_limit: usize,
    utc_offset_hours: i32,
}

impl ReflectionConfigBuilder {
    pub fn new() -> Self {
        Self {
            window_days: 7,
            highlight_limit: 3,
            utc_offset_hours: 0,
        }
    }

    pub fn window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    pub fn highlight_limit(mut self, limit: usize) -> Self {
        self.highlight_limit = limit;
        self
    }

    pub fn utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    pub fn build(self) -> Result<ReflectionConfig> {
        if self.window_days <= 0 {
            return Err(JournalError::Configuration(format!(
                "window must be at least one day, got {}",
                self.window_days
            )));
        }
        let window = Duration::try_days(self.window_days).ok_or_else(|| {
            JournalError::Configuration(format!("window of {} days is too large", self.window_days))
        })?;

        if self.highlight_limit == 0 {
            return Err(JournalError::Configuration(
                "highlight limit must be at least 1".to_string(),
            ));
        }

        let utc_offset = self
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                JournalError::Configuration(format!(
                    "UTC offset of {} hours is out of range",
                    self.utc_offset_hours
                ))
            })?;

        Ok(ReflectionConfig {
            window,
            highlight_limit: self.highlight_limit,
            utc_offset,
        })
    }
}

impl Default for ReflectionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a reflection over the trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reflection {
    /// Nothing was captured inside the window
    NoData,
    /// At least one memory falls inside the window
    Summary(WeeklySummary),
}

impl Reflection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Reflection::NoData)
    }

    pub fn summary(&self) -> Option<&WeeklySummary> {
        match self {
            Reflection::NoData => None,
            Reflection::Summary(summary) => Some(summary),
        }
    }
}

/// Number of memories carrying one emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: usize,
}

/// Aggregated view of the trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Inclusive lower bound of the window
    pub window_start: DateTime<Utc>,
    /// Memories inside the window
    pub total_count: usize,
    /// Emotions present in the window, in first-encounter order; never zero
    pub emotion_counts: Vec<EmotionCount>,
    /// Oldest memories of the window in store order
    pub highlights: Vec<Memory>,
    pub daily_emotion_matrix: DailyEmotionMatrix,
    /// Same counts as `emotion_counts`, sorted by count descending
    pub weekly_emotion_totals: Vec<EmotionCount>,
}

impl WeeklySummary {
    /// Count for one emotion (0 if it never appeared)
    pub fn count_for(&self, emotion: Emotion) -> usize {
        self.emotion_counts
            .iter()
            .find(|c| c.emotion == emotion)
            .map_or(0, |c| c.count)
    }

    /// Highlights newest first, as they are shown to the user
    pub fn highlights_for_display(&self) -> Vec<&Memory> {
        self.highlights.iter().rev().collect()
    }
}

/// Per-day, per-emotion counts.
///
/// Rows cover only dates with at least one memory; columns cover only the
/// emotions seen anywhere in the window. Cells with no memories are 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEmotionMatrix {
    /// Column order, following `Emotion::ALL`
    pub emotions: Vec<Emotion>,
    /// One row per date, ascending
    pub rows: Vec<DailyEmotionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEmotionRow {
    pub date: NaiveDate,
    /// Aligned with `DailyEmotionMatrix::emotions`
    pub counts: Vec<usize>,
}

impl DailyEmotionMatrix {
    fn build(window: &[&Memory], offset: FixedOffset) -> Self {
        let mut by_date: BTreeMap<NaiveDate, BTreeMap<Emotion, usize>> = BTreeMap::new();
        let mut observed: BTreeSet<Emotion> = BTreeSet::new();

        for memory in window {
            let date = memory.timestamp.with_timezone(&offset).date_naive();
            *by_date
                .entry(date)
                .or_default()
                .entry(memory.emotion)
                .or_insert(0) += 1;
            observed.insert(memory.emotion);
        }

        let emotions: Vec<Emotion> = observed.into_iter().collect();
        let rows = by_date
            .into_iter()
            .map(|(date, day)| DailyEmotionRow {
                date,
                counts: emotions
                    .iter()
                    .map(|e| day.get(e).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self { emotions, rows }
    }

    /// Count for a (date, emotion) cell, 0 when absent
    pub fn get(&self, date: NaiveDate, emotion: Emotion) -> usize {
        let Some(column) = self.emotions.iter().position(|e| *e == emotion) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|row| row.date == date)
            .and_then(|row| row.counts.get(column).copied())
            .unwrap_or(0)
    }

    /// All dates with at least one memory
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// One emotion's line across every date
    pub fn series(&self, emotion: Emotion) -> Vec<(NaiveDate, usize)> {
        self.rows
            .iter()
            .map(|row| (row.date, self.get(row.date, emotion)))
            .collect()
    }

    /// Largest single cell, used to scale charts
    pub fn max_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Select the memories with `timestamp >= window_start`, keeping store order.
pub fn in_window<'a, I>(memories: I, window_start: DateTime<Utc>) -> Vec<&'a Memory>
where
    I: IntoIterator<Item = &'a Memory>,
{
    memories
        .into_iter()
        .filter(|m| m.timestamp >= window_start)
        .collect()
}

/// Count emotions in first-encounter order. Absent emotions get no entry.
pub fn count_emotions(memories: &[&Memory]) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    for memory in memories {
        match counts.iter_mut().find(|c| c.emotion == memory.emotion) {
            Some(entry) => entry.count += 1,
            None => counts.push(EmotionCount {
                emotion: memory.emotion,
                count: 1,
            }),
        }
    }
    counts
}

/// Reflect over the trailing window ending at `now`.
pub fn reflect<'a, I>(memories: I, now: DateTime<Utc>, config: &ReflectionConfig) -> Reflection
where
    I: IntoIterator<Item = &'a Memory>,
{
    let window_start = now
        .checked_sub_signed(config.window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let window = in_window(memories, window_start);

    if window.is_empty() {
        tracing::debug!(%window_start, "No memories in reflection window");
        return Reflection::NoData;
    }

    let emotion_counts = count_emotions(&window);

    // sort_by is stable, so ties keep first-encounter order
    let mut weekly_emotion_totals = emotion_counts.clone();
    weekly_emotion_totals.sort_by(|a, b| b.count.cmp(&a.count));

    let highlights = window
        .iter()
        .take(config.highlight_limit)
        .map(|m| (*m).clone())
        .collect();

    let daily_emotion_matrix = DailyEmotionMatrix::build(&window, config.utc_offset);

    tracing::debug!(
        total = window.len(),
        emotions = emotion_counts.len(),
        days = daily_emotion_matrix.rows.len(),
        "Built weekly reflection"
    );

    Reflection::Summary(WeeklySummary {
        window_start,
        total_count: window.len(),
        emotion_counts,
        highlights,
        daily_emotion_matrix,
        weekly_emotion_totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn at(text: &str, emotion: Emotion, ago: Duration) -> Memory {
        Memory::new_at(text, emotion, now() - ago)
    }

    fn summary(reflection: &Reflection) -> &WeeklySummary {
        reflection.summary().expect("expected a summary")
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let memories: Vec<Memory> = Vec::new();
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        assert_eq!(reflection, Reflection::NoData);
        assert!(reflection.is_empty());
    }

    #[test]
    fn test_only_old_memories_is_no_data() {
        let memories = vec![at("long ago", Emotion::Calm, Duration::days(30))];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        assert!(reflection.is_empty());
    }

    #[test]
    fn test_counts_within_last_hour() {
        let memories = vec![
            at("a", Emotion::Happy, Duration::minutes(50)),
            at("b", Emotion::Stressed, Duration::minutes(30)),
            at("c", Emotion::Happy, Duration::minutes(10)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);

        assert_eq!(s.total_count, 3);
        assert_eq!(
            s.emotion_counts,
            vec![
                EmotionCount { emotion: Emotion::Happy, count: 2 },
                EmotionCount { emotion: Emotion::Stressed, count: 1 },
            ]
        );
        assert_eq!(s.count_for(Emotion::Happy), 2);
        assert_eq!(s.count_for(Emotion::Calm), 0);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let memories = vec![
            at("eight days", Emotion::Calm, Duration::days(8)),
            at("just outside", Emotion::Calm, Duration::days(7) + Duration::seconds(1)),
            at("exactly seven", Emotion::Curious, Duration::days(7)),
            at("six days 23h", Emotion::Happy, Duration::days(6) + Duration::hours(23)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);

        let texts: Vec<&str> = s.highlights.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(s.total_count, 2);
        assert_eq!(texts, vec!["exactly seven", "six days 23h"]);
        assert_eq!(s.window_start, now() - Duration::days(7));
    }

    #[test]
    fn test_future_memories_are_included() {
        let memories = vec![Memory::new_at("later", Emotion::Calm, now() + Duration::hours(2))];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        assert_eq!(summary(&reflection).total_count, 1);
    }

    #[test]
    fn test_emotion_counts_never_zero() {
        let memories = vec![
            at("old", Emotion::Frustrated, Duration::days(10)),
            at("new", Emotion::Calm, Duration::hours(1)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);

        assert!(s.emotion_counts.iter().all(|c| c.count > 0));
        assert_eq!(s.emotion_counts.len(), 1);
        assert!(!s.daily_emotion_matrix.emotions.contains(&Emotion::Frustrated));
    }

    #[test]
    fn test_highlights_are_oldest_three_of_window() {
        let memories = vec![
            at("too old", Emotion::Calm, Duration::days(9)),
            at("one", Emotion::Calm, Duration::days(5)),
            at("two", Emotion::Happy, Duration::days(4)),
            at("three", Emotion::Curious, Duration::days(3)),
            at("four", Emotion::Stressed, Duration::days(2)),
            at("five", Emotion::Happy, Duration::days(1)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);

        let stored: Vec<&str> = s.highlights.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(stored, vec!["one", "two", "three"]);

        let shown: Vec<&str> = s
            .highlights_for_display()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(shown, vec!["three", "two", "one"]);
    }

    #[test]
    fn test_highlights_cover_small_window() {
        let memories = vec![
            at("one", Emotion::Calm, Duration::hours(3)),
            at("two", Emotion::Calm, Duration::hours(2)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);
        assert_eq!(s.highlights, memories);
    }

    #[test]
    fn test_highlight_limit_is_configurable() {
        let memories: Vec<Memory> = (0..6)
            .map(|i| at(&format!("m{i}"), Emotion::Calm, Duration::hours(10 - i)))
            .collect();
        let config = ReflectionConfig::builder().highlight_limit(5).build().unwrap();
        let reflection = reflect(&memories, now(), &config);
        assert_eq!(summary(&reflection).highlights.len(), 5);
    }

    #[test]
    fn test_weekly_totals_sorted_by_count_with_stable_ties() {
        let memories = vec![
            at("a", Emotion::Calm, Duration::days(3)),
            at("b", Emotion::Curious, Duration::days(3)),
            at("c", Emotion::Stressed, Duration::days(2)),
            at("d", Emotion::Stressed, Duration::days(2)),
            at("e", Emotion::Curious, Duration::days(1)),
            at("f", Emotion::Happy, Duration::days(1)),
            at("g", Emotion::Stressed, Duration::hours(1)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let s = summary(&reflection);

        let order: Vec<(Emotion, usize)> = s
            .weekly_emotion_totals
            .iter()
            .map(|c| (c.emotion, c.count))
            .collect();
        assert_eq!(
            order,
            vec![
                (Emotion::Stressed, 3),
                (Emotion::Curious, 2),
                (Emotion::Calm, 1),
                (Emotion::Happy, 1),
            ]
        );

        // first-encounter order is kept for the plain counts
        let first_seen: Vec<Emotion> = s.emotion_counts.iter().map(|c| c.emotion).collect();
        assert_eq!(
            first_seen,
            vec![Emotion::Calm, Emotion::Curious, Emotion::Stressed, Emotion::Happy]
        );
    }

    #[test]
    fn test_daily_matrix_dense_over_observed_dates_and_emotions() {
        let memories = vec![
            at("mon", Emotion::Happy, Duration::days(4)),
            at("mon again", Emotion::Happy, Duration::days(4) + Duration::hours(1)),
            at("wed", Emotion::Stressed, Duration::days(2)),
            at("fri", Emotion::Happy, Duration::hours(1)),
        ];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let matrix = &summary(&reflection).daily_emotion_matrix;

        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        assert_eq!(matrix.emotions, vec![Emotion::Happy, Emotion::Stressed]);
        assert_eq!(matrix.dates(), vec![d(11), d(13), d(15)]);

        assert_eq!(matrix.get(d(11), Emotion::Happy), 2);
        assert_eq!(matrix.get(d(11), Emotion::Stressed), 0);
        assert_eq!(matrix.get(d(13), Emotion::Stressed), 1);
        assert_eq!(matrix.get(d(15), Emotion::Happy), 1);
        assert_eq!(matrix.get(d(12), Emotion::Happy), 0);
        assert_eq!(matrix.get(d(15), Emotion::Calm), 0);

        assert!(matrix.rows.iter().all(|row| row.counts.len() == 2));
        assert_eq!(matrix.series(Emotion::Stressed), vec![(d(11), 0), (d(13), 1), (d(15), 0)]);
        assert_eq!(matrix.max_count(), 2);
    }

    #[test]
    fn test_daily_matrix_uses_configured_offset() {
        // 23:30 UTC on the 14th is the 15th at UTC+2
        let late = Utc.with_ymd_and_hms(2024, 3, 14, 23, 30, 0).unwrap();
        let memories = vec![Memory::new_at("late", Emotion::Calm, late)];

        let utc = reflect(&memories, now(), &ReflectionConfig::default());
        assert_eq!(
            summary(&utc).daily_emotion_matrix.dates(),
            vec![NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()]
        );

        let config = ReflectionConfig::builder().utc_offset_hours(2).build().unwrap();
        let shifted = reflect(&memories, now(), &config);
        assert_eq!(
            summary(&shifted).daily_emotion_matrix.dates(),
            vec![NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()]
        );
    }

    #[test]
    fn test_custom_window() {
        let memories = vec![
            at("two days", Emotion::Calm, Duration::days(2)),
            at("today", Emotion::Calm, Duration::hours(2)),
        ];
        let config = ReflectionConfig::builder().window_days(1).build().unwrap();
        let reflection = reflect(&memories, now(), &config);
        assert_eq!(summary(&reflection).total_count, 1);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(matches!(
            ReflectionConfig::builder().window_days(0).build(),
            Err(JournalError::Configuration(_))
        ));
        assert!(ReflectionConfig::builder().window_days(-3).build().is_err());
        assert!(ReflectionConfig::builder().window_days(i64::MAX).build().is_err());
        assert!(ReflectionConfig::builder().highlight_limit(0).build().is_err());
        assert!(ReflectionConfig::builder().utc_offset_hours(24).build().is_err());
        assert!(ReflectionConfig::builder().utc_offset_hours(-23).build().is_ok());
    }

    #[test]
    fn test_builder_defaults_match_default_config() {
        let built = ReflectionConfigBuilder::default().build().unwrap();
        assert_eq!(built, ReflectionConfig::default());
        assert_eq!(built.window, Duration::days(7));
        assert_eq!(built.highlight_limit, 3);
    }

    #[test]
    fn test_reflection_serializes_with_status() {
        let no_data = serde_json::to_value(Reflection::NoData).unwrap();
        assert_eq!(no_data["status"], "no_data");

        let memories = vec![at("a", Emotion::Happy, Duration::hours(1))];
        let reflection = reflect(&memories, now(), &ReflectionConfig::default());
        let json = serde_json::to_value(&reflection).unwrap();
        assert_eq!(json["status"], "summary");
        assert_eq!(json["total_count"], 1);
        assert_eq!(json["emotion_counts"][0]["emotion"], "happy");
    }
}
