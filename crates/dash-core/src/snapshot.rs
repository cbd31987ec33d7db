//! Snapshot data model — the parsed form of the upstream JSON feed.
//!
//! The snapshot is immutable once loaded and replaced wholesale on reload.
//! Field names on the wire are camelCase; missing leaf fields degrade to
//! empty values, but a day without `channels` or a channel without `videos`
//! is a malformed snapshot and fails the structural parse.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Leading text an upstream summarizer writes when it could not produce a
/// summary. Detected once here and exposed as a tagged status, never
/// re-sniffed by display code.
pub const FAILURE_SENTINEL: &str = "Summary generation failed";

/// Day-count hint shown in the empty-feed message when the snapshot carries
/// no `config.daysToShow`.
pub const DEFAULT_DAYS_TO_SHOW: u32 = 7;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: FeedConfig,
    /// Chronological, most-recent-first. The filter and view layers trust
    /// this ordering.
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    #[serde(default = "default_days_to_show")]
    pub days_to_show: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            days_to_show: default_days_to_show(),
        }
    }
}

fn default_days_to_show() -> u32 {
    DEFAULT_DAYS_TO_SHOW
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// ISO calendar date (`YYYY-MM-DD`, no time component). Unique within a
    /// snapshot.
    pub date: String,
    #[serde(default)]
    pub daily_digest: Option<String>,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub channel_name: String,
    #[serde(default)]
    pub channel_url: Option<String>,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Opaque external identifier. Only ids matching `[A-Za-z0-9_-]+` are
    /// ever handed to the player; see [`is_embeddable_id`].
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub transcript_available: bool,
    #[serde(default)]
    pub summary: Option<String>,
}

/// What the summary field actually means for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStatus {
    /// Normal summary text (possibly empty).
    Ok,
    /// No transcript existed, so the summary field is not trusted at all.
    Unavailable,
    /// A transcript existed but summarization failed upstream.
    GenerationFailed,
}

impl Video {
    /// Classify the summary once, at the model layer. Display code consumes
    /// the tag and never inspects the raw text.
    pub fn summary_status(&self) -> SummaryStatus {
        if !self.transcript_available {
            return SummaryStatus::Unavailable;
        }
        match &self.summary {
            Some(s) if s.starts_with(FAILURE_SENTINEL) => SummaryStatus::GenerationFailed,
            _ => SummaryStatus::Ok,
        }
    }

    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

/// True when `id` is non-empty and contains only `[A-Za-z0-9_-]` — the only
/// ids safe to interpolate into a player URL.
pub fn is_embeddable_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(transcript: bool, summary: Option<&str>) -> Video {
        Video {
            id: "abc123".to_string(),
            title: "t".to_string(),
            thumbnail_url: String::new(),
            duration: None,
            transcript_available: transcript,
            summary: summary.map(str::to_string),
        }
    }

    #[test]
    fn summary_status_unavailable_wins_over_content() {
        // A populated summary is never trusted without a transcript.
        let v = video(false, Some("looks like a perfectly fine summary"));
        assert_eq!(v.summary_status(), SummaryStatus::Unavailable);
    }

    #[test]
    fn summary_status_detects_sentinel_prefix() {
        let v = video(true, Some("Summary generation failed: model timeout"));
        assert_eq!(v.summary_status(), SummaryStatus::GenerationFailed);

        // Sentinel text not at the start is ordinary content.
        let v = video(true, Some("The video covers: Summary generation failed"));
        assert_eq!(v.summary_status(), SummaryStatus::Ok);
    }

    #[test]
    fn summary_status_ok_for_missing_summary() {
        let v = video(true, None);
        assert_eq!(v.summary_status(), SummaryStatus::Ok);
        assert_eq!(v.summary_text(), "");
    }

    #[test]
    fn embeddable_id_charset() {
        assert!(is_embeddable_id("dQw4w9WgXcQ"));
        assert!(is_embeddable_id("a_b-C9"));
        assert!(!is_embeddable_id(""));
        assert!(!is_embeddable_id("abc 123"));
        assert!(!is_embeddable_id("abc/123"));
        assert!(!is_embeddable_id("abc?autoplay=1"));
    }

    #[test]
    fn parses_camel_case_snapshot() {
        let json = r#"{
            "lastUpdated": "2026-08-05T12:00:00Z",
            "config": { "daysToShow": 5 },
            "days": [{
                "date": "2026-08-05",
                "dailyDigest": "quiet day",
                "channels": [{
                    "channelName": "Two Minute Papers",
                    "channelUrl": "https://youtube.com/@TwoMinutePapers",
                    "videos": [{
                        "id": "x1",
                        "title": "New model",
                        "thumbnailUrl": "https://i.ytimg.com/x1.jpg",
                        "duration": "12:01",
                        "transcriptAvailable": true,
                        "summary": "A short recap."
                    }]
                }]
            }]
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.config.days_to_show, 5);
        assert_eq!(snap.days.len(), 1);
        assert_eq!(snap.days[0].channels[0].videos[0].duration.as_deref(), Some("12:01"));
        assert!(snap.last_updated.is_some());
    }

    #[test]
    fn day_without_channels_is_malformed() {
        let json = r#"{ "days": [{ "date": "2026-08-05" }] }"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{ "days": [] }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.config.days_to_show, DEFAULT_DAYS_TO_SHOW);
        assert!(snap.last_updated.is_none());
    }
}
