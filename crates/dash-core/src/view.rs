//! View builder — pure Snapshot → ViewTree transformation.
//!
//! No display surface here: the tree is plain data plus stable structural
//! classes, and the builder takes the clock and today's date as parameters
//! so tests can call it exactly like the real entry point does. The tree is
//! rebuilt wholesale on every render pass, never patched in place.

use chrono::{DateTime, NaiveDate, Utc};

use crate::filter::apply_days_filter;
use crate::snapshot::{Snapshot, SummaryStatus, Video};

/// Shown for any load failure — network, bad status, malformed body.
pub const MSG_UNAVAILABLE: &str = "Data unavailable \u{2014} check back later.";

/// Shown instead of a summary when no transcript existed.
pub const MSG_NO_TRANSCRIPT: &str = "Transcript not available for this video.";

pub fn msg_empty(days_hint: u32) -> String {
    format!("No videos found in the last {} days.", days_hint)
}

// ── Structural classes ────────────────────────────────────────────────────────

/// Stable structural hooks, one per kind of rendered node. The styling layer
/// keys off these; renaming any of them is a breaking change for themes and
/// tests alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewClass {
    DaySection,
    DayHeading,
    DailyDigest,
    ChannelGroup,
    ChannelName,
    VideoCard,
    ThumbnailWrap,
    DurationBadge,
    VideoContent,
    VideoTitle,
    VideoSummary,
    FallbackText,
    WarningText,
    BtnWatch,
    FallbackMessage,
    PlayerContainer,
}

impl ViewClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DaySection => "day-section",
            Self::DayHeading => "day-heading",
            Self::DailyDigest => "daily-digest",
            Self::ChannelGroup => "channel-group",
            Self::ChannelName => "channel-name",
            Self::VideoCard => "video-card",
            Self::ThumbnailWrap => "thumbnail-wrap",
            Self::DurationBadge => "duration-badge",
            Self::VideoContent => "video-content",
            Self::VideoTitle => "video-title",
            Self::VideoSummary => "video-summary",
            Self::FallbackText => "fallback-text",
            Self::WarningText => "warning-text",
            Self::BtnWatch => "btn-watch",
            Self::FallbackMessage => "fallback-message",
            Self::PlayerContainer => "player-container",
        }
    }
}

// ── Tree nodes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ViewTree {
    /// "Updated 3 hours ago" — computed once against load time, not live.
    pub updated: Option<String>,
    pub body: DashboardBody,
}

#[derive(Debug, Clone)]
pub enum DashboardBody {
    /// Transient page-load state before the fetch resolves.
    Loading,
    /// Load failure, all causes collapsed.
    Unavailable,
    /// Well-formed snapshot with zero days. Not an error.
    Empty { days_hint: u32 },
    Days(Vec<DaySection>),
}

#[derive(Debug, Clone)]
pub struct DaySection {
    /// ISO date, carried for identity checks.
    pub date: String,
    /// "Wednesday, Aug 6" form.
    pub heading: String,
    /// Whether the section starts expanded (only today's does).
    pub expanded: bool,
    pub digest: Option<String>,
    pub channels: Vec<ChannelGroup>,
}

#[derive(Debug, Clone)]
pub struct ChannelGroup {
    pub name: String,
    /// When present the heading is a link, opened in an external context.
    pub url: Option<String>,
    pub videos: Vec<VideoCard>,
}

#[derive(Debug, Clone)]
pub struct VideoCard {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub duration: Option<String>,
    pub summary: SummaryText,
}

/// The three-way display contract for a card's summary slot. Each variant
/// must stay visually distinguishable from the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryText {
    Normal(String),
    /// Fixed notice; the raw summary is never shown.
    NoTranscript,
    /// Upstream failure text, shown verbatim with warning styling.
    Failed(String),
}

impl SummaryText {
    pub fn text(&self) -> &str {
        match self {
            Self::Normal(s) => s,
            Self::NoTranscript => MSG_NO_TRANSCRIPT,
            Self::Failed(s) => s,
        }
    }

    /// Modifier classes, mirroring the classList the styling layer expects.
    pub fn classes(&self) -> &'static [ViewClass] {
        match self {
            Self::Normal(_) => &[ViewClass::VideoSummary],
            Self::NoTranscript => &[ViewClass::VideoSummary, ViewClass::FallbackText],
            Self::Failed(_) => &[
                ViewClass::VideoSummary,
                ViewClass::FallbackText,
                ViewClass::WarningText,
            ],
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

impl ViewTree {
    pub fn loading() -> Self {
        Self {
            updated: None,
            body: DashboardBody::Loading,
        }
    }
}

/// Build the whole tree from a load outcome. `None` means the load failed.
/// `now` is the load-time clock for the updated indicator; `today` is the
/// local calendar date the expansion rule compares against.
pub fn build(
    outcome: Option<&Snapshot>,
    days_filter: Option<usize>,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> ViewTree {
    let snapshot = match outcome {
        Some(s) => s,
        None => {
            return ViewTree {
                updated: None,
                body: DashboardBody::Unavailable,
            }
        }
    };

    let updated = snapshot
        .last_updated
        .map(|t| format!("Updated {}", relative_time(t, now)));

    // Empty takes precedence over filtering and per-day rendering.
    if snapshot.days.is_empty() {
        return ViewTree {
            updated,
            body: DashboardBody::Empty {
                days_hint: snapshot.config.days_to_show,
            },
        };
    }

    let days = apply_days_filter(&snapshot.days, days_filter);
    let today_iso = today.format("%Y-%m-%d").to_string();

    let mut expanded_seen = false;
    let sections = days
        .iter()
        .map(|day| {
            // First date match wins; every later section stays collapsed.
            let expanded = !expanded_seen && day.date == today_iso;
            expanded_seen |= expanded;

            DaySection {
                date: day.date.clone(),
                heading: date_heading(&day.date),
                expanded,
                digest: day
                    .daily_digest
                    .clone()
                    .filter(|digest| !digest.is_empty()),
                channels: day
                    .channels
                    .iter()
                    .map(|channel| ChannelGroup {
                        name: channel.channel_name.clone(),
                        url: channel.channel_url.clone().filter(|u| !u.is_empty()),
                        videos: channel.videos.iter().map(build_card).collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    ViewTree {
        updated,
        body: DashboardBody::Days(sections),
    }
}

fn build_card(video: &Video) -> VideoCard {
    let summary = match video.summary_status() {
        SummaryStatus::Unavailable => SummaryText::NoTranscript,
        SummaryStatus::GenerationFailed => SummaryText::Failed(video.summary_text().to_string()),
        SummaryStatus::Ok => SummaryText::Normal(video.summary_text().to_string()),
    };

    VideoCard {
        video_id: video.id.clone(),
        title: video.title.clone(),
        thumbnail_url: video.thumbnail_url.clone(),
        duration: video.duration.clone().filter(|d| !d.is_empty()),
        summary,
    }
}

// ── Formatting rules ──────────────────────────────────────────────────────────

/// "just now" / "N min ago" / "N hour(s) ago" / "N day(s) ago", against the
/// load-time clock.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let mins = delta.num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{} min ago", mins);
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    let days = delta.num_days();
    format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
}

/// Heading for a date-only string: "Wednesday, Aug 6". Parsing the bare date
/// (no time component, no timezone) is what keeps the displayed day from
/// shifting near midnight; a string that does not parse is shown as-is.
pub fn date_heading(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%A, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    #[test]
    fn relative_time_buckets() {
        let now = at("2026-08-06 12:00:00");
        assert_eq!(relative_time(at("2026-08-06 11:59:30"), now), "just now");
        assert_eq!(relative_time(at("2026-08-06 11:15:00"), now), "45 min ago");
        assert_eq!(relative_time(at("2026-08-06 11:00:00"), now), "1 hour ago");
        assert_eq!(relative_time(at("2026-08-06 04:00:00"), now), "8 hours ago");
        assert_eq!(relative_time(at("2026-08-05 11:00:00"), now), "1 day ago");
        assert_eq!(relative_time(at("2026-08-01 12:00:00"), now), "5 days ago");
    }

    #[test]
    fn relative_time_future_timestamp_reads_just_now() {
        let now = at("2026-08-06 12:00:00");
        assert_eq!(relative_time(at("2026-08-06 12:05:00"), now), "just now");
    }

    #[test]
    fn date_heading_is_timezone_independent() {
        // A date-only string must render as that calendar day, full stop.
        assert_eq!(date_heading("2026-08-06"), "Thursday, Aug 6");
        assert_eq!(date_heading("2026-01-01"), "Thursday, Jan 1");
        assert_eq!(date_heading("2025-12-31"), "Wednesday, Dec 31");
    }

    #[test]
    fn date_heading_falls_back_to_raw_text() {
        assert_eq!(date_heading("not-a-date"), "not-a-date");
    }

    #[test]
    fn class_names_are_stable() {
        let expected = [
            (ViewClass::DaySection, "day-section"),
            (ViewClass::DayHeading, "day-heading"),
            (ViewClass::DailyDigest, "daily-digest"),
            (ViewClass::ChannelGroup, "channel-group"),
            (ViewClass::ChannelName, "channel-name"),
            (ViewClass::VideoCard, "video-card"),
            (ViewClass::ThumbnailWrap, "thumbnail-wrap"),
            (ViewClass::DurationBadge, "duration-badge"),
            (ViewClass::VideoContent, "video-content"),
            (ViewClass::VideoTitle, "video-title"),
            (ViewClass::VideoSummary, "video-summary"),
            (ViewClass::FallbackText, "fallback-text"),
            (ViewClass::WarningText, "warning-text"),
            (ViewClass::BtnWatch, "btn-watch"),
            (ViewClass::FallbackMessage, "fallback-message"),
            (ViewClass::PlayerContainer, "player-container"),
        ];
        for (class, name) in expected {
            assert_eq!(class.as_str(), name);
        }
    }

    #[test]
    fn summary_text_classes_are_distinguishable() {
        let normal = SummaryText::Normal("ok".into());
        let missing = SummaryText::NoTranscript;
        let failed = SummaryText::Failed("Summary generation failed: x".into());

        assert_eq!(normal.classes(), &[ViewClass::VideoSummary]);
        assert!(missing.classes().contains(&ViewClass::FallbackText));
        assert!(!missing.classes().contains(&ViewClass::WarningText));
        assert!(failed.classes().contains(&ViewClass::WarningText));
        assert_eq!(missing.text(), MSG_NO_TRANSCRIPT);
    }

    #[test]
    fn load_failure_builds_unavailable() {
        let tree = build(
            None,
            None,
            at("2026-08-06 12:00:00"),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        );
        assert!(matches!(tree.body, DashboardBody::Unavailable));
        assert!(tree.updated.is_none());
    }
}
