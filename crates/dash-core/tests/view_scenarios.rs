//! End-to-end view-builder scenarios: JSON in, ViewTree out.
//!
//! These drive the same path the app uses — serde parse, days filter, build —
//! with a pinned clock and a pinned "today".

use chrono::{DateTime, NaiveDate, Utc};

use dash_core::snapshot::Snapshot;
use dash_core::view::{self, DashboardBody, SummaryText, ViewClass, ViewTree};

const NOW: &str = "2026-08-06T15:00:00Z";
const TODAY: &str = "2026-08-06";

fn now() -> DateTime<Utc> {
    NOW.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap()
}

fn build(json: &str, days_filter: Option<usize>) -> ViewTree {
    let snap: Snapshot = serde_json::from_str(json).expect("fixture must parse");
    view::build(Some(&snap), days_filter, now(), today())
}

fn day_fixture(date: &str) -> String {
    format!(
        r#"{{
            "date": "{date}",
            "channels": [{{
                "channelName": "AI Explained",
                "videos": [{{
                    "id": "vid{date}",
                    "title": "Daily roundup",
                    "thumbnailUrl": "https://i.ytimg.com/x.jpg",
                    "transcriptAvailable": true,
                    "summary": "What happened."
                }}]
            }}]
        }}"#
    )
}

fn snapshot_with_days(dates: &[&str]) -> String {
    let days: Vec<String> = dates.iter().map(|d| day_fixture(d)).collect();
    format!(
        r#"{{ "lastUpdated": "2026-08-06T12:00:00Z", "days": [{}] }}"#,
        days.join(",")
    )
}

// ── Scenario A: empty feed ────────────────────────────────────────────────────

#[test]
fn empty_days_show_the_configured_hint() {
    let tree = build(r#"{ "config": { "daysToShow": 5 }, "days": [] }"#, None);
    match tree.body {
        DashboardBody::Empty { days_hint } => {
            assert_eq!(days_hint, 5);
            assert_eq!(
                view::msg_empty(days_hint),
                "No videos found in the last 5 days."
            );
        }
        other => panic!("expected Empty, got {:?}", other),
    }
}

#[test]
fn empty_days_default_hint_is_seven() {
    let tree = build(r#"{ "days": [] }"#, None);
    assert!(matches!(tree.body, DashboardBody::Empty { days_hint: 7 }));
}

#[test]
fn empty_takes_precedence_over_filtering() {
    // A days filter must not turn "no data" into a zero-section day list.
    let tree = build(r#"{ "days": [] }"#, Some(3));
    assert!(matches!(tree.body, DashboardBody::Empty { .. }));
}

// ── Scenario B: today's section, no-transcript card ───────────────────────────

#[test]
fn todays_section_expands_and_no_transcript_card_shows_notice() {
    let json = format!(
        r#"{{
            "days": [{{
                "date": "{TODAY}",
                "channels": [{{
                    "channelName": "Two Minute Papers",
                    "channelUrl": "https://youtube.com/@TwoMinutePapers",
                    "videos": [{{
                        "id": "abc123",
                        "title": "Silent release",
                        "thumbnailUrl": "https://i.ytimg.com/abc123.jpg",
                        "transcriptAvailable": false,
                        "summary": "stale text that must never render"
                    }}]
                }}]
            }}]
        }}"#
    );
    let tree = build(&json, None);

    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    assert_eq!(sections.len(), 1);
    assert!(sections[0].expanded);
    assert_eq!(sections[0].heading, "Thursday, Aug 6");

    let card = &sections[0].channels[0].videos[0];
    assert_eq!(card.summary, SummaryText::NoTranscript);
    assert_eq!(card.summary.text(), view::MSG_NO_TRANSCRIPT);
    assert!(card.summary.classes().contains(&ViewClass::FallbackText));
}

// ── Scenario C: days filter ───────────────────────────────────────────────────

#[test]
fn filter_of_three_renders_first_three_of_ten() {
    // Most-recent-first, ten days.
    let dates: Vec<String> = (0..10).map(|i| format!("2026-07-{:02}", 30 - i)).collect();
    let dates: Vec<&str> = dates.iter().map(String::as_str).collect();
    let tree = build(&snapshot_with_days(&dates), Some(3));

    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    assert_eq!(sections.len(), 3);
    // Snapshot order, not date order, decides the prefix.
    assert_eq!(sections[0].date, dates[0]);
    assert_eq!(sections[1].date, dates[1]);
    assert_eq!(sections[2].date, dates[2]);
}

#[test]
fn section_count_property() {
    // rendered sections == min(len(days), filter or len(days))
    let dates = ["2026-08-06", "2026-08-05", "2026-08-04", "2026-08-03"];
    let json = snapshot_with_days(&dates);
    for (filter, expected) in [
        (None, 4),
        (Some(1), 1),
        (Some(3), 3),
        (Some(4), 4),
        (Some(50), 4),
    ] {
        let tree = build(&json, filter);
        let count = match tree.body {
            DashboardBody::Days(s) => s.len(),
            other => panic!("expected Days, got {:?}", other),
        };
        assert_eq!(count, expected, "filter {:?}", filter);
    }
}

// ── Expansion rule ────────────────────────────────────────────────────────────

#[test]
fn only_todays_section_is_expanded() {
    let dates = [TODAY, "2026-08-05", "2026-08-04"];
    let tree = build(&snapshot_with_days(&dates), None);
    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    let expanded: Vec<bool> = sections.iter().map(|s| s.expanded).collect();
    assert_eq!(expanded, vec![true, false, false]);
}

#[test]
fn no_today_means_everything_collapsed() {
    let dates = ["2026-08-05", "2026-08-04"];
    let tree = build(&snapshot_with_days(&dates), None);
    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    assert!(sections.iter().all(|s| !s.expanded));
}

#[test]
fn duplicate_today_expands_only_the_first() {
    // Should not occur per the uniqueness invariant; first match wins anyway.
    let dates = [TODAY, TODAY];
    let tree = build(&snapshot_with_days(&dates), None);
    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    assert!(sections[0].expanded);
    assert!(!sections[1].expanded);
}

// ── Summary policy through a full parse ───────────────────────────────────────

#[test]
fn three_way_summary_policy() {
    let json = format!(
        r#"{{
            "days": [{{
                "date": "{TODAY}",
                "dailyDigest": "Three videos, one broken pipeline.",
                "channels": [{{
                    "channelName": "Yannic Kilcher",
                    "videos": [
                        {{ "id": "ok1", "transcriptAvailable": true,
                           "summary": "Solid paper walkthrough." }},
                        {{ "id": "bad1", "transcriptAvailable": true,
                           "summary": "Summary generation failed after 3 retries" }},
                        {{ "id": "mute1", "transcriptAvailable": false }}
                    ]
                }}]
            }}]
        }}"#
    );
    let tree = build(&json, None);
    let sections = match tree.body {
        DashboardBody::Days(s) => s,
        other => panic!("expected Days, got {:?}", other),
    };
    assert_eq!(
        sections[0].digest.as_deref(),
        Some("Three videos, one broken pipeline.")
    );

    let cards = &sections[0].channels[0].videos;
    assert_eq!(
        cards[0].summary,
        SummaryText::Normal("Solid paper walkthrough.".to_string())
    );
    assert_eq!(
        cards[1].summary,
        SummaryText::Failed("Summary generation failed after 3 retries".to_string())
    );
    assert!(cards[1].summary.classes().contains(&ViewClass::WarningText));
    assert_eq!(cards[2].summary, SummaryText::NoTranscript);
}

// ── Updated indicator ─────────────────────────────────────────────────────────

#[test]
fn updated_indicator_uses_load_time_delta() {
    let tree = build(&snapshot_with_days(&[TODAY]), None);
    assert_eq!(tree.updated.as_deref(), Some("Updated 3 hours ago"));
}

#[test]
fn missing_last_updated_renders_no_indicator() {
    let tree = build(&format!(r#"{{ "days": [{}] }}"#, day_fixture(TODAY)), None);
    assert!(tree.updated.is_none());
}
