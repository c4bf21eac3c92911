//! Sample aggregation
//!
//! Pure functions turning an ordered slice of activity samples into dashboard
//! analytics. Every sample stands for a fixed 30-second quantum, so all
//! durations here are `count * 30 / 60` integer minutes, never wall-clock
//! deltas between samples.
//!
//! Determinism: grouping uses `BTreeMap` and ties are broken by name/label
//! ascending after count descending, so identical inputs always produce
//! identical output.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use worktracker_domain::constants::{
    ACTIVE_WINDOW_MINUTES, SECONDS_PER_SAMPLE, TOP_APPLICATIONS_LIMIT,
};
use worktracker_domain::utils::time::utc_to_local;
use worktracker_domain::{
    ActivitySample, AppUsage, Category, CategoryAppMinutes, CategoryBreakdown, CategoryNode,
    CategorySlice, HourlyBucket,
};

use crate::classify::{categorize, normalize_app_name};

/// Total active minutes represented by a sample set: `count * 30 / 60`.
#[must_use]
pub fn total_active_minutes(samples: &[ActivitySample]) -> i64 {
    samples.len() as i64 * SECONDS_PER_SAMPLE / 60
}

/// Top applications by sample count, normalized, capped at ten.
///
/// Percentages are computed against the full sample count (including samples
/// without an application name), matching the dashboard contract.
#[must_use]
pub fn top_applications(samples: &[ActivitySample]) -> Vec<AppUsage> {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for sample in samples {
        if let Some(app) = sample.application_name.as_deref() {
            *counts.entry(normalize_app_name(Some(app))).or_default() += 1;
        }
    }

    let mut entries: Vec<(String, i64)> = counts.into_iter().collect();
    // BTreeMap already yields names ascending; the stable sort keeps that
    // order for equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(TOP_APPLICATIONS_LIMIT);

    entries
        .into_iter()
        .map(|(name, count)| {
            let total_seconds = count * SECONDS_PER_SAMPLE;
            AppUsage {
                name,
                minutes: total_seconds / 60,
                seconds: total_seconds % 60,
                percentage: percentage(count, samples.len()),
            }
        })
        .collect()
}

/// Most frequent normalized application, if any sample carries one.
#[must_use]
pub fn top_app(samples: &[ActivitySample]) -> Option<String> {
    top_applications(samples).into_iter().next().map(|usage| usage.name)
}

/// 24 fixed hourly buckets in the caller's local time.
///
/// Each sample's UTC timestamp is shifted by the (clamped) offset before the
/// hour is extracted.
#[must_use]
pub fn hourly_activity(samples: &[ActivitySample], tz_offset_minutes: i32) -> Vec<HourlyBucket> {
    let mut counts = [0i64; 24];
    for sample in samples {
        let hour = utc_to_local(sample.timestamp, tz_offset_minutes).hour() as usize;
        counts[hour % 24] += 1;
    }

    (0..24u32)
        .map(|hour| {
            let count = counts[hour as usize];
            HourlyBucket {
                hour,
                label: format!("{hour:02}:00"),
                minutes: count * SECONDS_PER_SAMPLE / 60,
                active: count > 0,
            }
        })
        .collect()
}

/// Category breakdown: flat slices plus the category -> application tree.
#[must_use]
pub fn category_breakdown(samples: &[ActivitySample]) -> CategoryBreakdown {
    let mut tree: BTreeMap<Category, BTreeMap<String, i64>> = BTreeMap::new();
    for sample in samples {
        let app_lower =
            sample.application_name.as_deref().map(str::to_lowercase).unwrap_or_default();
        let title_lower =
            sample.window_title.as_deref().map(str::to_lowercase).unwrap_or_default();
        let category = categorize(&app_lower, &title_lower);
        let app = normalize_app_name(sample.application_name.as_deref());
        *tree.entry(category).or_default().entry(app).or_default() += 1;
    }

    let mut slices: Vec<CategorySlice> = tree
        .iter()
        .map(|(category, apps)| {
            let count: i64 = apps.values().sum();
            CategorySlice {
                name: category.label().to_string(),
                minutes: count * SECONDS_PER_SAMPLE / 60,
                percentage: percentage(count, samples.len()),
                color: category.color().to_string(),
            }
        })
        .collect();
    slices.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));

    let mut nodes: Vec<CategoryNode> = tree
        .into_iter()
        .map(|(category, apps)| {
            let total: i64 = apps.values().sum();
            let mut applications: Vec<CategoryAppMinutes> = apps
                .into_iter()
                .map(|(name, count)| CategoryAppMinutes {
                    name,
                    minutes: count * SECONDS_PER_SAMPLE / 60,
                })
                .collect();
            applications.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));
            CategoryNode {
                category: category.label().to_string(),
                color: category.color().to_string(),
                total_minutes: total * SECONDS_PER_SAMPLE / 60,
                applications,
            }
        })
        .collect();
    nodes.sort_by(|a, b| {
        b.total_minutes.cmp(&a.total_minutes).then_with(|| a.category.cmp(&b.category))
    });

    CategoryBreakdown { categories: slices, tree: nodes }
}

/// True when the most recent sample is within the two-minute active window of
/// the evaluation instant.
#[must_use]
pub fn is_active_at(samples: &[ActivitySample], now: DateTime<Utc>) -> bool {
    samples
        .last()
        .is_some_and(|sample| now - sample.timestamp < Duration::minutes(ACTIVE_WINDOW_MINUTES))
}

/// Normalized application of the most recent sample, when the member counts
/// as active at `now`.
#[must_use]
pub fn current_application(samples: &[ActivitySample], now: DateTime<Utc>) -> Option<String> {
    if !is_active_at(samples, now) {
        return None;
    }
    samples.last().map(|sample| normalize_app_name(sample.application_name.as_deref()))
}

fn percentage(count: i64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample(username: &str, app: Option<&str>, title: Option<&str>, ts: DateTime<Utc>) -> ActivitySample {
        ActivitySample {
            id: None,
            username: username.to_string(),
            application_name: app.map(str::to_string),
            window_title: title.map(str::to_string),
            timestamp: ts,
        }
    }

    fn ts(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).single().unwrap()
    }

    #[test]
    fn total_minutes_is_floor_of_half_minutes() {
        let make = |n: usize| vec![sample("u", Some("Code.exe"), None, ts(9, 0, 0)); n];
        assert_eq!(total_active_minutes(&make(0)), 0);
        assert_eq!(total_active_minutes(&make(1)), 0);
        assert_eq!(total_active_minutes(&make(2)), 1);
        assert_eq!(total_active_minutes(&make(3)), 1);
        assert_eq!(total_active_minutes(&make(120)), 60);
    }

    #[test]
    fn one_hour_of_vs_code_samples() {
        // 120 samples of Code.exe spanning one hour.
        let samples: Vec<ActivitySample> = (0..120)
            .map(|i| sample("tanmay_kudkar", Some("Code.exe"), None, ts(3, 0, 0) + Duration::seconds(30 * i)))
            .collect();

        assert_eq!(total_active_minutes(&samples), 60);

        let top = top_applications(&samples);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0], AppUsage {
            name: "VS Code".to_string(),
            minutes: 60,
            seconds: 0,
            percentage: 100.0,
        });

        let breakdown = category_breakdown(&samples);
        assert_eq!(breakdown.tree.len(), 1);
        assert_eq!(breakdown.tree[0].category, "Programming");
        assert_eq!(breakdown.tree[0].total_minutes, 60);
        assert_eq!(breakdown.categories[0].percentage, 100.0);
    }

    #[test]
    fn top_applications_sorts_by_count_then_name() {
        let mut samples = vec![
            sample("u", Some("chrome.exe"), None, ts(9, 0, 0)),
            sample("u", Some("chrome.exe"), None, ts(9, 0, 30)),
            sample("u", Some("Code.exe"), None, ts(9, 1, 0)),
            sample("u", Some("Code.exe"), None, ts(9, 1, 30)),
            sample("u", Some("spotify.exe"), None, ts(9, 2, 0)),
        ];
        samples.push(sample("u", None, None, ts(9, 2, 30)));

        let top = top_applications(&samples);
        // Equal counts: "Chrome" before "VS Code" (name ascending).
        assert_eq!(top[0].name, "Chrome");
        assert_eq!(top[1].name, "VS Code");
        assert_eq!(top[2].name, "Spotify");
        // Percentage denominator includes the app-less sample.
        assert!((top[0].percentage - 2.0 * 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn top_applications_caps_at_ten() {
        let samples: Vec<ActivitySample> = (0..15)
            .map(|i| sample("u", Some(&format!("app{i:02}")), None, ts(9, 0, 0)))
            .collect();
        assert_eq!(top_applications(&samples).len(), 10);
    }

    #[test]
    fn hourly_buckets_use_local_time() {
        // Stored UTC 03:45, IST (+330) local 09:15 -> bucket 9, not 3.
        let samples = vec![sample("u", Some("Code.exe"), None, ts(3, 45, 0))];
        let hourly = hourly_activity(&samples, 330);
        assert_eq!(hourly.len(), 24);
        assert!(hourly[9].active);
        assert!(!hourly[3].active);
        assert_eq!(hourly[9].label, "09:00");
    }

    #[test]
    fn empty_samples_produce_zeroed_dashboard_parts() {
        let samples: Vec<ActivitySample> = Vec::new();
        assert_eq!(total_active_minutes(&samples), 0);
        assert!(top_applications(&samples).is_empty());
        let hourly = hourly_activity(&samples, 0);
        assert_eq!(hourly.len(), 24);
        assert!(hourly.iter().all(|bucket| !bucket.active && bucket.minutes == 0));
        let breakdown = category_breakdown(&samples);
        assert!(breakdown.categories.is_empty());
        assert!(breakdown.tree.is_empty());
    }

    #[test]
    fn category_percentages_sum_to_at_most_hundred() {
        let samples = vec![
            sample("u", Some("Code.exe"), None, ts(9, 0, 0)),
            sample("u", Some("chrome.exe"), Some("GitHub"), ts(9, 0, 30)),
            sample("u", Some("slack.exe"), None, ts(9, 1, 0)),
            sample("u", Some("spotify.exe"), None, ts(9, 1, 30)),
            sample("u", Some("unknown_thing"), None, ts(9, 2, 0)),
        ];
        let breakdown = category_breakdown(&samples);
        let total: f64 = breakdown.categories.iter().map(|slice| slice.percentage).sum();
        assert!(total <= 100.0 + 1e-9);

        let top_total: f64 = top_applications(&samples).iter().map(|app| app.percentage).sum();
        assert!(top_total <= 100.0 + 1e-9);
    }

    #[test]
    fn tree_groups_by_category_then_app() {
        let samples = vec![
            sample("u", Some("Code.exe"), None, ts(9, 0, 0)),
            sample("u", Some("Code.exe"), None, ts(9, 0, 30)),
            sample("u", Some("idea64.exe"), None, ts(9, 1, 0)),
            sample("u", Some("chrome.exe"), Some("some article"), ts(9, 1, 30)),
        ];
        let breakdown = category_breakdown(&samples);
        assert_eq!(breakdown.tree[0].category, "Programming");
        assert_eq!(breakdown.tree[0].total_minutes, 1);
        assert_eq!(breakdown.tree[0].applications[0].name, "VS Code");
        assert!(breakdown.tree.iter().any(|node| node.category == "Browsing"));
    }

    #[test]
    fn active_window_is_two_minutes() {
        let now = ts(10, 0, 0);
        let fresh = vec![sample("u", Some("Code.exe"), None, ts(9, 59, 0))];
        let stale = vec![sample("u", Some("Code.exe"), None, ts(9, 57, 0))];

        assert!(is_active_at(&fresh, now));
        assert_eq!(current_application(&fresh, now).as_deref(), Some("VS Code"));
        assert!(!is_active_at(&stale, now));
        assert_eq!(current_application(&stale, now), None);
        assert!(!is_active_at(&[], now));
    }

    #[test]
    fn aggregation_is_deterministic() {
        let samples = vec![
            sample("u", Some("chrome.exe"), Some("GitHub"), ts(9, 0, 0)),
            sample("u", Some("Code.exe"), None, ts(9, 0, 30)),
            sample("u", Some("slack.exe"), None, ts(9, 1, 0)),
        ];
        let first = category_breakdown(&samples);
        let second = category_breakdown(&samples);
        assert_eq!(first, second);
        assert_eq!(top_applications(&samples), top_applications(&samples));
    }
}
