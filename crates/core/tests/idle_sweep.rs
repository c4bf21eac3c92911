//! Idle detection sweep tests

mod support;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use support::repositories::{MockSampleRepository, MockTeamMemberRepository};
use worktracker_core::IdleDetectionService;
use worktracker_domain::{ActivitySample, TeamMember};

fn working(username: &str, app: &str) -> TeamMember {
    let mut member = TeamMember::new(username, username);
    member.mark_working(app);
    member
}

fn sample(username: &str, ts: DateTime<Utc>) -> ActivitySample {
    ActivitySample {
        id: None,
        username: username.to_string(),
        application_name: Some("Code.exe".to_string()),
        window_title: None,
        timestamp: ts,
    }
}

fn ts(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).single().unwrap()
}

#[tokio::test]
async fn stale_members_are_marked_idle() {
    let members = MockTeamMemberRepository::new(vec![
        working("yash_thakur", "VS Code"),
        working("parth_waghe", "IntelliJ IDEA"),
    ]);
    // parth reported 1 minute ago, yash 20 minutes ago.
    let samples = MockSampleRepository::new(vec![
        sample("yash_thakur", ts(8, 40)),
        sample("parth_waghe", ts(8, 59)),
    ]);
    let svc = IdleDetectionService::new(Arc::new(members.clone()), Arc::new(samples), 5);

    let marked = svc.sweep_at(ts(9, 0)).await.unwrap();
    assert_eq!(marked, 1);

    let stored = members.stored();
    let yash = stored.iter().find(|m| m.username == "yash_thakur").unwrap();
    assert!(!yash.is_currently_working);
    assert_eq!(yash.current_application, None);

    let parth = stored.iter().find(|m| m.username == "parth_waghe").unwrap();
    assert!(parth.is_currently_working);
}

#[tokio::test]
async fn sweep_is_idempotent() {
    let members = MockTeamMemberRepository::new(vec![working("yash_thakur", "VS Code")]);
    let samples = MockSampleRepository::default();
    let svc = IdleDetectionService::new(Arc::new(members.clone()), Arc::new(samples), 5);

    assert_eq!(svc.sweep_at(ts(9, 0)).await.unwrap(), 1);
    // The member is no longer Working, so a second sweep finds nothing.
    assert_eq!(svc.sweep_at(ts(9, 1)).await.unwrap(), 0);
}

#[tokio::test]
async fn idle_members_are_ignored() {
    let members = MockTeamMemberRepository::new(vec![TeamMember::new("yash_thakur", "Yash")]);
    let svc = IdleDetectionService::new(
        Arc::new(members.clone()),
        Arc::new(MockSampleRepository::default()),
        5,
    );

    assert_eq!(svc.sweep_at(ts(9, 0)).await.unwrap(), 0);
    assert!(!members.stored()[0].is_currently_working);
}

#[tokio::test]
async fn one_member_failure_does_not_stop_the_sweep() {
    let members = MockTeamMemberRepository::new(vec![
        working("atharva_raut", "VS Code"),
        working("yash_thakur", "VS Code"),
    ]);
    // Lookups for atharva fail; yash is stale and must still be swept.
    let samples = MockSampleRepository::failing_for(Vec::new(), "atharva_raut");
    let svc = IdleDetectionService::new(Arc::new(members.clone()), Arc::new(samples), 5);

    let marked = svc.sweep_at(ts(9, 0)).await.unwrap();
    assert_eq!(marked, 1);

    let stored = members.stored();
    assert!(stored.iter().find(|m| m.username == "atharva_raut").unwrap().is_currently_working);
    assert!(!stored.iter().find(|m| m.username == "yash_thakur").unwrap().is_currently_working);
}

#[tokio::test]
async fn clock_skew_tolerance_keeps_slightly_ahead_members() {
    // A sample 30 seconds in the future still counts as recent activity.
    let members = MockTeamMemberRepository::new(vec![working("yash_thakur", "VS Code")]);
    let samples = MockSampleRepository::new(vec![sample(
        "yash_thakur",
        ts(9, 0) + chrono::Duration::seconds(30),
    )]);
    let svc = IdleDetectionService::new(Arc::new(members.clone()), Arc::new(samples), 5);

    assert_eq!(svc.sweep_at(ts(9, 0)).await.unwrap(), 0);
    assert!(members.stored()[0].is_currently_working);
}
