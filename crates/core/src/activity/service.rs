//! Activity ingestion and reporting service

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, warn};
use worktracker_domain::utils::time::{local_day_bounds, parse_client_timestamp};
use worktracker_domain::utils::title::truncate_title;
use worktracker_domain::{
    ActivityLogRequest, ActivitySample, DailySummary, DashboardReport, MemberSummary,
    MemberWeeklyTotal, Result, Roster, WeeklySummary, WorkTrackerError,
};

use super::aggregate;
use super::ports::SampleRepository;

/// Ingests activity samples and derives per-member dashboards.
///
/// Stateless apart from its collaborators; every operation validates the
/// member against the roster before touching storage.
pub struct ActivityService {
    samples: Arc<dyn SampleRepository>,
    roster: Arc<Roster>,
}

impl ActivityService {
    pub fn new(samples: Arc<dyn SampleRepository>, roster: Arc<Roster>) -> Self {
        Self { samples, roster }
    }

    /// Record one 30-second activity sample.
    ///
    /// A missing or malformed client timestamp is recovered by substituting
    /// the ingestion time; an unknown member is rejected outright.
    pub async fn log_activity(&self, request: ActivityLogRequest) -> Result<ActivitySample> {
        self.require_member(&request.username)?;

        let timestamp = match request.timestamp.as_deref() {
            None => Utc::now(),
            Some(raw) => match parse_client_timestamp(raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        username = %request.username,
                        raw_timestamp = %raw,
                        error = %err,
                        "unparseable client timestamp, falling back to server time"
                    );
                    Utc::now()
                }
            },
        };

        let mut sample = ActivitySample {
            id: None,
            username: request.username.to_lowercase(),
            application_name: request.application_name,
            window_title: request.window_title.as_deref().map(truncate_title),
            timestamp,
        };
        let id = self.samples.save_sample(&sample).await?;
        sample.id = Some(id);
        debug!(username = %sample.username, id, "activity sample stored");
        Ok(sample)
    }

    /// Full dashboard for one member and one local calendar day.
    pub async fn get_dashboard(
        &self,
        username: &str,
        date: NaiveDate,
        tz_offset_minutes: i32,
    ) -> Result<DashboardReport> {
        self.require_member(username)?;

        let (start, end) = local_day_bounds(date, tz_offset_minutes);
        let samples = self.samples.find_samples(username, start, end).await?;

        Ok(DashboardReport {
            username: username.to_lowercase(),
            full_name: self.roster.full_name(username),
            date,
            total_active_minutes: aggregate::total_active_minutes(&samples),
            top_applications: aggregate::top_applications(&samples),
            hourly_activity: aggregate::hourly_activity(&samples, tz_offset_minutes),
            categories: aggregate::category_breakdown(&samples),
        })
    }

    /// Roll-up for every roster member on one local day, sorted by total
    /// minutes descending (username ascending on ties).
    pub async fn get_all_members_summary(
        &self,
        date: NaiveDate,
        tz_offset_minutes: i32,
    ) -> Result<Vec<MemberSummary>> {
        self.members_summary_at(date, tz_offset_minutes, Utc::now()).await
    }

    /// Same as [`Self::get_all_members_summary`] with an explicit evaluation
    /// instant for the two-minute activity window.
    pub async fn members_summary_at(
        &self,
        date: NaiveDate,
        tz_offset_minutes: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<MemberSummary>> {
        let (start, end) = local_day_bounds(date, tz_offset_minutes);

        let mut summaries = Vec::with_capacity(self.roster.len());
        for username in self.roster.usernames() {
            let samples = self.samples.find_samples(username, start, end).await?;
            summaries.push(self.summarize_member(username, &samples, now));
        }
        summaries.sort_by(|a, b| {
            b.total_active_minutes
                .cmp(&a.total_active_minutes)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(summaries)
    }

    /// Seven local days ending on `end_date`, with per-member weekly totals.
    pub async fn get_weekly_summary(
        &self,
        end_date: NaiveDate,
        tz_offset_minutes: i32,
    ) -> Result<WeeklySummary> {
        let now = Utc::now();
        let start_date = end_date - Duration::days(6);

        let mut days = Vec::with_capacity(7);
        let mut totals: Vec<MemberWeeklyTotal> = self
            .roster
            .usernames()
            .map(|username| MemberWeeklyTotal {
                username: username.to_string(),
                full_name: self.roster.full_name(username),
                total_active_minutes: 0,
            })
            .collect();

        for offset in 0..7 {
            let date = start_date + Duration::days(offset);
            let members = self.members_summary_at(date, tz_offset_minutes, now).await?;
            for member in &members {
                if let Some(total) =
                    totals.iter_mut().find(|total| total.username == member.username)
                {
                    total.total_active_minutes += member.total_active_minutes;
                }
            }
            days.push(DailySummary {
                date,
                total_active_minutes: members.iter().map(|m| m.total_active_minutes).sum(),
                members,
            });
        }

        totals.sort_by(|a, b| {
            b.total_active_minutes
                .cmp(&a.total_active_minutes)
                .then_with(|| a.username.cmp(&b.username))
        });

        Ok(WeeklySummary { start_date, end_date, days, member_totals: totals })
    }

    fn summarize_member(
        &self,
        username: &str,
        samples: &[ActivitySample],
        now: DateTime<Utc>,
    ) -> MemberSummary {
        let total_active_minutes = aggregate::total_active_minutes(samples);
        MemberSummary {
            username: username.to_string(),
            full_name: self.roster.full_name(username),
            total_active_minutes,
            total_active_hours: format!("{:.1}", total_active_minutes as f64 / 60.0),
            is_active: aggregate::is_active_at(samples, now),
            current_application: aggregate::current_application(samples, now),
            top_app: aggregate::top_app(samples),
        }
    }

    fn require_member(&self, username: &str) -> Result<()> {
        if self.roster.contains(username) {
            Ok(())
        } else {
            Err(WorkTrackerError::InvalidMember(username.to_string()))
        }
    }
}
