//! SQLite-backed activity sample repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tokio::task;
use worktracker_core::activity::ports::SampleRepository;
use worktracker_domain::{ActivitySample, Result as DomainResult};

use super::{map_join_error, map_sql_error, timestamp_from_unix, DbManager};

const INSERT_SAMPLE_SQL: &str = "INSERT INTO activity_samples \
     (username, application_name, window_title, timestamp) \
     VALUES (?1, ?2, ?3, ?4)";

const SELECT_SAMPLES_SQL: &str = "SELECT id, username, application_name, window_title, timestamp \
     FROM activity_samples \
     WHERE username = ?1 AND timestamp >= ?2 AND timestamp <= ?3 \
     ORDER BY timestamp ASC";

pub struct SqliteSampleRepository {
    db: Arc<DbManager>,
}

impl SqliteSampleRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SampleRepository for SqliteSampleRepository {
    async fn save_sample(&self, sample: &ActivitySample) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);
        let sample = sample.clone();
        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            conn.execute(
                INSERT_SAMPLE_SQL,
                params![
                    sample.username,
                    sample.application_name,
                    sample.window_title,
                    sample.timestamp.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_samples(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ActivitySample>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        task::spawn_blocking(move || -> DomainResult<Vec<ActivitySample>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(SELECT_SAMPLES_SQL).map_err(map_sql_error)?;
            let samples = stmt
                .query_map(params![username, start.timestamp(), end.timestamp()], map_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;
            Ok(samples)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_row(row: &Row<'_>) -> Result<ActivitySample, rusqlite::Error> {
    Ok(ActivitySample {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        application_name: row.get(2)?,
        window_title: row.get(3)?,
        timestamp: timestamp_from_unix(row.get(4)?)?,
    })
}
