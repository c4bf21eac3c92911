//! SQLite-backed app session repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use worktracker_core::session::ports::AppSessionRepository;
use worktracker_domain::{AppSession, EndReason, Result as DomainResult};

use super::{map_join_error, map_sql_error, timestamp_from_unix, DbManager};

const SESSION_COLUMNS: &str = "id, username, application_name, process_name, start_time, \
     end_time, is_active, end_reason, duration_seconds";

const INSERT_SESSION_SQL: &str = "INSERT INTO app_sessions \
     (username, application_name, process_name, start_time, end_time, is_active, end_reason, \
      duration_seconds) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const UPDATE_SESSION_SQL: &str = "UPDATE app_sessions SET \
     username = ?2, application_name = ?3, process_name = ?4, start_time = ?5, end_time = ?6, \
     is_active = ?7, end_reason = ?8, duration_seconds = ?9 \
     WHERE id = ?1";

/// Single-statement timeout sweep: closes every active session started
/// before the cutoff and computes its duration in SQL.
const CLOSE_TIMED_OUT_SQL: &str = "UPDATE app_sessions SET \
     end_time = ?1, is_active = 0, end_reason = 'timeout', duration_seconds = ?1 - start_time \
     WHERE is_active = 1 AND start_time < ?2";

pub struct SqliteAppSessionRepository {
    db: Arc<DbManager>,
}

impl SqliteAppSessionRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppSessionRepository for SqliteAppSessionRepository {
    async fn find_active(
        &self,
        username: &str,
        application_name: &str,
    ) -> DomainResult<Option<AppSession>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let application_name = application_name.to_string();
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM app_sessions \
             WHERE username = ?1 AND application_name = ?2 AND is_active = 1 \
             ORDER BY start_time DESC LIMIT 1"
        );
        task::spawn_blocking(move || -> DomainResult<Option<AppSession>> {
            let conn = db.get_connection()?;
            conn.query_row(&sql, params![username, application_name], map_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, session: &AppSession) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);
        let session = session.clone();
        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            let end_reason = session.end_reason.map(|reason| reason.as_str());
            match session.id {
                Some(id) => {
                    conn.execute(
                        UPDATE_SESSION_SQL,
                        params![
                            id,
                            session.username,
                            session.application_name,
                            session.process_name,
                            session.start_time.timestamp(),
                            session.end_time.map(|t| t.timestamp()),
                            session.is_active,
                            end_reason,
                            session.duration_seconds,
                        ],
                    )
                    .map_err(map_sql_error)?;
                    Ok(id)
                }
                None => {
                    conn.execute(
                        INSERT_SESSION_SQL,
                        params![
                            session.username,
                            session.application_name,
                            session.process_name,
                            session.start_time.timestamp(),
                            session.end_time.map(|t| t.timestamp()),
                            session.is_active,
                            end_reason,
                            session.duration_seconds,
                        ],
                    )
                    .map_err(map_sql_error)?;
                    Ok(conn.last_insert_rowid())
                }
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_in_range(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AppSession>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM app_sessions \
             WHERE username = ?1 AND start_time >= ?2 AND start_time <= ?3 \
             ORDER BY start_time DESC"
        );
        task::spawn_blocking(move || -> DomainResult<Vec<AppSession>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let sessions = stmt
                .query_map(params![username, start.timestamp(), end.timestamp()], map_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;
            Ok(sessions)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_active_by_username(&self, username: &str) -> DomainResult<Vec<AppSession>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM app_sessions \
             WHERE username = ?1 AND is_active = 1 ORDER BY start_time DESC"
        );
        task::spawn_blocking(move || -> DomainResult<Vec<AppSession>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let sessions = stmt
                .query_map(params![username], map_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;
            Ok(sessions)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn close_timed_out(
        &self,
        cutoff: DateTime<Utc>,
        end_time_value: DateTime<Utc>,
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            conn.execute(CLOSE_TIMED_OUT_SQL, params![end_time_value.timestamp(), cutoff.timestamp()])
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_row(row: &Row<'_>) -> Result<AppSession, rusqlite::Error> {
    let end: Option<i64> = row.get(5)?;
    let end_reason: Option<String> = row.get(7)?;
    Ok(AppSession {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        application_name: row.get(2)?,
        process_name: row.get(3)?,
        start_time: timestamp_from_unix(row.get(4)?)?,
        end_time: end.map(timestamp_from_unix).transpose()?,
        is_active: row.get(6)?,
        end_reason: end_reason.as_deref().and_then(EndReason::parse),
        duration_seconds: row.get(8)?,
    })
}
