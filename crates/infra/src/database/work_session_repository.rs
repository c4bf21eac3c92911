//! SQLite-backed work session repository

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use worktracker_core::session::ports::WorkSessionRepository;
use worktracker_domain::{Result as DomainResult, WorkSession};

use super::{map_join_error, map_sql_error, timestamp_from_unix, DbManager};

const SESSION_COLUMNS: &str =
    "id, username, application_name, login_time, logout_time, duration_minutes, is_active";

const INSERT_SESSION_SQL: &str = "INSERT INTO work_sessions \
     (username, application_name, login_time, logout_time, duration_minutes, is_active) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const UPDATE_SESSION_SQL: &str = "UPDATE work_sessions SET \
     username = ?2, application_name = ?3, login_time = ?4, logout_time = ?5, \
     duration_minutes = ?6, is_active = ?7 \
     WHERE id = ?1";

pub struct SqliteWorkSessionRepository {
    db: Arc<DbManager>,
}

impl SqliteWorkSessionRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkSessionRepository for SqliteWorkSessionRepository {
    async fn find_active(&self, username: &str) -> DomainResult<Option<WorkSession>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE username = ?1 AND is_active = 1 \
             ORDER BY login_time DESC LIMIT 1"
        );
        task::spawn_blocking(move || -> DomainResult<Option<WorkSession>> {
            let conn = db.get_connection()?;
            conn.query_row(&sql, params![username], map_row).optional().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, session: &WorkSession) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);
        let session = session.clone();
        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            match session.id {
                Some(id) => {
                    conn.execute(
                        UPDATE_SESSION_SQL,
                        params![
                            id,
                            session.username,
                            session.application_name,
                            session.login_time.timestamp(),
                            session.logout_time.map(|t| t.timestamp()),
                            session.duration_minutes,
                            session.is_active,
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
                            session.login_time.timestamp(),
                            session.logout_time.map(|t| t.timestamp()),
                            session.duration_minutes,
                            session.is_active,
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

    async fn total_minutes(&self, username: &str) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT COALESCE(SUM(duration_minutes), 0) FROM work_sessions \
                 WHERE username = ?1 AND is_active = 0",
                params![username],
                |row| row.get(0),
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Vec<WorkSession>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE username = ?1 ORDER BY login_time DESC"
        );
        task::spawn_blocking(move || -> DomainResult<Vec<WorkSession>> {
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

    async fn find_all_active(&self) -> DomainResult<Vec<WorkSession>> {
        let db = Arc::clone(&self.db);
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions \
             WHERE is_active = 1 ORDER BY login_time DESC"
        );
        task::spawn_blocking(move || -> DomainResult<Vec<WorkSession>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let sessions = stmt
                .query_map([], map_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;
            Ok(sessions)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_row(row: &Row<'_>) -> Result<WorkSession, rusqlite::Error> {
    let logout: Option<i64> = row.get(4)?;
    Ok(WorkSession {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        application_name: row.get(2)?,
        login_time: timestamp_from_unix(row.get(3)?)?,
        logout_time: logout.map(timestamp_from_unix).transpose()?,
        duration_minutes: row.get(5)?,
        is_active: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;

    fn repository() -> (tempfile::TempDir, SqliteWorkSessionRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db = DbManager::new(dir.path().join("tracker.db"), 2).unwrap();
        (dir, SqliteWorkSessionRepository::new(Arc::new(db)))
    }

    fn session(username: &str, login: DateTime<Utc>) -> WorkSession {
        WorkSession {
            id: None,
            username: username.to_string(),
            application_name: "VS Code".to_string(),
            login_time: login,
            logout_time: None,
            duration_minutes: 0,
            is_active: true,
        }
    }

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).single().unwrap()
    }

    #[tokio::test]
    async fn save_then_close_updates_in_place() {
        let (_dir, repo) = repository();

        let mut open = session("yash_thakur", ts(9, 0));
        open.id = Some(repo.save(&open).await.unwrap());

        assert!(repo.find_active("yash_thakur").await.unwrap().is_some());

        open.logout_time = Some(ts(10, 0));
        open.duration_minutes = 60;
        open.is_active = false;
        repo.save(&open).await.unwrap();

        assert!(repo.find_active("yash_thakur").await.unwrap().is_none());
        assert_eq!(repo.total_minutes("yash_thakur").await.unwrap(), 60);
    }

    #[tokio::test]
    async fn total_minutes_ignores_active_sessions() {
        let (_dir, repo) = repository();

        let mut closed = session("yash_thakur", ts(8, 0));
        closed.logout_time = Some(ts(8, 45));
        closed.duration_minutes = 45;
        closed.is_active = false;
        repo.save(&closed).await.unwrap();
        repo.save(&session("yash_thakur", ts(9, 0))).await.unwrap();

        assert_eq!(repo.total_minutes("yash_thakur").await.unwrap(), 45);
        assert_eq!(repo.total_minutes("parth_waghe").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let (_dir, repo) = repository();
        for offset in 0..3 {
            repo.save(&session("yash_thakur", ts(8, 0) + Duration::hours(offset)))
                .await
                .unwrap();
        }

        let history = repo.find_by_username("yash_thakur").await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|pair| pair[0].login_time >= pair[1].login_time));

        let active = repo.find_all_active().await.unwrap();
        assert_eq!(active.len(), 3);
    }
}
