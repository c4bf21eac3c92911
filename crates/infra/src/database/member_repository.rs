//! SQLite-backed team member repository

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use worktracker_core::session::ports::TeamMemberRepository;
use worktracker_domain::{Result as DomainResult, TeamMember};

use super::{map_join_error, map_sql_error, DbManager};

const UPSERT_MEMBER_SQL: &str = "INSERT INTO team_members \
     (username, full_name, total_working_minutes, is_currently_working, current_application) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(username) DO UPDATE SET \
         full_name = excluded.full_name, \
         total_working_minutes = excluded.total_working_minutes, \
         is_currently_working = excluded.is_currently_working, \
         current_application = excluded.current_application";

const SELECT_MEMBER_SQL: &str = "SELECT id, username, full_name, total_working_minutes, \
     is_currently_working, current_application \
     FROM team_members WHERE username = ?1";

const SELECT_WORKING_SQL: &str = "SELECT id, username, full_name, total_working_minutes, \
     is_currently_working, current_application \
     FROM team_members WHERE is_currently_working = 1 ORDER BY username ASC";

const SELECT_ID_SQL: &str = "SELECT id FROM team_members WHERE username = ?1";

pub struct SqliteTeamMemberRepository {
    db: Arc<DbManager>,
}

impl SqliteTeamMemberRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamMemberRepository for SqliteTeamMemberRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<TeamMember>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        task::spawn_blocking(move || -> DomainResult<Option<TeamMember>> {
            let conn = db.get_connection()?;
            conn.query_row(SELECT_MEMBER_SQL, params![username], map_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, member: &TeamMember) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);
        let member = member.clone();
        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            conn.execute(
                UPSERT_MEMBER_SQL,
                params![
                    member.username,
                    member.full_name,
                    member.total_working_minutes,
                    member.is_currently_working,
                    member.current_application,
                ],
            )
            .map_err(map_sql_error)?;
            // The upsert path does not change rowid; read it back.
            conn.query_row(SELECT_ID_SQL, params![member.username], |row| row.get(0))
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_working(&self) -> DomainResult<Vec<TeamMember>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<Vec<TeamMember>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(SELECT_WORKING_SQL).map_err(map_sql_error)?;
            let members = stmt
                .query_map([], map_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;
            Ok(members)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_row(row: &Row<'_>) -> Result<TeamMember, rusqlite::Error> {
    Ok(TeamMember {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        full_name: row.get(2)?,
        total_working_minutes: row.get(3)?,
        is_currently_working: row.get(4)?,
        current_application: row.get(5)?,
    })
}
