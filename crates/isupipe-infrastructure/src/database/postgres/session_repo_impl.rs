// ============================================================================
// ISUPipe Infrastructure - PostgreSQL Session Repository
// File: crates/isupipe-infrastructure/src/database/postgres/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn, error};

use isupipe_core::domain::Session;
use isupipe_core::error::DomainError;
use isupipe_core::repositories::SessionRepository;

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    pub id: String,
    pub user_id: i64,
    pub expires: i64,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            expires: row.expires,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e: sqlx::Error| {
            error!("Database error opening transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, expires)
            VALUES ($1, $2, $3)
            "#
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after failed session insert also failed: {}", rollback_err);
            }
            error!("Database error creating session: {}", e);
            return Err(DomainError::DatabaseError(e.to_string()));
        }

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing session: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Session created for user {}", session.user_id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, expires
            FROM sessions
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding session: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting session: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
