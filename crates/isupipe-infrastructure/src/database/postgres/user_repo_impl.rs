// ============================================================================
// ISUPipe Infrastructure - PostgreSQL User Repository
// File: crates/isupipe-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn, error};
use chrono::{DateTime, Utc};

use isupipe_core::domain::{NewUser, User};
use isupipe_core::error::DomainError;
use isupipe_core::repositories::{StoreHealth, UserRepository};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            description: row.description,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, display_name, description, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, display_name, description, password, created_at, updated_at
            FROM users
            WHERE name = $1
            "#
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by name", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        info!("Creating user with name: {}", user.name);

        let mut tx = self.pool.begin().await
            .map_err(|e| database_error("opening transaction", e))?;

        let inserted: Result<UserRow, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO users (name, display_name, description, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, display_name, description, password, created_at, updated_at
            "#
        )
        .bind(&user.name)
        .bind(&user.display_name)
        .bind(&user.description)
        .bind(&user.password)
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(e) => {
                // Only the insert error is reported.
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed user insert also failed: {}", rollback_err);
                }
                let duplicate = matches!(
                    &e,
                    sqlx::Error::Database(db) if db.is_unique_violation()
                );
                if duplicate {
                    warn!("Duplicate user name: {}", user.name);
                    return Err(DomainError::NameAlreadyExists(user.name.clone()));
                }
                return Err(database_error("creating user", e));
            }
        };

        tx.commit().await
            .map_err(|e| database_error("committing user insert", e))?;

        info!("User created successfully: {}", row.id);
        Ok(row.into())
    }
}

#[async_trait]
impl StoreHealth for PgUserRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| database_error("pinging", e))
    }
}
