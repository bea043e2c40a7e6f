// ============================================================================
// ISUPipe Core - Authentication Service
// File: crates/isupipe-core/src/services/auth_service.rs
// ============================================================================
//! Registration, login and session validation

use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn, error};

use isupipe_security::{PasswordScheme, PasswordService};

use crate::domain::{NewUser, Session, User, UserContext};
use crate::error::DomainError;
use crate::repositories::{SessionRepository, UserRepository};

/// Authentication service for handling register/login/session flows
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_scheme: PasswordScheme,
    session_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        password_scheme: PasswordScheme,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            password_scheme,
            session_ttl_seconds,
        }
    }

    /// Register a new user
    pub async fn register(
        &self,
        name: &str,
        display_name: &str,
        description: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        info!("Registration attempt for name: {}", name);

        let scheme = self.password_scheme;
        let plaintext = password.to_string();
        let password_hash = run_blocking(move || PasswordService::hash(&plaintext, scheme))
            .await?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let new_user = NewUser::new(
            name.to_string(),
            display_name.to_string(),
            description.to_string(),
            password_hash,
        );

        // Uniqueness is left to the store so concurrent registrations race
        // on the constraint rather than on a read-then-write.
        let user = self.user_repo.create(&new_user).await.map_err(|e| {
            match &e {
                DomainError::NameAlreadyExists(_) => {
                    warn!("Registration failed: name already exists: {}", name)
                }
                _ => error!("Registration failed for {}: {}", name, e),
            }
            e
        })?;

        info!("Registration successful for: {} (id={})", user.name, user.id);
        Ok(user)
    }

    /// Login with username and password, opening a new session
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        info!("Login attempt for user: {}", username);

        // 1. Find user by name
        let user = self.user_repo.find_by_name(username).await?
            .ok_or_else(|| {
                warn!("Login failed: unknown user: {}", username);
                DomainError::InvalidCredentials
            })?;

        // 2. Verify password and re-check the name
        let plaintext = password.to_string();
        let stored_hash = user.password.clone();
        let password_valid = run_blocking(move || PasswordService::verify(&plaintext, &stored_hash))
            .await?
            .map_err(|e| {
                error!("Stored password hash for {} is unusable: {}", user.name, e);
                DomainError::InvalidCredentials
            })?;

        if user.name != username || !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Open a session
        let session = Session::new(user.id, self.session_ttl_seconds);
        self.session_repo.create(&session).await?;

        info!("Login successful for: {}", username);

        Ok(LoginResult {
            session_id: session.id,
            max_age_seconds: self.session_ttl_seconds,
        })
    }

    /// Resolve the session cookie of an incoming request.
    ///
    /// Expired sessions are deleted on the way out; a failed delete is only
    /// logged.
    pub async fn authenticate(
        &self,
        session_id: Option<&str>,
    ) -> Result<UserContext, DomainError> {
        let session_id = session_id.ok_or(DomainError::SessionMissing)?;

        let session = self.session_repo.find_by_id(session_id).await?
            .ok_or(DomainError::SessionNotFound)?;

        if session.is_expired_at(Utc::now().timestamp()) {
            if let Err(e) = self.session_repo.delete(&session.id).await {
                warn!("Failed to delete expired session {}: {}", session.id, e);
            }
            return Err(DomainError::SessionExpired);
        }

        Ok(UserContext {
            session_id: session.id,
            user_id: session.user_id,
        })
    }
}

/// Hashing and verification are CPU-bound; keep them off the async workers.
async fn run_blocking<T, F>(task: F) -> Result<T, DomainError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DomainError::InternalError(format!("password task failed: {}", e)))
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session_id: String,
    pub max_age_seconds: i64,
}
