use std::sync::Arc;

use isupipe_core::repositories::{SessionRepository, StoreHealth, UserRepository};
use isupipe_core::services::{AuthService, UserService};
use isupipe_security::{PasswordError, PasswordScheme};
use isupipe_shared::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub store_health: Arc<dyn StoreHealth>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Result<Self, PasswordError> {
        let password_scheme: PasswordScheme = config.password.scheme.parse()?;

        let auth = Arc::new(AuthService::new(
            user_repo.clone(),
            session_repo,
            password_scheme,
            config.session.ttl_seconds,
        ));
        let users = Arc::new(UserService::new(user_repo, config.session.enforce_ownership));

        Ok(Self {
            auth,
            users,
            store_health,
            config,
        })
    }
}
