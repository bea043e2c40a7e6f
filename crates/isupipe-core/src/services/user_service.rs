//! User profile lookups

use std::sync::Arc;
use tracing::debug;

use crate::domain::{User, UserContext};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    enforce_ownership: bool,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, enforce_ownership: bool) -> Self {
        Self {
            user_repo,
            enforce_ownership,
        }
    }

    /// Fetch the profile named by the `user_id` path segment on behalf of an
    /// authenticated caller.
    ///
    /// Any live session may read any profile unless ownership is enforced,
    /// in which case only the session owner's own profile is served. A
    /// segment that is not an integer names no user.
    pub async fn get_profile(
        &self,
        caller: &UserContext,
        user_id: &str,
    ) -> Result<User, DomainError> {
        let id = user_id.parse::<i64>().ok();

        if self.enforce_ownership && id != Some(caller.user_id) {
            return Err(DomainError::AccessDenied(format!(
                "session owner {} may not read user {}",
                caller.user_id, user_id
            )));
        }

        let Some(id) = id else {
            return Err(DomainError::UserNotFound(user_id.to_string()));
        };

        debug!("Fetching profile of user {}", id);
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
    }
}
