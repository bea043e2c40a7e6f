//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError>;
    /// Insert in its own transaction. A taken name fails with
    /// [`DomainError::NameAlreadyExists`].
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}
