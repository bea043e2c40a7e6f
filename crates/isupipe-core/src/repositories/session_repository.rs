//! Session repository trait (port)

use async_trait::async_trait;
use crate::domain::Session;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert in its own transaction.
    async fn create(&self, session: &Session) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
