//! Repository traits (ports)

pub mod user_repository;
pub mod session_repository;

pub use user_repository::UserRepository;
pub use session_repository::SessionRepository;

use async_trait::async_trait;
use crate::error::DomainError;

/// Liveness probe for the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
