//! Domain services (business logic)

pub mod auth_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginResult};
pub use user_service::UserService;
