//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    
    #[error("Invalid username or password")]
    InvalidCredentials,
    
    #[error("Name already exists: {0}")]
    NameAlreadyExists(String),
    
    #[error("Session cookie missing")]
    SessionMissing,
    
    #[error("Session not found")]
    SessionNotFound,
    
    #[error("Session has expired")]
    SessionExpired,
    
    #[error("Access denied: {0}")]
    AccessDenied(String),
    
    #[error("Password hash error: {0}")]
    PasswordHashError(String),
    
    #[error("Database error: {0}")]
    DatabaseError(String),
    
    #[error("Internal error: {0}")]
    InternalError(String),
}
