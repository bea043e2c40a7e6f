//! # ISUPipe Security
//! 
//! Security utilities: password hashing and session tokens/cookies.

pub mod password;
pub mod session;

pub use password::{PasswordError, PasswordScheme, PasswordService};
