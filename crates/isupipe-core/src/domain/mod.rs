//! # ISUPipe Core - Domain Module
//! 
//! Domain entities for the ISUPipe backend.

pub mod user;
pub mod session;

pub use user::{User, NewUser};
pub use session::{Session, UserContext};
