//! # ISUPipe API
//! 
//! HTTP handlers, session extractor, error mapping and router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
