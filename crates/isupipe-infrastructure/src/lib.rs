//! # ISUPipe Infrastructure
//! 
//! Storage adapters for the core repository ports.

pub mod database;

pub use database::{
    create_pool, run_migrations, InMemoryStore, PgSessionRepository, PgUserRepository,
};
