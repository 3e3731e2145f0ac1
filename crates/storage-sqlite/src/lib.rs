//! SQLite storage implementation for Papertrade.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `papertrade-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users and accounts
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Every write is funnelled through a single
//! writer task ([`WriteHandle`]) that runs each job in an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use users::UserRepository;

// Re-export from papertrade-core for convenience
pub use papertrade_core::errors::{DatabaseError, Error, Result};
