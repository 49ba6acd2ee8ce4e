//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the SWIFT directory
//! using SQLx.
//!
//! # Architecture
//!
//! - `pool` - connection pool configuration and migrations
//! - `repositories` - SQL access to the `swift_codes` table
//! - `adapters` - `PostgresBankStore`, the record store the domain consumes
//!
//! # Schema
//!
//! A single `swift_codes` table keyed by code. A check constraint mirrors the
//! headquarter rule (`is_headquarter` iff the code ends in `XXX`), and an
//! expression index on `left(swift_code, 8)` serves branch lookups.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresBankStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/swift_codes")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresBankStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::{PostgresBankStore, PostgresBankSession};
