//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresBankStore;
//! use domain_directory::BankRecordStore;
//!
//! let store = PostgresBankStore::new(pool);
//! let mut session = store.begin().await?;
//! let record = session.get(&code).await?;
//! session.commit().await?;
//! ```

pub mod bank;

pub use bank::{PostgresBankSession, PostgresBankStore};
