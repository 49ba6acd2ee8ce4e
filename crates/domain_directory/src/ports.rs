//! Directory Domain Ports
//!
//! This module defines the record store contract the directory consumes. A
//! store hands out sessions; a session is one unit of work that ends in
//! exactly one `commit` or `rollback`.
//!
//! # Session lifecycle
//!
//! ```rust,ignore
//! let mut session = store.begin().await?;
//! let existing = session.get(&code).await?;
//! session.insert(&record).await?;
//! session.commit().await?;
//! ```
//!
//! Dropping a session without committing discards its writes. Every early
//! return in the service therefore releases the session.
//!
//! # Adapters
//!
//! - **Postgres**: `infra_db::adapters::PostgresBankStore`, backed by sqlx
//!   transactions
//! - **Mock**: [`mock::MockBankStore`], an in-memory store for tests

use async_trait::async_trait;

use core_kernel::{CountryCode, DomainPort, HealthCheckable, PortError, SwiftCode};

use crate::bank::BankRecord;

/// Source of store sessions
#[async_trait]
pub trait BankRecordStore: DomainPort + HealthCheckable {
    /// Opens a new session
    async fn begin(&self) -> Result<Box<dyn BankRecordSession>, PortError>;
}

/// One unit of work against the record store
///
/// Implementations must enforce primary-key uniqueness on `swift_code`:
/// of two sessions inserting the same code, at most one may commit, and the
/// loser must observe `PortError::Conflict`.
#[async_trait]
pub trait BankRecordSession: Send {
    /// Looks up a record by its exact code
    async fn get(&mut self, code: &SwiftCode) -> Result<Option<BankRecord>, PortError>;

    /// All records registered in `country`
    async fn query_by_country(
        &mut self,
        country: &CountryCode,
    ) -> Result<Vec<BankRecord>, PortError>;

    /// All records whose code starts with `prefix`, except `exclude`
    async fn query_by_prefix(
        &mut self,
        prefix: &str,
        exclude: &SwiftCode,
    ) -> Result<Vec<BankRecord>, PortError>;

    /// Stages a new record
    async fn insert(&mut self, record: &BankRecord) -> Result<(), PortError>;

    /// Stages removal of a record
    async fn delete(&mut self, record: &BankRecord) -> Result<(), PortError>;

    /// Makes staged writes durable
    ///
    /// On failure the implementation discards the staged writes before
    /// returning the error.
    async fn commit(self: Box<Self>) -> Result<(), PortError>;

    /// Discards staged writes
    async fn rollback(self: Box<Self>) -> Result<(), PortError>;
}

/// In-memory implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    use crate::resolver::matches_prefix;

    /// Where the mock store should inject a failure
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum FailureMode {
        #[default]
        None,
        /// `insert` and `delete` fail
        OnWrite,
        /// `commit` fails after writes were staged
        OnCommit,
        /// `begin` fails, as if the database were unreachable
        Unavailable,
        /// `delete` finds no row, as if another session removed it after `get`
        DeletedConcurrently,
    }

    #[derive(Debug, Default)]
    struct Counters {
        sessions: AtomicUsize,
        commits: AtomicUsize,
        rollbacks: AtomicUsize,
    }

    /// In-memory mock implementation of BankRecordStore
    ///
    /// Records are kept in a `BTreeMap`, so queries return them in code order.
    #[derive(Debug, Clone, Default)]
    pub struct MockBankStore {
        records: Arc<RwLock<BTreeMap<String, BankRecord>>>,
        counters: Arc<Counters>,
        failure: FailureMode,
    }

    impl MockBankStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with records for testing
        pub async fn with_records(records: Vec<BankRecord>) -> Self {
            let store = Self::new();
            {
                let mut stored = store.records.write().await;
                for record in records {
                    stored.insert(record.swift_code().to_string(), record);
                }
            }
            store
        }

        /// Returns a handle to the same data that fails as described
        pub fn failing(&self, failure: FailureMode) -> Self {
            Self {
                records: Arc::clone(&self.records),
                counters: Arc::clone(&self.counters),
                failure,
            }
        }

        /// Snapshot of all committed records in code order
        pub async fn records(&self) -> Vec<BankRecord> {
            self.records.read().await.values().cloned().collect()
        }

        /// Whether a committed record with this code exists
        pub async fn contains(&self, code: &str) -> bool {
            self.records.read().await.contains_key(code)
        }

        /// Number of sessions opened so far
        pub fn sessions_opened(&self) -> usize {
            self.counters.sessions.load(Ordering::SeqCst)
        }

        /// Number of successful commits so far
        pub fn commits(&self) -> usize {
            self.counters.commits.load(Ordering::SeqCst)
        }

        /// Number of explicit or failure-induced rollbacks so far
        pub fn rollbacks(&self) -> usize {
            self.counters.rollbacks.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockBankStore {}

    #[async_trait]
    impl HealthCheckable for MockBankStore {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.failure == FailureMode::Unavailable {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };

            HealthCheckResult {
                adapter_id: "mock-bank-store".to_string(),
                status,
                latency_ms: 0,
                message: Some("In-memory store".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl BankRecordStore for MockBankStore {
        async fn begin(&self) -> Result<Box<dyn BankRecordSession>, PortError> {
            if self.failure == FailureMode::Unavailable {
                return Err(PortError::connection("mock store unavailable"));
            }

            self.counters.sessions.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockBankSession {
                records: Arc::clone(&self.records),
                counters: Arc::clone(&self.counters),
                failure: self.failure,
                staged: BTreeMap::new(),
            }))
        }
    }

    /// Session over the mock store
    ///
    /// Writes are staged and only applied to the shared map on commit.
    /// `Some` stages an insert, `None` a delete.
    #[derive(Debug)]
    pub struct MockBankSession {
        records: Arc<RwLock<BTreeMap<String, BankRecord>>>,
        counters: Arc<Counters>,
        failure: FailureMode,
        staged: BTreeMap<String, Option<BankRecord>>,
    }

    impl MockBankSession {
        /// Committed records overlaid with this session's staged writes
        async fn view(&self) -> BTreeMap<String, BankRecord> {
            let mut view = self.records.read().await.clone();
            for (code, change) in &self.staged {
                match change {
                    Some(record) => {
                        view.insert(code.clone(), record.clone());
                    }
                    None => {
                        view.remove(code);
                    }
                }
            }
            view
        }

        fn check_writable(&self) -> Result<(), PortError> {
            if self.failure == FailureMode::OnWrite {
                return Err(PortError::internal("simulated write failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BankRecordSession for MockBankSession {
        async fn get(&mut self, code: &SwiftCode) -> Result<Option<BankRecord>, PortError> {
            if let Some(change) = self.staged.get(code.as_str()) {
                return Ok(change.clone());
            }
            Ok(self.records.read().await.get(code.as_str()).cloned())
        }

        async fn query_by_country(
            &mut self,
            country: &CountryCode,
        ) -> Result<Vec<BankRecord>, PortError> {
            Ok(self
                .view()
                .await
                .into_values()
                .filter(|record| record.country_iso2() == country)
                .collect())
        }

        async fn query_by_prefix(
            &mut self,
            prefix: &str,
            exclude: &SwiftCode,
        ) -> Result<Vec<BankRecord>, PortError> {
            Ok(self
                .view()
                .await
                .into_values()
                .filter(|record| matches_prefix(record.swift_code(), prefix, exclude))
                .collect())
        }

        async fn insert(&mut self, record: &BankRecord) -> Result<(), PortError> {
            self.check_writable()?;
            let code = record.swift_code().to_string();
            if self.view().await.contains_key(&code) {
                return Err(PortError::conflict(format!("duplicate key {}", code)));
            }
            self.staged.insert(code, Some(record.clone()));
            Ok(())
        }

        async fn delete(&mut self, record: &BankRecord) -> Result<(), PortError> {
            self.check_writable()?;
            let code = record.swift_code().to_string();
            if self.failure == FailureMode::DeletedConcurrently
                || !self.view().await.contains_key(&code)
            {
                return Err(PortError::not_found("SwiftCode", code));
            }
            self.staged.insert(code, None);
            Ok(())
        }

        async fn commit(self: Box<Self>) -> Result<(), PortError> {
            let MockBankSession { records, counters, failure, staged } = *self;

            if failure == FailureMode::OnCommit && !staged.is_empty() {
                counters.rollbacks.fetch_add(1, Ordering::SeqCst);
                return Err(PortError::internal("simulated commit failure"));
            }

            let mut stored = records.write().await;

            // Another session may have committed the same key since we staged it
            for (code, change) in &staged {
                if change.is_some() && stored.contains_key(code) {
                    counters.rollbacks.fetch_add(1, Ordering::SeqCst);
                    return Err(PortError::conflict(format!("duplicate key {}", code)));
                }
            }

            for (code, change) in staged {
                match change {
                    Some(record) => {
                        stored.insert(code, record);
                    }
                    None => {
                        stored.remove(&code);
                    }
                }
            }

            counters.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), PortError> {
            self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
