//! PostgreSQL Bank Record Store
//!
//! Implements the directory's `BankRecordStore` port on top of the
//! `swift_codes` table. Each session wraps one database transaction: reads
//! and writes run inside it, `commit` commits it, and dropping the session
//! rolls it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::PostgresBankStore;
//! use domain_directory::{BankRecordStore, DirectoryService, DirectoryConfig};
//!
//! let store: Arc<dyn BankRecordStore> = Arc::new(PostgresBankStore::new(pool));
//! let service = DirectoryService::new(store, DirectoryConfig::default());
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CountryCode, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    SwiftCode,
};
use domain_directory::{BankRecord, BankRecordSession, BankRecordStore, NewBankRecord};

use crate::error::DatabaseError;
use crate::repositories::{NewSwiftCodeRow, SwiftCodeRepository, SwiftCodeRow};

/// PostgreSQL-backed implementation of the BankRecordStore port
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - unique violations -> `PortError::Conflict`
/// - missing rows on delete -> `PortError::NotFound`
/// - connection and pool problems -> `PortError::Connection`
/// - rows that fail domain validation -> `PortError::Transformation`
/// - other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresBankStore {
    pool: PgPool,
}

impl PostgresBankStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresBankStore {}

#[async_trait]
impl HealthCheckable for PostgresBankStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-bank-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-bank-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl BankRecordStore for PostgresBankStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn BankRecordSession>, PortError> {
        let tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        Ok(Box::new(PostgresBankSession { tx }))
    }
}

/// One transaction against the `swift_codes` table
pub struct PostgresBankSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BankRecordSession for PostgresBankSession {
    #[instrument(skip(self), fields(swift_code = %code))]
    async fn get(&mut self, code: &SwiftCode) -> Result<Option<BankRecord>, PortError> {
        SwiftCodeRepository::find_by_code(&mut self.tx, code.as_str())
            .await?
            .map(row_to_record)
            .transpose()
    }

    #[instrument(skip(self), fields(country = %country))]
    async fn query_by_country(
        &mut self,
        country: &CountryCode,
    ) -> Result<Vec<BankRecord>, PortError> {
        SwiftCodeRepository::find_by_country(&mut self.tx, country.as_str())
            .await?
            .into_iter()
            .map(row_to_record)
            .collect()
    }

    #[instrument(skip(self), fields(exclude = %exclude))]
    async fn query_by_prefix(
        &mut self,
        prefix: &str,
        exclude: &SwiftCode,
    ) -> Result<Vec<BankRecord>, PortError> {
        SwiftCodeRepository::find_by_prefix(&mut self.tx, prefix, exclude.as_str())
            .await?
            .into_iter()
            .map(row_to_record)
            .collect()
    }

    #[instrument(skip(self, record), fields(swift_code = %record.swift_code()))]
    async fn insert(&mut self, record: &BankRecord) -> Result<(), PortError> {
        SwiftCodeRepository::insert(&mut self.tx, record_to_row(record)).await?;
        debug!("Staged insert");
        Ok(())
    }

    #[instrument(skip(self, record), fields(swift_code = %record.swift_code()))]
    async fn delete(&mut self, record: &BankRecord) -> Result<(), PortError> {
        SwiftCodeRepository::delete(&mut self.tx, record.swift_code().as_str()).await?;
        debug!("Staged delete");
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), PortError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(())
    }
}

fn record_to_row(record: &BankRecord) -> NewSwiftCodeRow<'_> {
    NewSwiftCodeRow {
        swift_code: record.swift_code().as_str(),
        bank_name: record.bank_name(),
        address: record.address(),
        country_iso2: record.country_iso2().as_str(),
        country_name: record.country_name(),
        is_headquarter: record.is_headquarter(),
    }
}

/// Rebuilds a domain record, re-checking the stored flag against the code
fn row_to_record(row: SwiftCodeRow) -> Result<BankRecord, PortError> {
    let code = row.swift_code.clone();
    BankRecord::create(NewBankRecord {
        swift_code: row.swift_code,
        bank_name: row.bank_name,
        address: row.address,
        country_iso2: row.country_iso2,
        country_name: row.country_name,
        is_headquarter: Some(row.is_headquarter),
    })
    .map_err(|e| DatabaseError::InvalidRow(format!("{}: {}", code, e)).into())
}
