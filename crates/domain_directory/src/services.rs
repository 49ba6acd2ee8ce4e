//! Directory application service
//!
//! `DirectoryService` implements the four directory operations against a
//! [`BankRecordStore`]:
//!
//! - fetch a record by SWIFT code, with branches for headquarters
//! - fetch every record of a country
//! - create a record
//! - delete a record
//!
//! Every operation validates its input before opening a session, so malformed
//! requests never reach the store. Each operation uses exactly one session
//! and ends it on every path: explicitly through commit or rollback, or by
//! dropping it on early return.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use core_kernel::{CountryCode, HealthCheckResult, PortError, SwiftCode};

use crate::bank::{BankRecord, NewBankRecord};
use crate::error::DirectoryError;
use crate::ports::{BankRecordSession, BankRecordStore};
use crate::resolver::{find_branches, find_headquarter_for};

/// Behavior switches for the directory service
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Reject branches whose headquarters is not stored yet
    pub require_headquarter_for_branches: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            require_headquarter_for_branches: true,
        }
    }
}

/// Result of a lookup by SWIFT code
///
/// `branches` is `Some` exactly when the record is a headquarters. A
/// headquarters without branches carries `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftCodeLookup {
    pub record: BankRecord,
    pub branches: Option<Vec<BankRecord>>,
}

/// Result of a lookup by country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLookup {
    pub country_iso2: CountryCode,
    /// Country name of the first matching record
    pub country_name: String,
    pub records: Vec<BankRecord>,
}

/// Confirmation returned by create and delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn created(code: &SwiftCode) -> Self {
        Self {
            message: format!("SWIFT code {} added successfully", code),
        }
    }

    pub fn deleted(code: &SwiftCode) -> Self {
        Self {
            message: format!("SWIFT code {} deleted successfully", code),
        }
    }
}

/// Application service for the SWIFT directory
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn BankRecordStore>,
    config: DirectoryConfig,
}

impl DirectoryService {
    /// Creates a service over `store`
    ///
    /// # Arguments
    ///
    /// * `store` - The record store adapter
    /// * `config` - Behavior switches, fixed for the service's lifetime
    pub fn new(store: Arc<dyn BankRecordStore>, config: DirectoryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Reports the health of the underlying store
    pub async fn health(&self) -> HealthCheckResult {
        self.store.health_check().await
    }

    /// Fetches a record by SWIFT code
    ///
    /// Headquarters come back with their branches; branches come back with
    /// `branches: None`.
    ///
    /// # Errors
    ///
    /// * `InvalidFormat` - malformed code
    /// * `NotFound` - no record with this code
    #[instrument(skip(self))]
    pub async fn fetch_by_code(&self, raw_code: &str) -> Result<SwiftCodeLookup, DirectoryError> {
        let code = parse_code(raw_code)?;
        let mut session = self.begin().await?;

        let record = session
            .get(&code)
            .await?
            .ok_or_else(|| DirectoryError::code_not_found(&code))?;

        let branches = if record.is_headquarter() {
            Some(find_branches(session.as_mut(), record.swift_code()).await?)
        } else {
            None
        };

        session.commit().await?;

        debug!(
            swift_code = %code,
            branches = branches.as_ref().map(Vec::len),
            "Fetched SWIFT code"
        );
        Ok(SwiftCodeLookup { record, branches })
    }

    /// Fetches every record registered in a country
    ///
    /// # Errors
    ///
    /// * `InvalidFormat` - malformed country code
    /// * `NotFound` - no records for the country
    #[instrument(skip(self))]
    pub async fn fetch_by_country(&self, raw_country: &str) -> Result<CountryLookup, DirectoryError> {
        let country = CountryCode::parse(raw_country).map_err(|e| {
            warn!(country = raw_country, error = %e, "Country code validation failed");
            DirectoryError::from(e)
        })?;

        let mut session = self.begin().await?;
        let records = session.query_by_country(&country).await?;
        session.commit().await?;

        let country_name = records
            .first()
            .map(|record| record.country_name().to_string())
            .ok_or_else(|| DirectoryError::country_not_found(&country))?;

        debug!(country = %country, count = records.len(), "Fetched country SWIFT codes");
        Ok(CountryLookup {
            country_iso2: country,
            country_name,
            records,
        })
    }

    /// Creates a record
    ///
    /// # Errors
    ///
    /// * `InvalidFormat`, `EmptyField`, `HeadquarterMismatch` - invalid input,
    ///   reported before the store is touched
    /// * `AlreadyExists` - the code is taken, including when a concurrent
    ///   request committed it first
    /// * `MissingHeadquarter` - a branch whose headquarters is not stored
    /// * `StorageFailure` - insert or commit failed; the session is rolled back
    #[instrument(skip(self, input), fields(swift_code = %input.swift_code))]
    pub async fn create(&self, input: NewBankRecord) -> Result<Confirmation, DirectoryError> {
        let record = BankRecord::create(input).map_err(|e| {
            warn!(error = %e, "SWIFT code payload validation failed");
            e
        })?;
        let code = record.swift_code().clone();

        let mut session = self.begin().await?;

        if session.get(&code).await?.is_some() {
            warn!(swift_code = %code, "SWIFT code already exists");
            return Err(DirectoryError::AlreadyExists(code));
        }

        if !record.is_headquarter() && self.config.require_headquarter_for_branches {
            let headquarter = find_headquarter_for(session.as_mut(), &code).await?;
            if headquarter.is_none() {
                warn!(swift_code = %code, "Headquarter missing for branch");
                return Err(DirectoryError::MissingHeadquarter {
                    headquarter: code.headquarter_code(),
                    branch: code,
                });
            }
        }

        if let Err(e) = session.insert(&record).await {
            return Err(abort(session, &code, e).await);
        }
        session.commit().await.map_err(|e| write_failure(&code, e))?;

        info!(
            swift_code = %code,
            is_headquarter = record.is_headquarter(),
            "SWIFT code created"
        );
        Ok(Confirmation::created(&code))
    }

    /// Deletes a record
    ///
    /// Deleting a headquarters leaves its branches in place.
    ///
    /// # Errors
    ///
    /// * `InvalidFormat` - malformed code
    /// * `NotFound` - no record with this code
    /// * `StorageFailure` - delete or commit failed
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_code: &str) -> Result<Confirmation, DirectoryError> {
        let code = parse_code(raw_code)?;
        let mut session = self.begin().await?;

        let record = session
            .get(&code)
            .await?
            .ok_or_else(|| DirectoryError::code_not_found(&code))?;

        if let Err(e) = session.delete(&record).await {
            return Err(abort(session, &code, e).await);
        }
        session.commit().await.map_err(|e| write_failure(&code, e))?;

        info!(swift_code = %code, "SWIFT code deleted");
        Ok(Confirmation::deleted(&code))
    }

    pub(crate) async fn begin(&self) -> Result<Box<dyn BankRecordSession>, DirectoryError> {
        self.store.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open store session");
            DirectoryError::from(e)
        })
    }
}

fn parse_code(raw_code: &str) -> Result<SwiftCode, DirectoryError> {
    SwiftCode::parse(raw_code).map_err(|e| {
        warn!(swift_code = raw_code, error = %e, "SWIFT code validation failed");
        DirectoryError::from(e)
    })
}

/// Maps a failed write
///
/// Conflicts and vanished rows mean another writer got there first.
fn write_failure(code: &SwiftCode, error: PortError) -> DirectoryError {
    if error.is_conflict() {
        warn!(swift_code = %code, error = %error, "Concurrent write conflict");
        return DirectoryError::AlreadyExists(code.clone());
    }
    if error.is_not_found() {
        warn!(swift_code = %code, error = %error, "Record removed by a concurrent write");
        return DirectoryError::code_not_found(code);
    }
    error!(swift_code = %code, error = %error, "Store write failed");
    DirectoryError::StorageFailure(error.to_string())
}

/// Rolls the session back, then maps the write error
async fn abort(
    session: Box<dyn BankRecordSession>,
    code: &SwiftCode,
    error: PortError,
) -> DirectoryError {
    if let Err(rollback_error) = session.rollback().await {
        error!(swift_code = %code, error = %rollback_error, "Rollback failed");
    }
    write_failure(code, error)
}
