//! Bulk import of spreadsheet rows
//!
//! Rows come from the published SWIFT directory export. Each row runs through
//! the same validation as a created record, with the headquarter flag always
//! derived from the code. Rows that fail validation or repeat a code are
//! skipped and reported; everything else is written in a single session.
//!
//! Branches are accepted without their headquarters, since the export is not
//! ordered.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::bank::{BankRecord, NewBankRecord};
use crate::error::DirectoryError;
use crate::services::DirectoryService;

/// Column headers the export must carry
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "COUNTRY ISO2 CODE",
    "SWIFT CODE",
    "NAME",
    "ADDRESS",
    "TOWN NAME",
    "COUNTRY NAME",
];

/// Returns the required columns absent from `headers`
pub fn missing_columns<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = headers.into_iter().map(str::trim).collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect()
}

/// One row of the export
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ImportRow {
    #[serde(rename = "COUNTRY ISO2 CODE")]
    pub country_iso2: String,
    #[serde(rename = "SWIFT CODE")]
    pub swift_code: String,
    #[serde(rename = "NAME")]
    pub bank_name: String,
    #[serde(rename = "ADDRESS", default)]
    pub address: String,
    /// Carried by the export, not stored
    #[serde(rename = "TOWN NAME", default)]
    pub town_name: String,
    #[serde(rename = "COUNTRY NAME")]
    pub country_name: String,
}

impl From<ImportRow> for NewBankRecord {
    fn from(row: ImportRow) -> Self {
        NewBankRecord {
            swift_code: row.swift_code,
            bank_name: row.bank_name,
            address: row.address,
            country_iso2: row.country_iso2,
            country_name: row.country_name,
            is_headquarter: None,
        }
    }
}

/// Why a row was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Invalid(String),
    DuplicateInFile,
    AlreadyStored,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Invalid(message) => write!(f, "{}", message),
            SkipReason::DuplicateInFile => write!(f, "duplicate SWIFT code in file"),
            SkipReason::AlreadyStored => write!(f, "SWIFT code already stored"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Spreadsheet row number, counting the header as row 1
    pub row_number: usize,
    pub swift_code: String,
    pub reason: SkipReason,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    fn skip(&mut self, index: usize, swift_code: String, reason: SkipReason) {
        let row_number = index + 2;
        warn!(row_number, swift_code = %swift_code, reason = %reason, "Skipping import row");
        self.skipped.push(SkippedRow {
            row_number,
            swift_code,
            reason,
        });
    }
}

impl DirectoryService {
    /// Imports spreadsheet rows in one session
    ///
    /// # Errors
    ///
    /// Returns `StorageFailure` when a write or the commit fails. Nothing is
    /// stored in that case.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn import(&self, rows: Vec<ImportRow>) -> Result<ImportReport, DirectoryError> {
        let mut report = ImportReport {
            total_rows: rows.len(),
            ..ImportReport::default()
        };

        let mut accepted = Vec::new();
        let mut seen = HashSet::new();
        for (index, row) in rows.into_iter().enumerate() {
            let raw_code = row.swift_code.clone();
            match BankRecord::create(row.into()) {
                Ok(record) => {
                    if seen.insert(record.swift_code().clone()) {
                        accepted.push((index, record));
                    } else {
                        report.skip(index, raw_code, SkipReason::DuplicateInFile);
                    }
                }
                Err(e) => report.skip(index, raw_code, SkipReason::Invalid(e.to_string())),
            }
        }

        let mut session = self.begin().await?;
        for (index, record) in accepted {
            let code = record.swift_code().clone();
            if session.get(&code).await?.is_some() {
                report.skip(index, code.into_inner(), SkipReason::AlreadyStored);
                continue;
            }
            if let Err(e) = session.insert(&record).await {
                if let Err(rollback_error) = session.rollback().await {
                    error!(error = %rollback_error, "Rollback failed");
                }
                error!(swift_code = %code, error = %e, "Import insert failed");
                return Err(DirectoryError::StorageFailure(e.to_string()));
            }
            report.inserted += 1;
        }

        session.commit().await.map_err(|e| {
            error!(error = %e, "Import commit failed");
            DirectoryError::StorageFailure(e.to_string())
        })?;

        report.skipped.sort_by_key(|skipped| skipped.row_number);
        info!(
            total = report.total_rows,
            inserted = report.inserted,
            skipped = report.skipped.len(),
            "Import finished"
        );
        Ok(report)
    }
}
