//! SWIFT code repository
//!
//! SQL access to the `swift_codes` table. Every function runs on a borrowed
//! connection so that callers decide the transaction boundary; the record
//! store passes its open transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgConnection};
use tracing::debug;

use crate::error::DatabaseError;

const SELECT_COLUMNS: &str = "SELECT swift_code, bank_name, address, country_iso2, \
     country_name, is_headquarter, created_at FROM swift_codes";

/// A stored `swift_codes` row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SwiftCodeRow {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub created_at: DateTime<Utc>,
}

/// Column values for a new row
#[derive(Debug, Clone, Copy)]
pub struct NewSwiftCodeRow<'a> {
    pub swift_code: &'a str,
    pub bank_name: &'a str,
    pub address: &'a str,
    pub country_iso2: &'a str,
    pub country_name: &'a str,
    pub is_headquarter: bool,
}

/// Repository functions for the `swift_codes` table
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftCodeRepository;

impl SwiftCodeRepository {
    /// Fetches a row by its exact code
    pub async fn find_by_code(
        conn: &mut PgConnection,
        swift_code: &str,
    ) -> Result<Option<SwiftCodeRow>, DatabaseError> {
        let row = sqlx::query_as::<_, SwiftCodeRow>(&format!(
            "{} WHERE swift_code = $1",
            SELECT_COLUMNS
        ))
        .bind(swift_code)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Fetches every row of a country, ordered by code
    pub async fn find_by_country(
        conn: &mut PgConnection,
        country_iso2: &str,
    ) -> Result<Vec<SwiftCodeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, SwiftCodeRow>(&format!(
            "{} WHERE country_iso2 = $1 ORDER BY swift_code",
            SELECT_COLUMNS
        ))
        .bind(country_iso2)
        .fetch_all(&mut *conn)
        .await?;

        debug!(country_iso2, count = rows.len(), "Loaded rows by country");
        Ok(rows)
    }

    /// Fetches rows whose first 8 characters equal `prefix`, except `exclude`
    ///
    /// Matches the `left(swift_code, 8)` expression index.
    pub async fn find_by_prefix(
        conn: &mut PgConnection,
        prefix: &str,
        exclude: &str,
    ) -> Result<Vec<SwiftCodeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, SwiftCodeRow>(&format!(
            "{} WHERE left(swift_code, 8) = $1 AND swift_code <> $2 ORDER BY swift_code",
            SELECT_COLUMNS
        ))
        .bind(prefix)
        .bind(exclude)
        .fetch_all(&mut *conn)
        .await?;

        debug!(prefix, count = rows.len(), "Loaded rows by prefix");
        Ok(rows)
    }

    /// Inserts a row
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` when the code is already stored
    pub async fn insert(
        conn: &mut PgConnection,
        row: NewSwiftCodeRow<'_>,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO swift_codes
                (swift_code, bank_name, address, country_iso2, country_name, is_headquarter)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.swift_code)
        .bind(row.bank_name)
        .bind(row.address)
        .bind(row.country_iso2)
        .bind(row.country_name)
        .bind(row.is_headquarter)
        .execute(&mut *conn)
        .await
        .map_err(|e| match DatabaseError::from(&e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("SwiftCode", "swift_code", row.swift_code)
            }
            other => other,
        })?;

        Ok(())
    }

    /// Deletes a row by code
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no row was removed
    pub async fn delete(conn: &mut PgConnection, swift_code: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM swift_codes WHERE swift_code = $1")
            .bind(swift_code)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("SwiftCode", swift_code));
        }
        Ok(())
    }

    /// Counts all rows
    pub async fn count(conn: &mut PgConnection) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM swift_codes")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}
