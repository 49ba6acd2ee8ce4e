//! SWIFT Directory Domain
//!
//! This crate holds the bank identifier directory: validated bank records,
//! the headquarter/branch relationship and the operations the API exposes.
//!
//! # Headquarters and branches
//!
//! A SWIFT code ending in `XXX` identifies a headquarters. Any other code is a
//! branch, and belongs to the headquarters sharing its first 8 characters:
//!
//! - `CITIPLPPXXX` - headquarters
//! - `CITIPLPP123` - branch of `CITIPLPPXXX`
//! - `CITIPLPPABC` - branch of `CITIPLPPXXX`
//!
//! No parent reference is stored; [`resolver`] recomputes the relationship
//! from the record store on every read.
//!
//! # Examples
//!
//! ```rust
//! use domain_directory::{BankRecord, NewBankRecord};
//!
//! let record = BankRecord::create(NewBankRecord {
//!     swift_code: "citiplppxxx".to_string(),
//!     bank_name: "Citibank Europe plc".to_string(),
//!     address: "Senatorska 16, Warszawa".to_string(),
//!     country_iso2: "pl".to_string(),
//!     country_name: "Poland".to_string(),
//!     is_headquarter: None,
//! })
//! .unwrap();
//!
//! assert_eq!(record.swift_code().as_str(), "CITIPLPPXXX");
//! assert_eq!(record.bank_name(), "CITIBANK EUROPE PLC");
//! assert!(record.is_headquarter());
//! ```

pub mod bank;
pub mod error;
pub mod import;
pub mod normalize;
pub mod ports;
pub mod resolver;
pub mod services;

pub use bank::{resolve_headquarter_flag, BankRecord, NewBankRecord};
pub use error::DirectoryError;
pub use import::{missing_columns, ImportReport, ImportRow, SkipReason, SkippedRow, REQUIRED_COLUMNS};
pub use normalize::{normalize_required_text, normalize_text, RequiredField};
pub use ports::{BankRecordSession, BankRecordStore};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{FailureMode, MockBankStore};
pub use services::{
    Confirmation, CountryLookup, DirectoryConfig, DirectoryService, SwiftCodeLookup,
};
