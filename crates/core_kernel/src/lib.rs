//! Core Kernel - Foundational types for the SWIFT directory
//!
//! This crate provides the building blocks shared by every layer:
//! - Validated identifier value objects (`SwiftCode`, `CountryCode`)
//! - Port infrastructure for the hexagonal architecture
//! - Common error types

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{
    SwiftCode, CountryCode, FormatError,
    validate_swift_code, validate_country_code,
    HEADQUARTER_SUFFIX, BRANCH_PREFIX_LEN,
};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
