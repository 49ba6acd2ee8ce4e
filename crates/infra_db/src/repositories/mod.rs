//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! plain row types. They hold no connection of their own; callers pass the
//! connection or transaction to run on.

pub mod swift_codes;

pub use swift_codes::{NewSwiftCodeRow, SwiftCodeRepository, SwiftCodeRow};
