//! Headquarter/branch resolution
//!
//! The directory stores no parent reference. A branch belongs to the
//! headquarters that shares its first 8 characters, and the relationship is
//! recomputed from the store on every read.
//!
//! Two records both ending in `XXX` under one prefix cannot occur for 11
//! character codes, but an 8 character code ending in `XXX` (e.g.
//! `ABCDEXXX`) also counts as a headquarters. Such pairs are not
//! disambiguated: each sees the other as a branch.

use core_kernel::{PortError, SwiftCode};

use crate::bank::BankRecord;
use crate::ports::BankRecordSession;

/// Whether `code` starts with `prefix` and is not `exclude`
pub fn matches_prefix(code: &SwiftCode, prefix: &str, exclude: &SwiftCode) -> bool {
    code != exclude && code.as_str().starts_with(prefix)
}

/// Finds every record sharing the headquarters' 8 character prefix
///
/// The headquarters itself is excluded. Order follows the store. An empty
/// result is not an error.
pub async fn find_branches(
    session: &mut dyn BankRecordSession,
    headquarter: &SwiftCode,
) -> Result<Vec<BankRecord>, PortError> {
    session
        .query_by_prefix(headquarter.branch_prefix(), headquarter)
        .await
}

/// Looks up the headquarters a branch code would belong to
///
/// The candidate is the branch's first 8 characters followed by `XXX`.
pub async fn find_headquarter_for(
    session: &mut dyn BankRecordSession,
    branch: &SwiftCode,
) -> Result<Option<BankRecord>, PortError> {
    session.get(&branch.headquarter_code()).await
}
