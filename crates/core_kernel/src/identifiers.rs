//! Strongly-typed identifiers for directory entities
//!
//! SWIFT (BIC) codes and ISO 3166-1 alpha-2 country codes are wrapped in
//! newtypes that can only be constructed through validation. Holding a
//! `SwiftCode` therefore proves the value is uppercase, trimmed and
//! well-formed.
//!
//! # SWIFT code layout
//!
//! ```text
//!  C I T I P L P P X X X
//! |-----------|---|-----|
//!  institution loc branch (optional)
//!   0..6      6..8  8..11
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Branch code that marks a headquarters record
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Number of leading characters shared by a headquarters and its branches
pub const BRANCH_PREFIX_LEN: usize = 8;

const SHORT_CODE_LEN: usize = 8;
const FULL_CODE_LEN: usize = 11;
const COUNTRY_CODE_LEN: usize = 2;

/// Format violations detected while validating identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Code length is neither 8 nor 11
    #[error("SWIFT code must be 8 or 11 characters long")]
    Length { actual: usize },

    /// Characters 1-6 are not all letters
    #[error("First 6 characters must be alphabetic")]
    Institution,

    /// Characters 7-8 are not alphanumeric
    #[error("Characters 7-8 must be alphanumeric")]
    Location,

    /// Characters 9-11 are not alphanumeric
    #[error("Characters 9-11 must be alphanumeric")]
    Branch,

    /// Country code is not exactly two characters
    #[error("Country code must be exactly 2 characters long")]
    CountryLength { actual: usize },

    /// Country code contains non-letters
    #[error("Country code must contain only alphabetic characters")]
    CountryAlphabet,
}

impl FormatError {
    /// Short machine-readable name of the violated rule
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::Length { .. } => "length",
            FormatError::Institution => "institution",
            FormatError::Location => "location",
            FormatError::Branch => "branch",
            FormatError::CountryLength { .. } => "country_length",
            FormatError::CountryAlphabet => "country_alphabet",
        }
    }

    /// Returns true for violations of the country code rules
    pub fn is_country_error(&self) -> bool {
        matches!(
            self,
            FormatError::CountryLength { .. } | FormatError::CountryAlphabet
        )
    }
}

/// Uppercases then strips surrounding whitespace
///
/// `str::trim` covers space, tab, newline, carriage return, form feed and
/// vertical tab, so the result is the same whichever order the two steps run.
fn normalize(raw: &str) -> String {
    raw.to_uppercase().trim().to_string()
}

/// Validates and normalizes a raw SWIFT code
///
/// # Arguments
///
/// * `raw` - The code as supplied by the caller, in any case, possibly padded
///
/// # Returns
///
/// The uppercase, trimmed code
///
/// # Errors
///
/// Returns the first violated rule, checked in order: length, institution,
/// location, branch.
///
/// # Example
///
/// ```rust
/// use core_kernel::identifiers::{validate_swift_code, FormatError};
///
/// assert_eq!(validate_swift_code(" citiplppxxx ").unwrap(), "CITIPLPPXXX");
/// assert_eq!(
///     validate_swift_code("TESTHQXXX"),
///     Err(FormatError::Length { actual: 9 })
/// );
/// ```
pub fn validate_swift_code(raw: &str) -> Result<String, FormatError> {
    let code = normalize(raw);
    let chars: Vec<char> = code.chars().collect();

    if chars.len() != SHORT_CODE_LEN && chars.len() != FULL_CODE_LEN {
        return Err(FormatError::Length { actual: chars.len() });
    }

    if !chars[..6].iter().all(char::is_ascii_alphabetic) {
        return Err(FormatError::Institution);
    }

    if !chars[6..8].iter().all(char::is_ascii_alphanumeric) {
        return Err(FormatError::Location);
    }

    if chars.len() == FULL_CODE_LEN && !chars[8..].iter().all(char::is_ascii_alphanumeric) {
        return Err(FormatError::Branch);
    }

    Ok(code)
}

/// Validates and normalizes a raw ISO 3166-1 alpha-2 country code
///
/// # Errors
///
/// Returns `FormatError::CountryLength` or `FormatError::CountryAlphabet`
pub fn validate_country_code(raw: &str) -> Result<String, FormatError> {
    let code = normalize(raw);
    let length = code.chars().count();

    if length != COUNTRY_CODE_LEN {
        return Err(FormatError::CountryLength { actual: length });
    }

    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::CountryAlphabet);
    }

    Ok(code)
}

/// A validated SWIFT/BIC code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwiftCode(String);

impl SwiftCode {
    /// Parses and normalizes a raw code
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        validate_swift_code(raw).map(Self)
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bank (institution) code, characters 1-6
    pub fn institution_code(&self) -> &str {
        &self.0[..6]
    }

    /// Location code, characters 7-8
    pub fn location_code(&self) -> &str {
        &self.0[6..8]
    }

    /// Branch code, characters 9-11, when present
    pub fn branch_code(&self) -> Option<&str> {
        (self.0.len() == FULL_CODE_LEN).then(|| &self.0[8..])
    }

    /// The leading characters shared by a headquarters and its branches
    pub fn branch_prefix(&self) -> &str {
        &self.0[..BRANCH_PREFIX_LEN]
    }

    /// Whether this code designates a headquarters
    pub fn is_headquarter(&self) -> bool {
        self.0.ends_with(HEADQUARTER_SUFFIX)
    }

    /// Derives the headquarters code for this code's prefix
    ///
    /// For a headquarters code this returns an equal code.
    pub fn headquarter_code(&self) -> SwiftCode {
        SwiftCode(format!("{}{}", self.branch_prefix(), HEADQUARTER_SUFFIX))
    }

    /// Returns the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SwiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SwiftCode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SwiftCode {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SwiftCode> for String {
    fn from(code: SwiftCode) -> String {
        code.0
    }
}

impl AsRef<str> for SwiftCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated ISO 3166-1 alpha-2 country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parses and normalizes a raw country code
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        validate_country_code(raw).map(Self)
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> String {
        code.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
