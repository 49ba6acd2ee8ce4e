//! Request and response bodies

pub mod swift_codes;
