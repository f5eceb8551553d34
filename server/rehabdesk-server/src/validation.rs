//! Request validation utilities for consistent validation across handlers
//!
//! Provides a `RequestValidation` trait and helper macros so create/update
//! payloads validate the same way everywhere and produce field-level
//! messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implemented by every create/update request type; handlers call
/// `validate()` before the permission guard and the store are involved.
pub trait RequestValidation {
    /// Returns `Ok(())` when the payload is acceptable, or a validation
    /// `ApiError` naming the offending field otherwise
    fn validate(&self) -> Result<(), ApiError>;
}

/// Validate a field with a custom predicate
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Validate a required (non-empty after trim) string field
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Validate an amount-like decimal is strictly positive
#[macro_export]
macro_rules! validate_positive {
    ($field:expr, $message:expr) => {
        validate_field!($field, $field > rust_decimal::Decimal::ZERO, $message);
    };
}

/// Validate an amount-like decimal is not negative
#[macro_export]
macro_rules! validate_non_negative {
    ($field:expr, $message:expr) => {
        validate_field!($field, $field >= rust_decimal::Decimal::ZERO, $message);
    };
}

/// Validate a numeric range, inclusive on both ends
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        validate_field!($field, $field >= $min && $field <= $max, $message);
    };
}
