//! Common error handling utilities for RehabDesk Engine
//!
//! This module provides the standardized error taxonomy and error codes used
//! across all RehabDesk Engine crates. It ensures consistent error handling
//! and a stable mapping from failure conditions to API statuses.
//!
//! # Error Categories
//!
//! - **Unauthorized**: no valid caller identity on the request
//! - **Forbidden**: valid caller, insufficient permission or role
//! - **NotFound**: a referenced entity id does not exist
//! - **Validation**: input fails schema constraints
//! - **Conflict**: uniqueness or state-transition violations
//! - **Storage**: record store failures
//! - **Internal**: unexpected infrastructure failures
//!
//! Unauthorized and Forbidden are deliberately distinct: the first means the
//! caller could not be identified at all, the second means an identified
//! caller lacks the required permission.
//!
//! # Example
//!
//! ```rust
//! use error_common::{RehabDeskError, RehabDeskResult};
//!
//! fn require_positive(amount: i64) -> RehabDeskResult<i64> {
//!     if amount <= 0 {
//!         return Err(RehabDeskError::Validation(
//!             "amount must be greater than zero".to_string(),
//!         ));
//!     }
//!     Ok(amount)
//! }
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
