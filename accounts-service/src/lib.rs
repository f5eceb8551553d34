//! Patient account service for RehabDesk Engine
//!
//! Provides the financial view of a patient's stay:
//! - Account aggregation: stay days, treatment and cigarette costs, balance
//! - Payment posting that maintains the patient's running `total_paid`
//! - Facility-wide finance summaries for reporting
//!
//! Aggregation is pure: the same patient, payment list, and as-of instant
//! always produce the same summary. The balance sign convention is
//! load-bearing: positive means the patient owes, zero means settled,
//! negative means overpayment. Presentation branches on exactly those three
//! states.

pub mod account;
pub mod error;
pub mod posting;
pub mod reporting;

pub use account::*;
pub use error::*;
pub use posting::*;
pub use reporting::*;
