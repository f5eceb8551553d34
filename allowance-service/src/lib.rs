//! Cigarette-allowance service for RehabDesk Engine
//!
//! Patients, staff, and graduates can each draw a daily cigarette
//! allowance. The cost rule is one shared lookup (none 0, half pack 25,
//! full pack 50) with a stored per-record cost taking precedence as an
//! override. This crate aggregates those allowances into the purchasing
//! statistics the facility orders against, per participant group and
//! combined.

pub mod error;
pub mod report;
pub mod stats;

pub use error::*;
pub use report::*;
pub use stats::*;
