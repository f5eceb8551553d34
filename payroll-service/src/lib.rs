//! Payroll service for RehabDesk Engine
//!
//! Covers the money side of staffing:
//! - Monthly payroll records with a derived net salary that is recomputed on
//!   every write touching an input
//! - Salary advances repaid in fixed monthly installments
//! - One-off bonuses and deductions
//!
//! The net formula is `base + bonuses - advances - deductions` with no floor:
//! a pathological input set produces a negative net and it is preserved
//! rather than corrected.

pub mod advance;
pub mod compensation;
pub mod error;
pub mod service;

pub use advance::*;
pub use compensation::*;
pub use error::*;
pub use service::*;
