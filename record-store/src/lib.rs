//! Record store for RehabDesk Engine
//!
//! Owns the domain entities (patients, payments, staff, payroll records,
//! advances, bonuses, deductions, graduates, users, settings) and the
//! repository traits the services are written against.
//!
//! The shipped implementation is an in-memory store on concurrent maps; the
//! services only ever see the traits, so a different backend slots in behind
//! the same contract. The one concurrency-sensitive operation, adjusting a
//! patient's running `total_paid`, is exposed as an atomic per-key update
//! rather than a read-then-write sequence, so concurrent payment postings
//! against the same patient never lose an update.

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use error::*;
pub use memory::*;
pub use models::*;
pub use repository::*;
