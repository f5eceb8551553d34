//! Role-based authorization for RehabDesk Engine
//!
//! This module implements the engine's access control:
//! - A static role → permission table as the single source of truth
//! - A permission guard evaluating single / any-of / all-of requirements
//! - A self-or-permission variant for resources owned by the caller
//! - Distinct unauthenticated vs. denied outcomes
//!
//! # Core Concepts
//!
//! - **Permission**: a token granting access to one capability (e.g. `manage_patients`)
//! - **Role**: a named bundle of default permissions assigned to a user
//! - **Caller**: the authenticated identity a request carries: user id, role,
//!   and effective permission set (role defaults plus per-user grants)
//!
//! The `admin` role passes every check regardless of its stored permission
//! set.
//!
//! # Example
//!
//! ```rust
//! use auth_rbac::{CallerIdentity, Permission, PermissionGuard, Role};
//! use uuid::Uuid;
//!
//! let guard = PermissionGuard::new();
//! let nurse = CallerIdentity::new(Uuid::new_v4(), Role::Nurse, []);
//!
//! assert!(guard.check(Some(&nurse), Permission::ViewPatients).is_ok());
//! assert!(guard.check(Some(&nurse), Permission::ManagePatients).is_err());
//! ```

pub mod error;
pub mod guard;
pub mod models;
pub mod table;

pub use error::*;
pub use guard::*;
pub use models::*;
pub use table::*;
