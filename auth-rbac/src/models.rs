use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::table::role_permissions;

/// Roles assignable to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
    Accountant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Receptionist => "receptionist",
            Self::Accountant => "accountant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "doctor" => Some(Self::Doctor),
            "nurse" => Some(Self::Nurse),
            "receptionist" => Some(Self::Receptionist),
            "accountant" => Some(Self::Accountant),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permission tokens, one per capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewPatients,
    ManagePatients,
    ViewStaff,
    ManageStaff,
    ViewFinance,
    ManageFinance,
    ViewPayroll,
    ManagePayroll,
    ViewUsers,
    ManageUsers,
    ViewReports,
    ManageSettings,
    ManageDatabase,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewPatients => "view_patients",
            Self::ManagePatients => "manage_patients",
            Self::ViewStaff => "view_staff",
            Self::ManageStaff => "manage_staff",
            Self::ViewFinance => "view_finance",
            Self::ManageFinance => "manage_finance",
            Self::ViewPayroll => "view_payroll",
            Self::ManagePayroll => "manage_payroll",
            Self::ViewUsers => "view_users",
            Self::ManageUsers => "manage_users",
            Self::ViewReports => "view_reports",
            Self::ManageSettings => "manage_settings",
            Self::ManageDatabase => "manage_database",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "view_patients" => Some(Self::ViewPatients),
            "manage_patients" => Some(Self::ManagePatients),
            "view_staff" => Some(Self::ViewStaff),
            "manage_staff" => Some(Self::ManageStaff),
            "view_finance" => Some(Self::ViewFinance),
            "manage_finance" => Some(Self::ManageFinance),
            "view_payroll" => Some(Self::ViewPayroll),
            "manage_payroll" => Some(Self::ManagePayroll),
            "view_users" => Some(Self::ViewUsers),
            "manage_users" => Some(Self::ManageUsers),
            "view_reports" => Some(Self::ViewReports),
            "manage_settings" => Some(Self::ManageSettings),
            "manage_database" => Some(Self::ManageDatabase),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated identity a request carries
///
/// The permission set is effective: role defaults unioned with any per-user
/// grants stored on the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: Uuid,
    pub role: Role,
    pub permissions: HashSet<Permission>,
}

impl CallerIdentity {
    /// Build a caller with role defaults plus extra per-user grants
    pub fn new(user_id: Uuid, role: Role, extra: impl IntoIterator<Item = Permission>) -> Self {
        let mut permissions: HashSet<Permission> = role_permissions(role).iter().copied().collect();
        permissions.extend(extra);
        Self {
            user_id,
            role,
            permissions,
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
