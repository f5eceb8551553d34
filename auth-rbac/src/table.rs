//! Static role → permission table
//!
//! Single source of truth for default access decisions. Per-route checks are
//! never re-derived elsewhere; handlers state a requirement and the guard
//! resolves it against this table (plus per-user grants).

use crate::models::{Permission, Role};

/// Every permission token the engine knows about
pub const ALL_PERMISSIONS: [Permission; 13] = [
    Permission::ViewPatients,
    Permission::ManagePatients,
    Permission::ViewStaff,
    Permission::ManageStaff,
    Permission::ViewFinance,
    Permission::ManageFinance,
    Permission::ViewPayroll,
    Permission::ManagePayroll,
    Permission::ViewUsers,
    Permission::ManageUsers,
    Permission::ViewReports,
    Permission::ManageSettings,
    Permission::ManageDatabase,
];

const DOCTOR: &[Permission] = &[
    Permission::ViewPatients,
    Permission::ManagePatients,
    Permission::ViewStaff,
    Permission::ViewReports,
];

const NURSE: &[Permission] = &[Permission::ViewPatients, Permission::ViewStaff];

const RECEPTIONIST: &[Permission] = &[
    Permission::ViewPatients,
    Permission::ManagePatients,
    Permission::ViewFinance,
    Permission::ManageFinance,
];

const ACCOUNTANT: &[Permission] = &[
    Permission::ViewPatients,
    Permission::ViewStaff,
    Permission::ViewFinance,
    Permission::ManageFinance,
    Permission::ViewPayroll,
    Permission::ManagePayroll,
    Permission::ViewReports,
];

/// Default permission set for a role
///
/// Admin holds the full set here for completeness, but the guard never
/// consults the table for admins; the role bypasses every check.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &ALL_PERMISSIONS,
        Role::Doctor => DOCTOR,
        Role::Nurse => NURSE,
        Role::Receptionist => RECEPTIONIST,
        Role::Accountant => ACCOUNTANT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_defaults_cover_every_permission() {
        let admin = role_permissions(Role::Admin);
        for p in ALL_PERMISSIONS {
            assert!(admin.contains(&p), "admin table missing {}", p);
        }
    }

    #[test]
    fn nurse_is_read_only() {
        let nurse = role_permissions(Role::Nurse);
        assert!(nurse.iter().all(|p| matches!(
            p,
            Permission::ViewPatients | Permission::ViewStaff
        )));
    }

    #[test]
    fn receptionist_handles_front_desk_and_collections() {
        let receptionist = role_permissions(Role::Receptionist);
        assert!(receptionist.contains(&Permission::ManagePatients));
        assert!(receptionist.contains(&Permission::ManageFinance));
        assert!(!receptionist.contains(&Permission::ViewPayroll));
    }
}
