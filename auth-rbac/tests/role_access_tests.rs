//! Front-desk and back-office access scenarios
//!
//! These tests walk through the roles the center actually staffs:
//! 1. Nurse on the ward: read-only patient and staff visibility
//! 2. Receptionist: admissions and collections, no payroll
//! 3. Accountant: finance and payroll, no user administration
//! 4. Doctor: patient management and reports, no finance
//! 5. Admin: everything, regardless of stored grants
//! 6. Per-user grants on top of role defaults

use auth_rbac::*;
use uuid::Uuid;

fn caller(role: Role) -> CallerIdentity {
    CallerIdentity::new(Uuid::new_v4(), role, [])
}

#[test]
fn test_nurse_read_only_access() {
    let guard = PermissionGuard::new();
    let nurse = caller(Role::Nurse);

    assert!(guard.check(Some(&nurse), Permission::ViewPatients).is_ok());
    assert!(guard.check(Some(&nurse), Permission::ViewStaff).is_ok());

    for denied in [
        Permission::ManagePatients,
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
    ] {
        assert_eq!(
            guard.check(Some(&nurse), denied),
            Err(AccessError::Forbidden {
                required: denied.to_string()
            }),
            "nurse must not hold {}",
            denied
        );
    }
}

#[test]
fn test_receptionist_admissions_and_collections() {
    let guard = PermissionGuard::new();
    let receptionist = caller(Role::Receptionist);

    // Front desk admits patients and records payments
    assert!(guard
        .check(Some(&receptionist), Permission::ManagePatients)
        .is_ok());
    assert!(guard
        .check(Some(&receptionist), Permission::ManageFinance)
        .is_ok());

    // But never touches payroll or user administration
    assert!(guard
        .check(Some(&receptionist), Permission::ViewPayroll)
        .is_err());
    assert!(guard
        .check(Some(&receptionist), Permission::ManageUsers)
        .is_err());
}

#[test]
fn test_accountant_finance_and_payroll() {
    let guard = PermissionGuard::new();
    let accountant = caller(Role::Accountant);

    assert!(guard
        .check_all(
            Some(&accountant),
            &[
                Permission::ViewFinance,
                Permission::ManageFinance,
                Permission::ViewPayroll,
                Permission::ManagePayroll,
                Permission::ViewReports,
            ]
        )
        .is_ok());

    // Accountants read patient records but never edit them
    assert!(guard
        .check(Some(&accountant), Permission::ViewPatients)
        .is_ok());
    assert!(guard
        .check(Some(&accountant), Permission::ManagePatients)
        .is_err());
    assert!(guard
        .check(Some(&accountant), Permission::ManageUsers)
        .is_err());
}

#[test]
fn test_doctor_patients_and_reports_no_finance() {
    let guard = PermissionGuard::new();
    let doctor = caller(Role::Doctor);

    assert!(guard
        .check(Some(&doctor), Permission::ManagePatients)
        .is_ok());
    assert!(guard.check(Some(&doctor), Permission::ViewReports).is_ok());
    assert!(guard.check(Some(&doctor), Permission::ViewStaff).is_ok());

    assert!(guard.check(Some(&doctor), Permission::ViewFinance).is_err());
    assert!(guard
        .check(Some(&doctor), Permission::ManagePayroll)
        .is_err());
}

#[test]
fn test_admin_bypasses_stored_permission_set() {
    let guard = PermissionGuard::new();

    // Admin with a deliberately empty stored set still passes everything
    let admin = CallerIdentity {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
        permissions: Default::default(),
    };

    for p in ALL_PERMISSIONS {
        assert!(
            guard.check(Some(&admin), p).is_ok(),
            "admin denied {} despite role bypass",
            p
        );
    }
    assert!(guard.check_all(Some(&admin), &ALL_PERMISSIONS).is_ok());
}

#[test]
fn test_per_user_grant_extends_role_defaults() {
    let guard = PermissionGuard::new();

    // A senior nurse granted report access on top of the nurse defaults
    let senior_nurse = CallerIdentity::new(
        Uuid::new_v4(),
        Role::Nurse,
        [Permission::ViewReports],
    );

    assert!(guard
        .check(Some(&senior_nurse), Permission::ViewReports)
        .is_ok());
    // The grant does not widen anything else
    assert!(guard
        .check(Some(&senior_nurse), Permission::ManagePatients)
        .is_err());
}

#[test]
fn test_unauthenticated_is_distinct_from_denied() {
    let guard = PermissionGuard::new();
    let nurse = caller(Role::Nurse);

    assert_eq!(
        guard.check(None, Permission::ViewPatients),
        Err(AccessError::Unauthorized)
    );
    assert!(matches!(
        guard.check(Some(&nurse), Permission::ManageFinance),
        Err(AccessError::Forbidden { .. })
    ));
}

#[test]
fn test_self_or_permission_on_own_user_record() {
    let guard = PermissionGuard::new();
    let receptionist = caller(Role::Receptionist);
    let someone_else = Uuid::new_v4();

    // Own record: allowed without view_users
    assert!(guard
        .check_self_or(Some(&receptionist), receptionist.user_id, Permission::ViewUsers)
        .is_ok());

    // Someone else's record: falls through to the permission check and fails
    assert_eq!(
        guard.check_self_or(Some(&receptionist), someone_else, Permission::ViewUsers),
        Err(AccessError::Forbidden {
            required: Permission::ViewUsers.to_string()
        })
    );

    // Admin reads anyone
    let admin = caller(Role::Admin);
    assert!(guard
        .check_self_or(Some(&admin), someone_else, Permission::ViewUsers)
        .is_ok());
}
