use tracing::debug;
use uuid::Uuid;

use crate::error::{AccessError, AccessResult};
use crate::models::{CallerIdentity, Permission, Role};

/// Permission guard evaluating access requirements against a caller
///
/// Decision order, identical for every variant:
/// 1. Missing caller → `Unauthorized`
/// 2. Admin role → allow
/// 3. Requirement resolved against the caller's effective permission set
///
/// The guard is invoked at the boundary of every mutating and most read
/// operations; on denial the operation short-circuits before the record
/// store is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGuard;

impl PermissionGuard {
    pub fn new() -> Self {
        Self
    }

    /// Require a single permission
    pub fn check(&self, caller: Option<&CallerIdentity>, required: Permission) -> AccessResult {
        let caller = self.authenticated(caller)?;
        if caller.role == Role::Admin {
            return Ok(());
        }
        debug!(
            user_id = %caller.user_id,
            role = %caller.role,
            required = %required,
            "checking permission"
        );
        if caller.has(required) {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                required: required.to_string(),
            })
        }
    }

    /// Require any one of the listed permissions
    pub fn check_any(
        &self,
        caller: Option<&CallerIdentity>,
        required: &[Permission],
    ) -> AccessResult {
        let caller = self.authenticated(caller)?;
        if caller.role == Role::Admin {
            return Ok(());
        }
        if required.iter().any(|p| caller.has(*p)) {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                required: Self::join(required),
            })
        }
    }

    /// Require every one of the listed permissions
    pub fn check_all(
        &self,
        caller: Option<&CallerIdentity>,
        required: &[Permission],
    ) -> AccessResult {
        let caller = self.authenticated(caller)?;
        if caller.role == Role::Admin {
            return Ok(());
        }
        if required.iter().all(|p| caller.has(*p)) {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                required: Self::join(required),
            })
        }
    }

    /// Allow when the caller owns the target resource, otherwise require the
    /// permission
    pub fn check_self_or(
        &self,
        caller: Option<&CallerIdentity>,
        owner_id: Uuid,
        required: Permission,
    ) -> AccessResult {
        let identified = self.authenticated(caller)?;
        if identified.user_id == owner_id {
            debug!(user_id = %identified.user_id, "self access granted");
            return Ok(());
        }
        self.check(caller, required)
    }

    /// Require any authenticated caller, with no permission constraint
    pub fn check_authenticated(&self, caller: Option<&CallerIdentity>) -> AccessResult {
        self.authenticated(caller).map(|_| ())
    }

    fn authenticated<'a>(
        &self,
        caller: Option<&'a CallerIdentity>,
    ) -> Result<&'a CallerIdentity, AccessError> {
        caller.ok_or(AccessError::Unauthorized)
    }

    fn join(required: &[Permission]) -> String {
        required
            .iter()
            .map(Permission::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> CallerIdentity {
        CallerIdentity::new(Uuid::new_v4(), role, [])
    }

    #[test]
    fn missing_caller_is_unauthorized_not_forbidden() {
        let guard = PermissionGuard::new();
        assert_eq!(
            guard.check(None, Permission::ViewPatients),
            Err(AccessError::Unauthorized)
        );
        assert_eq!(guard.check_authenticated(None), Err(AccessError::Unauthorized));
    }

    #[test]
    fn admin_passes_every_check_even_with_empty_grants() {
        let guard = PermissionGuard::new();
        let admin = CallerIdentity {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            permissions: Default::default(),
        };
        for p in crate::table::ALL_PERMISSIONS {
            assert!(guard.check(Some(&admin), p).is_ok());
        }
        assert!(guard
            .check_all(Some(&admin), &crate::table::ALL_PERMISSIONS)
            .is_ok());
    }

    #[test]
    fn nurse_denied_manage_allowed_view() {
        let guard = PermissionGuard::new();
        let nurse = caller(Role::Nurse);
        assert!(guard.check(Some(&nurse), Permission::ViewPatients).is_ok());
        assert_eq!(
            guard.check(Some(&nurse), Permission::ManagePatients),
            Err(AccessError::Forbidden {
                required: "manage_patients".to_string()
            })
        );
    }

    #[test]
    fn any_of_intersects_all_of_requires_superset() {
        let guard = PermissionGuard::new();
        let accountant = caller(Role::Accountant);
        assert!(guard
            .check_any(
                Some(&accountant),
                &[Permission::ManageUsers, Permission::ViewFinance]
            )
            .is_ok());
        assert!(guard
            .check_all(
                Some(&accountant),
                &[Permission::ViewFinance, Permission::ManageFinance]
            )
            .is_ok());
        assert!(guard
            .check_all(
                Some(&accountant),
                &[Permission::ViewFinance, Permission::ManageUsers]
            )
            .is_err());
    }

    #[test]
    fn self_access_bypasses_permission_check() {
        let guard = PermissionGuard::new();
        let nurse = caller(Role::Nurse);
        assert!(guard
            .check_self_or(Some(&nurse), nurse.user_id, Permission::ViewUsers)
            .is_ok());
        assert!(guard
            .check_self_or(Some(&nurse), Uuid::new_v4(), Permission::ViewUsers)
            .is_err());
    }
}
