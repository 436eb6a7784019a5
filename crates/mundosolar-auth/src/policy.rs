//! Centralized authorization policy.
//!
//! Every staff-side permission decision goes through [`authorize`]
//! instead of ad-hoc role checks inside individual handlers. Portal
//! clients are scoped by ownership checks in the services, not by this
//! table.

use mundosolar_core::error::AppError;
use mundosolar_entity::user::UserRole;

/// Resources a staff member can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Client records.
    Clients,
    /// Solar system records.
    SolarSystems,
    /// Product catalog and inventory.
    Inventory,
    /// Orders and payments.
    Orders,
    /// CFDI invoices.
    Invoices,
    /// Maintenance records.
    Maintenance,
    /// Growatt monitoring data.
    Monitoring,
    /// Staff user administration.
    Users,
    /// Dashboard and sales reports.
    Reports,
    /// Background jobs.
    Jobs,
}

/// Actions performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read/list.
    Read,
    /// Create or update.
    Write,
    /// Delete or deactivate.
    Delete,
}

/// Decide whether `role` may perform `action` on `resource`.
pub fn is_allowed(role: UserRole, resource: Resource, action: Action) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Manager => match resource {
            // Office staff run the whole business side except user admin
            // and job control.
            Resource::Users => action == Action::Read,
            Resource::Jobs => false,
            _ => true,
        },
        UserRole::Technician => match (resource, action) {
            // Technicians see their schedule and the monitoring data for
            // the sites they visit, and update maintenance status.
            (Resource::Maintenance, _) => true,
            (Resource::Monitoring, Action::Read) => true,
            (Resource::Clients, Action::Read) => true,
            (Resource::SolarSystems, Action::Read) => true,
            _ => false,
        },
    }
}

/// Enforce the policy, returning a forbidden error on denial.
pub fn authorize(role: UserRole, resource: Resource, action: Action) -> Result<(), AppError> {
    if is_allowed(role, resource, action) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{role}' may not perform this action"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allowed_everything() {
        for resource in [Resource::Users, Resource::Jobs, Resource::Orders] {
            for action in [Action::Read, Action::Write, Action::Delete] {
                assert!(is_allowed(UserRole::Admin, resource, action));
            }
        }
    }

    #[test]
    fn test_manager_cannot_administer_users_or_jobs() {
        assert!(is_allowed(UserRole::Manager, Resource::Users, Action::Read));
        assert!(!is_allowed(UserRole::Manager, Resource::Users, Action::Write));
        assert!(!is_allowed(UserRole::Manager, Resource::Jobs, Action::Read));
        assert!(is_allowed(UserRole::Manager, Resource::Orders, Action::Write));
    }

    #[test]
    fn test_technician_scope() {
        assert!(is_allowed(
            UserRole::Technician,
            Resource::Maintenance,
            Action::Write
        ));
        assert!(is_allowed(
            UserRole::Technician,
            Resource::Monitoring,
            Action::Read
        ));
        assert!(!is_allowed(
            UserRole::Technician,
            Resource::Orders,
            Action::Read
        ));
        assert!(authorize(UserRole::Technician, Resource::Invoices, Action::Write).is_err());
    }
}
