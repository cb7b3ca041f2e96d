//! Central access policy.
//!
//! One policy table checked at the service boundary, instead of role
//! conditionals scattered through a presentation layer.

use stockroom_core::AuthError;

use crate::{Role, Session};

/// Operation classes the gate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read items, suppliers, orders, reports, export listings.
    ReadCatalog,
    /// Create/update items, suppliers, orders; order status transitions.
    MutateCatalog,
    /// Create users, change passwords/roles, list users, read the audit log.
    ManageUsers,
    /// Delete an item or a supplier.
    DeleteCatalogEntry,
}

/// Authorize a session for one operation class.
///
/// Pure policy check: no IO, no business logic. On denial the caller must
/// not perform any part of the operation.
pub fn authorize(session: &Session, action: Action) -> Result<(), AuthError> {
    if allowed(session.role, action) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

fn allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ReadCatalog | Action::MutateCatalog => true,
        Action::ManageUsers | Action::DeleteCatalogEntry => role.is_admin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::UserId;

    fn session(role: Role) -> Session {
        Session::issue(UserId::new(), "probe", role)
    }

    #[test]
    fn staff_can_read_and_mutate_catalog() {
        let s = session(Role::Staff);
        assert!(authorize(&s, Action::ReadCatalog).is_ok());
        assert!(authorize(&s, Action::MutateCatalog).is_ok());
    }

    #[test]
    fn staff_cannot_manage_users_or_delete() {
        let s = session(Role::Staff);
        assert_eq!(
            authorize(&s, Action::ManageUsers),
            Err(AuthError::Forbidden)
        );
        assert_eq!(
            authorize(&s, Action::DeleteCatalogEntry),
            Err(AuthError::Forbidden)
        );
    }

    #[test]
    fn admin_is_allowed_everything() {
        let s = session(Role::Admin);
        for action in [
            Action::ReadCatalog,
            Action::MutateCatalog,
            Action::ManageUsers,
            Action::DeleteCatalogEntry,
        ] {
            assert!(authorize(&s, action).is_ok(), "denied {action:?}");
        }
    }
}
