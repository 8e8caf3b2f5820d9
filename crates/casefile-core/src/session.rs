//! Authenticated sessions and the role gate.
//!
//! Session state is trivial: an operation either runs with an
//! authenticated actor or it does not run at all. Transitions in and
//! out of the authenticated state are driven by the application's
//! login flow; the core only consumes the resulting [`Session`].
//!
//! [`Session::require_role`] is the permission half of the audit
//! envelope: every gated operation calls it before touching the index
//! store, and on denial nothing is audited and no store access occurs.

use crate::error::PortalError;
use crate::models::{Employee, Role};

/// An authenticated actor plus the network origin their requests carry.
#[derive(Debug, Clone)]
pub struct Session {
    actor: Employee,
    origin: String,
}

impl Session {
    pub fn new(actor: Employee, origin: impl Into<String>) -> Self {
        Self {
            actor,
            origin: origin.into(),
        }
    }

    pub fn actor(&self) -> &Employee {
        &self.actor
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Succeeds iff the actor's role is `required` or higher in the
    /// strict order `admin > officer > staff > viewer`.
    pub fn require_role(&self, required: Role) -> Result<&Employee, PortalError> {
        if self.actor.role >= required {
            Ok(&self.actor)
        } else {
            Err(PortalError::PermissionDenied {
                required,
                actual: self.actor.role,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(role: Role) -> Employee {
        Employee {
            id: "emp-1".to_string(),
            employee_id: "LAW004".to_string(),
            name: "Vikram Gupta".to_string(),
            mobile_number: "+91-9876543213".to_string(),
            role,
            is_active: true,
        }
    }

    #[test]
    fn equal_role_is_allowed() {
        let session = Session::new(employee(Role::Staff), "127.0.0.1");
        assert!(session.require_role(Role::Staff).is_ok());
    }

    #[test]
    fn higher_role_is_allowed() {
        let session = Session::new(employee(Role::Admin), "127.0.0.1");
        assert!(session.require_role(Role::Viewer).is_ok());
        assert!(session.require_role(Role::Officer).is_ok());
    }

    #[test]
    fn lower_role_is_denied() {
        let session = Session::new(employee(Role::Staff), "127.0.0.1");
        let err = session.require_role(Role::Admin).unwrap_err();
        match err {
            PortalError::PermissionDenied { required, actual } => {
                assert_eq!(required, Role::Admin);
                assert_eq!(actual, Role::Staff);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
