//! Employee directory and the login flow.
//!
//! The portal ships a fixed roster of accounts; login is a two-step
//! one-time-code challenge keyed by mobile number. No code is ever
//! delivered anywhere; `begin_login` returns it to the caller and real
//! delivery stays an external concern.

use anyhow::{bail, Result};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use casefile_core::{AuditAction, AuditTrail, Employee, Role, Session};

struct PendingLogin {
    employee: Employee,
    code: String,
}

/// Account directory plus login/logout, the external session component
/// the core's query engines rely on.
pub struct Directory {
    employees: Vec<Employee>,
    pending: Mutex<Option<PendingLogin>>,
    audit: Arc<AuditTrail>,
    origin: String,
}

impl Directory {
    pub fn new(employees: Vec<Employee>, audit: Arc<AuditTrail>, origin: impl Into<String>) -> Self {
        Self {
            employees,
            pending: Mutex::new(None),
            audit,
            origin: origin.into(),
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find_by_employee_id(&self, employee_id: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.employee_id == employee_id)
    }

    /// Start a login for the account registered under `mobile_number`.
    /// Returns the one-time code the caller must echo back to
    /// [`verify_login`](Directory::verify_login).
    pub fn begin_login(&self, mobile_number: &str) -> Result<String> {
        let employee = self
            .employees
            .iter()
            .find(|e| e.mobile_number == mobile_number && e.is_active)
            .cloned();

        let employee = match employee {
            Some(employee) => employee,
            None => bail!("invalid mobile number or account not active"),
        };

        let code = one_time_code();
        tracing::info!(employee = %employee.employee_id, "login challenge issued");
        *self.pending.lock().unwrap() = Some(PendingLogin { employee, code: code.clone() });
        Ok(code)
    }

    /// Complete a pending login. On success the challenge is consumed,
    /// a `login` audit record is written, and a session is returned.
    pub fn verify_login(&self, code: &str) -> Result<Session> {
        let mut pending = self.pending.lock().unwrap();
        let challenge = match pending.take() {
            Some(challenge) => challenge,
            None => bail!("no login in progress"),
        };

        if challenge.code != code {
            // A failed attempt voids the challenge; start over.
            bail!("invalid code");
        }

        self.audit.record(
            &challenge.employee.id,
            AuditAction::Login,
            "User logged in successfully".to_string(),
            &self.origin,
        );
        Ok(Session::new(challenge.employee, self.origin.clone()))
    }

    /// End a session, writing a `logout` audit record.
    pub fn logout(&self, session: &Session) {
        self.audit.record(
            &session.actor().id,
            AuditAction::Logout,
            "User logged out".to_string(),
            session.origin(),
        );
    }

    /// Build a session directly for a known active badge id. Used by
    /// the CLI, which cannot hold a pending challenge across runs.
    pub fn session_for(&self, employee_id: &str) -> Result<Session> {
        match self.find_by_employee_id(employee_id) {
            Some(employee) if employee.is_active => {
                Ok(Session::new(employee.clone(), self.origin.clone()))
            }
            Some(_) => bail!("account is not active: {}", employee_id),
            None => bail!("unknown employee: {}", employee_id),
        }
    }
}

/// Six-digit one-time code derived from UUID randomness.
fn one_time_code() -> String {
    let n = Uuid::new_v4().as_u128() % 900_000 + 100_000;
    n.to_string()
}

/// The built-in account roster.
pub fn reference_roster() -> Vec<Employee> {
    let accounts = [
        ("LAW001", "Priya Sharma", "+91-9876543210", Role::Admin),
        ("LAW002", "Rajesh Kumar", "+91-9876543211", Role::Officer),
        ("LAW003", "Anita Singh", "+91-9876543212", Role::Officer),
        ("LAW004", "Vikram Gupta", "+91-9876543213", Role::Staff),
        ("LAW005", "Meera Nair", "+91-9876543214", Role::Viewer),
    ];
    accounts
        .iter()
        .enumerate()
        .map(|(i, (badge, name, mobile, role))| Employee {
            id: format!("emp-{}", i + 1),
            employee_id: badge.to_string(),
            name: name.to_string(),
            mobile_number: mobile.to_string(),
            role: *role,
            is_active: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> (Arc<AuditTrail>, Directory) {
        let audit = Arc::new(AuditTrail::new(100));
        let dir = Directory::new(reference_roster(), audit.clone(), "127.0.0.1");
        (audit, dir)
    }

    #[test]
    fn login_round_trip_audits_once() {
        let (audit, dir) = directory();
        let code = dir.begin_login("+91-9876543210").unwrap();
        assert_eq!(code.len(), 6);

        let session = dir.verify_login(&code).unwrap();
        assert_eq!(session.actor().employee_id, "LAW001");
        assert_eq!(session.actor().role, Role::Admin);

        let records = audit.recent();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, AuditAction::Login);
    }

    #[test]
    fn unknown_mobile_is_rejected() {
        let (audit, dir) = directory();
        assert!(dir.begin_login("+91-0000000000").is_err());
        assert!(audit.is_empty());
    }

    #[test]
    fn wrong_code_voids_the_challenge() {
        let (audit, dir) = directory();
        dir.begin_login("+91-9876543211").unwrap();
        assert!(dir.verify_login("000000").is_err());
        // Challenge consumed; a second attempt needs a fresh begin_login.
        assert!(dir.verify_login("000000").is_err());
        assert!(audit.is_empty());
    }

    #[test]
    fn logout_is_audited() {
        let (audit, dir) = directory();
        let code = dir.begin_login("+91-9876543213").unwrap();
        let session = dir.verify_login(&code).unwrap();
        dir.logout(&session);

        let records = audit.recent();
        assert_eq!(records[0].action, AuditAction::Logout);
        assert_eq!(records[0].detail, "User logged out");
    }

    #[test]
    fn session_for_badge_checks_active_flag() {
        let audit = Arc::new(AuditTrail::new(10));
        let mut roster = reference_roster();
        roster[4].is_active = false;
        let dir = Directory::new(roster, audit, "127.0.0.1");

        assert!(dir.session_for("LAW004").is_ok());
        assert!(dir.session_for("LAW005").is_err());
        assert!(dir.session_for("LAW999").is_err());
    }
}
