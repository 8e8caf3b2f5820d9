//! Gated document read paths and audit-log access.
//!
//! These are the portal's remaining role-gated operations: listing and
//! viewing cases (staff), downloading the stored file (officer), and
//! reading the audit trail itself (admin).

use anyhow::{bail, Result};
use std::sync::Arc;

use casefile_core::{AuditAction, AuditRecord, AuditTrail, Document, IndexStore, Role, Session};

pub struct CaseAccess {
    store: Arc<dyn IndexStore>,
    audit: Arc<AuditTrail>,
}

impl CaseAccess {
    pub fn new(store: Arc<dyn IndexStore>, audit: Arc<AuditTrail>) -> Self {
        Self { store, audit }
    }

    /// All cases, oldest first. Requires `staff`.
    pub fn list_cases(&self, session: &Session) -> Result<Vec<Document>> {
        session.require_role(Role::Staff)?;
        self.store.list_documents()
    }

    /// Fetch one case for display, auditing the view. Requires `staff`.
    pub fn view_document(&self, session: &Session, document_id: &str) -> Result<Document> {
        let actor = session.require_role(Role::Staff)?;
        let document = match self.store.get_document(document_id)? {
            Some(document) => document,
            None => bail!("document not found: {}", document_id),
        };
        self.audit.record(
            &actor.id,
            AuditAction::View,
            format!("Viewed case: {}", document.title),
            session.origin(),
        );
        Ok(document)
    }

    /// Fetch one case for download, auditing the download. Requires
    /// `officer`.
    pub fn download_document(&self, session: &Session, document_id: &str) -> Result<Document> {
        let actor = session.require_role(Role::Officer)?;
        let document = match self.store.get_document(document_id)? {
            Some(document) => document,
            None => bail!("document not found: {}", document_id),
        };
        self.audit.record(
            &actor.id,
            AuditAction::Download,
            format!("Downloaded case file: {}", document.title),
            session.origin(),
        );
        Ok(document)
    }

    /// Audit records newest first. Requires `admin`; reading the trail
    /// is not itself audited.
    pub fn audit_log(&self, session: &Session) -> Result<Vec<AuditRecord>> {
        session.require_role(Role::Admin)?;
        Ok(self.audit.recent())
    }
}
