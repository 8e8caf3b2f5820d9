//! Usage reporting over the portal's logs.
//!
//! A plain fold over the audit trail and query history: per-action and
//! per-employee counts plus totals. Read-only and officer-gated;
//! generating a report does not itself write an audit record.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use casefile_core::{AuditTrail, IndexStore, QueryHistory, Role, Session};

#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub generated_at: DateTime<Utc>,
    pub total_cases: usize,
    pub total_queries: usize,
    pub total_audit_events: usize,
    /// Audit event counts keyed by action kind.
    pub events_by_action: BTreeMap<String, usize>,
    /// Audit event counts keyed by actor id.
    pub events_by_actor: BTreeMap<String, usize>,
}

pub struct ReportGenerator {
    store: Arc<dyn IndexStore>,
    audit: Arc<AuditTrail>,
    history: Arc<QueryHistory>,
}

impl ReportGenerator {
    pub fn new(
        store: Arc<dyn IndexStore>,
        audit: Arc<AuditTrail>,
        history: Arc<QueryHistory>,
    ) -> Self {
        Self {
            store,
            audit,
            history,
        }
    }

    /// Summarize portal usage. Requires `officer`.
    pub fn usage(&self, session: &Session) -> Result<UsageReport> {
        session.require_role(Role::Officer)?;

        let records = self.audit.snapshot();
        let mut events_by_action: BTreeMap<String, usize> = BTreeMap::new();
        let mut events_by_actor: BTreeMap<String, usize> = BTreeMap::new();
        for record in &records {
            *events_by_action.entry(record.action.to_string()).or_default() += 1;
            *events_by_actor.entry(record.actor_id.clone()).or_default() += 1;
        }

        Ok(UsageReport {
            generated_at: Utc::now(),
            total_cases: self.store.list_documents()?.len(),
            total_queries: self.history.len(),
            total_audit_events: records.len(),
            events_by_action,
            events_by_actor,
        })
    }
}
