//! Lexical search over the chunk index.
//!
//! A chunk matches iff its content, case-folded, contains the
//! case-folded query as a contiguous substring. There is no
//! tokenization, stemming, or fuzzy matching, and results are returned
//! in store scan order rather than relevance order: scan order is a
//! deliberate simplicity choice for this engine, not an omission.

use std::sync::Arc;

use crate::error::PortalError;
use crate::history::AuditTrail;
use crate::models::{AuditAction, ContentChunk, Role};
use crate::session::Session;
use crate::store::IndexStore;

/// Title reported when a chunk's owning document cannot be resolved.
pub const UNKNOWN_DOCUMENT_TITLE: &str = "Unknown Document";

/// A matching chunk joined with its owning document's title.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: ContentChunk,
    pub document_title: String,
}

/// The substring search engine. Holds injected handles to the index
/// store and the audit trail; constructing one is cheap.
pub struct LexicalSearch {
    store: Arc<dyn IndexStore>,
    audit: Arc<AuditTrail>,
}

impl LexicalSearch {
    pub fn new(store: Arc<dyn IndexStore>, audit: Arc<AuditTrail>) -> Self {
        Self { store, audit }
    }

    /// Run a substring search as the session's actor.
    ///
    /// Requires the `staff` role. An empty (or all-whitespace) query
    /// returns an empty result set without touching the store and
    /// without writing an audit record. A non-empty query appends one
    /// `search` audit record containing the literal query text.
    pub fn search(&self, session: &Session, query: &str) -> Result<Vec<SearchHit>, PortalError> {
        let actor = session.require_role(Role::Staff)?;

        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let mut hits = Vec::new();
        for chunk in self.store.scan_chunks()? {
            if chunk.content.to_lowercase().contains(&needle) {
                let document_title = self
                    .store
                    .get_document(&chunk.document_id)?
                    .map(|d| d.title)
                    .unwrap_or_else(|| UNKNOWN_DOCUMENT_TITLE.to_string());
                hits.push(SearchHit {
                    chunk,
                    document_title,
                });
            }
        }

        tracing::debug!(query, hits = hits.len(), "lexical search");
        self.audit.record(
            &actor.id,
            AuditAction::Search,
            format!("Searched for: {query}"),
            session.origin(),
        );

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk_text;
    use crate::models::{CaseMetadata, Document, DocumentStatus, Employee};
    use crate::store::memory::MemoryIndexStore;
    use chrono::Utc;

    fn session(role: Role) -> Session {
        Session::new(
            Employee {
                id: "emp-1".to_string(),
                employee_id: "LAW004".to_string(),
                name: "Vikram Gupta".to_string(),
                mobile_number: "+91-9876543213".to_string(),
                role,
                is_active: true,
            },
            "127.0.0.1",
        )
    }

    fn seeded_engine() -> (Arc<MemoryIndexStore>, Arc<AuditTrail>, LexicalSearch) {
        let store = Arc::new(MemoryIndexStore::new());
        let audit = Arc::new(AuditTrail::new(100));

        store
            .insert_document(&Document {
                id: "doc-a".to_string(),
                title: "State v. Mehta".to_string(),
                status: DocumentStatus::Active,
                metadata: CaseMetadata::default(),
                extracted_text: String::new(),
                uploaded_by: "emp-2".to_string(),
                uploaded_at: Utc::now(),
            })
            .unwrap();
        store
            .append_chunks(&chunk_text(
                "doc-a",
                "The contract was breached on March 1",
                500,
            ))
            .unwrap();
        store
            .append_chunks(&chunk_text(
                "doc-a",
                "Damages were awarded to the plaintiff",
                500,
            ))
            .unwrap();

        let engine = LexicalSearch::new(store.clone(), audit.clone());
        (store, audit, engine)
    }

    #[test]
    fn matches_are_case_insensitive() {
        let (_, _, engine) = seeded_engine();
        let session = session(Role::Staff);

        let lower = engine.search(&session, "breached").unwrap();
        let upper = engine.search(&session, "BREACHED").unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower.len(), upper.len());
        assert_eq!(lower[0].chunk.id, upper[0].chunk.id);
        assert_eq!(lower[0].document_title, "State v. Mehta");
    }

    #[test]
    fn empty_query_is_a_no_op() {
        let (_, audit, engine) = seeded_engine();
        let hits = engine.search(&session(Role::Staff), "   ").unwrap();
        assert!(hits.is_empty());
        assert!(audit.is_empty());
    }

    #[test]
    fn non_empty_query_is_audited_with_literal_text() {
        let (_, audit, engine) = seeded_engine();
        engine.search(&session(Role::Staff), "plaintiff").unwrap();

        let records = audit.recent();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, AuditAction::Search);
        assert_eq!(records[0].detail, "Searched for: plaintiff");
        assert_eq!(records[0].origin, "127.0.0.1");
    }

    #[test]
    fn viewer_is_denied_and_nothing_is_audited() {
        let (store, audit, engine) = seeded_engine();
        let before = store.scan_chunks().unwrap().len();

        let err = engine.search(&session(Role::Viewer), "breached").unwrap_err();
        assert!(matches!(err, PortalError::PermissionDenied { .. }));
        assert!(audit.is_empty());
        assert_eq!(store.scan_chunks().unwrap().len(), before);
    }

    #[test]
    fn missing_document_resolves_to_sentinel_title() {
        let store = Arc::new(MemoryIndexStore::new());
        let audit = Arc::new(AuditTrail::new(100));
        store
            .append_chunks(&chunk_text("orphan", "orphan chunk text", 500))
            .unwrap();
        let engine = LexicalSearch::new(store, audit);

        let hits = engine.search(&session(Role::Staff), "orphan").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document_title, UNKNOWN_DOCUMENT_TITLE);
    }

    #[test]
    fn results_follow_scan_order() {
        let (store, _, engine) = seeded_engine();
        store
            .append_chunks(&chunk_text("doc-a", "the contract annex", 500))
            .unwrap();

        let hits = engine.search(&session(Role::Staff), "contract").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].chunk.content.starts_with("The contract was breached"));
        assert_eq!(hits[1].chunk.content, "the contract annex");
    }
}
