//! The retrieval composer ("AI assistant").
//!
//! A rule-based stand-in for a retrieval-augmented answer generator:
//! it selects chunks that contain any query token, quotes the first
//! match, and cites the owning documents. Answer construction is a
//! pure function of the query and the selected candidates, so a real
//! embedding-based ranker can later replace candidate selection
//! without touching the audit or history plumbing.

use std::sync::Arc;

use crate::error::PortalError;
use crate::history::{AuditTrail, QueryHistory};
use crate::models::{AuditAction, ContentChunk, Role};
use crate::search::UNKNOWN_DOCUMENT_TITLE;
use crate::session::Session;
use crate::store::IndexStore;

/// Answer returned when no chunk matches any query token. A terminal
/// success, not an error: the caller always receives an answer string.
pub const NO_MATCH_ANSWER: &str = "I couldn't find relevant information in the stored case \
files. Please upload relevant documents or try a different query.";

/// Selection and quoting bounds for the composer.
#[derive(Debug, Clone, Copy)]
pub struct ComposerLimits {
    /// Maximum number of candidate chunks kept, in scan order.
    pub candidate_limit: usize,
    /// Maximum number of characters quoted from the first candidate.
    pub quote_max_chars: usize,
}

impl Default for ComposerLimits {
    fn default() -> Self {
        Self {
            candidate_limit: 3,
            quote_max_chars: 300,
        }
    }
}

/// A composed answer plus the documents it cites.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub answer: String,
    /// Cited documents in order of first citation, deduplicated.
    pub cited_document_ids: Vec<String>,
}

struct Candidate {
    chunk: ContentChunk,
    document_title: String,
}

/// The retrieval composer. Holds injected handles to the index store,
/// the audit trail, and the query history.
pub struct RetrievalComposer {
    store: Arc<dyn IndexStore>,
    audit: Arc<AuditTrail>,
    history: Arc<QueryHistory>,
    limits: ComposerLimits,
}

impl RetrievalComposer {
    pub fn new(
        store: Arc<dyn IndexStore>,
        audit: Arc<AuditTrail>,
        history: Arc<QueryHistory>,
        limits: ComposerLimits,
    ) -> Self {
        Self {
            store,
            audit,
            history,
            limits,
        }
    }

    /// Answer a natural-language query from the indexed case material.
    ///
    /// Requires the `staff` role and a non-empty query. Candidate
    /// chunks are those containing *any* whitespace-separated query
    /// token as a case-folded substring (union, recall-biased), kept
    /// in store scan order and capped at the configured limit. Every
    /// invocation, degenerate or not, appends exactly one query-history
    /// entry and one `ai_query` audit record after the answer is fully
    /// composed.
    pub fn ask(&self, session: &Session, query: &str) -> Result<AssistantReply, PortalError> {
        let actor = session.require_role(Role::Staff)?;

        let query = query.trim();
        if query.is_empty() {
            return Err(PortalError::EmptyQuery);
        }

        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let mut candidates = Vec::new();
        for chunk in self.store.scan_chunks()? {
            if candidates.len() == self.limits.candidate_limit {
                break;
            }
            let content = chunk.content.to_lowercase();
            if tokens.iter().any(|t| content.contains(t.as_str())) {
                let document_title = self
                    .store
                    .get_document(&chunk.document_id)?
                    .map(|d| d.title)
                    .unwrap_or_else(|| UNKNOWN_DOCUMENT_TITLE.to_string());
                candidates.push(Candidate {
                    chunk,
                    document_title,
                });
            }
        }

        let answer = compose_answer(query, &candidates, self.limits.quote_max_chars);

        let mut cited_document_ids: Vec<String> = Vec::new();
        for candidate in &candidates {
            if !cited_document_ids.contains(&candidate.chunk.document_id) {
                cited_document_ids.push(candidate.chunk.document_id.clone());
            }
        }

        tracing::debug!(query, candidates = candidates.len(), "composed answer");
        self.history
            .record(query, &answer, cited_document_ids.clone());
        self.audit.record(
            &actor.id,
            AuditAction::AiQuery,
            format!("AI Query: {query}"),
            session.origin(),
        );

        Ok(AssistantReply {
            answer,
            cited_document_ids,
        })
    }
}

/// Build the templated answer text. Pure: no store or log access.
fn compose_answer(query: &str, candidates: &[Candidate], quote_max_chars: usize) -> String {
    let first = match candidates.first() {
        Some(first) => first,
        None => return NO_MATCH_ANSWER.to_string(),
    };

    let quote: String = first.chunk.content.chars().take(quote_max_chars).collect();
    let sources = candidates
        .iter()
        .map(|c| format!("- {} (Chunk {})", c.document_title, c.chunk.order + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the case files I found, here's what I can tell you about \"{query}\":\n\n\
        {quote}...\n\n\
        **Sources:**\n\
        {sources}\n\n\
        This information is derived from your uploaded case documents. For more detailed \
        analysis, please refer to the complete case files."
    )
}
