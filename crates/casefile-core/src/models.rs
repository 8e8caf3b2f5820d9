//! Core data models for the case-file portal.
//!
//! These types represent the employees, documents, chunks, and log
//! records that flow through the upload and retrieval pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of an employee. The ordering is a strict total order
/// (`Viewer < Staff < Officer < Admin`) used by the permission gate:
/// an operation requiring role `r` succeeds for any actor whose role
/// is `r` or higher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Staff,
    Officer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Viewer => "viewer",
            Role::Staff => "staff",
            Role::Officer => "officer",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// A portal account from the employee directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    /// Badge identifier shown in the UI, e.g. `LAW001`.
    pub employee_id: String,
    pub name: String,
    pub mobile_number: String,
    pub role: Role,
    pub is_active: bool,
}

/// Lifecycle state of an uploaded case document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Active,
    Closed,
}

/// Structured case metadata. All fields are optional; tags default to
/// an empty set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub court: Option<String>,
    pub case_number: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An uploaded case document. Documents are created at upload time and
/// mutated only by metadata edits; there is no delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub status: DocumentStatus,
    pub metadata: CaseMetadata,
    /// Full normalized text produced by the (external) extraction step.
    pub extracted_text: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// An immutable slice of a document's extracted text, the unit of
/// indexing and citation.
///
/// For a given `document_id` the `order` values form a contiguous range
/// starting at 0, and concatenating `content` in `order` sequence
/// reproduces the document's extracted text exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChunk {
    pub id: String,
    pub document_id: String,
    pub content: String,
    /// Zero-based position among the chunks of the same document.
    pub order: usize,
    /// Reserved for a future embedding-based ranker; always empty.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

/// One recorded retrieval-composer interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub id: String,
    pub query: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    /// Documents cited by the answer, in order of first citation.
    pub source_document_ids: Vec<String>,
}

/// Kinds of auditable actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Logout,
    Upload,
    Search,
    AiQuery,
    Download,
    View,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::Upload => "upload",
            AuditAction::Search => "search",
            AuditAction::AiQuery => "ai_query",
            AuditAction::Download => "download",
            AuditAction::View => "view",
        };
        f.write_str(name)
    }
}

/// A single audit-trail record. Append-only; downstream viewers filter
/// and export these but never mutate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    pub actor_id: String,
    pub action: AuditAction,
    pub detail: String,
    /// Network origin marker of the session that performed the action.
    pub origin: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_order_is_strict() {
        assert!(Role::Viewer < Role::Staff);
        assert!(Role::Staff < Role::Officer);
        assert!(Role::Officer < Role::Admin);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Officer).unwrap(), "\"officer\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn audit_action_snake_case() {
        assert_eq!(
            serde_json::to_string(&AuditAction::AiQuery).unwrap(),
            "\"ai_query\""
        );
        assert_eq!(AuditAction::AiQuery.to_string(), "ai_query");
    }
}
