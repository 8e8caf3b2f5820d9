//! Whole-blob JSON persistence.
//!
//! The portal's durable state is one JSON document holding four
//! ordered lists under well-known keys: documents, chunks, query
//! history, and the audit trail. The contract with the storage layer
//! is read-whole/write-whole, with no partial or indexed access. The
//! lists are written together but not atomically with respect to a
//! crash mid-write.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use casefile_core::{
    AuditRecord, AuditTrail, ContentChunk, Document, IndexStore, MemoryIndexStore, QueryHistory,
    QueryLogEntry,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub chunks: Vec<ContentChunk>,
    #[serde(default)]
    pub query_log: Vec<QueryLogEntry>,
    #[serde(default)]
    pub audit_log: Vec<AuditRecord>,
}

impl Snapshot {
    /// Capture the live stores in insertion order.
    pub fn capture(
        store: &MemoryIndexStore,
        history: &QueryHistory,
        audit: &AuditTrail,
    ) -> Result<Self> {
        Ok(Self {
            documents: store.list_documents()?,
            chunks: store.scan_chunks()?,
            query_log: history.snapshot(),
            audit_log: audit.snapshot(),
        })
    }

    /// Rebuild live state from this snapshot. Documents and chunks are
    /// replayed in their stored order, so scan order survives the
    /// round trip.
    pub fn apply(
        self,
        store: &MemoryIndexStore,
        history: &QueryHistory,
        audit: &AuditTrail,
    ) -> Result<()> {
        for document in &self.documents {
            store.insert_document(document)?;
        }
        store.append_chunks(&self.chunks)?;
        history.restore(self.query_log);
        audit.restore(self.audit_log);
        Ok(())
    }
}

/// Write the snapshot as pretty JSON, creating parent directories.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Read a snapshot; a missing file is an empty portal, not an error.
pub fn load(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    Ok(snapshot)
}
