//! Upload pipeline: document creation, chunking, and indexing.
//!
//! Text extraction from binary formats happens upstream; the pipeline
//! accepts whatever extracted text it is given, including an empty
//! string, and the chunker still produces the document's chunk 0.

use anyhow::{bail, Result};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use casefile_core::{
    chunk_text, AuditAction, AuditTrail, CaseMetadata, Document, DocumentStatus, IndexStore, Role,
    Session,
};

/// Everything the upload form hands the pipeline.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub court: Option<String>,
    pub case_number: Option<String>,
    pub tags: Vec<String>,
    pub status: DocumentStatus,
    /// Output of the (external) extraction step.
    pub extracted_text: String,
}

pub struct IngestPipeline {
    store: Arc<dyn IndexStore>,
    audit: Arc<AuditTrail>,
    max_chunk_chars: usize,
}

impl IngestPipeline {
    pub fn new(store: Arc<dyn IndexStore>, audit: Arc<AuditTrail>, max_chunk_chars: usize) -> Self {
        Self {
            store,
            audit,
            max_chunk_chars,
        }
    }

    /// Create a document from an upload, index its chunks, and audit
    /// the upload. Requires the `officer` role.
    pub fn upload(&self, session: &Session, request: UploadRequest) -> Result<Document> {
        let actor = session.require_role(Role::Officer)?;

        let title = request.title.trim();
        if title.is_empty() {
            bail!("upload requires a title");
        }

        let document = Document {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            status: request.status,
            metadata: CaseMetadata {
                court: request.court,
                case_number: request.case_number,
                tags: request.tags,
            },
            extracted_text: request.extracted_text,
            uploaded_by: actor.id.clone(),
            uploaded_at: Utc::now(),
        };

        let chunks = chunk_text(&document.id, &document.extracted_text, self.max_chunk_chars);
        tracing::info!(
            document = %document.id,
            chunks = chunks.len(),
            "indexing uploaded case"
        );

        self.store.insert_document(&document)?;
        self.store.append_chunks(&chunks)?;
        self.audit.record(
            &actor.id,
            AuditAction::Upload,
            format!("Uploaded case: {}", document.title),
            session.origin(),
        );

        Ok(document)
    }

    /// Edit a document's metadata and status. Requires `officer`.
    pub fn edit_metadata(
        &self,
        session: &Session,
        document_id: &str,
        metadata: CaseMetadata,
        status: DocumentStatus,
    ) -> Result<()> {
        session.require_role(Role::Officer)?;
        self.store.update_metadata(document_id, metadata, status)?;
        Ok(())
    }
}
