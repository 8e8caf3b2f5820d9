//! In-memory [`IndexStore`] implementation.
//!
//! Keeps documents and chunks in `Vec`s behind `std::sync::RwLock`s,
//! one lock per collection, so each append is a single critical
//! section. This is the store used by the portal at runtime (state is
//! persisted separately as a whole-blob snapshot) and by tests.

use anyhow::{bail, Result};
use std::sync::RwLock;

use crate::models::{CaseMetadata, ContentChunk, Document, DocumentStatus};
use crate::store::IndexStore;

#[derive(Default)]
pub struct MemoryIndexStore {
    documents: RwLock<Vec<Document>>,
    chunks: RwLock<Vec<ContentChunk>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexStore for MemoryIndexStore {
    fn insert_document(&self, document: &Document) -> Result<()> {
        let mut docs = self.documents.write().unwrap();
        if docs.iter().any(|d| d.id == document.id) {
            bail!("document already exists: {}", document.id);
        }
        docs.push(document.clone());
        Ok(())
    }

    fn update_metadata(
        &self,
        document_id: &str,
        metadata: CaseMetadata,
        status: DocumentStatus,
    ) -> Result<()> {
        let mut docs = self.documents.write().unwrap();
        match docs.iter_mut().find(|d| d.id == document_id) {
            Some(doc) => {
                doc.metadata = metadata;
                doc.status = status;
                Ok(())
            }
            None => bail!("document not found: {}", document_id),
        }
    }

    fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        let docs = self.documents.read().unwrap();
        Ok(docs.iter().find(|d| d.id == document_id).cloned())
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.read().unwrap().clone())
    }

    fn append_chunks(&self, chunks: &[ContentChunk]) -> Result<()> {
        let mut all = self.chunks.write().unwrap();
        all.extend_from_slice(chunks);
        Ok(())
    }

    fn chunks_for_document(&self, document_id: &str) -> Result<Vec<ContentChunk>> {
        let all = self.chunks.read().unwrap();
        let mut owned: Vec<ContentChunk> = all
            .iter()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect();
        owned.sort_by_key(|c| c.order);
        Ok(owned)
    }

    fn scan_chunks(&self) -> Result<Vec<ContentChunk>> {
        Ok(self.chunks.read().unwrap().clone())
    }
}
