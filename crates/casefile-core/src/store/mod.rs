//! Storage abstraction for the case-file index.
//!
//! The [`IndexStore`] trait defines every store operation the query
//! engines and the upload pipeline need, so tests and alternative
//! backends can supply their own implementation. Components receive an
//! explicit store handle at construction; there is no ambient or
//! global storage access.
//!
//! The index is append-only: documents are inserted once and mutated
//! only through [`update_metadata`](IndexStore::update_metadata);
//! chunks are inserted in per-document batches and never mutated or
//! deleted. Insertion order therefore doubles as recency order.

pub mod memory;

use anyhow::Result;

use crate::models::{CaseMetadata, ContentChunk, Document, DocumentStatus};

/// Abstract storage backend for documents and their content chunks.
///
/// All operations are synchronous; the portal assumes one cooperative
/// actor at a time and implementations only need enough locking to make
/// each call atomic on its own.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert_document`](IndexStore::insert_document) | Add a newly uploaded document |
/// | [`update_metadata`](IndexStore::update_metadata) | Edit a document's metadata and status |
/// | [`get_document`](IndexStore::get_document) | Fetch one document by id |
/// | [`list_documents`](IndexStore::list_documents) | All documents in insertion order |
/// | [`append_chunks`](IndexStore::append_chunks) | Append one document's chunk batch |
/// | [`chunks_for_document`](IndexStore::chunks_for_document) | A document's chunks ordered by `order` |
/// | [`scan_chunks`](IndexStore::scan_chunks) | Full scan in insertion order |
pub trait IndexStore: Send + Sync {
    /// Insert a newly uploaded document.
    fn insert_document(&self, document: &Document) -> Result<()>;

    /// Replace a document's metadata and status. Fails if the document
    /// does not exist; this is the only mutation documents undergo.
    fn update_metadata(
        &self,
        document_id: &str,
        metadata: CaseMetadata,
        status: DocumentStatus,
    ) -> Result<()>;

    /// Fetch a document by id.
    fn get_document(&self, document_id: &str) -> Result<Option<Document>>;

    /// All documents, oldest first.
    fn list_documents(&self) -> Result<Vec<Document>>;

    /// Append a batch of chunks. The batch must be applied atomically
    /// with respect to readers: no partial document is ever visible.
    fn append_chunks(&self, chunks: &[ContentChunk]) -> Result<()>;

    /// Chunks belonging to one document, sorted by `order`.
    fn chunks_for_document(&self, document_id: &str) -> Result<Vec<ContentChunk>>;

    /// Every chunk in the index, in insertion order. Both query engines
    /// iterate this scan; result ordering downstream is scan order.
    fn scan_chunks(&self) -> Result<Vec<ContentChunk>>;
}
