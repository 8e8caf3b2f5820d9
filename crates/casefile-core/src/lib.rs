//! # Casefile Core
//!
//! Core library for the case-file portal: the document chunking and
//! retrieval engine plus the access/audit envelope that wraps every
//! query.
//!
//! ## Data Flow
//!
//! 1. The upload pipeline hands the core a document id and its
//!    extracted text; the **chunker** ([`chunk`]) splits the text into
//!    ordered, fixed-size [`models::ContentChunk`]s.
//! 2. Chunks are appended to the **index store** ([`store`]), an
//!    append-only collection queryable by document or by full scan.
//! 3. The **lexical search engine** ([`search`]) serves literal
//!    case-insensitive substring queries in store scan order.
//! 4. The **retrieval composer** ([`assistant`]) selects chunks
//!    matching any query token, quotes the first candidate, and cites
//!    the source documents; every interaction lands in the bounded
//!    query history ([`history`]).
//! 5. Both engines run inside the **audit envelope**: a role check
//!    ([`session`]) before any store access, and one audit record
//!    appended on success.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types: `Document`, `ContentChunk`, `AuditRecord`, `Role` |
//! | [`chunk`] | Fixed-size text chunker |
//! | [`store`] | `IndexStore` trait and the in-memory implementation |
//! | [`search`] | Case-insensitive substring search |
//! | [`assistant`] | Rule-based retrieval composer with citations |
//! | [`session`] | Authenticated sessions and the role gate |
//! | [`history`] | Bounded audit trail and query history |
//! | [`error`] | `PortalError`, with `PermissionDenied` preceding any mutation |

pub mod assistant;
pub mod chunk;
pub mod error;
pub mod history;
pub mod models;
pub mod search;
pub mod session;
pub mod store;

pub use assistant::{AssistantReply, ComposerLimits, RetrievalComposer, NO_MATCH_ANSWER};
pub use chunk::{chunk_text, DEFAULT_MAX_CHUNK_CHARS};
pub use error::PortalError;
pub use history::{
    AuditTrail, BoundedLog, QueryHistory, DEFAULT_AUDIT_CAPACITY, DEFAULT_QUERY_CAPACITY,
};
pub use models::{
    AuditAction, AuditRecord, CaseMetadata, ContentChunk, Document, DocumentStatus, Employee,
    QueryLogEntry, Role,
};
pub use search::{LexicalSearch, SearchHit, UNKNOWN_DOCUMENT_TITLE};
pub use session::Session;
pub use store::memory::MemoryIndexStore;
pub use store::IndexStore;
