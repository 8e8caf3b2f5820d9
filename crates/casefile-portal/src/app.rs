//! Component wiring.
//!
//! [`Portal`] owns one of everything: the in-memory index store, the
//! two bounded logs, the directory, and the engines built from them.
//! Construction injects the shared handles explicitly; nothing reaches
//! for ambient state.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use casefile_core::{
    AuditTrail, ComposerLimits, LexicalSearch, MemoryIndexStore, QueryHistory, RetrievalComposer,
};

use crate::access::CaseAccess;
use crate::config::Config;
use crate::directory::{reference_roster, Directory};
use crate::ingest::IngestPipeline;
use crate::reports::ReportGenerator;
use crate::snapshot::{self, Snapshot};

pub struct Portal {
    pub store: Arc<MemoryIndexStore>,
    pub audit: Arc<AuditTrail>,
    pub history: Arc<QueryHistory>,
    pub directory: Directory,
    pub search: LexicalSearch,
    pub assistant: RetrievalComposer,
    pub ingest: IngestPipeline,
    pub access: CaseAccess,
    pub reports: ReportGenerator,
    snapshot_path: PathBuf,
}

impl Portal {
    /// Build a portal from configuration, loading any existing
    /// snapshot from disk.
    pub fn open(config: &Config) -> Result<Self> {
        let portal = Self::in_memory(config);
        snapshot::load(&portal.snapshot_path)?.apply(
            &portal.store,
            &portal.history,
            &portal.audit,
        )?;
        Ok(portal)
    }

    /// Build a portal with empty state and no snapshot on disk yet.
    pub fn in_memory(config: &Config) -> Self {
        let store = Arc::new(MemoryIndexStore::new());
        let audit = Arc::new(AuditTrail::new(config.history.audit_capacity));
        let history = Arc::new(QueryHistory::new(config.history.query_capacity));

        let directory = Directory::new(
            reference_roster(),
            audit.clone(),
            config.session.origin.clone(),
        );
        let search = LexicalSearch::new(store.clone(), audit.clone());
        let assistant = RetrievalComposer::new(
            store.clone(),
            audit.clone(),
            history.clone(),
            ComposerLimits {
                candidate_limit: config.retrieval.candidate_limit,
                quote_max_chars: config.retrieval.quote_max_chars,
            },
        );
        let ingest = IngestPipeline::new(store.clone(), audit.clone(), config.chunking.max_chars);
        let access = CaseAccess::new(store.clone(), audit.clone());
        let reports = ReportGenerator::new(store.clone(), audit.clone(), history.clone());

        Self {
            store,
            audit,
            history,
            directory,
            search,
            assistant,
            ingest,
            access,
            reports,
            snapshot_path: config.storage.snapshot_path.clone(),
        }
    }

    /// Persist the current state as a whole-blob snapshot.
    pub fn save(&self) -> Result<()> {
        let snapshot = Snapshot::capture(&self.store, &self.history, &self.audit)?;
        snapshot::save(&self.snapshot_path, &snapshot)
    }
}
