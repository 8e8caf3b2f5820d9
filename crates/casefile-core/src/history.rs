//! Capacity-bounded append-only logs.
//!
//! [`BoundedLog`] is the shared ring abstraction behind the audit trail
//! and the query history: appends go to the back, and once the log is
//! at capacity the oldest entry is evicted from the front. [`AuditTrail`]
//! and [`QueryHistory`] wrap a `BoundedLog` in a `Mutex`, one lock per
//! log, so a logical append is a single critical section.

use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{AuditAction, AuditRecord, QueryLogEntry};

/// Default number of audit records retained.
pub const DEFAULT_AUDIT_CAPACITY: usize = 1_000;
/// Default number of query-history entries retained.
pub const DEFAULT_QUERY_CAPACITY: usize = 50;

/// An append-only log that retains at most `capacity` entries,
/// evicting the oldest first.
#[derive(Debug)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    /// A `capacity` of 0 is treated as 1: a log that can hold nothing
    /// has no callers.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Entries in insertion order, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

/// The portal's audit trail.
///
/// Every successful gated operation appends exactly one record here;
/// permission denials append nothing.
pub struct AuditTrail {
    log: Mutex<BoundedLog<AuditRecord>>,
}

impl AuditTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(BoundedLog::new(capacity)),
        }
    }

    /// Append one record, stamping id and timestamp.
    pub fn record(&self, actor_id: &str, action: AuditAction, detail: String, origin: &str) {
        let record = AuditRecord {
            id: Uuid::new_v4().to_string(),
            actor_id: actor_id.to_string(),
            action,
            detail,
            origin: origin.to_string(),
            timestamp: Utc::now(),
        };
        tracing::debug!(actor = %record.actor_id, action = %record.action, "audit");
        self.log.lock().unwrap().push(record);
    }

    /// Records newest first. Reverse-chronological ordering is a
    /// presentation choice made here for readers; the log itself is
    /// insertion-ordered.
    pub fn recent(&self) -> Vec<AuditRecord> {
        let mut records = self.log.lock().unwrap().to_vec();
        records.reverse();
        records
    }

    /// Records in insertion order, for persistence.
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.log.lock().unwrap().to_vec()
    }

    /// Replace the log contents from a persisted snapshot.
    pub fn restore(&self, records: Vec<AuditRecord>) {
        let mut log = self.log.lock().unwrap();
        let capacity = log.capacity;
        *log = BoundedLog::new(capacity);
        for record in records {
            log.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().unwrap().is_empty()
    }
}

/// The retrieval composer's query/answer history.
pub struct QueryHistory {
    log: Mutex<BoundedLog<QueryLogEntry>>,
}

impl QueryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(BoundedLog::new(capacity)),
        }
    }

    /// Append one entry, stamping id and timestamp, and return it.
    pub fn record(
        &self,
        query: &str,
        answer: &str,
        source_document_ids: Vec<String>,
    ) -> QueryLogEntry {
        let entry = QueryLogEntry {
            id: Uuid::new_v4().to_string(),
            query: query.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
            source_document_ids,
        };
        self.log.lock().unwrap().push(entry.clone());
        entry
    }

    /// Entries newest first.
    pub fn recent(&self) -> Vec<QueryLogEntry> {
        let mut entries = self.log.lock().unwrap().to_vec();
        entries.reverse();
        entries
    }

    /// Entries in insertion order, for persistence.
    pub fn snapshot(&self) -> Vec<QueryLogEntry> {
        self.log.lock().unwrap().to_vec()
    }

    /// Replace the log contents from a persisted snapshot.
    pub fn restore(&self, entries: Vec<QueryLogEntry>) {
        let mut log = self.log.lock().unwrap();
        let capacity = log.capacity;
        *log = BoundedLog::new(capacity);
        for entry in entries {
            log.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}
