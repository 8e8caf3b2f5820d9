//! End-to-end flows through the assembled portal: upload as officer,
//! query as staff, permission denials, and snapshot persistence across
//! a restart.

use tempfile::TempDir;

use casefile_core::{AuditAction, DocumentStatus, IndexStore, Role, NO_MATCH_ANSWER};
use casefile_portal::config::Config;
use casefile_portal::{Portal, UploadRequest};

fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.snapshot_path = tmp.path().join("data/portal.json");
    config
}

fn upload(portal: &Portal, title: &str, text: &str) -> casefile_core::Document {
    let officer = portal.directory.session_for("LAW002").unwrap();
    portal
        .ingest
        .upload(
            &officer,
            UploadRequest {
                title: title.to_string(),
                court: Some("High Court".to_string()),
                case_number: Some("HC/12/2026".to_string()),
                tags: vec!["contract".to_string()],
                status: DocumentStatus::Active,
                extracted_text: text.to_string(),
            },
        )
        .unwrap()
}

#[test]
fn upload_then_search_then_ask() {
    let tmp = TempDir::new().unwrap();
    let portal = Portal::open(&test_config(&tmp)).unwrap();

    upload(
        &portal,
        "State v. Mehta",
        "The contract was breached on March 1. Damages were awarded to the plaintiff.",
    );

    let staff = portal.directory.session_for("LAW004").unwrap();
    let hits = portal.search.search(&staff, "breached").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_title, "State v. Mehta");

    let reply = portal
        .assistant
        .ask(&staff, "What damages were awarded?")
        .unwrap();
    assert!(reply.answer.contains("Damages were awarded"));
    assert_eq!(reply.cited_document_ids.len(), 1);

    // One upload, one search, one ai_query.
    let admin = portal.directory.session_for("LAW001").unwrap();
    let records = portal.access.audit_log(&admin).unwrap();
    let actions: Vec<AuditAction> = records.iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::AiQuery, AuditAction::Search, AuditAction::Upload]
    );
}

#[test]
fn viewer_is_locked_out_of_queries() {
    let tmp = TempDir::new().unwrap();
    let portal = Portal::open(&test_config(&tmp)).unwrap();
    upload(&portal, "Locked", "sensitive contract text");

    let viewer = portal.directory.session_for("LAW005").unwrap();
    assert_eq!(viewer.actor().role, Role::Viewer);

    let chunks_before = portal.store.scan_chunks().unwrap().len();
    assert!(portal.search.search(&viewer, "contract").is_err());
    assert!(portal.assistant.ask(&viewer, "contract?").is_err());
    assert_eq!(portal.store.scan_chunks().unwrap().len(), chunks_before);

    // Only the upload was audited.
    let admin = portal.directory.session_for("LAW001").unwrap();
    assert_eq!(portal.access.audit_log(&admin).unwrap().len(), 1);
}

#[test]
fn unmatched_question_gets_the_apology_and_is_logged() {
    let tmp = TempDir::new().unwrap();
    let portal = Portal::open(&test_config(&tmp)).unwrap();
    upload(&portal, "Unrelated", "completely different subject matter");

    let staff = portal.directory.session_for("LAW004").unwrap();
    let reply = portal.assistant.ask(&staff, "zymurgy").unwrap();
    assert_eq!(reply.answer, NO_MATCH_ANSWER);
    assert!(reply.cited_document_ids.is_empty());
    assert_eq!(portal.history.recent().len(), 1);
}

#[test]
fn state_survives_a_restart() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);

    let doc_id = {
        let portal = Portal::open(&config).unwrap();
        let doc = upload(&portal, "Persistent", "damages were awarded");
        let staff = portal.directory.session_for("LAW004").unwrap();
        portal.assistant.ask(&staff, "damages").unwrap();
        portal.save().unwrap();
        doc.id
    };

    let reopened = Portal::open(&config).unwrap();
    let doc = reopened.store.get_document(&doc_id).unwrap().unwrap();
    assert_eq!(doc.title, "Persistent");
    assert_eq!(reopened.history.recent().len(), 1);

    let staff = reopened.directory.session_for("LAW004").unwrap();
    let hits = reopened.search.search(&staff, "damages").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_title, "Persistent");

    // The pre-restart upload and ai_query survive in the audit trail.
    let admin = reopened.directory.session_for("LAW001").unwrap();
    let actions: Vec<AuditAction> = reopened
        .access
        .audit_log(&admin)
        .unwrap()
        .iter()
        .map(|r| r.action)
        .collect();
    assert!(actions.contains(&AuditAction::Upload));
    assert!(actions.contains(&AuditAction::AiQuery));
}

#[test]
fn chunking_policy_follows_config() {
    let tmp = TempDir::new().unwrap();
    let mut config = test_config(&tmp);
    config.chunking.max_chars = 10;
    let portal = Portal::open(&config).unwrap();

    let doc = upload(&portal, "Chunky", "abcdefghijklmnopqrstuvwxy"); // 25 chars
    let chunks = portal.store.chunks_for_document(&doc.id).unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].content, "uvwxy");
}

#[test]
fn download_and_view_are_audited_with_titles() {
    let tmp = TempDir::new().unwrap();
    let portal = Portal::open(&test_config(&tmp)).unwrap();
    let doc = upload(&portal, "Evidence bundle", "scanned pages");

    let staff = portal.directory.session_for("LAW004").unwrap();
    portal.access.view_document(&staff, &doc.id).unwrap();
    assert!(portal.access.download_document(&staff, &doc.id).is_err());

    let officer = portal.directory.session_for("LAW002").unwrap();
    portal.access.download_document(&officer, &doc.id).unwrap();

    let admin = portal.directory.session_for("LAW001").unwrap();
    let records = portal.access.audit_log(&admin).unwrap();
    assert_eq!(records[0].detail, "Downloaded case file: Evidence bundle");
    assert_eq!(records[1].detail, "Viewed case: Evidence bundle");
}
