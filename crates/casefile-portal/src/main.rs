//! # Case-File Portal CLI (`caseportal`)
//!
//! Thin command-line front end over the portal library. Every state
//! change is followed by a whole-blob snapshot write, mirroring the
//! read-whole/write-whole storage contract.
//!
//! ```bash
//! caseportal init
//! caseportal login --mobile "+91-9876543210"
//! caseportal --employee LAW002 upload --title "Breach suit" --file extracted.txt
//! caseportal --employee LAW004 search "breached"
//! caseportal --employee LAW004 ask "What damages were awarded?"
//! caseportal --employee LAW001 audit
//! ```
//!
//! The `--employee` flag selects the acting account by badge id; the
//! session itself (login state across invocations) is the caller's
//! concern, as it is for any front end to the core.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use casefile_portal::config::{load_config, Config};
use casefile_portal::{Portal, UploadRequest};
use casefile_core::DocumentStatus;

#[derive(Parser)]
#[command(
    name = "caseportal",
    about = "Role-gated case-file portal: upload, search, and cited retrieval over indexed case documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply if absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Acting employee badge id, e.g. LAW002.
    #[arg(long, global = true)]
    employee: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty snapshot so the portal has a data file.
    Init,
    /// Run the one-time-code login flow for a mobile number.
    Login {
        #[arg(long)]
        mobile: String,
    },
    /// Upload a case document from already-extracted text.
    Upload {
        #[arg(long)]
        title: String,
        /// File containing the extracted text.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Extracted text passed inline.
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        court: Option<String>,
        #[arg(long)]
        case_number: Option<String>,
        /// Comma-separated tag list.
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Substring search over the chunk index.
    Search { query: String },
    /// Ask the retrieval composer a question.
    Ask { query: String },
    /// List all cases.
    Cases,
    /// Show one case, auditing the view.
    View { id: String },
    /// Show recent assistant queries.
    History,
    /// Show the audit trail (admin only).
    Audit,
    /// Print a usage report (officer only).
    Report,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let portal = Portal::open(&config)?;

    match cli.command {
        Commands::Init => {
            portal.save()?;
            println!(
                "portal initialized: {}",
                config.storage.snapshot_path.display()
            );
        }
        Commands::Login { mobile } => {
            let code = portal.directory.begin_login(&mobile)?;
            // No SMS delivery here; surface the code like a debug OTP.
            println!("one-time code: {code}");
            let session = portal.directory.verify_login(&code)?;
            println!(
                "logged in as {} ({})",
                session.actor().name,
                session.actor().role
            );
            portal.save()?;
        }
        Commands::Upload {
            title,
            file,
            text,
            court,
            case_number,
            tags,
        } => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            let extracted_text = match (file, text) {
                (Some(path), None) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(text)) => text,
                _ => bail!("provide exactly one of --file or --text"),
            };
            let tags: Vec<String> = tags
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();

            let document = portal.ingest.upload(
                &session,
                UploadRequest {
                    title,
                    court,
                    case_number,
                    tags,
                    status: DocumentStatus::Active,
                    extracted_text,
                },
            )?;
            println!("uploaded case {} ({})", document.title, document.id);
            portal.save()?;
        }
        Commands::Search { query } => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            let hits = portal.search.search(&session, &query)?;
            if hits.is_empty() {
                println!("no case content matches the query");
            }
            for hit in hits {
                let preview: String = hit.chunk.content.chars().take(200).collect();
                println!(
                    "{} (Chunk {})\n  {}",
                    hit.document_title,
                    hit.chunk.order + 1,
                    preview
                );
            }
            portal.save()?;
        }
        Commands::Ask { query } => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            let reply = portal.assistant.ask(&session, &query)?;
            println!("{}", reply.answer);
            portal.save()?;
        }
        Commands::Cases => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            for document in portal.access.list_cases(&session)? {
                println!(
                    "{}  {}  [{}]",
                    document.id,
                    document.title,
                    match document.status {
                        DocumentStatus::Active => "active",
                        DocumentStatus::Closed => "closed",
                    }
                );
            }
        }
        Commands::View { id } => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            let document = portal.access.view_document(&session, &id)?;
            println!("{}\n\n{}", document.title, document.extracted_text);
            portal.save()?;
        }
        Commands::History => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            session.require_role(casefile_core::Role::Staff)?;
            for entry in portal.history.recent() {
                println!("[{}] Q: {}", entry.timestamp.format("%Y-%m-%d %H:%M"), entry.query);
            }
        }
        Commands::Audit => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            for record in portal.access.audit_log(&session)? {
                println!(
                    "[{}] {} {}: {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.actor_id,
                    record.action,
                    record.detail
                );
            }
        }
        Commands::Report => {
            let session = require_session(&portal, cli.employee.as_deref())?;
            let report = portal.reports.usage(&session)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn require_session(
    portal: &Portal,
    employee: Option<&str>,
) -> Result<casefile_core::Session> {
    match employee {
        Some(badge) => portal.directory.session_for(badge),
        None => bail!("this command requires --employee <badge-id>"),
    }
}
