//! # Casefile Portal
//!
//! Application layer over [`casefile_core`]: configuration, the
//! employee directory and login flow, the upload pipeline, gated read
//! paths, whole-blob snapshot persistence, and usage reports. The
//! `caseportal` binary wires these together behind a CLI.
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────┐
//! │ Upload    │──▶│ Chunker       │──▶│ Index Store  │
//! └──────────┘   └───────────────┘   └──────┬──────┘
//!                                           │
//!              ┌────────────────────────────┤
//!              ▼                            ▼
//!       ┌────────────┐             ┌────────────────┐
//!       │ Lexical     │             │ Retrieval       │
//!       │ Search      │             │ Composer        │
//!       └─────┬──────┘             └───────┬────────┘
//!             └────── audit envelope ──────┘
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with reference-policy defaults |
//! | [`directory`] | Employee roster, login challenge, logout |
//! | [`ingest`] | Upload → chunk → index pipeline |
//! | [`access`] | Gated list/view/download and audit-log reads |
//! | [`snapshot`] | Read-whole/write-whole JSON persistence |
//! | [`reports`] | Usage summaries over the logs |
//! | [`app`] | Component wiring shared by the CLI and tests |

pub mod access;
pub mod app;
pub mod config;
pub mod directory;
pub mod ingest;
pub mod reports;
pub mod snapshot;

pub use app::Portal;
pub use config::{load_config, Config};
pub use directory::{reference_roster, Directory};
pub use ingest::{IngestPipeline, UploadRequest};
