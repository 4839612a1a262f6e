//! netfence - load, validate, check, and export IP/CIDR block and allow lists.
//!
//! This crate is the core behind flat-text blocklists and allowlists: it
//! parses list files of IP/CIDR tokens with comments, normalizes entries
//! across IPv4 and IPv6, answers membership queries, and renders lists into
//! several target formats.
//!
//! # Features
//!
//! - **Parsing**: bare addresses and CIDR ranges, both families, with host
//!   bits masked to the canonical network form
//! - **De-duplication**: first occurrence wins, later duplicates counted,
//!   insertion order preserved for deterministic export
//! - **Membership queries**: every covering entry is returned, with full
//!   source attribution
//! - **Export**: plain list, firewall rules, nginx and Apache config
//!   blocks, and a lossless structured JSON format
//!
//! # Quick Start
//!
//! ```ignore
//! use netfence::{loader, export, ExportFormat, MembershipIndex};
//!
//! let report = loader::load(Path::new("blocklists/malware.txt"))?;
//! println!("{} entries", report.set.len());
//!
//! let sets = vec![report.set];
//! let index = MembershipIndex::build(&sets);
//! for entry in index.covers("192.0.2.10")? {
//!     println!("covered by {} ({})", entry.network(), entry.source_list());
//! }
//!
//! let text = export::export(&sets, ExportFormat::Plain)?;
//! ```
//!
//! # Processing model
//!
//! Batch-style and synchronous: load, then query or export, then done. A
//! load never mutates previously produced reports, and in-content problems
//! (invalid tokens, undecodable lines) are collected as diagnostics rather
//! than aborting the file; only I/O failures are hard errors.

mod entry;
mod error;
mod family;
mod index;
mod list;

pub mod export;
pub mod loader;

// Re-export core types
pub use entry::Entry;
pub use error::{Error, Result};
pub use family::AddrFamily;
pub use index::MembershipIndex;
pub use list::EntrySet;

// Re-export loader result types
pub use loader::{DiagnosticKind, DirectoryReport, LoadReport, LoadStats, ParseDiagnostic};

// Re-export export format selection
pub use export::ExportFormat;
