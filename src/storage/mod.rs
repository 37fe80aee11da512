//! Snapshot persistence subsystem for hearthdb
//!
//! Whole-store snapshots as three flat text files plus a JSON manifest.
//! This is the collaborator boundary: the core emits records in index
//! traversal order and consumes them back, and this module owns the
//! line codec on both sides.
//!
//! # Design Principles
//!
//! - Snapshots are full-structure dumps, never incremental
//! - The household file is written via temp-file-then-rename; the
//!   individual and transaction files overwrite in place, a known
//!   crash-safety gap carried deliberately (see DESIGN.md)
//! - Loading skips malformed and duplicate lines and reports their
//!   counts instead of failing
//! - The manifest records counts and CRC32 checksums of what was
//!   actually written

mod checksum;
mod codec;
mod errors;
mod manifest;
mod reader;
mod writer;

pub use checksum::{compute_file_checksum, format_checksum};
pub use errors::{StorageError, StorageResult};
pub use manifest::{ManifestChecksums, SnapshotManifest};
pub use reader::{LoadReport, SnapshotReader};
pub use writer::SnapshotWriter;

/// Individuals file name inside a snapshot directory.
pub const INDIVIDUALS_FILE: &str = "individuals.txt";
/// Households file name inside a snapshot directory.
pub const HOUSEHOLDS_FILE: &str = "households.txt";
/// Transactions file name inside a snapshot directory.
pub const TRANSACTIONS_FILE: &str = "transactions.txt";
/// Manifest file name inside a snapshot directory.
pub const MANIFEST_FILE: &str = "manifest.json";
