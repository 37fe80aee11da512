//! Snapshot manifest
//!
//! Written last, after the three record files, so a manifest that
//! matches its files is evidence the snapshot completed.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::errors::{StorageError, StorageResult};

/// Per-file checksums inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestChecksums {
    /// Checksum of the individuals file
    pub individuals: String,
    /// Checksum of the households file
    pub households: String,
    /// Checksum of the transactions file
    pub transactions: String,
}

/// Description of one completed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// RFC3339 UTC creation timestamp
    pub created_at: String,
    /// Individuals written
    pub individual_count: usize,
    /// Households written
    pub household_count: usize,
    /// Transactions written
    pub transaction_count: usize,
    /// CRC32 checksums of the written files
    pub checksums: ManifestChecksums,
}

impl SnapshotManifest {
    /// Builds a manifest stamped with the current time.
    pub fn new(
        individual_count: usize,
        household_count: usize,
        transaction_count: usize,
        checksums: ManifestChecksums,
    ) -> Self {
        Self {
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            individual_count,
            household_count,
            transaction_count,
            checksums,
        }
    }

    /// Serializes the manifest to `path` as pretty JSON.
    pub fn write(&self, path: &Path) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::Manifest(e.to_string()))?;
        fs::write(path, json).map_err(|e| StorageError::io(path, e))
    }

    /// Reads a manifest back from `path`.
    pub fn read(path: &Path) -> StorageResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| StorageError::Manifest(e.to_string()))
    }
}
