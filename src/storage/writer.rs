//! Snapshot writer
//!
//! Emits the three record files in index traversal order: individuals
//! and households ascend by key, transactions follow the leaf chain.
//! Only the household file gets the temp-file-then-rename treatment;
//! the other two overwrite their targets in place, a crash-safety gap
//! carried over deliberately (DESIGN.md).

use std::fs;
use std::path::Path;

use crate::observability::{Logger, Severity};
use crate::store::RecordStore;

use super::checksum::{compute_file_checksum, format_checksum};
use super::codec;
use super::errors::{StorageError, StorageResult};
use super::manifest::{ManifestChecksums, SnapshotManifest};
use super::{HOUSEHOLDS_FILE, INDIVIDUALS_FILE, MANIFEST_FILE, TRANSACTIONS_FILE};

/// Persists whole-store snapshots.
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Writes the three record files into `dir`, then the manifest.
    ///
    /// The manifest goes last: if it matches its files, the snapshot
    /// completed.
    pub fn save(store: &RecordStore, dir: &Path) -> StorageResult<SnapshotManifest> {
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let individuals_path = dir.join(INDIVIDUALS_FILE);
        let households_path = dir.join(HOUSEHOLDS_FILE);
        let transactions_path = dir.join(TRANSACTIONS_FILE);

        let individual_count = Self::save_individuals(store, &individuals_path)?;
        let transaction_count = Self::save_transactions(store, &transactions_path)?;
        let household_count = Self::save_households(store, &households_path)?;

        let checksums = ManifestChecksums {
            individuals: format_checksum(compute_file_checksum(&individuals_path)?),
            households: format_checksum(compute_file_checksum(&households_path)?),
            transactions: format_checksum(compute_file_checksum(&transactions_path)?),
        };
        let manifest = SnapshotManifest::new(
            individual_count,
            household_count,
            transaction_count,
            checksums,
        );
        manifest.write(&dir.join(MANIFEST_FILE))?;

        Logger::log(
            Severity::Info,
            "snapshot_saved",
            &[
                ("dir", dir.display().to_string()),
                ("individuals", individual_count.to_string()),
                ("households", household_count.to_string()),
                ("transactions", transaction_count.to_string()),
            ],
        );
        Ok(manifest)
    }

    /// Writes individuals ascending by id, overwriting in place.
    pub fn save_individuals(store: &RecordStore, path: &Path) -> StorageResult<usize> {
        let mut contents = String::new();
        let mut count = 0;
        for record in store.snapshot_individuals() {
            contents.push_str(&codec::encode_individual(record));
            contents.push('\n');
            count += 1;
        }
        fs::write(path, contents).map_err(|e| StorageError::io(path, e))?;
        Ok(count)
    }

    /// Writes transactions in leaf-chain order, overwriting in place.
    pub fn save_transactions(store: &RecordStore, path: &Path) -> StorageResult<usize> {
        let mut contents = String::new();
        let mut count = 0;
        for record in store.snapshot_transactions() {
            contents.push_str(&codec::encode_transaction(record));
            contents.push('\n');
            count += 1;
        }
        fs::write(path, contents).map_err(|e| StorageError::io(path, e))?;
        Ok(count)
    }

    /// Writes households ascending by id via temp-file-then-rename.
    ///
    /// Households that lost every member to unresolved references are
    /// not persisted.
    pub fn save_households(store: &RecordStore, path: &Path) -> StorageResult<usize> {
        let mut contents = String::new();
        let mut count = 0;
        for record in store.snapshot_households() {
            if record.members.is_empty() {
                continue;
            }
            contents.push_str(&codec::encode_household(record));
            contents.push('\n');
            count += 1;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;
        Ok(count)
    }
}
