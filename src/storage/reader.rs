//! Snapshot reader
//!
//! Rebuilds a `RecordStore` from the three flat files by repeated
//! single-record insertion. Load order matters: individuals first,
//! then transactions, then households, whose member ids resolve
//! against the already-loaded identity index. Unresolved ids are
//! dropped as absent references, never errors.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::observability::{Logger, Severity};
use crate::store::{RecordStore, StoreError};

use super::codec;
use super::errors::{StorageError, StorageResult};
use super::{HOUSEHOLDS_FILE, INDIVIDUALS_FILE, TRANSACTIONS_FILE};

/// Skipped-line warnings are capped per file to keep degraded loads
/// from flooding the log.
const MAX_SKIP_WARNINGS: usize = 5;

/// What a load actually did, reported back to the caller instead of
/// failing the whole snapshot over single bad lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Individuals inserted
    pub individuals_loaded: usize,
    /// Households inserted
    pub households_loaded: usize,
    /// Transactions inserted
    pub transactions_loaded: usize,
    /// Lines skipped because they did not parse
    pub malformed_skipped: usize,
    /// Lines skipped because their key already existed
    pub duplicates_skipped: usize,
    /// Household member ids that did not resolve and were dropped
    pub unresolved_members: usize,
}

impl LoadReport {
    fn skip_malformed(&mut self, path: &Path, line: usize, reason: String) {
        self.malformed_skipped += 1;
        if self.malformed_skipped <= MAX_SKIP_WARNINGS {
            let error = StorageError::Malformed { line, reason };
            Logger::log_stderr(
                Severity::Warn,
                "load_line_skipped",
                &[
                    ("path", path.display().to_string()),
                    ("error", error.to_string()),
                ],
            );
        }
    }
}

/// Loads whole-store snapshots.
pub struct SnapshotReader;

impl SnapshotReader {
    /// Loads a store from `dir`. Missing files read as empty.
    pub fn load(dir: &Path) -> StorageResult<(RecordStore, LoadReport)> {
        let mut store = RecordStore::new();
        let mut report = LoadReport::default();

        Self::load_individuals(&dir.join(INDIVIDUALS_FILE), &mut store, &mut report)?;
        Self::load_transactions(&dir.join(TRANSACTIONS_FILE), &mut store, &mut report)?;
        Self::load_households(&dir.join(HOUSEHOLDS_FILE), &mut store, &mut report)?;

        Logger::log(
            Severity::Info,
            "snapshot_loaded",
            &[
                ("dir", dir.display().to_string()),
                ("individuals", report.individuals_loaded.to_string()),
                ("households", report.households_loaded.to_string()),
                ("transactions", report.transactions_loaded.to_string()),
                ("malformed_skipped", report.malformed_skipped.to_string()),
                ("duplicates_skipped", report.duplicates_skipped.to_string()),
            ],
        );
        Ok((store, report))
    }

    fn load_individuals(
        path: &Path,
        store: &mut RecordStore,
        report: &mut LoadReport,
    ) -> StorageResult<()> {
        for (line_no, line) in read_lines(path)? {
            let record = match codec::parse_individual(&line) {
                Ok(record) => record,
                Err(reason) => {
                    report.skip_malformed(path, line_no, reason);
                    continue;
                }
            };
            match store.load_individual(record) {
                Ok(()) => report.individuals_loaded += 1,
                Err(StoreError::Duplicate(_)) => report.duplicates_skipped += 1,
                Err(StoreError::CapacityExceeded(_)) => {
                    warn_capacity(path, "individuals");
                    break;
                }
                Err(other) => report.skip_malformed(path, line_no, other.to_string()),
            }
        }
        Ok(())
    }

    fn load_transactions(
        path: &Path,
        store: &mut RecordStore,
        report: &mut LoadReport,
    ) -> StorageResult<()> {
        for (line_no, line) in read_lines(path)? {
            let record = match codec::parse_transaction(&line) {
                Ok(record) => record,
                Err(reason) => {
                    report.skip_malformed(path, line_no, reason);
                    continue;
                }
            };
            // Load path: households arrive later with their snapshot
            // aggregates, so no recompute happens per insert.
            match store.load_transaction(record) {
                Ok(()) => report.transactions_loaded += 1,
                Err(StoreError::Duplicate(_)) => report.duplicates_skipped += 1,
                Err(StoreError::CapacityExceeded(_)) => {
                    warn_capacity(path, "transactions");
                    break;
                }
                Err(other) => report.skip_malformed(path, line_no, other.to_string()),
            }
        }
        Ok(())
    }

    fn load_households(
        path: &Path,
        store: &mut RecordStore,
        report: &mut LoadReport,
    ) -> StorageResult<()> {
        for (line_no, line) in read_lines(path)? {
            let mut record = match codec::parse_household(&line) {
                Ok(record) => record,
                Err(reason) => {
                    report.skip_malformed(path, line_no, reason);
                    continue;
                }
            };

            let before = record.members.len();
            record
                .members
                .retain(|&member| store.contains_individual(member));
            report.unresolved_members += before - record.members.len();

            match store.load_household(record) {
                Ok(()) => report.households_loaded += 1,
                Err(StoreError::Duplicate(_)) => report.duplicates_skipped += 1,
                Err(StoreError::CapacityExceeded(_)) => {
                    warn_capacity(path, "households");
                    break;
                }
                Err(other) => report.skip_malformed(path, line_no, other.to_string()),
            }
        }
        Ok(())
    }
}

/// Reads a record file into 1-based numbered, non-empty lines; a
/// missing file is an empty snapshot, not an error.
fn read_lines(path: &Path) -> StorageResult<Vec<(usize, String)>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, line.to_string()))
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

fn warn_capacity(path: &Path, entity: &str) {
    Logger::log_stderr(
        Severity::Warn,
        "load_capacity_reached",
        &[
            ("entity", entity.to_string()),
            ("path", path.display().to_string()),
        ],
    );
}
