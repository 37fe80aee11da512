//! Snapshot Round-Trip Tests
//!
//! Tests for the persistence boundary:
//! - save → load reproduces the same record sets
//! - The manifest matches what was written
//! - Bad lines are skipped and counted, never fatal

use std::fs;

use hearthdb::record::Category;
use hearthdb::storage::{
    compute_file_checksum, format_checksum, SnapshotManifest, SnapshotReader, SnapshotWriter,
    HOUSEHOLDS_FILE, INDIVIDUALS_FILE, MANIFEST_FILE, TRANSACTIONS_FILE,
};
use hearthdb::store::RecordStore;

// =============================================================================
// Helper Functions
// =============================================================================

fn populated_store() -> RecordStore {
    let mut store = RecordStore::new();
    store.add_individual(1, "Alice", 50_000.0).unwrap();
    store.add_individual(2, "Bob", 40_000.0).unwrap();
    store.add_individual(3, "Cara", 30_000.0).unwrap();
    store.add_household(100, "Smiths", &[1, 2]).unwrap();
    store.add_household(101, "Solo", &[3]).unwrap();
    for id in 1..=9 {
        let owner = (id % 3) + 1;
        let category = Category::from_code(i64::from(id % 5) + 1).unwrap();
        store
            .add_transaction(id, owner, category, f64::from(id) * 7.5, "2024-03-01")
            .unwrap();
    }
    store
}

// =============================================================================
// Round trip
// =============================================================================

/// A saved store loads back with identical record sets.
#[test]
fn test_save_load_round_trip() {
    let store = populated_store();
    let dir = tempfile::tempdir().unwrap();
    SnapshotWriter::save(&store, dir.path()).unwrap();

    let (loaded, report) = SnapshotReader::load(dir.path()).unwrap();
    assert_eq!(report.individuals_loaded, 3);
    assert_eq!(report.households_loaded, 2);
    assert_eq!(report.transactions_loaded, 9);
    assert_eq!(report.malformed_skipped, 0);
    assert_eq!(report.duplicates_skipped, 0);

    let originals: Vec<_> = store.snapshot_individuals().into_iter().cloned().collect();
    let reloaded: Vec<_> = loaded.snapshot_individuals().into_iter().cloned().collect();
    assert_eq!(originals, reloaded);

    let originals: Vec<_> = store.snapshot_households().into_iter().cloned().collect();
    let reloaded: Vec<_> = loaded.snapshot_households().into_iter().cloned().collect();
    assert_eq!(originals, reloaded);

    let originals: Vec<_> = store.snapshot_transactions().into_iter().cloned().collect();
    let reloaded: Vec<_> = loaded.snapshot_transactions().into_iter().cloned().collect();
    assert_eq!(originals, reloaded);
}

/// Snapshot files are emitted in index traversal order.
#[test]
fn test_snapshot_files_are_key_ordered() {
    let store = populated_store();
    let dir = tempfile::tempdir().unwrap();
    SnapshotWriter::save(&store, dir.path()).unwrap();

    let individuals = fs::read_to_string(dir.path().join(INDIVIDUALS_FILE)).unwrap();
    let ids: Vec<u32> = individuals
        .lines()
        .map(|line| line.split(',').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let transactions = fs::read_to_string(dir.path().join(TRANSACTIONS_FILE)).unwrap();
    let ids: Vec<u32> = transactions
        .lines()
        .map(|line| line.split(' ').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(ids, (1..=9).collect::<Vec<_>>());
}

// =============================================================================
// Manifest
// =============================================================================

/// Manifest counts and checksums describe the written files exactly.
#[test]
fn test_manifest_matches_written_files() {
    let store = populated_store();
    let dir = tempfile::tempdir().unwrap();
    let manifest = SnapshotWriter::save(&store, dir.path()).unwrap();

    assert_eq!(manifest.individual_count, 3);
    assert_eq!(manifest.household_count, 2);
    assert_eq!(manifest.transaction_count, 9);

    let on_disk = SnapshotManifest::read(&dir.path().join(MANIFEST_FILE)).unwrap();
    assert_eq!(on_disk, manifest);

    let checksum = compute_file_checksum(&dir.path().join(HOUSEHOLDS_FILE)).unwrap();
    assert_eq!(format_checksum(checksum), manifest.checksums.households);
}

/// The household writer leaves no temp file behind.
#[test]
fn test_household_temp_file_is_renamed_away() {
    let store = populated_store();
    let dir = tempfile::tempdir().unwrap();
    SnapshotWriter::save(&store, dir.path()).unwrap();

    assert!(dir.path().join(HOUSEHOLDS_FILE).exists());
    assert!(!dir.path().join("households.tmp").exists());
}

/// Re-saving over an existing snapshot replaces it cleanly.
#[test]
fn test_save_overwrites_previous_snapshot() {
    let mut store = populated_store();
    let dir = tempfile::tempdir().unwrap();
    SnapshotWriter::save(&store, dir.path()).unwrap();

    store.remove_transaction(9).unwrap();
    store.remove_individual(3).unwrap();
    let manifest = SnapshotWriter::save(&store, dir.path()).unwrap();
    assert_eq!(manifest.individual_count, 2);
    assert_eq!(manifest.household_count, 1);
    assert_eq!(manifest.transaction_count, 8);

    let (loaded, _) = SnapshotReader::load(dir.path()).unwrap();
    assert_eq!(loaded.individual_count(), 2);
    assert!(loaded.transaction(9).is_none());
}

// =============================================================================
// Degraded input
// =============================================================================

/// Malformed and duplicate lines skip with counts; the rest load.
#[test]
fn test_degraded_snapshot_loads_partially() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(INDIVIDUALS_FILE),
        "1,Alice,100.00\ngarbage line\n2,Bob,oops\n2,Bob,50.00\n2,Bob Again,60.00\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(TRANSACTIONS_FILE),
        "1 1 3 20.00 2024-01-01\n1 1 3 99.00 2024-01-02\n2 2 9 5.00 2024-01-01\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(HOUSEHOLDS_FILE),
        "100,Smiths,2,150.00,20.00,1,2\nbroken\n",
    )
    .unwrap();

    let (store, report) = SnapshotReader::load(dir.path()).unwrap();
    assert_eq!(store.individual_count(), 2);
    assert_eq!(store.transaction_count(), 1);
    assert_eq!(store.household_count(), 1);

    // garbage line + bad income + bad category + broken household
    assert_eq!(report.malformed_skipped, 4);
    // duplicate individual + duplicate transaction
    assert_eq!(report.duplicates_skipped, 2);

    // First-wins on duplicate keys, as with in-memory inserts.
    assert_eq!(store.individual(2).unwrap().income, 50.0);
    assert_eq!(store.transaction(1).unwrap().amount, 20.0);
}
