//! Household index subsystem for hearthdb
//!
//! A balanced multiway tree (4 keys / 5 children per node) keyed by
//! household id. Each stored household carries its member ids and the
//! two derived totals; the store recomputes those totals, the index
//! only files the records.
//!
//! # Invariants
//!
//! - Keys ascend strictly along any traversal; duplicates are the
//!   caller's responsibility to reject before insert
//! - All leaves sit at the same depth
//! - After a delete, nodes below the minimum occupancy are repaired by
//!   borrowing from a surplus sibling or merging through the parent

mod btree;

pub use btree::HouseholdIndex;
