//! Ledger index subsystem for hearthdb
//!
//! A balanced multiway tree with a doubly-linked leaf chain (B+ tree)
//! keyed by transaction id. Records live only in leaves; internal nodes
//! carry routing separators. The ascending leaf chain is the sole
//! authoritative source for ordered and range scans.
//!
//! # Invariants
//!
//! - Keys ascend strictly along the leaf chain, one entry per stored
//!   transaction
//! - All leaves sit at the same depth; internal splits copy no records
//! - Deletion is leaf-level only: internal occupancy is deliberately
//!   not repaired afterwards (see DESIGN.md), while sorted-key and
//!   routing invariants continue to hold

mod tree;

pub use tree::{ChainIter, TransactionIndex};
