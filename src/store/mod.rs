//! Record store coordinator for hearthdb
//!
//! `RecordStore` owns the three indexes and is the only mutation
//! surface. Every cross-index consistency rule lives here:
//!
//! - deleting an individual detaches them from their household first,
//!   and an emptied household is deleted outright
//! - every transaction mutation recomputes `total_monthly_expense` for
//!   the households of the transaction's owner
//! - an individual joins at most one household, ever
//!
//! # Invariants
//!
//! - A failed operation leaves all three indexes exactly as they were
//! - Fixed capacity bounds are enforced here, not in the indexes
//! - Aggregates are recomputed on demand by the mutating operation,
//!   never by a background trigger

mod errors;
mod store;

pub use errors::{StoreError, StoreResult};
pub use store::{RecordStore, MAX_HOUSEHOLDS, MAX_INDIVIDUALS, MAX_TRANSACTIONS};
