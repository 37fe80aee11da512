//! Record types for hearthdb
//!
//! The store manages three entity kinds, each owned by exactly one
//! index and referenced from the others by integer id only:
//!
//! - `Individual`: owned by the identity index
//! - `Household`: owned by the household index, members held as ids
//! - `Transaction`: owned by the ledger index, owner held as id
//!
//! # Design Principles
//!
//! - Ids are caller-provided integers, unique per entity kind
//! - Cross-entity links are id lookups, never references
//! - Field bounds are validated at construction, not at use sites

mod errors;
mod household;
mod individual;
mod transaction;

pub use errors::FieldViolation;
pub use household::{Household, MAX_MEMBERS};
pub use individual::Individual;
pub use transaction::{Category, Transaction, TxDate};

/// Identifier of an individual record.
pub type IndividualId = u32;

/// Identifier of a household record.
pub type HouseholdId = u32;

/// Identifier of a transaction record.
pub type TransactionId = u32;

/// Maximum length of a person or household name, in characters.
pub const MAX_NAME_LEN: usize = 49;

/// Validates a name against the fixed record contract.
pub(crate) fn check_name(name: &str) -> Result<(), FieldViolation> {
    if name.is_empty() {
        return Err(FieldViolation::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FieldViolation::NameTooLong {
            length: name.chars().count(),
        });
    }
    Ok(())
}
