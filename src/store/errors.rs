//! Store Error Types
//!
//! Unified error handling for every mutating store operation.

use std::fmt;

use crate::record::FieldViolation;

/// Store module result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Insert targets a key that already exists; nothing was mutated
    Duplicate(String),

    /// Operation targets a missing key; nothing was mutated
    NotFound(String),

    /// Individual already belongs to a household
    AlreadyInHousehold(String),

    /// A fixed capacity bound was reached
    CapacityExceeded(String),

    /// Record fields violate the fixed record contract
    MalformedRecord(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::AlreadyInHousehold(msg) => write!(f, "Already in a household: {}", msg),
            Self::CapacityExceeded(msg) => write!(f, "Capacity exceeded: {}", msg),
            Self::MalformedRecord(msg) => write!(f, "Malformed record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// Create a duplicate-key error
    pub fn duplicate(entity: &str, id: u32) -> Self {
        Self::Duplicate(format!("{} {}", entity, id))
    }

    /// Create a missing-key error
    pub fn not_found(entity: &str, id: u32) -> Self {
        Self::NotFound(format!("{} {}", entity, id))
    }

    /// Create a membership-violation error
    pub fn already_in_household(individual_id: u32) -> Self {
        Self::AlreadyInHousehold(format!("individual {}", individual_id))
    }

    /// Create a capacity error
    pub fn capacity(entity: &str, limit: usize) -> Self {
        Self::CapacityExceeded(format!("at most {} {} records", limit, entity))
    }
}

impl From<FieldViolation> for StoreError {
    fn from(violation: FieldViolation) -> Self {
        Self::MalformedRecord(violation.to_string())
    }
}
