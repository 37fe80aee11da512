//! Individual record type

use serde::{Deserialize, Serialize};

use super::errors::FieldViolation;
use super::{check_name, IndividualId};

/// A person known to the store.
///
/// Owned exclusively by the identity index. Households and transactions
/// refer to individuals by `id` only; a dangling reference is legal and
/// resolves to "no such person" at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Unique identifier
    pub id: IndividualId,
    /// Display name, at most 49 characters
    pub name: String,
    /// Monthly income, non-negative
    pub income: f64,
}

impl Individual {
    /// Creates a validated individual record.
    pub fn new(
        id: IndividualId,
        name: impl Into<String>,
        income: f64,
    ) -> Result<Self, FieldViolation> {
        let name = name.into();
        check_name(&name)?;
        if income < 0.0 {
            return Err(FieldViolation::NegativeAmount { value: income });
        }
        Ok(Self { id, name, income })
    }
}
