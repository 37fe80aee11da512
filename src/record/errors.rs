//! Field-level validation failures for record construction

use std::fmt;

/// A record field that violates the fixed record contract.
///
/// Violations are detected at construction time so that the indexes
/// only ever hold well-formed records.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldViolation {
    /// Name is empty
    EmptyName,
    /// Name exceeds the 49-character bound
    NameTooLong {
        /// Observed length in characters
        length: usize,
    },
    /// Income or amount is negative
    NegativeAmount {
        /// Observed value
        value: f64,
    },
    /// Category code outside 1..=5
    BadCategoryCode {
        /// Observed code
        code: i64,
    },
    /// Date is not a valid fixed-width YYYY-MM-DD calendar date
    BadDate {
        /// Observed text
        text: String,
    },
    /// Household member count outside 1..=4
    BadMemberCount {
        /// Observed count
        count: usize,
    },
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { length } => {
                write!(f, "name of {} characters exceeds the 49-character bound", length)
            }
            Self::NegativeAmount { value } => {
                write!(f, "amount {} must be non-negative", value)
            }
            Self::BadCategoryCode { code } => {
                write!(f, "category code {} outside 1..=5", code)
            }
            Self::BadDate { text } => {
                write!(f, "'{}' is not a valid YYYY-MM-DD date", text)
            }
            Self::BadMemberCount { count } => {
                write!(f, "member count {} outside 1..=4", count)
            }
        }
    }
}

impl std::error::Error for FieldViolation {}
