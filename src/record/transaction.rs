//! Transaction record type, expense categories and calendar dates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::FieldViolation;
use super::{IndividualId, TransactionId};

/// Expense category, wire-coded 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Housing rent
    Rent,
    /// Utility bills
    Utility,
    /// Groceries
    Grocery,
    /// Stationery and supplies
    Stationery,
    /// Leisure and entertainment
    Leisure,
}

impl Category {
    /// All categories in wire-code order.
    pub const ALL: [Category; 5] = [
        Category::Rent,
        Category::Utility,
        Category::Grocery,
        Category::Stationery,
        Category::Leisure,
    ];

    /// Returns the 1-based wire code used by the flat-file format.
    pub fn code(self) -> u8 {
        match self {
            Category::Rent => 1,
            Category::Utility => 2,
            Category::Grocery => 3,
            Category::Stationery => 4,
            Category::Leisure => 5,
        }
    }

    /// Decodes a 1..=5 wire code.
    pub fn from_code(code: i64) -> Result<Self, FieldViolation> {
        match code {
            1 => Ok(Category::Rent),
            2 => Ok(Category::Utility),
            3 => Ok(Category::Grocery),
            4 => Ok(Category::Stationery),
            5 => Ok(Category::Leisure),
            _ => Err(FieldViolation::BadCategoryCode { code }),
        }
    }

    /// Returns the category name for report output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Rent => "RENT",
            Category::Utility => "UTILITY",
            Category::Grocery => "GROCERY",
            Category::Stationery => "STATIONERY",
            Category::Leisure => "LEISURE",
        }
    }
}

/// A calendar day in fixed-width `YYYY-MM-DD` form.
///
/// The text form is validated as a real calendar date on construction
/// but kept as a string: fixed-width decimal dates order correctly
/// under plain lexicographic comparison, which is what every range
/// scan relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxDate(String);

impl TxDate {
    /// Parses and validates a `YYYY-MM-DD` date.
    pub fn parse(text: &str) -> Result<Self, FieldViolation> {
        if text.len() != 10 {
            return Err(FieldViolation::BadDate {
                text: text.to_string(),
            });
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| FieldViolation::BadDate {
            text: text.to_string(),
        })?;
        Ok(Self(text.to_string()))
    }

    /// Returns the fixed-width text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns (year, month) for monthly bucketing.
    pub fn year_month(&self) -> (i32, u32) {
        use chrono::Datelike;

        // The constructor guarantees a parseable date.
        let date = NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").unwrap_or_default();
        (date.year(), date.month())
    }
}

impl std::fmt::Display for TxDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dated expense attributed to an individual.
///
/// Owned by the ledger index, ordered ascending by `id`. The owner is a
/// loose reference: the individual is not required to currently exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier across the whole store
    pub id: TransactionId,
    /// Owning individual, by id
    pub owner_id: IndividualId,
    /// Expense category
    pub category: Category,
    /// Amount spent, non-negative
    pub amount: f64,
    /// Calendar day of the expense
    pub date: TxDate,
}

impl Transaction {
    /// Creates a validated transaction record.
    pub fn new(
        id: TransactionId,
        owner_id: IndividualId,
        category: Category,
        amount: f64,
        date: TxDate,
    ) -> Result<Self, FieldViolation> {
        if amount < 0.0 {
            return Err(FieldViolation::NegativeAmount { value: amount });
        }
        Ok(Self {
            id,
            owner_id,
            category,
            amount,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code() as i64).unwrap(), category);
        }
        assert!(Category::from_code(0).is_err());
        assert!(Category::from_code(6).is_err());
    }

    #[test]
    fn category_names_for_rendering() {
        assert_eq!(Category::Rent.name(), "RENT");
        assert_eq!(Category::Stationery.name(), "STATIONERY");
    }

    #[test]
    fn date_rejects_malformed_text() {
        assert!(TxDate::parse("2024-3-01").is_err());
        assert!(TxDate::parse("2024-13-01").is_err());
        assert!(TxDate::parse("2024-02-30").is_err());
        assert!(TxDate::parse("garbage").is_err());
    }

    #[test]
    fn date_orders_lexicographically() {
        let early = TxDate::parse("2024-03-01").unwrap();
        let late = TxDate::parse("2024-11-30").unwrap();
        assert!(early < late);
        assert_eq!(early.year_month(), (2024, 3));
    }

    #[test]
    fn rejects_negative_amount() {
        let date = TxDate::parse("2024-01-01").unwrap();
        assert!(Transaction::new(1, 1, Category::Rent, -5.0, date).is_err());
    }
}
