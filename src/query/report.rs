//! Typed report values produced by the query engine

use serde::Serialize;

use crate::record::{Category, HouseholdId, IndividualId, Transaction, TransactionId, TxDate};

/// One member's share of an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberContribution {
    /// Member individual id
    pub individual_id: IndividualId,
    /// Member name at report time (empty for dangling references)
    pub name: String,
    /// Amount attributed to this member
    pub amount: f64,
}

/// Per-category amount bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    /// Expense category
    pub category: Category,
    /// Amount in this category
    pub total: f64,
}

/// Per-day amount bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    /// Calendar day
    pub date: TxDate,
    /// Amount spent on this day
    pub total: f64,
}

/// All transactions dated within a closed range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    /// Inclusive lower bound
    pub start: TxDate,
    /// Inclusive upper bound
    pub end: TxDate,
    /// Matching transactions in chain (ascending id) order
    pub entries: Vec<Transaction>,
    /// Sum of matching amounts
    pub total: f64,
}

/// One household's spending in a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// Household under report
    pub household_id: HouseholdId,
    /// Category under report
    pub category: Category,
    /// Sum across all members
    pub total: f64,
    /// Every member's share, sorted descending by amount
    pub contributions: Vec<MemberContribution>,
    /// Total as a fraction of household income, 0 when income is 0
    pub share_of_income: f64,
}

/// A household's spending bucketed by calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    /// Household under report
    pub household_id: HouseholdId,
    /// The heaviest day, absent when the household has no spending
    pub top: Option<DayBucket>,
    /// Every spending day, sorted descending by amount
    pub days: Vec<DayBucket>,
    /// Sum across all days
    pub total: f64,
    /// Mean per spending day, 0 when there are none
    pub average_daily: f64,
}

/// One owner's transactions within an id range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdRangeReport {
    /// Owner under report
    pub owner_id: IndividualId,
    /// Inclusive lower id bound (normalised)
    pub start: TransactionId,
    /// Inclusive upper id bound (normalised)
    pub end: TransactionId,
    /// Matching transactions, ascending by id, no duplicates
    pub entries: Vec<Transaction>,
    /// Sum of matching amounts
    pub total: f64,
    /// Non-empty category buckets in category code order
    pub by_category: Vec<CategoryBucket>,
}

/// A household's spending for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdMonthReport {
    /// Household under report
    pub household_id: HouseholdId,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1..=12
    pub month: u32,
    /// Household income snapshot at report time
    pub total_income: f64,
    /// Month's spending across all members
    pub total_expense: f64,
    /// Income minus expense; negative means a deficit
    pub surplus: f64,
    /// Every member's share in member order
    pub member_totals: Vec<MemberContribution>,
}

/// One individual's spending for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualMonthReport {
    /// Owner under report
    pub owner_id: IndividualId,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1..=12
    pub month: u32,
    /// Month's spending across all categories
    pub total: f64,
    /// Non-empty category buckets, sorted descending by amount
    pub categories: Vec<CategoryBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TxDate;

    /// Reports cross the collaborator boundary as data; they must
    /// serialize cleanly.
    #[test]
    fn reports_serialize_as_json() {
        let report = DayReport {
            household_id: 100,
            top: Some(DayBucket {
                date: TxDate::parse("2024-03-05").unwrap(),
                total: 1050.0,
            }),
            days: vec![],
            total: 1050.0,
            average_daily: 1050.0,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"household_id\":100"));
        assert!(json.contains("2024-03-05"));
    }
}
