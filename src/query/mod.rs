//! Query subsystem for hearthdb
//!
//! Stateless report operations that join and aggregate across the
//! three indexes. Every function takes the store read-only and returns
//! a typed report value; rendering (tables, console) is a front-end
//! concern and never happens here.
//!
//! # Design Principles
//!
//! - Reports never mutate state, not even transiently
//! - Ordered and range scans go through the ledger leaf chain
//! - Multi-bucket reports sort descending by amount with an exchange
//!   sort; tie order is encounter order and not contractual

mod engine;
mod report;

pub use engine::QueryEngine;
pub use report::{
    CategoryBucket, CategoryReport, DayBucket, DayReport, HouseholdMonthReport, IdRangeReport,
    IndividualMonthReport, MemberContribution, PeriodReport,
};
