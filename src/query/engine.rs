//! Report execution over the live indexes

use crate::record::{Category, HouseholdId, IndividualId, TransactionId, TxDate};
use crate::store::{RecordStore, StoreError, StoreResult};

use super::report::{
    CategoryBucket, CategoryReport, DayBucket, DayReport, HouseholdMonthReport, IdRangeReport,
    IndividualMonthReport, MemberContribution, PeriodReport,
};

/// Stateless query operations over a [`RecordStore`].
pub struct QueryEngine;

impl QueryEngine {
    /// Sum of all ledger amounts owned by the household's current
    /// members. One full chain walk per call.
    pub fn total_monthly_expense(
        store: &RecordStore,
        household_id: HouseholdId,
    ) -> StoreResult<f64> {
        let household = store
            .household(household_id)
            .ok_or_else(|| StoreError::not_found("household", household_id))?;
        Ok(store.expense_total_for(&household.members))
    }

    /// All transactions dated within `[start, end]`, chain order.
    pub fn period_report(store: &RecordStore, start: &str, end: &str) -> StoreResult<PeriodReport> {
        let start = TxDate::parse(start)?;
        let end = TxDate::parse(end)?;
        let entries: Vec<_> = store
            .ledger()
            .range_by_date(&start, &end)
            .into_iter()
            .cloned()
            .collect();
        let total = entries.iter().map(|record| record.amount).sum();
        Ok(PeriodReport {
            start,
            end,
            entries,
            total,
        })
    }

    /// A household's spending in one category, per member.
    pub fn category_report(
        store: &RecordStore,
        household_id: HouseholdId,
        category: Category,
    ) -> StoreResult<CategoryReport> {
        let household = store
            .household(household_id)
            .ok_or_else(|| StoreError::not_found("household", household_id))?;

        let mut contributions: Vec<MemberContribution> = household
            .members
            .iter()
            .map(|&member| MemberContribution {
                individual_id: member,
                name: member_name(store, member),
                amount: 0.0,
            })
            .collect();

        let mut total = 0.0;
        for record in store.ledger().iter_chain() {
            if record.category != category {
                continue;
            }
            if let Some(slot) = contributions
                .iter_mut()
                .find(|c| c.individual_id == record.owner_id)
            {
                slot.amount += record.amount;
                total += record.amount;
            }
        }

        exchange_sort_desc(&mut contributions, |c| c.amount);
        let share_of_income = if household.total_income > 0.0 {
            total / household.total_income
        } else {
            0.0
        };
        Ok(CategoryReport {
            household_id,
            category,
            total,
            contributions,
            share_of_income,
        })
    }

    /// A household's spending bucketed by day, heaviest first.
    pub fn highest_expense_day(
        store: &RecordStore,
        household_id: HouseholdId,
    ) -> StoreResult<DayReport> {
        let household = store
            .household(household_id)
            .ok_or_else(|| StoreError::not_found("household", household_id))?;

        let mut days: Vec<DayBucket> = Vec::new();
        for record in store.ledger().iter_chain() {
            if !household.has_member(record.owner_id) {
                continue;
            }
            match days.iter_mut().find(|bucket| bucket.date == record.date) {
                Some(bucket) => bucket.total += record.amount,
                None => days.push(DayBucket {
                    date: record.date.clone(),
                    total: record.amount,
                }),
            }
        }

        exchange_sort_desc(&mut days, |bucket| bucket.total);
        let total: f64 = days.iter().map(|bucket| bucket.total).sum();
        let average_daily = if days.is_empty() {
            0.0
        } else {
            total / days.len() as f64
        };
        Ok(DayReport {
            household_id,
            top: days.first().cloned(),
            days,
            total,
            average_daily,
        })
    }

    /// One owner's transactions with ids in `[start, end]`.
    ///
    /// Bounds given in either order are normalised. The owner must
    /// exist; the scan itself tolerates chains carrying other owners'
    /// records and never returns a duplicate id.
    pub fn id_range_report(
        store: &RecordStore,
        start: TransactionId,
        end: TransactionId,
        owner_id: IndividualId,
    ) -> StoreResult<IdRangeReport> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if !store.contains_individual(owner_id) {
            return Err(StoreError::not_found("individual", owner_id));
        }

        let entries: Vec<_> = store
            .ledger()
            .range_by_id_for_owner(start, end, owner_id)
            .into_iter()
            .cloned()
            .collect();
        let total = entries.iter().map(|record| record.amount).sum();
        let by_category = category_buckets(entries.iter().map(|r| (r.category, r.amount)));
        Ok(IdRangeReport {
            owner_id,
            start,
            end,
            entries,
            total,
            by_category,
        })
    }

    /// A household's spending for one calendar month, per member.
    pub fn household_month_report(
        store: &RecordStore,
        household_id: HouseholdId,
        year: i32,
        month: u32,
    ) -> StoreResult<HouseholdMonthReport> {
        let household = store
            .household(household_id)
            .ok_or_else(|| StoreError::not_found("household", household_id))?;

        let mut member_totals: Vec<MemberContribution> = household
            .members
            .iter()
            .map(|&member| MemberContribution {
                individual_id: member,
                name: member_name(store, member),
                amount: 0.0,
            })
            .collect();

        let mut total_expense = 0.0;
        for record in store.ledger().iter_chain() {
            if record.date.year_month() != (year, month) {
                continue;
            }
            if let Some(slot) = member_totals
                .iter_mut()
                .find(|c| c.individual_id == record.owner_id)
            {
                slot.amount += record.amount;
                total_expense += record.amount;
            }
        }

        let total_income = household.total_income;
        Ok(HouseholdMonthReport {
            household_id,
            year,
            month,
            total_income,
            total_expense,
            surplus: total_income - total_expense,
            member_totals,
        })
    }

    /// One individual's spending for one calendar month, by category.
    pub fn individual_month_report(
        store: &RecordStore,
        owner_id: IndividualId,
        year: i32,
        month: u32,
    ) -> StoreResult<IndividualMonthReport> {
        if !store.contains_individual(owner_id) {
            return Err(StoreError::not_found("individual", owner_id));
        }

        let matching = store.ledger().iter_chain().filter(|record| {
            record.owner_id == owner_id && record.date.year_month() == (year, month)
        });
        let mut categories = category_buckets(matching.map(|r| (r.category, r.amount)));
        let total = categories.iter().map(|bucket| bucket.total).sum();
        exchange_sort_desc(&mut categories, |bucket| bucket.total);
        Ok(IndividualMonthReport {
            owner_id,
            year,
            month,
            total,
            categories,
        })
    }
}

fn member_name(store: &RecordStore, member: IndividualId) -> String {
    store
        .individual(member)
        .map(|record| record.name.clone())
        .unwrap_or_default()
}

/// Folds (category, amount) pairs into non-empty buckets, category
/// code order.
fn category_buckets(pairs: impl Iterator<Item = (Category, f64)>) -> Vec<CategoryBucket> {
    let mut totals = [0.0_f64; Category::ALL.len()];
    for (category, amount) in pairs {
        totals[category.code() as usize - 1] += amount;
    }
    Category::ALL
        .iter()
        .zip(totals)
        .filter(|(_, total)| *total > 0.0)
        .map(|(&category, total)| CategoryBucket { category, total })
        .collect()
}

/// Descending exchange sort. Equal amounts keep encounter order, which
/// callers must treat as incidental.
fn exchange_sort_desc<T>(items: &mut [T], amount_of: impl Fn(&T) -> f64) {
    let n = items.len();
    for pass in 1..n {
        for j in 0..n - pass {
            if amount_of(&items[j]) < amount_of(&items[j + 1]) {
                items.swap(j, j + 1);
            }
        }
    }
}
