//! The record store coordinator

use crate::household::HouseholdIndex;
use crate::identity::IdentityIndex;
use crate::ledger::TransactionIndex;
use crate::record::{
    Category, Household, HouseholdId, Individual, IndividualId, Transaction, TransactionId,
    TxDate,
};

use super::errors::{StoreError, StoreResult};

/// Fixed capacity bound for individuals.
pub const MAX_INDIVIDUALS: usize = 1000;
/// Fixed capacity bound for households.
pub const MAX_HOUSEHOLDS: usize = 100;
/// Fixed capacity bound for transactions.
pub const MAX_TRANSACTIONS: usize = 1000;

/// The single mutation surface over the three indexes.
///
/// Queries go through [`crate::query`]; persistence goes through
/// [`crate::storage`]. Both of those only ever see this type.
#[derive(Debug, Default)]
pub struct RecordStore {
    individuals: IdentityIndex,
    households: HouseholdIndex,
    ledger: TransactionIndex,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- index views -----------------------------------------------------

    /// Read access to the identity index.
    pub fn individuals(&self) -> &IdentityIndex {
        &self.individuals
    }

    /// Read access to the household index.
    pub fn households(&self) -> &HouseholdIndex {
        &self.households
    }

    /// Read access to the ledger index.
    pub fn ledger(&self) -> &TransactionIndex {
        &self.ledger
    }

    /// Number of individuals held.
    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    /// Number of households held.
    pub fn household_count(&self) -> usize {
        self.households.len()
    }

    /// Number of transactions held.
    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    // ---- individuals -----------------------------------------------------

    /// Inserts a new individual.
    pub fn add_individual(
        &mut self,
        id: IndividualId,
        name: &str,
        income: f64,
    ) -> StoreResult<()> {
        let record = Individual::new(id, name, income)?;
        self.load_individual(record)
    }

    /// Capacity- and duplicate-checked insert of a finished record.
    pub(crate) fn load_individual(&mut self, record: Individual) -> StoreResult<()> {
        if self.individuals.len() >= MAX_INDIVIDUALS {
            return Err(StoreError::capacity("individual", MAX_INDIVIDUALS));
        }
        let id = record.id;
        if !self.individuals.insert(record) {
            return Err(StoreError::duplicate("individual", id));
        }
        Ok(())
    }

    /// Point lookup by individual id.
    pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id)
    }

    /// Whether an individual exists.
    pub fn contains_individual(&self, id: IndividualId) -> bool {
        self.individuals.contains(id)
    }

    /// Updates an individual's name and income in place.
    ///
    /// An income change invalidates the household's income snapshot, so
    /// the owning household (if any) is recomputed before returning.
    pub fn update_individual(
        &mut self,
        id: IndividualId,
        name: &str,
        income: f64,
    ) -> StoreResult<()> {
        let record = Individual::new(id, name, income)?;
        if !self.individuals.update(id, record.name, record.income) {
            return Err(StoreError::not_found("individual", id));
        }
        if let Some(household_id) = self.household_of(id).map(|h| h.id) {
            self.recompute_household(household_id);
        }
        Ok(())
    }

    /// Deletes an individual, cascading into household membership.
    ///
    /// The individual is first detached from their household: the
    /// member list compacts, the aggregates are recomputed, and a
    /// household left with no members is deleted entirely. The ledger
    /// is untouched: transactions keep their now-dangling owner id.
    pub fn remove_individual(&mut self, id: IndividualId) -> StoreResult<()> {
        if !self.individuals.contains(id) {
            return Err(StoreError::not_found("individual", id));
        }

        if let Some(household_id) = self.household_of(id).map(|h| h.id) {
            let emptied = match self.households.search_mut(household_id) {
                Some(household) => {
                    household.remove_member(id);
                    household.members.is_empty()
                }
                None => false,
            };
            if emptied {
                self.households.delete(household_id);
            } else {
                self.recompute_household(household_id);
            }
        }

        self.individuals.delete(id);
        Ok(())
    }

    // ---- households ------------------------------------------------------

    /// Creates a household from a snapshot of current member incomes.
    ///
    /// Member ids must exist, be distinct within the request, and not
    /// belong to any other household. All checks run before any index
    /// is touched, so a rejection mutates nothing.
    pub fn add_household(
        &mut self,
        id: HouseholdId,
        name: &str,
        member_ids: &[IndividualId],
    ) -> StoreResult<()> {
        if self.households.len() >= MAX_HOUSEHOLDS {
            return Err(StoreError::capacity("household", MAX_HOUSEHOLDS));
        }
        let mut record = Household::new(id, name, member_ids.to_vec())?;
        if self.households.search(id).is_some() {
            return Err(StoreError::duplicate("household", id));
        }
        for (slot, &member) in member_ids.iter().enumerate() {
            if member_ids[..slot].contains(&member) {
                return Err(StoreError::duplicate("household member", member));
            }
            if !self.individuals.contains(member) {
                return Err(StoreError::not_found("individual", member));
            }
            if self.household_of(member).is_some() {
                return Err(StoreError::already_in_household(member));
            }
        }

        record.total_income = self.income_total_for(&record.members);
        record.total_monthly_expense = self.expense_total_for(&record.members);
        self.households.insert(record);
        Ok(())
    }

    /// Capacity- and duplicate-checked insert of a loaded household.
    ///
    /// Trusts the snapshot's aggregates and membership; the loader has
    /// already resolved member ids against the identity index.
    pub(crate) fn load_household(&mut self, record: Household) -> StoreResult<()> {
        if self.households.len() >= MAX_HOUSEHOLDS {
            return Err(StoreError::capacity("household", MAX_HOUSEHOLDS));
        }
        if self.households.search(record.id).is_some() {
            return Err(StoreError::duplicate("household", record.id));
        }
        self.households.insert(record);
        Ok(())
    }

    /// Point lookup by household id.
    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.search(id)
    }

    /// The household an individual belongs to, if any.
    ///
    /// Scans every household: membership is bounded by one household
    /// per individual, and this scan is what enforces it.
    pub fn household_of(&self, individual_id: IndividualId) -> Option<&Household> {
        let mut found = None;
        self.households.for_each(&mut |household| {
            if found.is_none() && household.has_member(individual_id) {
                found = Some(household);
            }
        });
        found
    }

    /// Renames a household and refreshes its aggregates.
    pub fn rename_household(&mut self, id: HouseholdId, name: &str) -> StoreResult<()> {
        crate::record::check_name(name).map_err(StoreError::from)?;
        match self.households.search_mut(id) {
            Some(household) => {
                household.name = name.to_string();
            }
            None => return Err(StoreError::not_found("household", id)),
        }
        self.recompute_household(id);
        Ok(())
    }

    /// Deletes a household. Its members stay in the identity index.
    pub fn remove_household(&mut self, id: HouseholdId) -> StoreResult<()> {
        if !self.households.delete(id) {
            return Err(StoreError::not_found("household", id));
        }
        Ok(())
    }

    // ---- transactions ----------------------------------------------------

    /// Inserts a new transaction and refreshes the owner's household.
    ///
    /// The owner id is a loose reference: it is not required to name an
    /// existing individual.
    pub fn add_transaction(
        &mut self,
        id: TransactionId,
        owner_id: IndividualId,
        category: Category,
        amount: f64,
        date: &str,
    ) -> StoreResult<()> {
        let date = TxDate::parse(date)?;
        let record = Transaction::new(id, owner_id, category, amount, date)?;
        self.load_transaction(record)?;
        self.recompute_households_of(owner_id);
        Ok(())
    }

    /// Capacity- and duplicate-checked insert of a finished record.
    ///
    /// Load path: no aggregate recompute, households are loaded with
    /// their snapshot aggregates afterwards.
    pub(crate) fn load_transaction(&mut self, record: Transaction) -> StoreResult<()> {
        if self.ledger.len() >= MAX_TRANSACTIONS {
            return Err(StoreError::capacity("transaction", MAX_TRANSACTIONS));
        }
        let id = record.id;
        if !self.ledger.insert(record) {
            return Err(StoreError::duplicate("transaction", id));
        }
        Ok(())
    }

    /// Point lookup by transaction id.
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    /// Updates a transaction in place; `None` keeps the current value.
    ///
    /// The key and owner never change, so no re-indexing happens; the
    /// owner's household aggregates are refreshed before returning.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        amount: Option<f64>,
        category: Option<Category>,
        date: Option<&str>,
    ) -> StoreResult<()> {
        if let Some(value) = amount {
            if value < 0.0 {
                return Err(StoreError::MalformedRecord(format!(
                    "amount {} must be non-negative",
                    value
                )));
            }
        }
        let parsed_date = match date {
            Some(text) => Some(TxDate::parse(text)?),
            None => None,
        };

        let owner_id = match self.ledger.get_mut(id) {
            None => return Err(StoreError::not_found("transaction", id)),
            Some(record) => {
                if let Some(value) = amount {
                    record.amount = value;
                }
                if let Some(value) = category {
                    record.category = value;
                }
                if let Some(value) = parsed_date {
                    record.date = value;
                }
                record.owner_id
            }
        };
        self.recompute_households_of(owner_id);
        Ok(())
    }

    /// Deletes a transaction and refreshes the owner's household.
    pub fn remove_transaction(&mut self, id: TransactionId) -> StoreResult<()> {
        match self.ledger.delete(id) {
            None => Err(StoreError::not_found("transaction", id)),
            Some(removed) => {
                self.recompute_households_of(removed.owner_id);
                Ok(())
            }
        }
    }

    // ---- snapshots -------------------------------------------------------

    /// Individuals in ascending id order.
    pub fn snapshot_individuals(&self) -> Vec<&Individual> {
        self.individuals.in_order()
    }

    /// Households in ascending id order.
    pub fn snapshot_households(&self) -> Vec<&Household> {
        self.households.in_order()
    }

    /// Transactions in leaf-chain (ascending id) order.
    pub fn snapshot_transactions(&self) -> Vec<&Transaction> {
        self.ledger.iter_chain().collect()
    }

    // ---- aggregates ------------------------------------------------------

    /// Sum of ledger amounts owned by any of `members`: one full chain
    /// walk per call, the recompute-on-demand primitive.
    pub fn expense_total_for(&self, members: &[IndividualId]) -> f64 {
        self.ledger
            .iter_chain()
            .filter(|record| members.contains(&record.owner_id))
            .map(|record| record.amount)
            .sum()
    }

    fn income_total_for(&self, members: &[IndividualId]) -> f64 {
        members
            .iter()
            .filter_map(|&member| self.individuals.get(member))
            .map(|record| record.income)
            .sum()
    }

    /// Refreshes both derived totals of one household.
    fn recompute_household(&mut self, household_id: HouseholdId) {
        let members = match self.households.search(household_id) {
            Some(household) => household.members.clone(),
            None => return,
        };
        let total_income = self.income_total_for(&members);
        let total_expense = self.expense_total_for(&members);
        if let Some(household) = self.households.search_mut(household_id) {
            household.total_income = total_income;
            household.total_monthly_expense = total_expense;
        }
    }

    /// Refreshes every household that counts `owner_id` as a member.
    fn recompute_households_of(&mut self, owner_id: IndividualId) {
        let mut affected = Vec::new();
        self.households.for_each(&mut |household| {
            if household.has_member(owner_id) {
                affected.push(household.id);
            }
        });
        for household_id in affected {
            self.recompute_household(household_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_individual(1, "Alice", 50_000.0).unwrap();
        store.add_individual(2, "Bob", 40_000.0).unwrap();
        store.add_individual(3, "Cara", 30_000.0).unwrap();
        store
    }

    #[test]
    fn duplicate_individual_rejected_without_mutation() {
        let mut store = seeded();
        let err = store.add_individual(2, "Bob II", 1.0).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.individual(2).unwrap().name, "Bob");
        assert_eq!(store.individual_count(), 3);
    }

    #[test]
    fn household_membership_checks() {
        let mut store = seeded();
        store.add_household(100, "Smiths", &[1, 2]).unwrap();
        assert_eq!(store.household(100).unwrap().total_income, 90_000.0);

        // One household per individual.
        let err = store.add_household(101, "Again", &[2, 3]).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInHousehold(_)));
        assert!(store.household(101).is_none());

        // Members must exist.
        let err = store.add_household(101, "Ghosts", &[99]).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Members must be distinct within the request.
        let err = store.add_household(101, "Twins", &[3, 3]).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.household_count(), 1);
    }

    #[test]
    fn income_update_refreshes_household_snapshot() {
        let mut store = seeded();
        store.add_household(100, "Smiths", &[1, 2]).unwrap();
        store.update_individual(1, "Alice", 60_000.0).unwrap();
        assert_eq!(store.household(100).unwrap().total_income, 100_000.0);
    }

    #[test]
    fn transaction_mutations_recompute_expense() {
        let mut store = seeded();
        store.add_household(100, "Smiths", &[1, 2]).unwrap();

        store
            .add_transaction(1, 1, Category::Grocery, 200.0, "2024-03-01")
            .unwrap();
        store
            .add_transaction(2, 2, Category::Rent, 1000.0, "2024-03-05")
            .unwrap();
        assert_eq!(store.household(100).unwrap().total_monthly_expense, 1200.0);

        store.update_transaction(1, Some(300.0), None, None).unwrap();
        assert_eq!(store.household(100).unwrap().total_monthly_expense, 1300.0);

        store.remove_transaction(2).unwrap();
        assert_eq!(store.household(100).unwrap().total_monthly_expense, 300.0);
    }

    #[test]
    fn removing_last_member_deletes_household() {
        let mut store = seeded();
        store.add_household(100, "Solo", &[3]).unwrap();
        store.remove_individual(3).unwrap();
        assert!(store.household(100).is_none());
        assert!(store.individual(3).is_none());
    }

    #[test]
    fn owner_may_dangle() {
        let mut store = seeded();
        store
            .add_transaction(1, 777, Category::Leisure, 5.0, "2024-01-01")
            .unwrap();
        assert_eq!(store.transaction(1).unwrap().owner_id, 777);
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let mut store = seeded();
        let err = store
            .add_transaction(1, 1, Category::Rent, 10.0, "2024-13-01")
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
        assert_eq!(store.transaction_count(), 0);

        let long = "x".repeat(60);
        let err = store.add_individual(9, &long, 0.0).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn capacity_bounds_are_enforced() {
        let mut store = RecordStore::new();
        for id in 0..MAX_INDIVIDUALS as u32 {
            store.add_individual(id, "p", 1.0).unwrap();
        }
        let err = store.add_individual(5000, "over", 1.0).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded(_)));
        assert_eq!(store.individual_count(), MAX_INDIVIDUALS);
    }
}
