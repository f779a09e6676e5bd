//! The record-store contract and the in-memory record book stores build on.

use fintrack_domain::{
    DateRange, Dated, Expense, FixedBill, Identifiable, IncomeEntry, Owned, Record, RecordKind,
    ReserveInvestment, Session,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CategoryService, CoreError};

/// Abstraction over persistence backends holding a user's records.
///
/// Every call carries the session explicitly; implementations only ever see
/// or touch records owned by `session.user_id`. Range-filtered listings are
/// ordered by date, newest first.
pub trait LedgerStore: Send + Sync {
    fn list_income_entries(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<IncomeEntry>, CoreError>;
    fn list_expenses(&self, session: &Session, range: DateRange)
        -> Result<Vec<Expense>, CoreError>;
    /// Active bills only, with no date filter.
    fn list_active_fixed_bills(&self, session: &Session) -> Result<Vec<FixedBill>, CoreError>;
    fn list_reserves(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<ReserveInvestment>, CoreError>;
    fn insert(&self, session: &Session, record: Record) -> Result<Uuid, CoreError>;
    fn delete(&self, session: &Session, kind: RecordKind, id: Uuid) -> Result<(), CoreError>;
    fn categories(&self, session: &Session, kind: RecordKind) -> Result<Vec<String>, CoreError>;
}

/// Checks a record before it is stored on behalf of `session`.
pub fn validate_insert(session: &Session, record: &Record) -> Result<(), CoreError> {
    if record.user_id() != session.user_id {
        return Err(CoreError::OwnershipMismatch { id: record.id() });
    }
    let description = match record {
        Record::Income(entry) => &entry.description,
        Record::Expense(expense) => &expense.description,
        Record::FixedBill(bill) => &bill.description,
        Record::Reserve(reserve) => &reserve.description,
    };
    if description.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{} description must not be empty",
            record.kind()
        )));
    }
    Ok(())
}

/// All records known to a store, across users. Serializable so file-backed
/// stores can persist it as a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordBook {
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub fixed_bills: Vec<FixedBill>,
    #[serde(default)]
    pub reserves: Vec<ReserveInvestment>,
}

impl RecordBook {
    pub fn income_in(&self, user_id: Uuid, range: DateRange) -> Vec<IncomeEntry> {
        newest_first_in_range(&self.income, user_id, range)
    }

    pub fn expenses_in(&self, user_id: Uuid, range: DateRange) -> Vec<Expense> {
        newest_first_in_range(&self.expenses, user_id, range)
    }

    pub fn reserves_in(&self, user_id: Uuid, range: DateRange) -> Vec<ReserveInvestment> {
        newest_first_in_range(&self.reserves, user_id, range)
    }

    pub fn active_bills(&self, user_id: Uuid) -> Vec<FixedBill> {
        self.fixed_bills
            .iter()
            .filter(|bill| bill.user_id == user_id && bill.active)
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, record: Record) -> Uuid {
        let id = record.id();
        match record {
            Record::Income(entry) => self.income.push(entry),
            Record::Expense(expense) => self.expenses.push(expense),
            Record::FixedBill(bill) => self.fixed_bills.push(bill),
            Record::Reserve(reserve) => self.reserves.push(reserve),
        }
        id
    }

    /// Removes the record `id` of `kind` owned by `user_id`.
    pub fn remove(&mut self, user_id: Uuid, kind: RecordKind, id: Uuid) -> Result<Record, CoreError> {
        let removed = match kind {
            RecordKind::Income => take_owned(&mut self.income, user_id, id).map(Record::Income),
            RecordKind::Expense => {
                take_owned(&mut self.expenses, user_id, id).map(Record::Expense)
            }
            RecordKind::FixedBill => {
                take_owned(&mut self.fixed_bills, user_id, id).map(Record::FixedBill)
            }
            RecordKind::Reserve => take_owned(&mut self.reserves, user_id, id).map(Record::Reserve),
        };
        removed.ok_or(CoreError::RecordNotFound { kind, id })
    }

    pub fn categories(&self, user_id: Uuid, kind: RecordKind) -> Vec<String> {
        match kind {
            RecordKind::Income => CategoryService::distinct(owned_by(&self.income, user_id)),
            RecordKind::Expense => CategoryService::distinct(owned_by(&self.expenses, user_id)),
            RecordKind::FixedBill => {
                CategoryService::distinct(owned_by(&self.fixed_bills, user_id))
            }
            RecordKind::Reserve => CategoryService::distinct(owned_by(&self.reserves, user_id)),
        }
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len() + self.fixed_bills.len() + self.reserves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn owned_by<T: Owned>(items: &[T], user_id: Uuid) -> impl Iterator<Item = &T> {
    items.iter().filter(move |item| item.user_id() == user_id)
}

fn newest_first_in_range<T>(items: &[T], user_id: Uuid, range: DateRange) -> Vec<T>
where
    T: Owned + Dated + Clone,
{
    let mut rows: Vec<T> = owned_by(items, user_id)
        .filter(|item| item.date().is_some_and(|date| range.contains(date)))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date().cmp(&a.date()));
    rows
}

fn take_owned<T: Identifiable + Owned>(items: &mut Vec<T>, user_id: Uuid, id: Uuid) -> Option<T> {
    let position = items
        .iter()
        .position(|item| item.id() == id && item.user_id() == user_id)?;
    Some(items.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_domain::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_listing_is_newest_first_and_scoped_to_user() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut book = RecordBook::default();
        book.insert(IncomeEntry::new(me, "Old", Money::from_cents(100), date(2025, 1, 2)).into());
        book.insert(IncomeEntry::new(me, "New", Money::from_cents(200), date(2025, 1, 20)).into());
        book.insert(IncomeEntry::new(me, "Out", Money::from_cents(300), date(2025, 2, 1)).into());
        book.insert(
            IncomeEntry::new(other, "Theirs", Money::from_cents(400), date(2025, 1, 5)).into(),
        );

        let rows = book.income_in(me, DateRange::new(date(2025, 1, 1), date(2025, 1, 31)));
        let names: Vec<_> = rows.iter().map(|row| row.description.as_str()).collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn active_bills_ignore_dates() {
        let me = Uuid::new_v4();
        let mut book = RecordBook::default();
        book.insert(
            FixedBill::new(me, "Rent", Money::from_cents(100_000))
                .with_date(date(1999, 1, 1))
                .into(),
        );
        book.insert(
            FixedBill::new(me, "Gym", Money::from_cents(9_000))
                .inactive()
                .into(),
        );
        let bills = book.active_bills(me);
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].description, "Rent");
    }

    #[test]
    fn remove_requires_matching_owner() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut book = RecordBook::default();
        let id = book.insert(
            Expense::new(me, "Lunch", Money::from_cents(3_500), date(2025, 3, 3)).into(),
        );

        assert!(matches!(
            book.remove(other, RecordKind::Expense, id),
            Err(CoreError::RecordNotFound { .. })
        ));
        assert!(matches!(
            book.remove(me, RecordKind::Income, id),
            Err(CoreError::RecordNotFound { .. })
        ));
        let removed = book.remove(me, RecordKind::Expense, id).expect("remove expense");
        assert_eq!(removed.id(), id);
        assert!(book.is_empty());
    }

    #[test]
    fn validate_insert_checks_owner_and_description() {
        let session = Session::new(Uuid::new_v4());
        let foreign: Record =
            IncomeEntry::new(Uuid::new_v4(), "Gift", Money::from_cents(1), date(2025, 1, 1))
                .into();
        assert!(matches!(
            validate_insert(&session, &foreign),
            Err(CoreError::OwnershipMismatch { .. })
        ));

        let blank: Record =
            IncomeEntry::new(session.user_id, "  ", Money::from_cents(1), date(2025, 1, 1)).into();
        assert!(matches!(
            validate_insert(&session, &blank),
            Err(CoreError::Validation(_))
        ));
    }
}
