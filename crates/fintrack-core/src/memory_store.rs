use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fintrack_domain::{
    DateRange, Expense, FixedBill, IncomeEntry, Record, RecordKind, ReserveInvestment, Session,
};
use uuid::Uuid;

use crate::{
    storage::{validate_insert, LedgerStore, RecordBook},
    CoreError,
};

/// Process-local store, used as a test double and for ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    book: RwLock<RecordBook>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: RecordBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Copy of everything currently held, across users.
    pub fn snapshot(&self) -> Result<RecordBook, CoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RecordBook>, CoreError> {
        self.book
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RecordBook>, CoreError> {
        self.book
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn list_income_entries(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<IncomeEntry>, CoreError> {
        Ok(self.read()?.income_in(session.user_id, range))
    }

    fn list_expenses(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<Expense>, CoreError> {
        Ok(self.read()?.expenses_in(session.user_id, range))
    }

    fn list_active_fixed_bills(&self, session: &Session) -> Result<Vec<FixedBill>, CoreError> {
        Ok(self.read()?.active_bills(session.user_id))
    }

    fn list_reserves(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<ReserveInvestment>, CoreError> {
        Ok(self.read()?.reserves_in(session.user_id, range))
    }

    fn insert(&self, session: &Session, record: Record) -> Result<Uuid, CoreError> {
        validate_insert(session, &record)?;
        Ok(self.write()?.insert(record))
    }

    fn delete(&self, session: &Session, kind: RecordKind, id: Uuid) -> Result<(), CoreError> {
        self.write()?.remove(session.user_id, kind, id).map(|_| ())
    }

    fn categories(&self, session: &Session, kind: RecordKind) -> Result<Vec<String>, CoreError> {
        Ok(self.read()?.categories(session.user_id, kind))
    }
}
