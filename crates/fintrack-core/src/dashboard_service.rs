//! Loads everything the main view shows for one period.

use std::thread::{self, ScopedJoinHandle};

use chrono::NaiveDate;
use fintrack_domain::{
    DateRange, Expense, FixedBill, IncomeEntry, PeriodSelection, ReserveInvestment, Session,
};

use crate::{
    ledger_aggregator::{LedgerAggregator, Summary},
    period_resolver::PeriodResolver,
    storage::LedgerStore,
    CoreError,
};

/// The four record collections of a period and their totals.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub selection: PeriodSelection,
    pub range: DateRange,
    pub income: Vec<IncomeEntry>,
    pub expenses: Vec<Expense>,
    pub bills: Vec<FixedBill>,
    pub reserves: Vec<ReserveInvestment>,
    pub summary: Summary,
}

pub type PeriodRecords = (
    Vec<IncomeEntry>,
    Vec<Expense>,
    Vec<FixedBill>,
    Vec<ReserveInvestment>,
);

pub struct DashboardService;

impl DashboardService {
    pub fn load<S>(
        store: &S,
        session: &Session,
        selection: &PeriodSelection,
        today: NaiveDate,
    ) -> Result<Dashboard, CoreError>
    where
        S: LedgerStore + ?Sized,
    {
        let range = PeriodResolver::resolve_selection(selection, today);
        let (income, expenses, bills, reserves) = Self::fetch_period(store, session, range)?;
        let summary = LedgerAggregator::aggregate(&income, &expenses, &bills, &reserves);
        tracing::info!(
            user = %session.user_id,
            mode = %selection.mode,
            %range,
            income = income.len(),
            expenses = expenses.len(),
            bills = bills.len(),
            reserves = reserves.len(),
            balance = %summary.balance,
            "dashboard loaded"
        );
        Ok(Dashboard {
            selection: *selection,
            range,
            income,
            expenses,
            bills,
            reserves,
            summary,
        })
    }

    /// Issues the four store queries concurrently and waits for all of them.
    /// Any failed query fails the whole load.
    pub fn fetch_period<S>(
        store: &S,
        session: &Session,
        range: DateRange,
    ) -> Result<PeriodRecords, CoreError>
    where
        S: LedgerStore + ?Sized,
    {
        let (income, expenses, bills, reserves) = thread::scope(|scope| {
            let income = scope.spawn(|| store.list_income_entries(session, range));
            let expenses = scope.spawn(|| store.list_expenses(session, range));
            let bills = scope.spawn(|| store.list_active_fixed_bills(session));
            let reserves = scope.spawn(|| store.list_reserves(session, range));
            (
                join_query(income),
                join_query(expenses),
                join_query(bills),
                join_query(reserves),
            )
        });
        Ok((income?, expenses?, bills?, reserves?))
    }
}

fn join_query<T>(handle: ScopedJoinHandle<'_, Result<T, CoreError>>) -> Result<T, CoreError> {
    handle
        .join()
        .map_err(|_| CoreError::Storage("store query panicked".into()))?
}
