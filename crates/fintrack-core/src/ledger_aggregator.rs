//! Reduces the four record collections of a period into display totals.

use fintrack_domain::{Amounted, Expense, FixedBill, IncomeEntry, Money, ReserveInvestment};
use serde::{Deserialize, Serialize};

/// Totals for a resolved period.
///
/// `balance` is income minus expenses minus fixed bills. Reserves are money
/// already set aside, so they are reported but never subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_bills: Money,
    pub total_reserves: Money,
    pub balance: Money,
}

impl Summary {
    pub fn is_deficit(&self) -> bool {
        self.balance.is_negative()
    }
}

pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Sums each collection exactly, in cents.
    ///
    /// Inputs are trusted as already filtered by the store: bills are summed
    /// whether or not they are flagged active, and dates are not re-checked.
    pub fn aggregate(
        income: &[IncomeEntry],
        expenses: &[Expense],
        active_bills: &[FixedBill],
        reserves: &[ReserveInvestment],
    ) -> Summary {
        let income = exact_total(income);
        let expenses = exact_total(expenses);
        let bills = exact_total(active_bills);
        Summary {
            total_income: Money::saturating_from_i128(income),
            total_expenses: Money::saturating_from_i128(expenses),
            total_bills: Money::saturating_from_i128(bills),
            total_reserves: Self::total(reserves),
            balance: Money::saturating_from_i128(income - expenses - bills),
        }
    }

    pub fn total<T: Amounted>(items: &[T]) -> Money {
        Money::saturating_from_i128(exact_total(items))
    }
}

// Widened so that only the final value is clamped.
fn exact_total<T: Amounted>(items: &[T]) -> i128 {
    items
        .iter()
        .map(|item| i128::from(item.amount().cents()))
        .sum()
}
