//! A sum type over the four record kinds, used by insert/delete plumbing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::*, expense::Expense, fixed_bill::FixedBill, income::IncomeEntry, money::Money,
    reserve::ReserveInvestment,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
    FixedBill,
    Reserve,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::FixedBill => "fixed bill",
            RecordKind::Reserve => "reserve",
        };
        f.write_str(label)
    }
}

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "income" | "receita" => Ok(RecordKind::Income),
            "expense" | "despesa" => Ok(RecordKind::Expense),
            "bill" | "fixed_bill" | "conta" | "conta_fixa" => Ok(RecordKind::FixedBill),
            "reserve" | "investment" | "reserva" | "investimento" => Ok(RecordKind::Reserve),
            _ => Err(UnknownRecordKind(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecordKind(pub String);

impl fmt::Display for UnknownRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown record kind `{}` (use income, expense, bill or reserve)",
            self.0
        )
    }
}

impl std::error::Error for UnknownRecordKind {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Income(IncomeEntry),
    Expense(Expense),
    FixedBill(FixedBill),
    Reserve(ReserveInvestment),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Income(_) => RecordKind::Income,
            Record::Expense(_) => RecordKind::Expense,
            Record::FixedBill(_) => RecordKind::FixedBill,
            Record::Reserve(_) => RecordKind::Reserve,
        }
    }

    fn inner(&self) -> &dyn RecordFields {
        match self {
            Record::Income(entry) => entry,
            Record::Expense(expense) => expense,
            Record::FixedBill(bill) => bill,
            Record::Reserve(reserve) => reserve,
        }
    }
}

trait RecordFields: Identifiable + Owned + Amounted + Displayable {}

impl<T: Identifiable + Owned + Amounted + Displayable> RecordFields for T {}

impl Identifiable for Record {
    fn id(&self) -> Uuid {
        self.inner().id()
    }
}

impl Owned for Record {
    fn user_id(&self) -> Uuid {
        self.inner().user_id()
    }
}

impl Amounted for Record {
    fn amount(&self) -> Money {
        self.inner().amount()
    }
}

impl Displayable for Record {
    fn display_label(&self) -> String {
        self.inner().display_label()
    }
}

impl From<IncomeEntry> for Record {
    fn from(value: IncomeEntry) -> Self {
        Record::Income(value)
    }
}

impl From<Expense> for Record {
    fn from(value: Expense) -> Self {
        Record::Expense(value)
    }
}

impl From<FixedBill> for Record {
    fn from(value: FixedBill) -> Self {
        Record::FixedBill(value)
    }
}

impl From<ReserveInvestment> for Record {
    fn from(value: ReserveInvestment) -> Self {
        Record::Reserve(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reserve::ReserveKind;
    use chrono::NaiveDate;

    #[test]
    fn record_kind_parses_cli_and_form_labels() {
        assert_eq!("income".parse(), Ok(RecordKind::Income));
        assert_eq!("Despesa".parse(), Ok(RecordKind::Expense));
        assert_eq!("fixed-bill".parse(), Ok(RecordKind::FixedBill));
        assert_eq!("conta_fixa".parse(), Ok(RecordKind::FixedBill));
        assert_eq!("investimento".parse(), Ok(RecordKind::Reserve));
        assert!("transfer".parse::<RecordKind>().is_err());
    }

    #[test]
    fn reserve_keeps_its_own_kind_field_when_tagged() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let record: Record = ReserveInvestment::new(
            Uuid::new_v4(),
            "Bonds",
            Money::from_cents(10_000),
            ReserveKind::Investment,
            date,
        )
        .into();

        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["record"], "reserve");
        assert_eq!(json["kind"], "investment");

        let back: Record = serde_json::from_value(json).expect("deserialize record");
        assert_eq!(back, record);
        assert_eq!(back.kind(), RecordKind::Reserve);
    }
}
