//! Recurring fixed bills, tracked by an active flag rather than by date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedBill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Money,
    /// Day of the month the bill falls due, 1 through 31.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u8>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FixedBill {
    pub fn new(user_id: Uuid, description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount,
            due_day: None,
            active: true,
            date: None,
            category: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the due day; values outside 1..=31 clear it.
    pub fn with_due_day(mut self, day: u8) -> Self {
        self.due_day = (1..=31).contains(&day).then_some(day);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(Some(category.into()));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl Identifiable for FixedBill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for FixedBill {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Amounted for FixedBill {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Categorized for FixedBill {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Dated for FixedBill {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Displayable for FixedBill {
    fn display_label(&self) -> String {
        let state = if self.active { "active" } else { "inactive" };
        match self.due_day {
            Some(day) => format!(
                "bill:{} [{}] due day {} ({state})",
                self.description, self.amount, day
            ),
            None => format!("bill:{} [{}] ({state})", self.description, self.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_day_is_bounded() {
        let bill = FixedBill::new(Uuid::new_v4(), "Rent", Money::from_cents(120_000));
        assert_eq!(bill.clone().with_due_day(10).due_day, Some(10));
        assert_eq!(bill.clone().with_due_day(0).due_day, None);
        assert_eq!(bill.with_due_day(32).due_day, None);
    }

    #[test]
    fn new_bills_start_active() {
        let bill = FixedBill::new(Uuid::new_v4(), "Internet", Money::from_cents(9_990));
        assert!(bill.active);
        assert!(!bill.inactive().active);
    }
}
