//! Income entries: money received on a given calendar date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl IncomeEntry {
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount,
            date,
            category: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(Some(category.into()));
        self
    }
}

impl Identifiable for IncomeEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for IncomeEntry {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Amounted for IncomeEntry {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Categorized for IncomeEntry {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Dated for IncomeEntry {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

impl Displayable for IncomeEntry {
    fn display_label(&self) -> String {
        format!("income:{} {} [{}]", self.date, self.description, self.amount)
    }
}
