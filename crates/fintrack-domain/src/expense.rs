//! Expenses and the payment methods they can be settled with.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
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
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(Some(category.into()));
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Expense {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Categorized for Expense {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Dated for Expense {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        match self.payment_method {
            Some(method) => format!(
                "expense:{} {} [{}] via {}",
                self.date, self.description, self.amount, method
            ),
            None => format!("expense:{} {} [{}]", self.date, self.description, self.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Enumerates how an expense was paid.
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    Pix,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Pix => "PIX",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    /// Accepts the English names and the Portuguese form labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "dinheiro" => Ok(PaymentMethod::Cash),
            "debit" | "débito" | "debito" => Ok(PaymentMethod::Debit),
            "credit" | "crédito" | "credito" => Ok(PaymentMethod::Credit),
            "pix" => Ok(PaymentMethod::Pix),
            _ => Err(UnknownPaymentMethod(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentMethod(pub String);

impl fmt::Display for UnknownPaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment method `{}`", self.0)
    }
}

impl std::error::Error for UnknownPaymentMethod {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_accepts_form_labels() {
        assert_eq!("Dinheiro".parse(), Ok(PaymentMethod::Cash));
        assert_eq!("Débito".parse(), Ok(PaymentMethod::Debit));
        assert_eq!("CRÉDITO".parse(), Ok(PaymentMethod::Credit));
        assert_eq!("pix".parse(), Ok(PaymentMethod::Pix));
        assert_eq!(
            "cheque".parse::<PaymentMethod>(),
            Err(UnknownPaymentMethod("cheque".into()))
        );
    }

    #[test]
    fn blank_category_is_dropped() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let expense = Expense::new(Uuid::new_v4(), "Fuel", Money::from_cents(9_000), date)
            .with_category("   ");
        assert_eq!(expense.category, None);
    }
}
