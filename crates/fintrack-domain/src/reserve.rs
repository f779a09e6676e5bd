//! Money set aside: emergency reserves, goals and investments.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReserveInvestment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Money,
    pub kind: ReserveKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReserveInvestment {
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        amount: Money,
        kind: ReserveKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount,
            kind,
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

impl Identifiable for ReserveInvestment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for ReserveInvestment {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Amounted for ReserveInvestment {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Categorized for ReserveInvestment {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Dated for ReserveInvestment {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

impl Displayable for ReserveInvestment {
    fn display_label(&self) -> String {
        format!(
            "{}:{} {} [{}]",
            self.kind, self.date, self.description, self.amount
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReserveKind {
    EmergencyReserve,
    Goal,
    Investment,
}

impl fmt::Display for ReserveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReserveKind::EmergencyReserve => "Emergency Reserve",
            ReserveKind::Goal => "Goal",
            ReserveKind::Investment => "Investment",
        };
        f.write_str(label)
    }
}

impl FromStr for ReserveKind {
    type Err = UnknownReserveKind;

    /// Accepts the snake_case names, `emergency` and the Portuguese labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "emergency_reserve" | "emergency" | "reserva_de_emergencia" | "reserva_de_emergência" => {
                Ok(ReserveKind::EmergencyReserve)
            }
            "goal" | "meta" => Ok(ReserveKind::Goal),
            "investment" | "investimento" => Ok(ReserveKind::Investment),
            _ => Err(UnknownReserveKind(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReserveKind(pub String);

impl fmt::Display for UnknownReserveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reserve kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownReserveKind {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ReserveKind::EmergencyReserve).unwrap();
        assert_eq!(json, "\"emergency_reserve\"");
    }

    #[test]
    fn kind_parses_form_labels() {
        assert_eq!("Emergency Reserve".parse(), Ok(ReserveKind::EmergencyReserve));
        assert_eq!("meta".parse(), Ok(ReserveKind::Goal));
        assert_eq!("Investimento".parse(), Ok(ReserveKind::Investment));
        assert!("savings".parse::<ReserveKind>().is_err());
    }
}
