//! Shared traits implemented by every record kind.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::money::Money;

/// Exposes a stable identifier for stored records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Ties a record to the account that owns it.
pub trait Owned {
    fn user_id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Money;
}

/// Associates records with an optional free-text category.
pub trait Categorized {
    fn category(&self) -> Option<&str>;
}

/// Calendar date a record is filed under, if it has one.
pub trait Dated {
    fn date(&self) -> Option<NaiveDate>;
}

/// Converts a record into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

pub(crate) fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
