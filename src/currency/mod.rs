//! Money display at the UI boundary.
//!
//! Amounts stay in integer cents until the last step; nothing here goes
//! through floating point.

use fintrack_domain::Money;
use serde::{Deserialize, Serialize};

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("pt-BR")
    }
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag. Unknown tags get the `en-US` layout.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator) = match tag {
            "pt-BR" | "pt-PT" | "de-DE" | "es-ES" | "it-IT" => (',', '.'),
            "fr-FR" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "BRL" => "R$",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => code,
    }
}

/// `1234.56` in `locale`'s separators, without a currency symbol.
pub fn format_number(locale: &LocaleConfig, amount: Money) -> String {
    let cents = amount.cents().unsigned_abs();
    let whole = group_digits(&(cents / 100).to_string(), locale.grouping_separator);
    let body = format!("{whole}{}{:02}", locale.decimal_separator, cents % 100);
    if amount.is_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// `R$ 1.234,56`, with the sign ahead of the symbol for negatives.
pub fn format_money(amount: Money, code: &str, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount.abs());
    let symbol = symbol_for(code);
    if amount.is_negative() {
        format!("-{symbol} {body}")
    } else {
        format!("{symbol} {body}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
