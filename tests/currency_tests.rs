use fintrack::{
    currency::{format_money, format_number, symbol_for, LocaleConfig},
    fintrack_domain::Money,
};

#[test]
fn formats_brazilian_real() {
    let locale = LocaleConfig::for_tag("pt-BR");
    assert_eq!(
        format_money(Money::from_cents(123_456), "BRL", &locale),
        "R$ 1.234,56"
    );
    assert_eq!(format_money(Money::ZERO, "BRL", &locale), "R$ 0,00");
    assert_eq!(format_money(Money::from_cents(5), "BRL", &locale), "R$ 0,05");
}

#[test]
fn negative_sign_precedes_symbol() {
    let locale = LocaleConfig::default();
    assert_eq!(
        format_money(Money::from_cents(-150_000), "BRL", &locale),
        "-R$ 1.500,00"
    );
}

#[test]
fn formats_with_english_separators() {
    let locale = LocaleConfig::for_tag("en-US");
    assert_eq!(
        format_money(Money::from_cents(987_654_321), "USD", &locale),
        "$ 9,876,543.21"
    );
    assert_eq!(format_number(&locale, Money::from_cents(-1_000)), "-10.00");
}

#[test]
fn unknown_currency_falls_back_to_code() {
    assert_eq!(symbol_for("CLP"), "CLP");
    assert_eq!(symbol_for("BRL"), "R$");
}

#[test]
fn masked_entry_round_trips_through_display() {
    let locale = LocaleConfig::default();
    let typed = Money::from_masked_input("R$ 1.234,56").expect("digits only");
    assert_eq!(format_money(typed, "BRL", &locale), "R$ 1.234,56");
}
