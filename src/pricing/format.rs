//! Display helpers for amounts and rates

use rust_decimal::Decimal;

use super::round_cents;

/// `$1,234.50`, or `-$12.00` for negative amounts. Always two decimals.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Fractional rate as a percentage with at most one decimal: 0.375 is `37.5%`.
pub fn format_percentage(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{percent}%")
}
