// src/common/format.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Formata um valor monetário com duas casas e separador de milhar.
/// Ex: 1234567.891 -> "1,234,567.89"
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_thousands(int_part);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Inteiros também ganham separador (contagens, eixos dos gráficos).
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if value < 0 { format!("-{}", grouped) } else { grouped }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("0")), "0.00");
        assert_eq!(format_currency(dec("1500")), "1,500.00");
        assert_eq!(format_currency(dec("999.999")), "1,000.00");
        assert_eq!(format_currency(dec("1234567.891")), "1,234,567.89");
        assert_eq!(format_currency(dec("12.5")), "12.50");
        assert_eq!(format_currency(dec("-2500.1")), "-2,500.10");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(-1234567), "-1,234,567");
    }
}
