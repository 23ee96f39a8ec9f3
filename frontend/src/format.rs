use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Insert `,` between every group of three digits in `digits`.
pub fn format_with_commas(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format `amount` as dollars with two decimals, e.g. `-$1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}${}.{}", sign, format_with_commas(whole), fraction)
}

/// Capitalise the first letter of every word: "jane doe" -> "Jane Doe".
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Dates in the table read like "1/2/2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod format_tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{format_currency, format_date, format_with_commas, title_case};

    #[test]
    fn groups_thousands() {
        assert_eq!(format_with_commas("1"), "1");
        assert_eq!(format_with_commas("123"), "123");
        assert_eq!(format_with_commas("1234"), "1,234");
        assert_eq!(format_with_commas("1234567"), "1,234,567");
    }

    #[test]
    fn currency_has_two_decimals_and_grouping() {
        assert_eq!(format_currency(Decimal::new(123450, 2)), "$1,234.50");
        assert_eq!(format_currency(Decimal::from(60)), "$60.00");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn negative_currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(Decimal::from(-2500)), "-$2,500.00");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Decimal::new(10005, 3)), "$10.01");
        assert_eq!(format_currency(Decimal::new(-4, 3)), "$0.00");
    }

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("ÉMILE"), "ÉMILE");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn dates_have_no_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(format_date(date), "1/2/2024");
    }
}
