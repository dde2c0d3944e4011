use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a non-negative money amount
pub fn parse_amount(s: &str) -> Result<Decimal, String> {
    let value =
        Decimal::from_str(s).map_err(|_| format!("'{}' is not a valid amount", s))?;

    if value.is_sign_negative() {
        return Err(format!("Amount must not be negative, got {}", value));
    }

    Ok(value)
}

/// Parse a 1-based fund position as shown in `list`
pub fn parse_index(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid position", s))?;

    if value == 0 {
        return Err("Positions start at 1".to_string());
    }

    Ok(value)
}

/// Parse a date in YYYY-MM-DD form
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1250.75"), Ok(dec!(1250.75)));
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_index_is_one_based() {
        assert_eq!(parse_index("1"), Ok(1));
        assert!(parse_index("0").is_err());
        assert!(parse_index("-2").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-17"),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
        );
        assert!(parse_date("17.05.2024").is_err());
    }
}
