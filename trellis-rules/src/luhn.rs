//! Luhn checksum validation (ISO/IEC 7812).

use trellis_core::{Failure, Rule, RuleContext, Value};

/// Validate the Luhn checksum of a digit string.
pub fn validate(value: &str) -> bool {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let len = value.len();
    value
        .bytes()
        .enumerate()
        .map(|(i, b)| ((b - b'0') as u32) << ((len - i - 1) & 1))
        .map(|n| if n > 9 { n - 9 } else { n })
        .sum::<u32>()
        % 10
        == 0
}

/// Normalize a value by dropping everything but digits.
pub fn normalize(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Validates the Luhn checksum of a value.
pub struct Luhn;

impl Rule for Luhn {
    fn name(&self) -> &'static str {
        "luhnChecksum"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if value.is_null() {
            return None;
        }
        let Some(s) = value.as_str() else {
            return Some(ctx.fail("string value expected"));
        };
        if validate(&normalize(s)) {
            None
        } else {
            Some(ctx.fail("invalid checksum"))
        }
    }
}

/// Validates a credit card number: 12 to 19 digits with a valid Luhn
/// checksum.
pub struct CreditCard;

impl Rule for CreditCard {
    fn name(&self) -> &'static str {
        "creditCard"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if value.is_null() {
            return None;
        }
        let Some(s) = value.as_str() else {
            return Some(ctx.fail("string value expected"));
        };
        let digits = normalize(s);
        if (12..=19).contains(&digits.len()) && validate(&digits) {
            None
        } else {
            Some(ctx.fail("invalid credit card number"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check;

    #[test]
    fn test_luhn_checksum() {
        assert!(validate("49927398716"));
        assert!(validate("1234567812345670"));
        assert!(validate("361568"));
        assert!(validate("79927398713"));
        assert!(validate("361576"));
        assert!(!validate("49927398717"));
        assert!(!validate("1234567812345678"));
        assert!(!validate(""));
        assert!(!validate("49a27398716"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("4992-7398-716"), "49927398716");
    }

    #[test]
    fn test_luhn_rule() {
        assert!(check(&Luhn, &Value::from("4992 7398 716")).is_none());
        assert!(check(&Luhn, &Value::from("49927398717")).is_some());
        assert!(check(&Luhn, &Value::Null).is_none());
        assert!(check(&Luhn, &Value::Int(5)).is_some());
    }

    #[test]
    fn test_credit_card_rule() {
        assert!(check(&CreditCard, &Value::from("1234 5678 1234 5670")).is_none());
        // valid checksum but too short for a card number
        assert!(check(&CreditCard, &Value::from("361568")).is_some());
        assert!(check(&CreditCard, &Value::from("1234567812345678")).is_some());
    }
}
