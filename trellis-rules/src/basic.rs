// String, pattern and range rules

use once_cell::sync::Lazy;
use regex::Regex;
use trellis_core::{Failure, Rule, RuleContext, Value};

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d[\d\s\-./()]{4,24}$").unwrap());

/// Length of a value for the length rules: string byte length or
/// container item count.
fn length_of(value: &Value<'_>) -> Option<usize> {
    match value {
        Value::Str(s) => Some(s.len()),
        _ => value.count().map(|c| c as usize),
    }
}

/// Validates that a value is present and not an empty string.
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value {
            Value::Null => Some(ctx.fail("a value is required")),
            Value::Str(s) if s.trim().is_empty() => Some(ctx.fail("should not be empty")),
            _ => None,
        }
    }
}

/// Validates minimum string length (or container item count).
pub struct MinLength(pub usize);

impl Rule for MinLength {
    fn name(&self) -> &'static str {
        "minLength"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match length_of(value) {
            Some(len) if len < self.0 => {
                Some(ctx.fail(format_args!("must be at least {} characters", self.0)))
            }
            _ => None,
        }
    }
}

/// Validates maximum string length (or container item count).
pub struct MaxLength(pub usize);

impl Rule for MaxLength {
    fn name(&self) -> &'static str {
        "maxLength"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match length_of(value) {
            Some(len) if len > self.0 => {
                Some(ctx.fail(format_args!("must be at most {} characters", self.0)))
            }
            _ => None,
        }
    }
}

/// Validates a string length range.
pub struct StringLength {
    pub min: usize,
    pub max: usize,
}

impl StringLength {
    /// Maximum length only.
    pub fn max(max: usize) -> Self {
        Self { min: 0, max }
    }

    pub fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for StringLength {
    fn name(&self) -> &'static str {
        "stringLength"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if value.is_null() {
            return None;
        }
        let Some(s) = value.as_str() else {
            return Some(ctx.fail("string value expected"));
        };
        if s.len() < self.min || s.len() > self.max {
            return Some(ctx.fail(format_args!(
                "must be between {} and {} characters",
                self.min, self.max
            )));
        }
        None
    }
}

/// Custom regex rule.
pub struct Pattern(pub Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(pattern)?))
    }
}

impl Rule for Pattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value.as_str() {
            Some(s) if !self.0.is_match(s) => {
                Some(ctx.fail("does not match the required pattern"))
            }
            _ => None,
        }
    }
}

/// Validates email format.
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value.as_str() {
            Some(s) if !EMAIL_REGEX.is_match(s) => Some(ctx.fail("must be a valid email")),
            _ => None,
        }
    }
}

/// Validates URL format.
pub struct Url;

impl Rule for Url {
    fn name(&self) -> &'static str {
        "url"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value.as_str() {
            Some(s) if !URL_REGEX.is_match(s) => Some(ctx.fail("must be a valid URL")),
            _ => None,
        }
    }
}

/// Validates phone number format.
pub struct Phone;

impl Rule for Phone {
    fn name(&self) -> &'static str {
        "phone"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value.as_str() {
            Some(s) if !PHONE_REGEX.is_match(s) => {
                Some(ctx.fail("must be a valid phone number"))
            }
            _ => None,
        }
    }
}

/// Validates a numeric value range.
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn min(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn max(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl Rule for Range {
    fn name(&self) -> &'static str {
        "range"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if value.is_null() {
            return None;
        }
        let Some(v) = value.as_f64() else {
            return Some(ctx.fail("numeric value expected"));
        };
        if let Some(min) = self.min {
            if v < min {
                return Some(ctx.fail(format_args!("must be at least {}", min)));
            }
        }
        if let Some(max) = self.max {
            if v > max {
                return Some(ctx.fail(format_args!("must be at most {}", max)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, check_named};

    #[test]
    fn test_required() {
        assert!(check(&Required, &Value::from("test")).is_none());
        assert!(check(&Required, &Value::Null).is_some());
        assert!(check(&Required, &Value::from("   ")).is_some());
    }

    #[test]
    fn test_min_length() {
        let rule = MinLength(5);
        assert!(check(&rule, &Value::from("hello")).is_none());
        assert!(check(&rule, &Value::from("hi")).is_some());
        assert!(check(&rule, &Value::Null).is_none());
    }

    #[test]
    fn test_max_length() {
        let rule = MaxLength(5);
        assert!(check(&rule, &Value::from("hello")).is_none());
        assert!(check(&rule, &Value::from("too long")).is_some());
    }

    #[test]
    fn test_length_counts_container_items() {
        let rule = MaxLength(2);
        let list = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert!(check(&rule, &list).is_some());
    }

    #[test]
    fn test_string_length_range() {
        let rule = StringLength::range(3, 5);
        assert!(check(&rule, &Value::from("test")).is_none());
        assert!(check(&rule, &Value::from("te")).is_some());
        assert!(check(&rule, &Value::from("too long")).is_some());
        assert!(check(&rule, &Value::Int(5)).is_some());
    }

    #[test]
    fn test_pattern() {
        let rule = Pattern::new(r"^\d{3}-\d{4}$").unwrap();
        assert!(check(&rule, &Value::from("123-4567")).is_none());
        assert!(check(&rule, &Value::from("1234567")).is_some());
    }

    #[test]
    fn test_email() {
        assert!(check(&Email, &Value::from("user@example.com")).is_none());
        assert!(check(&Email, &Value::from("user+tag@example.co.uk")).is_none());
        assert!(check(&Email, &Value::from("@example.com")).is_some());
        assert!(check(&Email, &Value::from("invalid")).is_some());
    }

    #[test]
    fn test_url() {
        assert!(check(&Url, &Value::from("https://example.com")).is_none());
        assert!(check(&Url, &Value::from("http://test.org/path")).is_none());
        assert!(check(&Url, &Value::from("not a url")).is_some());
    }

    #[test]
    fn test_phone() {
        assert!(check(&Phone, &Value::from("+49 30 1234567")).is_none());
        assert!(check(&Phone, &Value::from("030/1234567")).is_none());
        assert!(check(&Phone, &Value::from("call me")).is_some());
    }

    #[test]
    fn test_range() {
        let rule = Range::new(1.0, 5.0);
        assert!(check(&rule, &Value::Int(3)).is_none());
        assert!(check(&rule, &Value::Int(0)).is_some());
        assert!(check(&rule, &Value::Uint(6)).is_some());
        assert!(check(&rule, &Value::from("x")).is_some());
    }

    #[test]
    fn test_failure_message_is_member_prefixed() {
        let failure = check_named(&MinLength(5), &Value::from("x"), "Name").unwrap();
        assert_eq!(failure.message, "Name: must be at least 5 characters");
        assert_eq!(failure.members, vec!["Name".to_string()]);
    }
}
