// Value set and count rules

use trellis_core::{Failure, Rule, RuleContext, StaticValue, Value};

/// Validates that a value is one of the allowed values.
pub struct AllowedValues(pub Vec<StaticValue>);

impl AllowedValues {
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StaticValue>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl Rule for AllowedValues {
    fn name(&self) -> &'static str {
        "allowedValues"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if self.0.iter().any(|allowed| allowed.matches(value)) {
            None
        } else {
            Some(ctx.fail("value is not allowed"))
        }
    }
}

/// Validates that a value is none of the denied values.
pub struct DeniedValues(pub Vec<StaticValue>);

impl DeniedValues {
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StaticValue>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl Rule for DeniedValues {
    fn name(&self) -> &'static str {
        "deniedValues"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        if self.0.iter().any(|denied| denied.matches(value)) {
            Some(ctx.fail("value is denied"))
        } else {
            None
        }
    }
}

/// Validates the item count of a container (or any countable value).
/// Values without a count pass.
pub struct CountLimit {
    pub min: Option<u64>,
    pub max: u64,
}

impl CountLimit {
    pub fn max(max: u64) -> Self {
        Self { min: None, max }
    }

    pub fn range(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max,
        }
    }
}

impl Rule for CountLimit {
    fn name(&self) -> &'static str {
        "countLimit"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        let count = value.count()?;
        match self.min {
            Some(min) if count < min || count > self.max => Some(ctx.fail(format_args!(
                "count must be between {} and {} ({})",
                min, self.max, count
            ))),
            None if count > self.max => Some(ctx.fail(format_args!(
                "maximum count is {} ({})",
                self.max, count
            ))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check;

    #[test]
    fn test_allowed_values() {
        let rule = AllowedValues::new([1i64, 2i64]);
        assert!(check(&rule, &Value::Int(1)).is_none());
        assert!(check(&rule, &Value::Uint(2)).is_none());
        assert!(check(&rule, &Value::Int(3)).is_some());
        assert!(check(&rule, &Value::Null).is_some());
    }

    #[test]
    fn test_allowed_values_with_null() {
        let rule = AllowedValues(vec![StaticValue::Null, StaticValue::from("a")]);
        assert!(check(&rule, &Value::Null).is_none());
        assert!(check(&rule, &Value::from("a")).is_none());
        assert!(check(&rule, &Value::from("b")).is_some());
    }

    #[test]
    fn test_denied_values() {
        let rule = DeniedValues::new(["bad"]);
        assert!(check(&rule, &Value::from("good")).is_none());
        assert!(check(&rule, &Value::from("bad")).is_some());
        assert!(check(&rule, &Value::Null).is_none());
    }

    #[test]
    fn test_count_limit() {
        let rule = CountLimit::range(1, 2);
        let one = Value::List(vec![Value::Int(1)]);
        let three = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert!(check(&rule, &one).is_none());
        assert!(check(&rule, &three).is_some());
        // uncountable values pass
        assert!(check(&rule, &Value::from("xx")).is_none());
    }

    #[test]
    fn test_count_limit_max_only() {
        let rule = CountLimit::max(1);
        let two = Value::List(vec![Value::Int(1), Value::Int(2)]);
        let failure = check(&rule, &two).unwrap();
        assert!(failure.message.contains("maximum count is 1 (2)"));
    }
}
