// Rules conditioned on sibling properties

use trellis_core::{value_eq, Failure, Rule, RuleContext, StaticValue, Value};

/// Condition on another property of the validated object.
enum Trigger {
    /// Other property's value is (or, inverted, is not) in a value set.
    InValues {
        values: Vec<StaticValue>,
        if_not_in: bool,
    },
    /// Other property has a value.
    WhenSet,
    /// Other property is null.
    WhenUnset,
}

/// Requires a value when a condition on another property holds.
pub struct RequiredIf {
    property: &'static str,
    trigger: Trigger,
}

impl RequiredIf {
    /// Required when the other property's value is one of `values`.
    pub fn any_of<I, T>(property: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StaticValue>,
    {
        Self {
            property,
            trigger: Trigger::InValues {
                values: values.into_iter().map(Into::into).collect(),
                if_not_in: false,
            },
        }
    }

    /// Required when the other property's value is none of `values`.
    pub fn none_of<I, T>(property: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StaticValue>,
    {
        Self {
            property,
            trigger: Trigger::InValues {
                values: values.into_iter().map(Into::into).collect(),
                if_not_in: true,
            },
        }
    }

    /// Required when the other property has a value.
    pub fn when_set(property: &'static str) -> Self {
        Self {
            property,
            trigger: Trigger::WhenSet,
        }
    }

    /// Required when the other property is null.
    pub fn when_unset(property: &'static str) -> Self {
        Self {
            property,
            trigger: Trigger::WhenUnset,
        }
    }

    fn triggered(&self, other: &Value<'_>) -> bool {
        match &self.trigger {
            Trigger::InValues { values, if_not_in } => {
                *if_not_in != values.iter().any(|v| v.matches(other))
            }
            Trigger::WhenSet => !other.is_null(),
            Trigger::WhenUnset => other.is_null(),
        }
    }
}

impl Rule for RequiredIf {
    fn name(&self) -> &'static str {
        "requiredIf"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        let other = match ctx.object.read(self.property) {
            Ok(other) => other,
            Err(err) => return Some(ctx.fail_exception(err)),
        };
        if !self.triggered(&other) {
            return None;
        }
        match value {
            Value::Null => Some(ctx.fail(format_args!(
                "a value is required ({} condition)",
                self.property
            ))),
            Value::Str(s) if s.trim().is_empty() => Some(ctx.fail(format_args!(
                "should not be empty ({} condition)",
                self.property
            ))),
            _ => None,
        }
    }
}

/// Validates that a value equals another property's value.
pub struct Compare {
    pub property: &'static str,
}

impl Compare {
    pub fn to(property: &'static str) -> Self {
        Self { property }
    }
}

impl Rule for Compare {
    fn name(&self) -> &'static str {
        "compare"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        let other = match ctx.object.read(self.property) {
            Ok(other) => other,
            Err(err) => return Some(ctx.fail_exception(err)),
        };
        if value_eq(value, &other) {
            None
        } else {
            Some(ctx.fail(format_args!("must equal the value of {}", self.property)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use trellis_core::{PropertyError, PropertyValue, TypeMeta, Validatable};

    struct Account {
        kind: String,
        password: Option<String>,
        confirm: Option<String>,
    }

    static ACCOUNT_META: Lazy<TypeMeta> = Lazy::new(|| TypeMeta::builder("Account").build());

    impl Validatable for Account {
        fn type_meta(&self) -> &'static TypeMeta {
            &ACCOUNT_META
        }

        fn read(&self, property: &str) -> PropertyValue<'_> {
            match property {
                "Kind" => Ok(Value::from(&self.kind)),
                "Password" => Ok(Value::from_option(self.password.as_ref())),
                "Confirm" => Ok(Value::from_option(self.confirm.as_ref())),
                _ => Err(PropertyError::unknown_property("Account", property)),
            }
        }
    }

    fn ctx(account: &Account) -> RuleContext<'_> {
        RuleContext {
            member: Some("Password"),
            property: "Password",
            object: account,
        }
    }

    #[test]
    fn test_required_if_value_matches() {
        let account = Account {
            kind: "admin".into(),
            password: None,
            confirm: None,
        };
        let rule = RequiredIf::any_of("Kind", ["admin"]);
        assert!(rule.check(&Value::Null, &ctx(&account)).is_some());
        assert!(rule.check(&Value::from("secret"), &ctx(&account)).is_none());
    }

    #[test]
    fn test_required_if_not_triggered() {
        let account = Account {
            kind: "guest".into(),
            password: None,
            confirm: None,
        };
        let rule = RequiredIf::any_of("Kind", ["admin"]);
        assert!(rule.check(&Value::Null, &ctx(&account)).is_none());
    }

    #[test]
    fn test_required_if_inverted() {
        let account = Account {
            kind: "guest".into(),
            password: None,
            confirm: None,
        };
        let rule = RequiredIf::none_of("Kind", ["admin"]);
        assert!(rule.check(&Value::Null, &ctx(&account)).is_some());
    }

    #[test]
    fn test_required_if_when_set() {
        let account = Account {
            kind: "guest".into(),
            password: Some("secret".into()),
            confirm: None,
        };
        let rule = RequiredIf::when_set("Password");
        assert!(rule.check(&Value::Null, &ctx(&account)).is_some());
        let rule = RequiredIf::when_unset("Password");
        assert!(rule.check(&Value::Null, &ctx(&account)).is_none());
    }

    #[test]
    fn test_required_if_unknown_property_is_an_exception() {
        let account = Account {
            kind: "guest".into(),
            password: None,
            confirm: None,
        };
        let rule = RequiredIf::any_of("Missing", ["x"]);
        let failure = rule.check(&Value::Null, &ctx(&account)).unwrap();
        assert!(failure.is_exception());
    }

    #[test]
    fn test_compare() {
        let account = Account {
            kind: "guest".into(),
            password: Some("secret".into()),
            confirm: Some("secret".into()),
        };
        let rule = Compare::to("Confirm");
        assert!(rule.check(&Value::from("secret"), &ctx(&account)).is_none());
        assert!(rule.check(&Value::from("other"), &ctx(&account)).is_some());
    }
}
