// Rule capability traits

use crate::failure::Failure;
use crate::validatable::Validatable;
use crate::value::Value;
use std::fmt;

/// Context handed to rules for a single value check.
pub struct RuleContext<'a> {
    /// Qualified member path of the value under validation, if any.
    pub member: Option<&'a str>,
    /// Short name of the owning property.
    pub property: &'a str,
    /// Object that owns the property (for rules that inspect sibling
    /// properties).
    pub object: &'a dyn Validatable,
}

impl RuleContext<'_> {
    /// Create a failure for the value under validation, member-qualified
    /// when a member path is known.
    pub fn fail(&self, message: impl fmt::Display) -> Failure {
        match self.member {
            Some(member) => Failure::for_member(member, message),
            None => Failure::new(message.to_string()),
        }
    }

    /// Create a failure wrapping a property-local error.
    pub fn fail_exception(&self, error: impl fmt::Display) -> Failure {
        match self.member {
            Some(member) => Failure::exception(member, error),
            None => Failure::new(format!(
                "{}{}",
                crate::failure::VALIDATION_EXCEPTION_PREFIX,
                error
            )),
        }
    }
}

/// A declarative check producing at most one failure for a value.
///
/// Rules must tolerate any [`Value`] variant: a rule for strings passes
/// `Null` through (nullability is the engine's job) and fails values of
/// an unexpected runtime type with a "... expected" message.
pub trait Rule: Send + Sync {
    /// Rule name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Check a value, returning a failure if it is invalid.
    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure>;
}

/// A check producing zero or more failures for a value.
pub trait MultiRule: Send + Sync {
    /// Rule name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Check a value, returning all failures.
    fn check_all(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<Failure>;
}
