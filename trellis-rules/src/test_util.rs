// Shared test helpers for rule unit tests

use once_cell::sync::Lazy;
use trellis_core::{
    Failure, MultiRule, PropertyError, PropertyValue, Rule, RuleContext, TypeMeta, Validatable,
    Value,
};

pub struct Dummy;

static DUMMY_META: Lazy<TypeMeta> = Lazy::new(|| TypeMeta::builder("Dummy").build());

impl Validatable for Dummy {
    fn type_meta(&self) -> &'static TypeMeta {
        &DUMMY_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        Err(PropertyError::unknown_property("Dummy", property))
    }
}

pub static DUMMY: Dummy = Dummy;

pub fn check(rule: &dyn Rule, value: &Value<'_>) -> Option<Failure> {
    check_named(rule, value, "Value")
}

pub fn check_named(rule: &dyn Rule, value: &Value<'_>, member: &str) -> Option<Failure> {
    let ctx = RuleContext {
        member: Some(member),
        property: member,
        object: &DUMMY,
    };
    rule.check(value, &ctx)
}

pub fn check_multi(rule: &dyn MultiRule, value: &Value<'_>) -> Vec<Failure> {
    let ctx = RuleContext {
        member: Some("Value"),
        property: "Value",
        object: &DUMMY,
    };
    rule.check_all(value, &ctx)
}
