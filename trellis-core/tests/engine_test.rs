//! Integration tests for the traversal engine.

use once_cell::sync::Lazy;
use std::cell::Cell;
use trellis_core::*;

// Small local rules, enough to drive the engine.

struct MaxLen(usize);

impl Rule for MaxLen {
    fn name(&self) -> &'static str {
        "maxLen"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        match value.as_str() {
            Some(s) if s.len() > self.0 => {
                Some(ctx.fail(format_args!("must be at most {} characters", self.0)))
            }
            _ => None,
        }
    }
}

struct AlwaysFails;

impl Rule for AlwaysFails {
    fn name(&self) -> &'static str {
        "alwaysFails"
    }

    fn check(&self, _value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        Some(ctx.fail("always fails"))
    }
}

struct NullFails;

impl Rule for NullFails {
    fn name(&self) -> &'static str {
        "nullFails"
    }

    fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
        value.is_null().then(|| ctx.fail("null item rejected"))
    }
}

// Fixture: an object with a list, a map and a nested object.

#[derive(Debug)]
struct Child {
    x: String,
}

static CHILD_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Child")
        .property(PropertyMeta::new("X").rule(MaxLen(4)))
        .build()
});

impl Validatable for Child {
    fn type_meta(&self) -> &'static TypeMeta {
        &CHILD_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "X" => Ok(Value::from(&self.x)),
            _ => Err(PropertyError::unknown_property("Child", property)),
        }
    }
}

#[derive(Debug)]
struct Parent {
    p: Vec<String>,
    d: Vec<(String, String)>,
    o: Child,
}

static PARENT_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Parent")
        .property(PropertyMeta::new("P").item_rule(MaxLen(4)))
        .property(PropertyMeta::new("D").item_rule(MaxLen(4)))
        .property(PropertyMeta::new("O"))
        .build()
});

impl Validatable for Parent {
    fn type_meta(&self) -> &'static TypeMeta {
        &PARENT_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "P" => Ok(Value::List(self.p.iter().map(Value::from).collect())),
            "D" => Ok(Value::Map(
                self.d
                    .iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            )),
            "O" => Ok(Value::Object(&self.o)),
            _ => Err(PropertyError::unknown_property("Parent", property)),
        }
    }
}

fn good_parent() -> Parent {
    Parent {
        p: vec!["ok".into(), "ok".into()],
        d: vec![("a".into(), "ok".into())],
        o: Child { x: "ok".into() },
    }
}

#[test]
fn valid_object_has_no_failures() {
    let mut failures = Vec::new();
    let ok = try_validate(&good_parent(), &mut failures, &ValidationOptions::default()).unwrap();
    assert!(ok);
    assert!(failures.is_empty());
}

#[test]
fn list_item_failure_path_is_one_based() {
    let mut parent = good_parent();
    parent.p = vec!["ok".into(), "too long value".into()];
    let mut failures = Vec::new();
    let ok = try_validate(&parent, &mut failures, &ValidationOptions::default()).unwrap();
    assert!(!ok);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["P[2]".to_string()]);
}

#[test]
fn map_value_failure_path_uses_value_counter() {
    let mut parent = good_parent();
    parent.d = vec![
        ("a".into(), "ok".into()),
        ("b".into(), "ok".into()),
        ("c".into(), "too long value".into()),
    ];
    let mut failures = Vec::new();
    try_validate(&parent, &mut failures, &ValidationOptions::default()).unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["D[value#3]".to_string()]);
}

#[test]
fn nested_object_failure_path_is_dotted() {
    let mut parent = good_parent();
    parent.o = Child {
        x: "too long value".into(),
    };
    let mut failures = Vec::new();
    try_validate(&parent, &mut failures, &ValidationOptions::default()).unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["O.X".to_string()]);
    assert!(failures[0].message.starts_with("O.X: "));
}

#[test]
fn validation_is_idempotent() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into(), "also too long".into()];
    parent.o = Child {
        x: "too long value".into(),
    };
    let mut first = Vec::new();
    let mut second = Vec::new();
    try_validate(&parent, &mut first, &ValidationOptions::default()).unwrap();
    try_validate(&parent, &mut second, &ValidationOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn member_filter_restricts_checked_properties() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into()];
    parent.o = Child {
        x: "too long value".into(),
    };
    let mut failures = Vec::new();
    let ok = try_validate_with(
        &parent,
        &mut failures,
        None,
        Some(&["O"]),
        false,
        &ValidationOptions::default(),
    )
    .unwrap();
    assert!(!ok);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["O.X".to_string()]);
}

// Nullability fixtures.

struct WithNulls {
    required: Option<String>,
    optional: Option<String>,
}

static WITH_NULLS_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("WithNulls")
        .property(PropertyMeta::new("Required"))
        .property(PropertyMeta::new("Optional").nullable())
        .build()
});

impl Validatable for WithNulls {
    fn type_meta(&self) -> &'static TypeMeta {
        &WITH_NULLS_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Required" => Ok(Value::from_option(self.required.as_ref())),
            "Optional" => Ok(Value::from_option(self.optional.as_ref())),
            _ => Err(PropertyError::unknown_property("WithNulls", property)),
        }
    }
}

#[test]
fn non_nullable_null_yields_exactly_one_failure() {
    let obj = WithNulls {
        required: None,
        optional: None,
    };
    let mut failures = Vec::new();
    let ok = try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap();
    assert!(!ok);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Required".to_string()]);
}

#[test]
fn nullable_null_yields_no_failures() {
    let obj = WithNulls {
        required: Some("x".into()),
        optional: None,
    };
    let mut failures = Vec::new();
    assert!(try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert!(failures.is_empty());
}

// Cycle fixture: a self-referencing node.

struct Cyclic {
    name: String,
    next: Cell<Option<&'static Cyclic>>,
}

static CYCLIC_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Cyclic")
        .property(PropertyMeta::new("Name").rule(MaxLen(8)))
        .property(PropertyMeta::new("Next").nullable())
        .build()
});

impl Validatable for Cyclic {
    fn type_meta(&self) -> &'static TypeMeta {
        &CYCLIC_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Name" => Ok(Value::from(&self.name)),
            "Next" => Ok(match self.next.get() {
                Some(next) => Value::Object(next),
                None => Value::Null,
            }),
            _ => Err(PropertyError::unknown_property("Cyclic", property)),
        }
    }
}

#[test]
fn self_reference_terminates_without_failures() {
    let node: &'static Cyclic = Box::leak(Box::new(Cyclic {
        name: "ok".into(),
        next: Cell::new(None),
    }));
    node.next.set(Some(node));
    let mut failures = Vec::new();
    let ok = try_validate(node, &mut failures, &ValidationOptions::default()).unwrap();
    assert!(ok);
    assert!(failures.is_empty());
}

#[test]
fn cycle_does_not_mask_real_failures() {
    let a: &'static Cyclic = Box::leak(Box::new(Cyclic {
        name: "much too long".into(),
        next: Cell::new(None),
    }));
    let b: &'static Cyclic = Box::leak(Box::new(Cyclic {
        name: "ok".into(),
        next: Cell::new(Some(a)),
    }));
    a.next.set(Some(b));
    let mut failures = Vec::new();
    let ok = try_validate(a, &mut failures, &ValidationOptions::default()).unwrap();
    assert!(!ok);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Name".to_string()]);
}

// Depth chain fixture.

struct Chain {
    next: Option<Box<Chain>>,
}

static CHAIN_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Chain")
        .property(PropertyMeta::new("Next").nullable())
        .build()
});

impl Validatable for Chain {
    fn type_meta(&self) -> &'static TypeMeta {
        &CHAIN_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Next" => Ok(match &self.next {
                Some(next) => Value::Object(next.as_ref()),
                None => Value::Null,
            }),
            _ => Err(PropertyError::unknown_property("Chain", property)),
        }
    }
}

fn chain(objects: usize) -> Chain {
    let mut node = Chain { next: None };
    for _ in 1..objects {
        node = Chain {
            next: Some(Box::new(node)),
        };
    }
    node
}

#[test]
fn depth_at_limit_passes() {
    let opts = ValidationOptions::new().with_max_depth(5);
    let mut failures = Vec::new();
    assert!(try_validate(&chain(5), &mut failures, &opts).unwrap());
    assert!(failures.is_empty());
}

#[test]
fn depth_beyond_limit_raises_regardless_of_throw_policy() {
    let opts = ValidationOptions::new().with_max_depth(5);
    let mut failures = Vec::new();
    let err = try_validate(&chain(6), &mut failures, &opts).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MaxDepthExceeded { depth: 6, max: 5 }
    ));
}

#[test]
fn zero_depth_limit_is_unlimited() {
    let opts = ValidationOptions::new().with_max_depth(0);
    let mut failures = Vec::new();
    assert!(try_validate(&chain(100), &mut failures, &opts).unwrap());
}

// Error cap fixture: many independently failing properties.

struct ManyBad;

static MANY_BAD_META: Lazy<TypeMeta> = Lazy::new(|| {
    let mut builder = TypeMeta::builder("ManyBad");
    for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        builder = builder.property(PropertyMeta::new(name).rule(AlwaysFails));
    }
    builder.build()
});

impl Validatable for ManyBad {
    fn type_meta(&self) -> &'static TypeMeta {
        &MANY_BAD_META
    }

    fn read(&self, _property: &str) -> PropertyValue<'_> {
        Ok(Value::from("x"))
    }
}

#[test]
fn error_cap_bounds_the_failure_list_exactly() {
    let opts = ValidationOptions::new().with_max_errors(3);
    let mut failures = Vec::new();
    let ok = try_validate(&ManyBad, &mut failures, &opts).unwrap();
    assert!(!ok);
    assert_eq!(failures.len(), 3);
}

#[test]
fn zero_error_cap_is_unlimited() {
    let opts = ValidationOptions::new().with_max_errors(0);
    let mut failures = Vec::new();
    try_validate(&ManyBad, &mut failures, &opts).unwrap();
    assert_eq!(failures.len(), 8);
}

// Enum legality.

static FLAG_ENUM: EnumMeta = EnumMeta {
    name: "FlagEnum",
    flags: true,
    members: &[("A", 1), ("B", 2)],
};

static PLAIN_ENUM: EnumMeta = EnumMeta {
    name: "PlainEnum",
    flags: false,
    members: &[("Zero", 0), ("One", 1)],
};

struct WithEnums {
    flagged: i128,
    plain: i128,
}

static WITH_ENUMS_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("WithEnums")
        .property(PropertyMeta::new("Flagged"))
        .property(PropertyMeta::new("Plain"))
        .build()
});

impl Validatable for WithEnums {
    fn type_meta(&self) -> &'static TypeMeta {
        &WITH_ENUMS_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Flagged" => Ok(Value::Enum(EnumValue::new(&FLAG_ENUM, self.flagged))),
            "Plain" => Ok(Value::Enum(EnumValue::new(&PLAIN_ENUM, self.plain))),
            _ => Err(PropertyError::unknown_property("WithEnums", property)),
        }
    }
}

#[test]
fn defined_enum_values_pass() {
    let obj = WithEnums {
        flagged: 3, // A|B
        plain: 1,
    };
    let mut failures = Vec::new();
    assert!(try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
}

#[test]
fn undefined_flag_bits_are_reported() {
    let obj = WithEnums {
        flagged: 4,
        plain: 0,
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Flagged".to_string()]);
    assert!(failures[0].message.contains("undefined flag(s) 4"));
}

#[test]
fn undefined_plain_enum_value_is_reported() {
    let obj = WithEnums {
        flagged: 1,
        plain: 2,
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures[0].members, vec!["Plain".to_string()]);
    assert!(failures[0].message.contains("undefined enumeration value 2"));
}

// Item suppression fixtures.

struct Suppressed {
    items: Vec<Option<String>>,
    keep_nulls: bool,
}

static SUPPRESSED_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Suppressed")
        .property(
            PropertyMeta::new("Items")
                .item_rule(MaxLen(2))
                .no_item_validation(0),
        )
        .property(
            PropertyMeta::new("SoftItems")
                .item_rule(MaxLen(2))
                .no_item_validation_keep_nulls(0),
        )
        .build()
});

impl Validatable for Suppressed {
    fn type_meta(&self) -> &'static TypeMeta {
        &SUPPRESSED_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        let list = Value::List(
            self.items
                .iter()
                .map(|i| Value::from_option(i.as_ref()))
                .collect(),
        );
        match property {
            "Items" => Ok(if self.keep_nulls { Value::List(Vec::new()) } else { list }),
            "SoftItems" => Ok(if self.keep_nulls { list } else { Value::List(Vec::new()) }),
            _ => Err(PropertyError::unknown_property("Suppressed", property)),
        }
    }
}

#[test]
fn full_suppression_skips_rules_and_null_checks() {
    let obj = Suppressed {
        items: vec![Some("too long".into()), None],
        keep_nulls: false,
    };
    let mut failures = Vec::new();
    assert!(try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert!(failures.is_empty());
}

#[test]
fn soft_suppression_still_reports_null_items() {
    let obj = Suppressed {
        items: vec![Some("too long".into()), None],
        keep_nulls: true,
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["SoftItems[2]".to_string()]);
}

// Nested containers: item rules scoped by array level.

struct Deep {
    grid: Vec<Vec<String>>,
}

static DEEP_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("Deep")
        .property(PropertyMeta::new("Grid").item_rule_at(1, MaxLen(5)))
        .build()
});

impl Validatable for Deep {
    fn type_meta(&self) -> &'static TypeMeta {
        &DEEP_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Grid" => Ok(Value::List(
                self.grid
                    .iter()
                    .map(|row| Value::List(row.iter().map(Value::from).collect()))
                    .collect(),
            )),
            _ => Err(PropertyError::unknown_property("Deep", property)),
        }
    }
}

#[test]
fn nested_container_rules_fire_at_their_array_level() {
    let obj = Deep {
        grid: vec![
            vec!["ok".into(), "fine".into()],
            vec!["ok".into(), "too long value".into()],
        ],
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Grid[2][2]".to_string()]);
}

// Null items with item rules that target null.

struct NullableItems {
    items: Vec<Option<String>>,
}

static NULLABLE_ITEMS_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("NullableItems")
        .property(
            PropertyMeta::new("Items")
                .item_nullable(0)
                .item_rule(NullFails),
        )
        .build()
});

impl Validatable for NullableItems {
    fn type_meta(&self) -> &'static TypeMeta {
        &NULLABLE_ITEMS_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Items" => Ok(Value::List(
                self.items
                    .iter()
                    .map(|i| Value::from_option(i.as_ref()))
                    .collect(),
            )),
            _ => Err(PropertyError::unknown_property("NullableItems", property)),
        }
    }
}

#[test]
fn item_rules_still_see_allowed_null_items() {
    let obj = NullableItems {
        items: vec![Some("a".into()), None],
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Items[2]".to_string()]);
    assert!(failures[0].message.contains("null item rejected"));
}

// Getter error policy.

struct BadGetter {
    tolerate: bool,
}

static BAD_GETTER_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("BadGetter")
        .property(PropertyMeta::new("Computed").read_only())
        .property(PropertyMeta::new("Stored"))
        .build()
});

impl Validatable for BadGetter {
    fn type_meta(&self) -> &'static TypeMeta {
        &BAD_GETTER_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Computed" => Err(PropertyError::new("computed value unavailable")),
            "Stored" => {
                if self.tolerate {
                    Ok(Value::from("ok"))
                } else {
                    Err(PropertyError::new("stored value unavailable"))
                }
            }
            _ => Err(PropertyError::unknown_property("BadGetter", property)),
        }
    }
}

#[test]
fn failing_reader_of_read_only_property_is_tolerated() {
    let obj = BadGetter { tolerate: true };
    let mut failures = Vec::new();
    assert!(try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert!(failures.is_empty());
}

#[test]
fn failing_reader_of_writable_property_is_a_failure() {
    let obj = BadGetter { tolerate: false };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Stored".to_string()]);
    assert!(failures[0].is_exception());
    let report = ValidationReport::from_failures(false, failures);
    assert!(report.has_validation_exception());
}

#[test]
fn strict_getter_policy_reports_read_only_failures_too() {
    let obj = BadGetter { tolerate: true };
    let opts = ValidationOptions::new().with_ignore_getter_errors(false);
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &opts).unwrap());
    assert_eq!(failures[0].members, vec!["Computed".to_string()]);
}

// Throw policy.

#[test]
fn throwing_entry_point_carries_all_failures() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into(), "also too long".into()];
    let err = validate(&parent, &ValidationOptions::default()).unwrap_err();
    match err {
        ValidationError::Invalid { failures, summary } => {
            assert_eq!(failures.len(), 2);
            assert_eq!(failures[0].members, vec!["P[1]".to_string()]);
            assert_eq!(failures[1].members, vec!["P[2]".to_string()]);
            assert!(summary.contains("failed with 2 error(s)"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_nested_object_short_circuits_under_throw_policy() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into()];
    parent.o = Child {
        x: "too long value".into(),
    };
    // the nested frame finishes its own traversal, then raises; the
    // outer loop never reaches finalization
    let err = validate(&parent, &ValidationOptions::default()).unwrap_err();
    match err {
        ValidationError::Invalid { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].members, vec!["O.X".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn throwing_entry_point_returns_the_object_when_valid() {
    let parent = good_parent();
    let validated = validate(&parent, &ValidationOptions::default()).unwrap();
    assert_eq!(validated.p.len(), 2);
}

#[test]
fn nullable_entry_point_accepts_none() {
    let mut failures = Vec::new();
    assert!(try_validate_nullable(None, &mut failures, &ValidationOptions::default()).unwrap());
    assert!(failures.is_empty());
}

// Self-validation capability.

struct SelfChecking {
    inner_ok: bool,
}

static SELF_CHECKING_META: Lazy<TypeMeta> =
    Lazy::new(|| TypeMeta::builder("SelfChecking").build());

impl Validatable for SelfChecking {
    fn type_meta(&self) -> &'static TypeMeta {
        &SELF_CHECKING_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        Err(PropertyError::unknown_property("SelfChecking", property))
    }

    fn extra_validation(&self) -> Vec<Failure> {
        if self.inner_ok {
            Vec::new()
        } else {
            vec![Failure::with_members(
                "custom check failed",
                vec!["Inner".into()],
            )]
        }
    }
}

struct HasSelfChecking {
    child: SelfChecking,
}

static HAS_SELF_CHECKING_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("HasSelfChecking")
        .property(PropertyMeta::new("Child"))
        .build()
});

impl Validatable for HasSelfChecking {
    fn type_meta(&self) -> &'static TypeMeta {
        &HAS_SELF_CHECKING_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Child" => Ok(Value::Object(&self.child)),
            _ => Err(PropertyError::unknown_property("HasSelfChecking", property)),
        }
    }
}

#[test]
fn extra_validation_failures_are_path_qualified() {
    let obj = HasSelfChecking {
        child: SelfChecking { inner_ok: false },
    };
    let mut failures = Vec::new();
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["Child.Inner".to_string()]);
}

// Type allow/deny lists and the eligibility override.

#[test]
fn denied_type_is_not_deep_validated() {
    let mut parent = good_parent();
    parent.o = Child {
        x: "too long value".into(),
    };
    let opts = ValidationOptions::new().deny_type("Child");
    let mut failures = Vec::new();
    assert!(try_validate(&parent, &mut failures, &opts).unwrap());
    assert!(failures.is_empty());
}

#[test]
fn forced_type_wins_over_denied() {
    let mut parent = good_parent();
    parent.o = Child {
        x: "too long value".into(),
    };
    let opts = ValidationOptions::new().deny_type("Child").force_type("Child");
    let mut failures = Vec::new();
    assert!(!try_validate(&parent, &mut failures, &opts).unwrap());
    assert_eq!(failures[0].members, vec!["O.X".to_string()]);
}

#[test]
fn eligibility_hook_can_rescue_a_denied_type() {
    let mut parent = good_parent();
    parent.o = Child {
        x: "too long value".into(),
    };
    let opts = ValidationOptions::new()
        .deny_type("Child")
        .with_type_eligibility(|meta| (meta.name == "Child").then_some(true));
    let mut failures = Vec::new();
    assert!(!try_validate(&parent, &mut failures, &opts).unwrap());
}

// Hooks.

#[test]
fn pre_validation_hook_can_cancel_everything() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into()];
    let opts = ValidationOptions::new().on_validation(|event| {
        if event.depth == 1 {
            HookOutcome::Cancel
        } else {
            HookOutcome::Continue
        }
    });
    let mut failures = Vec::new();
    assert!(try_validate(&parent, &mut failures, &opts).unwrap());
    assert!(failures.is_empty());
}

#[test]
fn pre_property_hook_can_skip_a_property() {
    let mut parent = good_parent();
    parent.p = vec!["too long value".into()];
    parent.o = Child {
        x: "too long value".into(),
    };
    let opts = ValidationOptions::new().on_property(|event| {
        if event.property == Some("P") {
            HookOutcome::Cancel
        } else {
            HookOutcome::Continue
        }
    });
    let mut failures = Vec::new();
    assert!(!try_validate(&parent, &mut failures, &opts).unwrap());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].members, vec!["O.X".to_string()]);
}

#[test]
fn property_failed_hook_can_stop_the_loop() {
    let opts = ValidationOptions::new().on_property_failed(|_| HookOutcome::Cancel);
    let mut failures = Vec::new();
    assert!(!try_validate(&ManyBad, &mut failures, &opts).unwrap());
    // the loop stops after the first failing property
    assert_eq!(failures.len(), 1);
}

#[test]
fn fail_outcome_marks_the_object_invalid_without_failures() {
    let parent = good_parent();
    let opts = ValidationOptions::new().on_validation(|_| HookOutcome::Fail);
    let mut failures = Vec::new();
    assert!(!try_validate(&parent, &mut failures, &opts).unwrap());
    assert!(failures.is_empty());
}

// Skip-checks properties still deep-validate.

struct SkipChecked {
    child: Option<Child>,
}

static SKIP_CHECKED_META: Lazy<TypeMeta> = Lazy::new(|| {
    TypeMeta::builder("SkipChecked")
        .property(PropertyMeta::new("Child").skip_checks().rule(AlwaysFails))
        .build()
});

impl Validatable for SkipChecked {
    fn type_meta(&self) -> &'static TypeMeta {
        &SKIP_CHECKED_META
    }

    fn read(&self, property: &str) -> PropertyValue<'_> {
        match property {
            "Child" => Ok(match &self.child {
                Some(child) => Value::Object(child),
                None => Value::Null,
            }),
            _ => Err(PropertyError::unknown_property("SkipChecked", property)),
        }
    }
}

#[test]
fn skip_checks_suppresses_rules_and_null_check_but_not_deep_validation() {
    let mut failures = Vec::new();
    let ok = try_validate(
        &SkipChecked { child: None },
        &mut failures,
        &ValidationOptions::default(),
    )
    .unwrap();
    assert!(ok);
    assert!(failures.is_empty());

    let obj = SkipChecked {
        child: Some(Child {
            x: "too long value".into(),
        }),
    };
    assert!(!try_validate(&obj, &mut failures, &ValidationOptions::default()).unwrap());
    assert_eq!(failures[0].members, vec!["Child.X".to_string()]);
}
